use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceBox;

/// Reports the same box (or none) on every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedFaceDetector {
    face: Option<FaceBox>,
}

impl FixedFaceDetector {
    pub fn new(face: Option<FaceBox>) -> Self {
        Self { face }
    }
}

impl FaceDetector for FixedFaceDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        Ok(self.face.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_box_every_frame() {
        let face = FaceBox::new(10, 10, 20, 20);
        let mut detector = FixedFaceDetector::new(Some(face));
        for i in 0..3 {
            let frame = Frame::filled(4, 4, [0, 0, 0, 255], i);
            assert_eq!(detector.detect(&frame).unwrap(), vec![face]);
        }
    }

    #[test]
    fn test_default_finds_nothing() {
        let frame = Frame::filled(4, 4, [0, 0, 0, 255], 0);
        assert!(FixedFaceDetector::default().detect(&frame).unwrap().is_empty());
    }
}
