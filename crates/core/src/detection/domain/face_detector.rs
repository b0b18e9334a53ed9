use crate::shared::frame::Frame;
use crate::shared::region::FaceBox;

/// Domain interface for face detection.
///
/// Receives a detector-space frame and returns boxes in the same space; the
/// first box is treated as the face. Implementations may be stateful, hence
/// `&mut self`. Errors are tolerated by the caller and read as "no face".
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>>;
}
