use std::path::Path;

use crate::capture::domain::capture_source::CaptureSource;
use crate::shared::constants::{DETECTOR_HEIGHT, DETECTOR_WIDTH};
use crate::shared::frame::Frame;
use crate::transform::resize::{from_rgba_image, resize};

/// Serves one still image as a never-changing live feed.
///
/// The image is decoded once and resized to the capture resolution.
pub struct ImageFileSource {
    frame: Frame,
}

impl ImageFileSource {
    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::open_with_size(path, DETECTOR_WIDTH, DETECTOR_HEIGHT)
    }

    pub fn open_with_size(
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let img = image::open(path)
            .map_err(|e| format!("Failed to open image {}: {e}", path.display()))?
            .to_rgba8();
        log::info!(
            "Opened {} ({}x{}), capturing at {}x{}",
            path.display(),
            img.width(),
            img.height(),
            width,
            height
        );
        let frame = resize(&from_rgba_image(img, 0), width, height);
        Ok(Self::from_frame(frame))
    }

    pub fn from_frame(frame: Frame) -> Self {
        Self { frame }
    }
}

impl CaptureSource for ImageFileSource {
    fn current_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        Ok(self.frame.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_is_resized_to_capture_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");
        image::RgbaImage::from_pixel(640, 480, image::Rgba([10, 200, 30, 255]))
            .save(&path)
            .unwrap();

        let mut source = ImageFileSource::open(&path).unwrap();
        let frame = source.current_frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (160, 120));
        let [r, g, b, a] = frame.pixel(80, 60);
        assert!((r as i32 - 10).abs() <= 1);
        assert!((g as i32 - 200).abs() <= 1);
        assert!((b as i32 - 30).abs() <= 1);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_same_frame_every_poll() {
        let frame = Frame::filled(4, 4, [1, 2, 3, 255], 0);
        let mut source = ImageFileSource::from_frame(frame.clone());
        assert_eq!(source.current_frame().unwrap(), frame);
        assert_eq!(source.current_frame().unwrap(), frame);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ImageFileSource::open(&dir.path().join("missing.png")).is_err());
    }
}
