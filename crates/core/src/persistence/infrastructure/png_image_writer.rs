use std::path::Path;

use crate::persistence::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;
use crate::transform::resize::{resize, to_rgba_image};

/// Saves frames as RGBA images through the `image` crate.
///
/// The format follows the path's extension; parent directories are created
/// on demand.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngImageWriter;

impl PngImageWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ImageWriter for PngImageWriter {
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        size: Option<(u32, u32)>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let scaled;
        let frame = match size {
            Some((w, h)) => {
                scaled = resize(frame, w, h);
                &scaled
            }
            None => frame,
        };
        let img = to_rgba_image(frame).ok_or("Frame data does not match its dimensions")?;
        img.save(path)?;
        log::debug!("Wrote {}x{} image to {}", frame.width(), frame.height(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/tick/out.png");
        let frame = Frame::filled(40, 30, [50, 100, 200, 255], 0);
        PngImageWriter::new().write(&path, &frame, None).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_round_trip_preserves_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let frame = Frame::filled(20, 10, [50, 100, 200, 255], 0);
        PngImageWriter::new().write(&path, &frame, None).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (20, 10));
        assert_eq!(img.get_pixel(3, 3).0, [50, 100, 200, 255]);
    }

    #[test]
    fn test_write_with_resize() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        let frame = Frame::filled(160, 120, [128, 128, 128, 255], 0);
        PngImageWriter::new()
            .write(&path, &frame, Some((640, 480)))
            .unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (640, 480));
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let frame = Frame::filled(2, 2, [0, 0, 0, 255], 0);
        assert!(PngImageWriter::new()
            .write(&blocker.join("out.png"), &frame, None)
            .is_err());
    }
}
