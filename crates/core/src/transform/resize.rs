use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::shared::frame::Frame;

/// Resamples `frame` to `width` × `height` with a triangle (bilinear) filter.
///
/// Returns a plain copy when the size already matches.
pub fn resize(frame: &Frame, width: u32, height: u32) -> Frame {
    if frame.width() == width && frame.height() == height {
        return frame.clone();
    }
    if frame.is_empty() || width == 0 || height == 0 {
        return Frame::filled(width, height, [0, 0, 0, 255], frame.index());
    }
    let Some(img) = to_rgba_image(frame) else {
        return Frame::filled(width, height, [0, 0, 0, 255], frame.index());
    };
    let resized = imageops::resize(&img, width, height, FilterType::Triangle);
    Frame::new(resized.into_raw(), width, height, frame.index())
}

/// Copies the frame's pixels into an `image` buffer.
pub fn to_rgba_image(frame: &Frame) -> Option<RgbaImage> {
    RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
}

pub fn from_rgba_image(img: RgbaImage, index: usize) -> Frame {
    let (width, height) = img.dimensions();
    Frame::new(img.into_raw(), width, height, index)
}
