//! Stylistic per-pixel filters used by the face and extension views.

use crate::shared::channel::ChannelSelector;
use crate::shared::frame::Frame;

use super::color_space::to_byte;
use super::threshold::threshold;

/// Gray level at or above which the edge filter paints white.
const EDGE_LEVEL: u8 = 128;

/// Grayscale as the plain mean of R, G and B (no luma weighting).
pub fn mean_grayscale(frame: &Frame) -> Frame {
    frame.map_pixels(|[r, g, b]| {
        let gray = to_byte((r as f64 + g as f64 + b as f64) / 3.0);
        [gray, gray, gray]
    })
}

/// Rec. 709 luma, the weighting used by the extension view's grayscale and
/// edge filters.
pub fn luma_grayscale(frame: &Frame) -> Frame {
    frame.map_pixels(|[r, g, b]| {
        let gray = to_byte(0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64);
        [gray, gray, gray]
    })
}

/// Classic sepia tone matrix, saturated at 255.
pub fn sepia(frame: &Frame) -> Frame {
    frame.map_pixels(|[r, g, b]| {
        let (r, g, b) = (r as f64, g as f64, b as f64);
        [
            to_byte(r * 0.393 + g * 0.769 + b * 0.189),
            to_byte(r * 0.349 + g * 0.686 + b * 0.168),
            to_byte(r * 0.272 + g * 0.534 + b * 0.131),
        ]
    })
}

pub fn invert(frame: &Frame) -> Frame {
    frame.map_pixels(|[r, g, b]| [255 - r, 255 - g, 255 - b])
}

/// Two-tone sketch: luma gray binarized at half intensity.
pub fn edge(frame: &Frame) -> Frame {
    threshold(&luma_grayscale(frame), EDGE_LEVEL - 1, ChannelSelector::All)
}
