//! Per-pixel color space conversions.
//!
//! Every function is total over a well-formed frame and returns a new,
//! fully opaque frame of the same size.

use crate::shared::channel::ColorChannel;
use crate::shared::constants::GRAYSCALE_BOOST;
use crate::shared::frame::Frame;

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// BT.601 luma of an RGB triple, unclamped.
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

/// Luma boosted by [`GRAYSCALE_BOOST`], saturated at 255 and replicated into
/// all three color channels.
pub fn grayscale_boost(frame: &Frame) -> Frame {
    frame.map_pixels(|[r, g, b]| {
        let gray = to_byte(luma(r, g, b) * GRAYSCALE_BOOST);
        [gray, gray, gray]
    })
}

/// Keeps only `channel`; the other two color channels are zeroed.
pub fn isolate_channel(frame: &Frame, channel: ColorChannel) -> Frame {
    let keep = channel.offset();
    frame.map_pixels(|px| {
        let mut out = [0u8; 3];
        out[keep] = px[keep];
        out
    })
}

/// Encodes hue, saturation and value, each scaled to `0..=255`, into the
/// red, green and blue channels.
///
/// This is a visualization encoding; it is not meant to be converted back.
pub fn to_hsv(frame: &Frame) -> Frame {
    frame.map_pixels(|[r, g, b]| {
        let (h, s, v) = rgb_to_hsv(r, g, b);
        [to_byte(h * 255.0), to_byte(s * 255.0), to_byte(v * 255.0)]
    })
}

/// Full-range BT.601 YCbCr stored as (Y, Cb, Cr) in (R, G, B).
///
/// Components are clamped to `0..=255`.
pub fn to_ycbcr(frame: &Frame) -> Frame {
    frame.map_pixels(|[r, g, b]| {
        let (rf, gf, bf) = (r as f64, g as f64, b as f64);
        let y = luma(r, g, b);
        let cb = 128.0 - 0.168736 * rf - 0.331264 * gf + 0.5 * bf;
        let cr = 128.0 + 0.5 * rf - 0.418688 * gf - 0.081312 * bf;
        [to_byte(y), to_byte(cb), to_byte(cr)]
    })
}

/// RGB to normalized HSV, each component in `[0, 1]`.
///
/// Grays (max == min) get hue 0. Otherwise the hue branch follows whichever
/// channel holds the maximum, checking red, then green, then blue.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { delta / max };
    let h = if max == min {
        0.0
    } else if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (h / 6.0, s, max)
}

/// Rounds to the nearest byte, saturating at both ends.
pub(crate) fn to_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
