use crate::compositing::domain::filter_mode::FilterMode;
use crate::compositing::domain::sticker::StickerKind;
use crate::shared::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, DETECTOR_HEIGHT, DETECTOR_WIDTH};
use crate::shared::frame::{Frame, OPAQUE};
use crate::shared::region::{FaceBox, Rect};
use crate::transform::resize::resize;

use super::filter_factory::create_extension_filter;
use super::sticker_store::StickerStore;

/// Where a sticker was placed on the extension canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StickerPlacement {
    pub kind: StickerKind,
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExtensionView {
    pub frame: Frame,
    pub sticker: Option<StickerPlacement>,
}

/// Renders the enlarged extension view: the whole frame run through the
/// extension filter, scaled to the canvas, with a face-anchored sticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtensionRenderer {
    canvas_size: (u32, u32),
    detector_size: (u32, u32),
}

impl Default for ExtensionRenderer {
    fn default() -> Self {
        Self::new((CANVAS_WIDTH, CANVAS_HEIGHT))
    }
}

impl ExtensionRenderer {
    pub fn new(canvas_size: (u32, u32)) -> Self {
        Self {
            canvas_size,
            detector_size: (DETECTOR_WIDTH, DETECTOR_HEIGHT),
        }
    }

    pub fn with_detector_size(mut self, width: u32, height: u32) -> Self {
        self.detector_size = (width, height);
        self
    }

    /// `hsv` must match `frame`'s resolution; it backs the HSV overlay mode.
    pub fn render(
        &self,
        frame: &Frame,
        hsv: &Frame,
        mode: FilterMode,
        face: Option<&FaceBox>,
        stickers: &StickerStore,
    ) -> ExtensionView {
        let filtered = create_extension_filter(mode, hsv).apply(frame, &frame.bounds());
        let (cw, ch) = self.canvas_size;
        let mut canvas = resize(&filtered, cw, ch);

        let placement = match (mode.sticker(), face) {
            (Some(kind), Some(face)) => Some(StickerPlacement {
                kind,
                rect: kind.placement(&face.to_canvas(self.detector_size, self.canvas_size)),
            }),
            _ => None,
        };

        if let Some(p) = &placement {
            match stickers.get(p.kind) {
                Some(image) => draw_sticker(&mut canvas, image, &p.rect),
                None => log::debug!("No image loaded for sticker {}", p.kind),
            }
        }

        ExtensionView {
            frame: canvas,
            sticker: placement,
        }
    }
}

/// Alpha-blends `sticker`, stretched over `rect`, onto `canvas`.
///
/// Only the part of `rect` inside the canvas is visited; each visible pixel
/// samples the nearest sticker texel, so the work is bounded by the canvas
/// no matter how large the placement is.
fn draw_sticker(canvas: &mut Frame, sticker: &Frame, rect: &Rect) {
    if sticker.is_empty() || !(rect.width >= 1.0 && rect.height >= 1.0) {
        return;
    }
    let (cw, ch) = (canvas.width() as f64, canvas.height() as f64);
    let x0 = rect.x.round().clamp(0.0, cw) as u32;
    let y0 = rect.y.round().clamp(0.0, ch) as u32;
    let x1 = (rect.x + rect.width).round().clamp(0.0, cw) as u32;
    let y1 = (rect.y + rect.height).round().clamp(0.0, ch) as u32;
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let (sw, sh) = (sticker.width(), sticker.height());
    for y in y0..y1 {
        let v = texel(y, rect.y, rect.height, sh);
        for x in x0..x1 {
            let u = texel(x, rect.x, rect.width, sw);
            let blended = blend_pixel(sticker.pixel(u, v), canvas.pixel(x, y));
            canvas.set_pixel(x, y, blended);
        }
    }
}

/// Sticker coordinate under canvas coordinate `pos` for a span starting at
/// `start` with length `len`.
fn texel(pos: u32, start: f64, len: f64, size: u32) -> u32 {
    let t = (pos as f64 + 0.5 - start) / len;
    ((t * size as f64).floor().max(0.0) as u32).min(size - 1)
}

fn blend_pixel(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let alpha = src[3] as u32;
    let mix = |s: u8, d: u8| ((s as u32 * alpha + d as u32 * (255 - alpha) + 127) / 255) as u8;
    [mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2]), OPAQUE]
}
