use serde::{Deserialize, Serialize};

/// Integer rectangle in display (frame) coordinates.
///
/// May extend past the frame; callers clamp with [`Region::clamped`] before
/// touching pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection with a `frame_width` × `frame_height` frame, or `None`
    /// when nothing of the region is visible.
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Option<Region> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = (self.x.saturating_add(self.width)).min(frame_width as i32);
        let y2 = (self.y.saturating_add(self.height)).min(frame_height as i32);
        let clamped = Region::new(x1, y1, x2 - x1, y2 - y1);
        (!clamped.is_empty()).then_some(clamped)
    }
}

/// Real-valued rectangle on an overlay canvas (sticker placement).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Face bounding box in detector-space coordinates.
///
/// The detector works on a fixed low-resolution buffer; boxes must be
/// rescaled before they are used against display-resolution frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Scales into display space, flooring each coordinate.
    pub fn to_display(&self, detector_size: (u32, u32), display_size: (u32, u32)) -> Region {
        let (sx, sy) = scale_factors(detector_size, display_size);
        Region::new(
            (self.x as f64 * sx).floor() as i32,
            (self.y as f64 * sy).floor() as i32,
            (self.width as f64 * sx).floor() as i32,
            (self.height as f64 * sy).floor() as i32,
        )
    }

    /// Scales onto an overlay canvas without rounding.
    pub fn to_canvas(&self, detector_size: (u32, u32), canvas_size: (u32, u32)) -> Rect {
        let (sx, sy) = scale_factors(detector_size, canvas_size);
        Rect::new(
            self.x as f64 * sx,
            self.y as f64 * sy,
            self.width as f64 * sx,
            self.height as f64 * sy,
        )
    }
}

fn scale_factors(from: (u32, u32), to: (u32, u32)) -> (f64, f64) {
    let sx = to.0 as f64 / from.0.max(1) as f64;
    let sy = to.1 as f64 / from.1.max(1) as f64;
    (sx, sy)
}
