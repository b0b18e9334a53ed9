use ndarray::{s, ArrayView1};

use crate::shared::frame::{Frame, OPAQUE};

/// Mosaic filter: each `block_size` × `block_size` tile takes the color of
/// the pixel at its center.
///
/// Tiles start at (0, 0) and are clipped at the right and bottom edges. The
/// sample point is `top_left + block_size / 2`, clamped into the frame, so a
/// partial border tile samples its last valid row/column. A `block_size` of
/// zero is treated as one.
pub fn pixelate(frame: &Frame, block_size: u32) -> Frame {
    let block = block_size.max(1) as usize;
    let (width, height) = (frame.width() as usize, frame.height() as usize);
    let mut out = Frame::filled(frame.width(), frame.height(), [0, 0, 0, OPAQUE], frame.index());
    if frame.is_empty() {
        return out;
    }

    let src = frame.as_ndarray();
    let mut dst = out.as_ndarray_mut();
    for tile_y in (0..height).step_by(block) {
        for tile_x in (0..width).step_by(block) {
            let cx = (tile_x + block / 2).min(width - 1);
            let cy = (tile_y + block / 2).min(height - 1);
            let color = [src[[cy, cx, 0]], src[[cy, cx, 1]], src[[cy, cx, 2]], OPAQUE];

            let x_end = (tile_x + block).min(width);
            let y_end = (tile_y + block).min(height);
            dst.slice_mut(s![tile_y..y_end, tile_x..x_end, ..])
                .assign(&ArrayView1::from(&color));
        }
    }

    out
}
