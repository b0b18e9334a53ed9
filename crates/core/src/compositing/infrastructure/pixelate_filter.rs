use crate::compositing::domain::region_filter::RegionFilter;
use crate::shared::constants::PIXELATE_BLOCK_SIZE;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::transform::pixelate::pixelate;

/// Mosaic over the crop; tiles are anchored at the crop's own top-left.
pub struct PixelateFilter {
    block_size: u32,
}

impl PixelateFilter {
    pub fn new(block_size: u32) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }
}

impl Default for PixelateFilter {
    fn default() -> Self {
        Self::new(PIXELATE_BLOCK_SIZE)
    }
}

impl RegionFilter for PixelateFilter {
    fn apply(&self, crop: &Frame, _region: &Region) -> Frame {
        pixelate(crop, self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_block_size_clamped() {
        assert_eq!(PixelateFilter::new(0).block_size(), 1);
    }

    #[test]
    fn test_tiles_start_at_crop_origin() {
        let mut crop = Frame::filled(20, 10, [0, 0, 0, 255], 0);
        crop.set_pixel(5, 5, [200, 0, 0, 255]);
        let out = PixelateFilter::default().apply(&crop, &Region::new(33, 17, 20, 10));
        assert_eq!(out.pixel(0, 0), [200, 0, 0, 255]);
        assert_eq!(out.pixel(9, 9), [200, 0, 0, 255]);
        assert_eq!(out.pixel(10, 0), [0, 0, 0, 255]);
    }
}
