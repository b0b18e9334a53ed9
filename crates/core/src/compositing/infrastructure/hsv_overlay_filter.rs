use crate::compositing::domain::region_filter::RegionFilter;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::transform::resize::resize;

/// Replaces the face crop with the same region of a precomputed HSV frame.
///
/// The HSV frame is expected at display resolution. If the region reaches
/// past it the available patch is stretched to the crop size.
pub struct HsvOverlayFilter<'a> {
    hsv: &'a Frame,
}

impl<'a> HsvOverlayFilter<'a> {
    pub fn new(hsv: &'a Frame) -> Self {
        Self { hsv }
    }
}

impl RegionFilter for HsvOverlayFilter<'_> {
    fn apply(&self, crop: &Frame, region: &Region) -> Frame {
        let patch = self.hsv.crop(region);
        if patch.width() == crop.width() && patch.height() == crop.height() {
            return patch.with_index(crop.index());
        }
        if patch.is_empty() {
            return crop.clone();
        }
        resize(&patch, crop.width(), crop.height()).with_index(crop.index())
    }
}
