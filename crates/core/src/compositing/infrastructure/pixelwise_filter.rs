use crate::compositing::domain::region_filter::RegionFilter;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::transform::tone;

/// Region filter backed by a whole-frame transform with no spatial support,
/// so applying it to a crop equals cropping the transformed frame.
#[derive(Clone, Copy)]
pub struct PixelwiseFilter {
    name: &'static str,
    transform: fn(&Frame) -> Frame,
}

impl PixelwiseFilter {
    pub fn new(name: &'static str, transform: fn(&Frame) -> Frame) -> Self {
        Self { name, transform }
    }

    pub fn identity() -> Self {
        Self::new("identity", Frame::clone)
    }

    /// Unweighted mean of R, G and B.
    pub fn mean_gray() -> Self {
        Self::new("grayscale", tone::mean_grayscale)
    }

    /// Rec. 709 luma, the weighting of the extension view's grayscale.
    pub fn luma_gray() -> Self {
        Self::new("luma-grayscale", tone::luma_grayscale)
    }

    pub fn sepia() -> Self {
        Self::new("sepia", tone::sepia)
    }

    pub fn invert() -> Self {
        Self::new("invert", tone::invert)
    }

    pub fn edge() -> Self {
        Self::new("edge", tone::edge)
    }
}

impl std::fmt::Debug for PixelwiseFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelwiseFilter").field("name", &self.name).finish()
    }
}

impl RegionFilter for PixelwiseFilter {
    fn apply(&self, crop: &Frame, _region: &Region) -> Frame {
        (self.transform)(crop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop() -> Frame {
        Frame::filled(4, 4, [90, 30, 0, 255], 0)
    }

    #[test]
    fn test_identity_returns_crop() {
        let out = PixelwiseFilter::identity().apply(&crop(), &Region::new(0, 0, 4, 4));
        assert_eq!(out, crop());
    }

    #[test]
    fn test_mean_gray() {
        let out = PixelwiseFilter::mean_gray().apply(&crop(), &Region::new(0, 0, 4, 4));
        assert_eq!(out.pixel(3, 3), [40, 40, 40, 255]);
    }

    #[test]
    fn test_luma_gray() {
        // 0.2126 * 90 + 0.7152 * 30 = 40.59
        let out = PixelwiseFilter::luma_gray().apply(&crop(), &Region::new(0, 0, 4, 4));
        assert_eq!(out.pixel(0, 0), [41, 41, 41, 255]);
    }

    #[test]
    fn test_debug_shows_name() {
        assert_eq!(
            format!("{:?}", PixelwiseFilter::edge()),
            "PixelwiseFilter { name: \"edge\" }"
        );
    }

    #[test]
    fn test_invert() {
        let out = PixelwiseFilter::invert().apply(&crop(), &Region::new(0, 0, 4, 4));
        assert_eq!(out.pixel(0, 0), [165, 225, 255, 255]);
    }
}
