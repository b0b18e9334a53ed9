use crate::compositing::domain::region_filter::RegionFilter;
use crate::shared::constants::BLUR_RADIUS;
use crate::shared::frame::Frame;
use crate::shared::region::Region;
use crate::transform::smoothing::GaussianSmoother;

/// Small-radius Gaussian smoothing of the face crop alone.
pub struct BlurFilter {
    smoother: GaussianSmoother,
}

impl BlurFilter {
    pub fn new(radius: usize) -> Self {
        Self {
            smoother: GaussianSmoother::with_radius(radius),
        }
    }
}

impl Default for BlurFilter {
    fn default() -> Self {
        Self::new(BLUR_RADIUS)
    }
}

impl RegionFilter for BlurFilter {
    fn apply(&self, crop: &Frame, _region: &Region) -> Frame {
        self.smoother.smooth(crop)
    }
}
