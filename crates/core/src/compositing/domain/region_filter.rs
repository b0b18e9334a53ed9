use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for a filter applied to one cropped face region.
///
/// `crop` is the region's pixels cut out of the display frame; `region` is
/// where that crop sits in the display frame, for filters that pull pixels
/// from another full-size frame. The returned frame must have the crop's size.
pub trait RegionFilter {
    fn apply(&self, crop: &Frame, region: &Region) -> Frame;
}
