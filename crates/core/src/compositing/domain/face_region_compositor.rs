use crate::shared::constants::{DETECTOR_HEIGHT, DETECTOR_WIDTH};
use crate::shared::frame::Frame;
use crate::shared::region::{FaceBox, Region};

use super::region_filter::RegionFilter;

/// Face preview produced for one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacePreview {
    pub frame: Frame,
    /// Display-space region that was filtered, or `None` when no face was
    /// available and `frame` is an unmodified copy of the source.
    pub face_region: Option<Region>,
}

impl FacePreview {
    pub fn face_detected(&self) -> bool {
        self.face_region.is_some()
    }
}

/// Applies a region filter to the face area of a display frame.
///
/// Boxes arrive in detector space and are rescaled to the display frame's
/// resolution. Only the face crop is filtered; the result is pasted back
/// into a copy of the source so pixels outside the box are untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRegionCompositor {
    detector_size: (u32, u32),
}

impl Default for FaceRegionCompositor {
    fn default() -> Self {
        Self::new(DETECTOR_WIDTH, DETECTOR_HEIGHT)
    }
}

impl FaceRegionCompositor {
    pub fn new(detector_width: u32, detector_height: u32) -> Self {
        Self {
            detector_size: (detector_width, detector_height),
        }
    }

    pub fn detector_size(&self) -> (u32, u32) {
        self.detector_size
    }

    /// Scaled and clamped face region, or `None` if nothing of it is visible.
    pub fn display_region(&self, face: &FaceBox, display: &Frame) -> Option<Region> {
        face.to_display(self.detector_size, (display.width(), display.height()))
            .clamped(display.width(), display.height())
    }

    pub fn compose(
        &self,
        source: &Frame,
        face: Option<&FaceBox>,
        filter: &dyn RegionFilter,
    ) -> FacePreview {
        let Some(region) = face.and_then(|f| self.display_region(f, source)) else {
            return FacePreview {
                frame: source.clone(),
                face_region: None,
            };
        };

        let crop = source.crop(&region);
        let filtered = filter.apply(&crop, &region);
        let mut frame = source.clone();
        if filtered.width() == crop.width() && filtered.height() == crop.height() {
            frame.paste(&filtered, region.x, region.y);
        } else {
            log::warn!(
                "Region filter returned {}x{} for a {}x{} crop; leaving face unfiltered",
                filtered.width(),
                filtered.height(),
                crop.width(),
                crop.height()
            );
        }
        FacePreview {
            frame,
            face_region: Some(region),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Paints every pixel of the crop white.
    struct WhiteOut;

    impl RegionFilter for WhiteOut {
        fn apply(&self, crop: &Frame, _region: &Region) -> Frame {
            Frame::filled(crop.width(), crop.height(), [255, 255, 255, 255], crop.index())
        }
    }

    /// Returns a frame of the wrong size.
    struct Broken;

    impl RegionFilter for Broken {
        fn apply(&self, _crop: &Frame, _region: &Region) -> Frame {
            Frame::filled(1, 1, [255, 0, 0, 255], 0)
        }
    }

    fn gradient(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 77, 255]);
            }
        }
        Frame::new(data, width, height, 0)
    }

    #[test]
    fn test_no_face_returns_identical_copy() {
        let source = gradient(160, 120);
        let preview = FaceRegionCompositor::default().compose(&source, None, &WhiteOut);
        assert_eq!(preview.frame, source);
        assert!(!preview.face_detected());
    }

    #[test]
    fn test_only_face_region_is_filtered() {
        let source = gradient(160, 120);
        let face = FaceBox::new(40, 30, 20, 10);
        let preview = FaceRegionCompositor::default().compose(&source, Some(&face), &WhiteOut);

        assert_eq!(preview.face_region, Some(Region::new(40, 30, 20, 10)));
        for y in 0..120 {
            for x in 0..160 {
                let inside = (40..60).contains(&x) && (30..40).contains(&y);
                let expected = if inside {
                    [255, 255, 255, 255]
                } else {
                    source.pixel(x, y)
                };
                assert_eq!(preview.frame.pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_box_is_rescaled_to_display_resolution() {
        let source = gradient(640, 480);
        let face = FaceBox::new(10, 20, 30, 40);
        let preview = FaceRegionCompositor::default().compose(&source, Some(&face), &WhiteOut);
        assert_eq!(preview.face_region, Some(Region::new(40, 80, 120, 160)));
        assert_eq!(preview.frame.pixel(40, 80), [255, 255, 255, 255]);
        assert_eq!(preview.frame.pixel(39, 80), source.pixel(39, 80));
        assert_eq!(preview.frame.pixel(160, 240), source.pixel(160, 240));
    }

    #[test]
    fn test_box_partially_outside_is_clamped() {
        let source = gradient(160, 120);
        let face = FaceBox::new(150, 110, 40, 40);
        let preview = FaceRegionCompositor::default().compose(&source, Some(&face), &WhiteOut);
        assert_eq!(preview.face_region, Some(Region::new(150, 110, 10, 10)));
        assert_eq!(preview.frame.pixel(159, 119), [255, 255, 255, 255]);
    }

    #[test]
    fn test_box_entirely_outside_counts_as_no_face() {
        let source = gradient(160, 120);
        let face = FaceBox::new(200, 200, 10, 10);
        let preview = FaceRegionCompositor::default().compose(&source, Some(&face), &WhiteOut);
        assert_eq!(preview.frame, source);
        assert!(!preview.face_detected());
    }

    #[test]
    fn test_mis_sized_filter_output_leaves_source() {
        let source = gradient(160, 120);
        let face = FaceBox::new(10, 10, 20, 20);
        let preview = FaceRegionCompositor::default().compose(&source, Some(&face), &Broken);
        assert_eq!(preview.frame, source);
        assert!(preview.face_detected());
    }
}
