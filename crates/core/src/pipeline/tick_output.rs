use crate::compositing::domain::face_region_compositor::FacePreview;
use crate::compositing::infrastructure::extension_renderer::{ExtensionView, StickerPlacement};
use crate::shared::frame::Frame;
use crate::shared::region::FaceBox;

/// Everything one tick produced, for the presentation layer to draw.
///
/// All frames share the source's resolution except the extension view,
/// which is rendered at canvas size.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutput {
    pub tick: usize,
    pub source: Frame,
    pub grayscale: Frame,
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
    pub red_threshold: Frame,
    pub green_threshold: Frame,
    pub blue_threshold: Frame,
    pub hsv: Frame,
    pub ycbcr: Frame,
    pub hsv_threshold: Frame,
    pub ycbcr_threshold: Frame,
    /// First box the detector reported, in detector space.
    pub face: Option<FaceBox>,
    pub face_preview: FacePreview,
    pub extension: ExtensionView,
}

impl TickOutput {
    /// `false` means the presentation should show a "no face detected" cue.
    pub fn face_detected(&self) -> bool {
        self.face_preview.face_detected()
    }

    pub fn sticker(&self) -> Option<&StickerPlacement> {
        self.extension.sticker.as_ref()
    }

    /// Every output frame with a file-friendly name, in grid order.
    pub fn named_frames(&self) -> Vec<(&'static str, &Frame)> {
        vec![
            ("face", &self.face_preview.frame),
            ("grayscale", &self.grayscale),
            ("extension", &self.extension.frame),
            ("red", &self.red),
            ("green", &self.green),
            ("blue", &self.blue),
            ("red-threshold", &self.red_threshold),
            ("green-threshold", &self.green_threshold),
            ("blue-threshold", &self.blue_threshold),
            ("hsv", &self.hsv),
            ("ycbcr", &self.ycbcr),
            ("source", &self.source),
            ("hsv-threshold", &self.hsv_threshold),
            ("ycbcr-threshold", &self.ycbcr_threshold),
        ]
    }

    /// The 5 × 3 inspection grid: face, gray, extension; channel isolations;
    /// channel thresholds; HSV, YCbCr, source; the two derived thresholds
    /// and the source again.
    pub fn grid(&self) -> Vec<Vec<&Frame>> {
        vec![
            vec![&self.face_preview.frame, &self.grayscale, &self.extension.frame],
            vec![&self.red, &self.green, &self.blue],
            vec![&self.red_threshold, &self.green_threshold, &self.blue_threshold],
            vec![&self.hsv, &self.ycbcr, &self.source],
            vec![&self.hsv_threshold, &self.ycbcr_threshold, &self.source],
        ]
    }
}
