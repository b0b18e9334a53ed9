use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::FaceBox;

/// Replays recorded detection results by frame index.
///
/// Lets an external detector run offline: its output is stored as JSON,
/// a map from tick index to the boxes found on that tick, e.g.
/// `{"0": [{"x": 40, "y": 30, "width": 50, "height": 60}], "1": []}`.
/// Ticks missing from the map report no face.
pub struct ReplayFaceDetector {
    recorded: Arc<HashMap<usize, Vec<FaceBox>>>,
}

impl ReplayFaceDetector {
    pub fn new(recorded: Arc<HashMap<usize, Vec<FaceBox>>>) -> Self {
        Self { recorded }
    }

    pub fn from_json_str(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let recorded: HashMap<usize, Vec<FaceBox>> = serde_json::from_str(json)?;
        Ok(Self::new(Arc::new(recorded)))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read face boxes from {}: {e}", path.display()))?;
        let detector = Self::from_json_str(&json)?;
        log::info!(
            "Loaded recorded face boxes for {} ticks from {}",
            detector.recorded.len(),
            path.display()
        );
        Ok(detector)
    }
}

impl FaceDetector for ReplayFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        Ok(self.recorded.get(&frame.index()).cloned().unwrap_or_default())
    }
}
