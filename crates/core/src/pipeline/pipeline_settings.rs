use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compositing::domain::filter_mode::FilterMode;
use crate::shared::channel::ColorChannel;
use crate::shared::constants::{DEFAULT_BLUE_CUTOFF, DEFAULT_GREEN_CUTOFF, DEFAULT_RED_CUTOFF};
use crate::transform::threshold::ThresholdSpec;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Operator-controlled inputs read by every tick.
///
/// Cutoffs are stored as given and clamped to `0..=255` when read, so an
/// out-of-range value degrades to the nearest valid cutoff instead of
/// failing the tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub red_cutoff: i64,
    pub green_cutoff: i64,
    pub blue_cutoff: i64,
    pub face_filter: FilterMode,
    pub extension_filter: FilterMode,
    /// Poll the capture source each tick; `false` keeps the frozen frame.
    pub live: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            red_cutoff: DEFAULT_RED_CUTOFF as i64,
            green_cutoff: DEFAULT_GREEN_CUTOFF as i64,
            blue_cutoff: DEFAULT_BLUE_CUTOFF as i64,
            face_filter: FilterMode::Identity,
            extension_filter: FilterMode::Identity,
            live: true,
        }
    }
}

impl PipelineSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn cutoff(&self, channel: ColorChannel) -> i64 {
        match channel {
            ColorChannel::Red => self.red_cutoff,
            ColorChannel::Green => self.green_cutoff,
            ColorChannel::Blue => self.blue_cutoff,
        }
    }

    /// Threshold applied to `channel`'s isolation, with a clamped cutoff.
    pub fn channel_threshold(&self, channel: ColorChannel) -> ThresholdSpec {
        ThresholdSpec::from_raw(channel.into(), self.cutoff(channel))
    }
}
