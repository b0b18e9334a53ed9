use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sticker::StickerKind;

/// Filter applied to the face region (or to the whole extension view).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    #[default]
    Identity,
    Grayscale,
    Blur,
    /// Substitutes the same region of the HSV frame.
    ColorSpaceOverlay,
    Pixelate,
    Sepia,
    Invert,
    Edge,
    /// Leaves pixels untouched; the sticker is drawn on the overlay canvas.
    Sticker(StickerKind),
}

impl FilterMode {
    /// Number-key shortcuts: 0 off, 1 gray, 2 blur, 3 HSV overlay, 4 pixelate.
    pub fn from_key(key: char) -> Option<FilterMode> {
        match key {
            '0' => Some(FilterMode::Identity),
            '1' => Some(FilterMode::Grayscale),
            '2' => Some(FilterMode::Blur),
            '3' => Some(FilterMode::ColorSpaceOverlay),
            '4' => Some(FilterMode::Pixelate),
            _ => None,
        }
    }

    pub fn sticker(&self) -> Option<StickerKind> {
        match self {
            FilterMode::Sticker(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMode::Identity => write!(f, "None"),
            FilterMode::Grayscale => write!(f, "Grayscale"),
            FilterMode::Blur => write!(f, "Blur"),
            FilterMode::ColorSpaceOverlay => write!(f, "HSV Overlay"),
            FilterMode::Pixelate => write!(f, "Pixelate"),
            FilterMode::Sepia => write!(f, "Sepia"),
            FilterMode::Invert => write!(f, "Invert"),
            FilterMode::Edge => write!(f, "Edge"),
            FilterMode::Sticker(kind) => write!(f, "{kind}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "unknown filter '{0}' (expected none, grayscale, blur, hsv, pixelate, sepia, invert, edge, \
     hat, glasses, sunglasses, cat-ears or dog-nose)"
)]
pub struct ParseFilterModeError(pub String);

impl FromStr for FilterMode {
    type Err = ParseFilterModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        let mode = match normalized.as_str() {
            "none" | "identity" | "off" => FilterMode::Identity,
            "grayscale" | "gray" | "grey" => FilterMode::Grayscale,
            "blur" => FilterMode::Blur,
            "hsv" | "hsv-overlay" | "color-space-overlay" => FilterMode::ColorSpaceOverlay,
            "pixelate" => FilterMode::Pixelate,
            "sepia" => FilterMode::Sepia,
            "invert" => FilterMode::Invert,
            "edge" => FilterMode::Edge,
            other => other
                .parse::<StickerKind>()
                .map(FilterMode::Sticker)
                .map_err(|_| ParseFilterModeError(s.to_string()))?,
        };
        Ok(mode)
    }
}
