use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::region::Rect;

/// Overlay images that can be anchored to a detected face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StickerKind {
    Hat,
    Glasses,
    Sunglasses,
    CatEars,
    DogNose,
}

impl StickerKind {
    pub const ALL: [StickerKind; 5] = [
        StickerKind::Hat,
        StickerKind::Glasses,
        StickerKind::Sunglasses,
        StickerKind::CatEars,
        StickerKind::DogNose,
    ];

    /// Asset file name inside the sticker directory.
    pub fn file_name(self) -> &'static str {
        match self {
            StickerKind::Hat => "hat.png",
            StickerKind::Glasses => "glasses.png",
            StickerKind::Sunglasses => "sunglasses.png",
            StickerKind::CatEars => "cat-ears.png",
            StickerKind::DogNose => "dog-nose.png",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            StickerKind::Hat => "hat",
            StickerKind::Glasses => "glasses",
            StickerKind::Sunglasses => "sunglasses",
            StickerKind::CatEars => "cat-ears",
            StickerKind::DogNose => "dog-nose",
        }
    }

    pub fn rule(self) -> PlacementRule {
        match self {
            StickerKind::Hat => PlacementRule {
                width_scale: 1.6,
                height_scale: 0.9,
                horizontal: HorizontalAnchor::Centered,
                vertical: VerticalAnchor::AboveTop(0.95),
            },
            StickerKind::CatEars => PlacementRule {
                width_scale: 1.5,
                height_scale: 0.7,
                horizontal: HorizontalAnchor::Centered,
                vertical: VerticalAnchor::AboveTop(0.6),
            },
            StickerKind::DogNose => PlacementRule {
                width_scale: 0.85,
                height_scale: 0.45,
                horizontal: HorizontalAnchor::FromLeft(0.135),
                vertical: VerticalAnchor::IntoFace(0.35),
            },
            StickerKind::Glasses | StickerKind::Sunglasses => PlacementRule {
                width_scale: 1.05,
                height_scale: 0.38,
                horizontal: HorizontalAnchor::Centered,
                vertical: VerticalAnchor::IntoFace(0.18),
            },
        }
    }

    /// Where the sticker goes for a face box on the same canvas.
    pub fn placement(self, face: &Rect) -> Rect {
        self.rule().place(face)
    }
}

impl std::fmt::Display for StickerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StickerKind::Hat => write!(f, "Hat"),
            StickerKind::Glasses => write!(f, "Glasses"),
            StickerKind::Sunglasses => write!(f, "Sunglasses"),
            StickerKind::CatEars => write!(f, "Cat Ears"),
            StickerKind::DogNose => write!(f, "Dog Nose"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sticker '{0}'")]
pub struct UnknownStickerError(pub String);

impl FromStr for StickerKind {
    type Err = UnknownStickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        StickerKind::ALL
            .into_iter()
            .find(|k| k.slug() == normalized)
            .ok_or_else(|| UnknownStickerError(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HorizontalAnchor {
    /// Sticker center aligned with the face center.
    Centered,
    /// Left edge offset from the face's left edge by a fraction of face width.
    FromLeft(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalAnchor {
    /// Bottom part of the sticker overlaps the face top; the sticker rises
    /// above it by this fraction of its own height.
    AboveTop(f64),
    /// Top edge sits below the face top by this fraction of face height.
    IntoFace(f64),
}

/// Size multipliers and anchoring for one sticker, relative to the face box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRule {
    pub width_scale: f64,
    pub height_scale: f64,
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

impl PlacementRule {
    pub fn place(&self, face: &Rect) -> Rect {
        let width = face.width * self.width_scale;
        let height = face.height * self.height_scale;
        let x = match self.horizontal {
            HorizontalAnchor::Centered => face.x - (width - face.width) / 2.0,
            HorizontalAnchor::FromLeft(k) => face.x + face.width * k,
        };
        let y = match self.vertical {
            VerticalAnchor::AboveTop(k) => face.y - height * k,
            VerticalAnchor::IntoFace(k) => face.y + face.height * k,
        };
        Rect::new(x, y, width, height)
    }
}
