use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::compositing::domain::sticker::StickerKind;
use crate::shared::frame::Frame;
use crate::transform::resize::from_rgba_image;

#[derive(Debug, Error)]
pub enum StickerError {
    #[error("sticker directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("failed to decode sticker {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Read-only sticker images, loaded once before the first tick.
///
/// Images keep their own opacity channel; it drives the blend onto the
/// extension canvas.
#[derive(Clone, Debug, Default)]
pub struct StickerStore {
    images: HashMap<StickerKind, Frame>,
}

impl StickerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every known sticker file found in `dir`.
    ///
    /// Missing files are skipped with a warning; a file that exists but fails
    /// to decode is an error.
    pub fn from_dir(dir: &Path) -> Result<Self, StickerError> {
        if !dir.is_dir() {
            return Err(StickerError::MissingDirectory(dir.to_path_buf()));
        }
        let mut store = Self::new();
        for kind in StickerKind::ALL {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                log::warn!("Sticker {} not found at {}", kind, path.display());
                continue;
            }
            let img = image::open(&path)
                .map_err(|source| StickerError::Decode {
                    path: path.clone(),
                    source,
                })?
                .to_rgba8();
            log::debug!("Loaded sticker {} ({}x{})", kind, img.width(), img.height());
            store.insert(kind, from_rgba_image(img, 0));
        }
        log::info!("Loaded {} of {} stickers from {}", store.len(), StickerKind::ALL.len(), dir.display());
        Ok(store)
    }

    pub fn insert(&mut self, kind: StickerKind, image: Frame) {
        self.images.insert(kind, image);
    }

    pub fn get(&self, kind: StickerKind) -> Option<&Frame> {
        self.images.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, rgba: [u8; 4]) {
        let img = image::RgbaImage::from_pixel(6, 4, image::Rgba(rgba));
        img.save(path).unwrap();
    }

    #[test]
    fn test_loads_present_files_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("hat.png"), [10, 20, 30, 128]);
        write_png(&dir.path().join("dog-nose.png"), [1, 2, 3, 255]);

        let store = StickerStore::from_dir(dir.path()).unwrap();
        assert_eq!(store.len(), 2);
        let hat = store.get(StickerKind::Hat).unwrap();
        assert_eq!((hat.width(), hat.height()), (6, 4));
        assert_eq!(hat.pixel(0, 0), [10, 20, 30, 128]);
        assert!(store.get(StickerKind::Glasses).is_none());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StickerStore::from_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, StickerError::MissingDirectory(_)));
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("glasses.png"), b"not a png").unwrap();
        let err = StickerStore::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, StickerError::Decode { .. }));
    }
}
