use crate::compositing::domain::filter_mode::FilterMode;
use crate::compositing::domain::region_filter::RegionFilter;
use crate::shared::frame::Frame;

use super::blur_filter::BlurFilter;
use super::hsv_overlay_filter::HsvOverlayFilter;
use super::pixelate_filter::PixelateFilter;
use super::pixelwise_filter::PixelwiseFilter;

/// Resolves a filter mode to its region filter once per tick.
///
/// `hsv` is the tick's HSV frame at display resolution; only the color space
/// overlay reads it. Sticker modes leave pixels unchanged.
pub fn create_region_filter<'a>(mode: FilterMode, hsv: &'a Frame) -> Box<dyn RegionFilter + 'a> {
    log::debug!("Resolving region filter for {mode}");
    match mode {
        FilterMode::Identity | FilterMode::Sticker(_) => Box::new(PixelwiseFilter::identity()),
        FilterMode::Grayscale => Box::new(PixelwiseFilter::mean_gray()),
        FilterMode::Blur => Box::new(BlurFilter::default()),
        FilterMode::ColorSpaceOverlay => Box::new(HsvOverlayFilter::new(hsv)),
        FilterMode::Pixelate => Box::new(PixelateFilter::default()),
        FilterMode::Sepia => Box::new(PixelwiseFilter::sepia()),
        FilterMode::Invert => Box::new(PixelwiseFilter::invert()),
        FilterMode::Edge => Box::new(PixelwiseFilter::edge()),
    }
}

/// Like [`create_region_filter`], but grayscale is luma-weighted the way
/// the enlarged extension view shows it.
pub fn create_extension_filter<'a>(mode: FilterMode, hsv: &'a Frame) -> Box<dyn RegionFilter + 'a> {
    match mode {
        FilterMode::Grayscale => Box::new(PixelwiseFilter::luma_gray()),
        _ => create_region_filter(mode, hsv),
    }
}
