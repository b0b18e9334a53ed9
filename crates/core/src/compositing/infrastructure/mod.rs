pub mod blur_filter;
pub mod extension_renderer;
pub mod filter_factory;
pub mod hsv_overlay_filter;
pub mod pixelate_filter;
pub mod pixelwise_filter;
pub mod sticker_store;
