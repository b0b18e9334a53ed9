pub mod face_region_compositor;
pub mod filter_mode;
pub mod region_filter;
pub mod sticker;
