pub mod color_space;
pub mod pixelate;
pub mod resize;
pub mod smoothing;
pub mod threshold;
pub mod tone;
