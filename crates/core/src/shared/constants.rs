/// Resolution of the buffer the face detector reports boxes against.
pub const DETECTOR_WIDTH: u32 = 160;
pub const DETECTOR_HEIGHT: u32 = 120;

/// Brightness multiplier applied after luma conversion.
pub const GRAYSCALE_BOOST: f64 = 1.2;

/// Cutoff used when binarizing the HSV and YCbCr frames.
pub const DERIVED_THRESHOLD_CUTOFF: u8 = 128;

pub const DEFAULT_RED_CUTOFF: u8 = 100;
pub const DEFAULT_GREEN_CUTOFF: u8 = 150;
pub const DEFAULT_BLUE_CUTOFF: u8 = 200;

/// Tile edge for the face pixelation filter.
pub const PIXELATE_BLOCK_SIZE: u32 = 10;

/// Radius of the face blur filter; the kernel spans `2 * radius + 1` taps.
pub const BLUR_RADIUS: usize = 3;

/// Default overlay canvas for the extension view.
pub const CANVAS_WIDTH: u32 = 1000;
pub const CANVAS_HEIGHT: u32 = 1290;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
