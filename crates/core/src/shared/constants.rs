/// Fraction of the image width used as the text merge distance.
pub const DEFAULT_MERGE_FACTOR: f64 = 0.025;

/// Divisor applied to the larger region dimension to derive the block size.
pub const DEFAULT_PIXEL_SIZE_DIVISOR: u32 = 16;

pub const DEFAULT_OUTPUT_QUALITY: u8 = 100;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
