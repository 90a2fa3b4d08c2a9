use image::ImageEncoder as _;

use crate::imaging::domain::image_encoder::{ImageEncoder, OutputFormat};
use crate::shared::frame::Frame;

/// Encodes frames with the `image` crate.
///
/// Quality applies to JPEG only and is clamped to `0..=100`; PNG is
/// lossless.
pub struct StdImageEncoder {
    format: OutputFormat,
    quality: u8,
}

impl StdImageEncoder {
    pub fn new(format: OutputFormat, quality: u8) -> Self {
        Self {
            format,
            quality: quality.min(100),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl ImageEncoder for StdImageEncoder {
    fn encode(&self, frame: &Frame) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let mut bytes = Vec::new();
        match self.format {
            OutputFormat::Jpeg => {
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, self.quality);
                encoder.encode(
                    frame.data(),
                    frame.width(),
                    frame.height(),
                    image::ExtendedColorType::Rgb8,
                )?;
            }
            OutputFormat::Png => {
                image::codecs::png::PngEncoder::new(&mut bytes).write_image(
                    frame.data(),
                    frame.width(),
                    frame.height(),
                    image::ExtendedColorType::Rgb8,
                )?;
            }
        }
        Ok(bytes)
    }
}
