use std::path::Path;

use image::ImageDecoder;

use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::orientation::Orientation;
use crate::shared::frame::Frame;

/// Decodes image files with the `image` crate and reads the EXIF encoded
/// origin from the decoder.
///
/// Mirrored origins are not supported and decode as `TopLeft`; redaction
/// still happens, just without the flip applied.
pub struct FileImageReader;

impl FileImageReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileImageReader {
    fn default() -> Self {
        Self::new()
    }
}

fn map_orientation(
    raw: image::metadata::Orientation,
    path: &Path,
) -> Orientation {
    use image::metadata::Orientation as Raw;
    match raw {
        Raw::NoTransforms => Orientation::TopLeft,
        Raw::Rotate180 => Orientation::BottomRight,
        Raw::Rotate90 => Orientation::RightTop,
        Raw::Rotate270 => Orientation::LeftBottom,
        other => {
            log::warn!(
                "unsupported encoded origin {other:?} in {}, leaving as-is",
                path.display()
            );
            Orientation::TopLeft
        }
    }
}

impl ImageReader for FileImageReader {
    fn read(&self, path: &Path) -> Result<(Frame, Orientation), Box<dyn std::error::Error>> {
        let mut decoder = image::ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()?;
        let orientation = map_orientation(decoder.orientation()?, path);

        let rgb = image::DynamicImage::from_decoder(decoder)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let frame = Frame::new(rgb.into_raw(), width, height, 3);
        Ok((frame, orientation))
    }
}
