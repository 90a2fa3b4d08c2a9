use std::path::Path;

use crate::imaging::domain::orientation::Orientation;
use crate::shared::frame::Frame;

/// Decodes an image file into a raw frame plus its encoded origin.
///
/// The frame is returned as stored in the file; applying the orientation
/// is the pipeline's job, so tests can exercise the rotation step
/// independently of any codec.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<(Frame, Orientation), Box<dyn std::error::Error>>;
}
