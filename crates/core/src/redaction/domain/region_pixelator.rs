use crate::shared::frame::Frame;
use crate::shared::rect::Rect;

/// Domain interface for burning a redacted block over one region.
///
/// `source` is the untouched orientation-fixed bitmap and `canvas` the
/// output being mutated in place; sampling from the source keeps earlier
/// draws from bleeding into overlapping regions.
pub trait RegionPixelator: Send {
    fn pixelate(
        &self,
        source: &Frame,
        canvas: &mut Frame,
        rect: &Rect,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
