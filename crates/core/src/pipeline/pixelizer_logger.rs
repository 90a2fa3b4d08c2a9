use crate::detection::domain::feature_extractor::FeatureKind;
use crate::shared::rect::Rect;

/// Telemetry hooks for the redaction pipeline.
///
/// `on_extracted` fires once per category fetch with the full batch;
/// `on_pixelated` fires once per redacted rectangle, in processing order.
/// The compositor takes this as an injected collaborator; pass
/// [`NullPixelizerLogger`] when no telemetry is wanted.
pub trait PixelizerLogger: Send {
    fn on_extracted(&mut self, image_id: &str, kind: FeatureKind, regions: &[Rect]);
    fn on_pixelated(&mut self, image_id: &str, kind: FeatureKind, region: &Rect);
}

/// Silent logger that discards all events.
pub struct NullPixelizerLogger;

impl PixelizerLogger for NullPixelizerLogger {
    fn on_extracted(&mut self, _image_id: &str, _kind: FeatureKind, _regions: &[Rect]) {}
    fn on_pixelated(&mut self, _image_id: &str, _kind: FeatureKind, _region: &Rect) {}
}

/// Routes events to the `log` facade at info level.
pub struct LogPixelizerLogger;

impl PixelizerLogger for LogPixelizerLogger {
    fn on_extracted(&mut self, image_id: &str, kind: FeatureKind, regions: &[Rect]) {
        log::info!(
            "{image_id}: extracted {} {}",
            regions.len(),
            kind.as_str()
        );
    }

    fn on_pixelated(&mut self, image_id: &str, kind: FeatureKind, region: &Rect) {
        log::info!(
            "{image_id}: pixelated {} at ({}, {}) {}x{}",
            kind.as_str(),
            region.x,
            region.y,
            region.width,
            region.height
        );
    }
}
