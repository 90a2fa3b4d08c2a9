use std::collections::HashMap;

use crate::detection::domain::feature_extractor::{FeatureExtractor, FeatureKind};
use crate::shared::rect::Rect;

/// Replays a fixed set of detections.
///
/// Backs sidecar-file runs (detections computed elsewhere) and use-case
/// tests. Categories without an entry report no detections.
pub struct StaticFeatureExtractor {
    detections: HashMap<FeatureKind, Vec<Rect>>,
}

impl StaticFeatureExtractor {
    pub fn new(detections: HashMap<FeatureKind, Vec<Rect>>) -> Self {
        Self { detections }
    }

    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }
}

impl FeatureExtractor for StaticFeatureExtractor {
    fn extract(&mut self, kind: FeatureKind) -> Result<Vec<Rect>, Box<dyn std::error::Error>> {
        Ok(self.detections.get(&kind).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_configured_detections() {
        let regions = vec![Rect::new(1, 2, 3, 4), Rect::new(5, 6, 7, 8)];
        let mut extractor = StaticFeatureExtractor::new(HashMap::from([(
            FeatureKind::Face,
            regions.clone(),
        )]));
        assert_eq!(extractor.extract(FeatureKind::Face).unwrap(), regions);
    }

    #[test]
    fn test_unknown_kind_is_empty() {
        let mut extractor = StaticFeatureExtractor::new(HashMap::from([(
            FeatureKind::Face,
            vec![Rect::new(1, 2, 3, 4)],
        )]));
        assert!(extractor.extract(FeatureKind::Car).unwrap().is_empty());
    }

    #[test]
    fn test_empty_extractor_reports_nothing() {
        let mut extractor = StaticFeatureExtractor::empty();
        for kind in [
            FeatureKind::Face,
            FeatureKind::Person,
            FeatureKind::Car,
            FeatureKind::Text,
            FeatureKind::LicensePlate,
        ] {
            assert!(extractor.extract(kind).unwrap().is_empty());
        }
    }
}
