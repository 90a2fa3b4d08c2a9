use std::collections::HashMap;

use crate::detection::domain::feature_extractor::{FeatureExtractor, FeatureKind};
use crate::shared::rect::Rect;

/// Memoizes an inner extractor per category.
///
/// Each `FeatureKind` hits the backend at most once per extractor instance;
/// later requests for the same kind are served from the cache. The
/// compositor may ask for the same category from both the face and the
/// vehicle branch, and cloud calls are billed per request.
pub struct CachedFeatureExtractor {
    inner: Box<dyn FeatureExtractor>,
    cache: HashMap<FeatureKind, Vec<Rect>>,
}

impl CachedFeatureExtractor {
    pub fn new(inner: Box<dyn FeatureExtractor>) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
        }
    }
}

impl FeatureExtractor for CachedFeatureExtractor {
    fn extract(&mut self, kind: FeatureKind) -> Result<Vec<Rect>, Box<dyn std::error::Error>> {
        if let Some(cached) = self.cache.get(&kind) {
            return Ok(cached.clone());
        }
        // Failures are not cached; a retried request goes to the backend.
        let regions = self.inner.extract(kind)?;
        self.cache.insert(kind, regions.clone());
        Ok(regions)
    }
}
