use std::path::Path;

use crate::detection::domain::feature_extractor::FeatureExtractor;

/// Factory for per-image feature extractors.
///
/// One connector represents one detection provider and is shared across a
/// batch; `analyse` binds a fresh extractor (with its own memo cache) to a
/// single image. No network call happens until a category is first
/// requested from the returned extractor.
pub trait Connector: Send + Sync {
    /// File extensions (lowercase, no dot) the provider accepts. Used by
    /// the batch driver to filter directory entries.
    fn supported_extensions(&self) -> &[&str];

    fn analyse(&self, image_path: &Path)
        -> Result<Box<dyn FeatureExtractor>, Box<dyn std::error::Error>>;
}
