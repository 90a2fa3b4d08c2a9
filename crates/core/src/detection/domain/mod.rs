pub mod clusterizer;
pub mod connector;
pub mod containment;
pub mod feature_extractor;
