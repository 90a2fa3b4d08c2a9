pub mod cached_feature_extractor;
pub mod http_feature_extractor;
pub mod sidecar_connector;
pub mod static_feature_extractor;
