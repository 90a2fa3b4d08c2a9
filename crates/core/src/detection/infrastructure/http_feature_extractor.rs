use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::detection::domain::connector::Connector;
use crate::detection::domain::feature_extractor::{FeatureExtractor, FeatureKind};
use crate::detection::infrastructure::cached_feature_extractor::CachedFeatureExtractor;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::rect::Rect;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Error, Debug)]
pub enum HttpExtractError {
    #[error("failed to read image {path}: {source}")]
    ReadImage {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request for {kind} to {url} failed: {source}")]
    Request {
        kind: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("detection service returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("invalid detection response for {kind}: {source}")]
    Body {
        kind: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Deserialize)]
struct RegionsResponse {
    regions: Vec<Rect>,
}

/// Feature extractor backed by a detection HTTP service.
///
/// One instance holds the bytes of one image and POSTs them to
/// `{base_url}/analyse/{kind}`, expecting a JSON body of the form
/// `{"regions": [{"x": 0, "y": 0, "width": 0, "height": 0}, ...]}` with
/// coordinates in absolute pixels of the displayed image. Provider
/// specifics (authentication, response mapping) live behind the service
/// endpoint, keeping this crate free of vendor SDK types.
pub struct HttpFeatureExtractor {
    client: reqwest::blocking::Client,
    base_url: String,
    image: Vec<u8>,
}

impl HttpFeatureExtractor {
    pub fn new(client: reqwest::blocking::Client, base_url: String, image: Vec<u8>) -> Self {
        Self {
            client,
            base_url,
            image,
        }
    }

    fn fetch(&self, kind: FeatureKind) -> Result<Vec<Rect>, HttpExtractError> {
        let url = format!(
            "{}/analyse/{}",
            self.base_url.trim_end_matches('/'),
            kind.as_str()
        );
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(self.image.clone())
            .send()
            .map_err(|source| HttpExtractError::Request {
                kind: kind.as_str(),
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(HttpExtractError::Status {
                status: response.status(),
                url,
            });
        }

        let body: RegionsResponse =
            response.json().map_err(|source| HttpExtractError::Body {
                kind: kind.as_str(),
                source,
            })?;
        Ok(body.regions)
    }
}

impl FeatureExtractor for HttpFeatureExtractor {
    fn extract(&mut self, kind: FeatureKind) -> Result<Vec<Rect>, Box<dyn std::error::Error>> {
        log::debug!("fetching {} from {}", kind.as_str(), self.base_url);
        Ok(self.fetch(kind)?)
    }
}

/// Connector for a detection HTTP service; shares one client across a
/// batch and wraps every per-image extractor in a memo cache.
pub struct HttpConnector {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpConnector {
    pub fn new(base_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base_url })
    }
}

impl Connector for HttpConnector {
    fn supported_extensions(&self) -> &[&str] {
        IMAGE_EXTENSIONS
    }

    fn analyse(
        &self,
        image_path: &Path,
    ) -> Result<Box<dyn FeatureExtractor>, Box<dyn std::error::Error>> {
        let image = fs::read(image_path).map_err(|source| HttpExtractError::ReadImage {
            path: image_path.display().to_string(),
            source,
        })?;
        let extractor =
            HttpFeatureExtractor::new(self.client.clone(), self.base_url.clone(), image);
        Ok(Box::new(CachedFeatureExtractor::new(Box::new(extractor))))
    }
}
