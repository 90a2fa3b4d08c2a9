use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::detection::domain::connector::Connector;
use crate::detection::domain::feature_extractor::{FeatureExtractor, FeatureKind};
use crate::detection::infrastructure::static_feature_extractor::StaticFeatureExtractor;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::rect::Rect;

#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("failed to open sidecar {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid sidecar {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk detection record next to an image: `photo.jpg.json` for
/// `photo.jpg`. All categories are optional.
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SidecarFile {
    #[serde(default)]
    faces: Vec<Rect>,
    #[serde(default)]
    persons: Vec<Rect>,
    #[serde(default)]
    cars: Vec<Rect>,
    #[serde(default)]
    text: Vec<Rect>,
    #[serde(default, rename = "license_plates")]
    license_plates: Vec<Rect>,
}

impl SidecarFile {
    fn into_map(self) -> HashMap<FeatureKind, Vec<Rect>> {
        HashMap::from([
            (FeatureKind::Face, self.faces),
            (FeatureKind::Person, self.persons),
            (FeatureKind::Car, self.cars),
            (FeatureKind::Text, self.text),
            (FeatureKind::LicensePlate, self.license_plates),
        ])
    }
}

/// Connector that replays detections from JSON sidecar files.
///
/// Lets the pipeline run offline against detections computed earlier (or
/// by hand). A missing sidecar means no detections for that image rather
/// than an error, so untouched copies are still produced.
pub struct SidecarConnector;

impl SidecarConnector {
    pub fn new() -> Self {
        Self
    }

    fn sidecar_path(image_path: &Path) -> PathBuf {
        let mut name = image_path.as_os_str().to_os_string();
        name.push(".json");
        PathBuf::from(name)
    }
}

impl Default for SidecarConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for SidecarConnector {
    fn supported_extensions(&self) -> &[&str] {
        IMAGE_EXTENSIONS
    }

    fn analyse(
        &self,
        image_path: &Path,
    ) -> Result<Box<dyn FeatureExtractor>, Box<dyn std::error::Error>> {
        let path = Self::sidecar_path(image_path);
        if !path.exists() {
            log::debug!("no sidecar at {}, treating as empty", path.display());
            return Ok(Box::new(StaticFeatureExtractor::empty()));
        }

        let file = File::open(&path).map_err(|source| SidecarError::Open {
            path: path.clone(),
            source,
        })?;
        let sidecar: SidecarFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| SidecarError::Parse { path, source })?;
        Ok(Box::new(StaticFeatureExtractor::new(sidecar.into_map())))
    }
}
