use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::detection::domain::clusterizer::clusterize;
use crate::detection::domain::connector::Connector;
use crate::detection::domain::containment::is_inside;
use crate::detection::domain::feature_extractor::{FeatureExtractor, FeatureKind};
use crate::imaging::domain::image_encoder::ImageEncoder;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::orientation::{normalize, Orientation};
use crate::pipeline::pixelizer_logger::PixelizerLogger;
use crate::pipeline::policy::{CarMode, FaceMode, PixelatePolicy};
use crate::redaction::domain::region_pixelator::RegionPixelator;
use crate::shared::frame::Frame;

/// Single-image redaction pipeline:
/// read → orient → detect → cluster/correlate → pixelate → encode.
pub struct PixelateImageUseCase {
    reader: Box<dyn ImageReader>,
    encoder: Box<dyn ImageEncoder>,
    pixelator: Box<dyn RegionPixelator>,
    connector: Arc<dyn Connector>,
    policy: PixelatePolicy,
    logger: Box<dyn PixelizerLogger>,
}

impl PixelateImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        encoder: Box<dyn ImageEncoder>,
        pixelator: Box<dyn RegionPixelator>,
        connector: Arc<dyn Connector>,
        policy: PixelatePolicy,
        logger: Box<dyn PixelizerLogger>,
    ) -> Self {
        Self {
            reader,
            encoder,
            pixelator,
            connector,
            policy,
            logger,
        }
    }

    /// Reads an image, redacts it, and writes the encoded result.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let bytes = self.pixelate_to_bytes(input_path)?;
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, bytes)?;
        Ok(())
    }

    /// Reads an image, redacts it, and returns the encoded bytes.
    pub fn pixelate_to_bytes(
        &mut self,
        input_path: &Path,
    ) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let (frame, orientation) = self.reader.read(input_path)?;
        let mut extractor = self.connector.analyse(input_path)?;
        let image_id = input_path.display().to_string();
        let canvas = self.compose(frame, orientation, extractor.as_mut(), &image_id)?;
        self.encoder.encode(&canvas)
    }

    /// Core compositing step, independent of file and codec I/O.
    ///
    /// Brings the frame into display orientation, then burns pixelated
    /// blocks for every region the policy selects. The untouched
    /// orientation-fixed frame stays around as the sampling source; the
    /// returned canvas accumulates the draws.
    pub fn compose(
        &mut self,
        frame: Frame,
        orientation: Orientation,
        extractor: &mut dyn FeatureExtractor,
        image_id: &str,
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        let source = normalize(frame, orientation);
        let mut canvas = source.clone();

        match self.policy.face_mode {
            FaceMode::Skip => {}
            FaceMode::Faces => {
                self.redact_category(&source, &mut canvas, extractor, FeatureKind::Face, image_id)?
            }
            FaceMode::Persons => self.redact_category(
                &source,
                &mut canvas,
                extractor,
                FeatureKind::Person,
                image_id,
            )?,
        }

        match self.policy.car_mode {
            CarMode::Skip => {}
            CarMode::Cars => {
                self.redact_category(&source, &mut canvas, extractor, FeatureKind::Car, image_id)?
            }
            CarMode::PlatesAndTextOnCars => {
                let text = extractor.extract(FeatureKind::Text)?;
                self.logger.on_extracted(image_id, FeatureKind::Text, &text);
                let cars = extractor.extract(FeatureKind::Car)?;
                self.logger.on_extracted(image_id, FeatureKind::Car, &cars);
                let plates = extractor.extract(FeatureKind::LicensePlate)?;
                self.logger
                    .on_extracted(image_id, FeatureKind::LicensePlate, &plates);

                let merge_distance = self.policy.merge_distance(source.width());
                let merged = clusterize(&text, merge_distance);

                // A patch inside several cars is redacted once per car;
                // the draw is destructive over the same pixels, so the
                // repeat is harmless.
                for car in &cars {
                    for patch in merged.iter().filter(|p| is_inside(p, car)) {
                        self.pixelator.pixelate(&source, &mut canvas, patch)?;
                        self.logger.on_pixelated(image_id, FeatureKind::Text, patch);
                    }
                }

                for plate in &plates {
                    self.pixelator.pixelate(&source, &mut canvas, plate)?;
                    self.logger
                        .on_pixelated(image_id, FeatureKind::LicensePlate, plate);
                }
            }
        }

        Ok(canvas)
    }

    fn redact_category(
        &mut self,
        source: &Frame,
        canvas: &mut Frame,
        extractor: &mut dyn FeatureExtractor,
        kind: FeatureKind,
        image_id: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let regions = extractor.extract(kind)?;
        self.logger.on_extracted(image_id, kind, &regions);
        for region in &regions {
            self.pixelator.pixelate(source, canvas, region)?;
            self.logger.on_pixelated(image_id, kind, region);
        }
        Ok(())
    }
}
