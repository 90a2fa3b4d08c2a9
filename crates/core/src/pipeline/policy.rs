use crate::shared::constants::DEFAULT_MERGE_FACTOR;

/// How detected people are redacted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceMode {
    Skip,
    /// Pixelate face boxes only.
    Faces,
    /// Pixelate whole person boxes.
    Persons,
}

/// How detected vehicles are redacted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarMode {
    Skip,
    /// Pixelate whole car boxes.
    Cars,
    /// Pixelate license plates plus text regions that lie on a car.
    PlatesAndTextOnCars,
}

/// Per-run redaction configuration.
#[derive(Clone, Debug)]
pub struct PixelatePolicy {
    pub face_mode: FaceMode,
    pub car_mode: CarMode,
    /// Fraction of the image width within which text regions merge.
    pub merge_factor: f64,
}

impl PixelatePolicy {
    pub fn merge_distance(&self, image_width: u32) -> i32 {
        (image_width as f64 * self.merge_factor).round() as i32
    }
}

impl Default for PixelatePolicy {
    fn default() -> Self {
        Self {
            face_mode: FaceMode::Faces,
            car_mode: CarMode::PlatesAndTextOnCars,
            merge_factor: DEFAULT_MERGE_FACTOR,
        }
    }
}
