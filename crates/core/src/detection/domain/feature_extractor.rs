use crate::shared::rect::Rect;

/// Detection categories a vision backend can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Face,
    Person,
    Car,
    Text,
    LicensePlate,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Face => "faces",
            FeatureKind::Person => "persons",
            FeatureKind::Car => "cars",
            FeatureKind::Text => "text",
            FeatureKind::LicensePlate => "license-plates",
        }
    }
}

/// Domain interface for per-image feature detection.
///
/// One extractor instance is bound to one image. Rectangles are in absolute
/// pixel coordinates of the image as displayed (orientation applied), which
/// is what cloud vision APIs report. Implementations may fetch lazily and
/// memoize, hence `&mut self`.
pub trait FeatureExtractor: Send {
    fn extract(&mut self, kind: FeatureKind) -> Result<Vec<Rect>, Box<dyn std::error::Error>>;
}
