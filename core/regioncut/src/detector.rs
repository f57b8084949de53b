use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::RegionCutError;

/// Axis-aligned bounding box in source pixel coordinates.
///
/// Detectors are not required to clamp boxes to the image bounds; all
/// derived regions are clamped before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// X coordinate of the left edge (pixels).
    pub x0: f64,
    /// Y coordinate of the top edge (pixels).
    pub y0: f64,
    /// X coordinate of the right edge (pixels).
    pub x1: f64,
    /// Y coordinate of the bottom edge (pixels).
    pub y1: f64,
}

impl BoundingBox {
    /// Create a box from its corner coordinates.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box width in pixels.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Box height in pixels.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// X coordinate of the box center.
    pub fn center_x(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    /// Y coordinate of the box center.
    pub fn center_y(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }
}

/// A single detected region: bounding box, model label, and confidence score.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Where the region sits in the source image.
    pub bounds: BoundingBox,
    /// Label assigned by the detector (e.g. a NudeNet class name).
    pub label: String,
    /// Detection confidence score.
    pub score: f64,
}

impl Detection {
    /// Create a detection from its parts.
    pub fn new(bounds: BoundingBox, label: impl Into<String>, score: f64) -> Self {
        Self {
            bounds,
            label: label.into(),
            score,
        }
    }
}

/// Detector categories understood by the registry.
///
/// The set is closed: output filenames embed the category name, so adding a
/// category is an API change, not a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Head detector regions.
    Head,
    /// Eye detector regions.
    Eyes,
    /// Face detector regions.
    Faces,
    /// Censor-bar detector regions.
    Censors,
    /// General NudeNet regions.
    Nudenet,
    /// NudeNet armpit regions.
    Armpits,
    /// NudeNet feet regions.
    Feet,
}

impl RegionKind {
    /// Stable lowercase name, used in output filenames.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::Head => "head",
            RegionKind::Eyes => "eyes",
            RegionKind::Faces => "faces",
            RegionKind::Censors => "censors",
            RegionKind::Nudenet => "nudenet",
            RegionKind::Armpits => "armpits",
            RegionKind::Feet => "feet",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pluggable detection backend.
///
/// The crate treats detection as an opaque oracle: an implementation is
/// handed the source image path and returns whatever regions it found,
/// possibly none. Implement this to plug in ONNX, NudeNet, or any other
/// engine, and register it with a [`DetectorRegistry`].
pub trait RegionDetector: Send + Sync {
    /// Detect regions in the image at `image_path`.
    fn detect(&self, image_path: &Path) -> Vec<Detection>;
}

/// Dispatch table from [`RegionKind`] to a detection backend.
///
/// Registering a kind twice replaces the previous backend. Looking up an
/// unregistered kind is reported as
/// [`RegionCutError::UnsupportedKind`], not treated as "no detections".
#[derive(Default)]
pub struct DetectorRegistry {
    detectors: HashMap<RegionKind, Box<dyn RegionDetector>>,
}

impl DetectorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the backend for `kind`.
    pub fn register(&mut self, kind: RegionKind, detector: Box<dyn RegionDetector>) {
        self.detectors.insert(kind, detector);
    }

    /// Look up the backend for `kind`.
    pub fn get(&self, kind: RegionKind) -> Option<&dyn RegionDetector> {
        self.detectors.get(&kind).map(|d| d.as_ref())
    }

    /// Run the backend registered for `kind` against `image_path`.
    ///
    /// An empty result is a legitimate oracle answer and is returned as-is;
    /// each operation decides how to treat it.
    pub fn detect(
        &self,
        kind: RegionKind,
        image_path: &Path,
    ) -> Result<Vec<Detection>, RegionCutError> {
        let detector = self
            .get(kind)
            .ok_or(RegionCutError::UnsupportedKind(kind))?;
        let detections = detector.detect(image_path);
        debug!(kind = %kind, count = detections.len(), "detector ran");
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDetector {
        detections: Vec<Detection>,
    }

    impl RegionDetector for FixedDetector {
        fn detect(&self, _image_path: &Path) -> Vec<Detection> {
            self.detections.clone()
        }
    }

    fn one_box(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Detection> {
        vec![Detection::new(BoundingBox::new(x0, y0, x1, y1), "face", 0.9)]
    }

    #[test]
    fn bounding_box_helpers() {
        let b = BoundingBox::new(400.0, 300.0, 600.0, 500.0);
        assert_eq!(b.width(), 200.0);
        assert_eq!(b.height(), 200.0);
        assert_eq!(b.center_x(), 500.0);
        assert_eq!(b.center_y(), 400.0);
    }

    #[test]
    fn unregistered_kind_is_unsupported() {
        let registry = DetectorRegistry::new();
        let result = registry.detect(RegionKind::Eyes, Path::new("any.png"));
        assert!(matches!(
            result,
            Err(RegionCutError::UnsupportedKind(RegionKind::Eyes))
        ));
    }

    #[test]
    fn registered_detector_is_dispatched() {
        let mut registry = DetectorRegistry::new();
        registry.register(
            RegionKind::Faces,
            Box::new(FixedDetector {
                detections: one_box(10.0, 10.0, 20.0, 20.0),
            }),
        );
        let detections = registry
            .detect(RegionKind::Faces, Path::new("any.png"))
            .unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].label, "face");
    }

    #[test]
    fn registering_twice_replaces_backend() {
        let mut registry = DetectorRegistry::new();
        registry.register(
            RegionKind::Faces,
            Box::new(FixedDetector {
                detections: one_box(0.0, 0.0, 1.0, 1.0),
            }),
        );
        registry.register(
            RegionKind::Faces,
            Box::new(FixedDetector {
                detections: one_box(5.0, 5.0, 9.0, 9.0),
            }),
        );
        let detections = registry
            .detect(RegionKind::Faces, Path::new("any.png"))
            .unwrap();
        assert_eq!(detections[0].bounds.x0, 5.0);
    }

    #[test]
    fn empty_oracle_answer_is_not_an_error() {
        let mut registry = DetectorRegistry::new();
        registry.register(
            RegionKind::Censors,
            Box::new(FixedDetector { detections: vec![] }),
        );
        let detections = registry
            .detect(RegionKind::Censors, Path::new("any.png"))
            .unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(RegionKind::Head.as_str(), "head");
        assert_eq!(RegionKind::Nudenet.to_string(), "nudenet");
    }
}
