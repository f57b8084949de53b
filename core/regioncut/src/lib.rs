//! Detection-driven image derivation: square crops, box annotations, and
//! blur-spotlight composites.
//!
//! Detection itself is an external collaborator reached through the
//! [`RegionDetector`] trait; this crate only consumes bounding boxes and
//! produces transformed PNGs.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use regioncut::{
//!     BoundingBox, Detection, DetectorRegistry, RegionDetector, RegionKind, RegionPipeline,
//! };
//!
//! struct MyFaceDetector;
//!
//! impl RegionDetector for MyFaceDetector {
//!     fn detect(&self, _image_path: &Path) -> Vec<Detection> {
//!         // Your inference engine here
//!         vec![Detection::new(BoundingBox::new(400.0, 300.0, 600.0, 500.0), "face", 0.9)]
//!     }
//! }
//!
//! let mut registry = DetectorRegistry::new();
//! registry.register(RegionKind::Faces, Box::new(MyFaceDetector));
//!
//! let pipeline = RegionPipeline::new(registry);
//! let crops = pipeline
//!     .square(RegionKind::Faces, Path::new("photo.jpg"), Path::new("derived"))
//!     .unwrap();
//! println!("wrote {} crops", crops.len());
//! ```
#![warn(missing_docs)]

mod annotate;
/// Detection types, the detector trait, and the category registry.
pub mod detector;
mod error;
mod extract;
mod geometry;
mod output;
mod spotlight;

use std::path::{Path, PathBuf};

/// Outlined-rectangle annotation operation.
pub use annotate::RegionAnnotator;
/// Detection data model and dispatch.
pub use detector::{BoundingBox, Detection, DetectorRegistry, RegionDetector, RegionKind};
/// Error type returned by regioncut operations.
pub use error::RegionCutError;
/// Square crop extraction operation.
pub use extract::SquareExtractor;
/// Blur-spotlight composite operation.
pub use spotlight::SpotlightCompositor;

/// Outcome of an operation that may legitimately write nothing.
///
/// Annotation and spotlighting degrade to a no-op when the detector finds
/// nothing: the source is left untouched and no file is created. The two
/// cases stay distinguishable without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// A new image was written at this path.
    Written(PathBuf),
    /// Nothing was detected; this is the untouched source path.
    Skipped(PathBuf),
}

impl Overlay {
    /// The output path for [`Written`](Self::Written), the source path for
    /// [`Skipped`](Self::Skipped).
    pub fn path(&self) -> &Path {
        match self {
            Overlay::Written(path) | Overlay::Skipped(path) => path,
        }
    }

    /// Whether a new file was written.
    pub fn was_written(&self) -> bool {
        matches!(self, Overlay::Written(_))
    }
}

/// Front-end tying a [`DetectorRegistry`] to the three operations.
///
/// Each method resolves the detector for the requested category (failing
/// with [`RegionCutError::UnsupportedKind`] if none is registered), runs it
/// against the source image, and hands the detections to the operation.
/// Holds no state beyond the registry and the operation settings.
pub struct RegionPipeline {
    registry: DetectorRegistry,
    extractor: SquareExtractor,
    annotator: RegionAnnotator,
    compositor: SpotlightCompositor,
}

impl RegionPipeline {
    /// Create a pipeline over `registry` with default operation settings.
    pub fn new(registry: DetectorRegistry) -> Self {
        Self {
            registry,
            extractor: SquareExtractor::new(),
            annotator: RegionAnnotator::new(),
            compositor: SpotlightCompositor::new(),
        }
    }

    /// Replace the square extraction settings.
    pub fn with_extractor(mut self, extractor: SquareExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the annotation settings.
    pub fn with_annotator(mut self, annotator: RegionAnnotator) -> Self {
        self.annotator = annotator;
        self
    }

    /// Replace the spotlight settings.
    pub fn with_compositor(mut self, compositor: SpotlightCompositor) -> Self {
        self.compositor = compositor;
        self
    }

    /// Detect regions of `kind` and extract one square crop per region.
    pub fn square(
        &self,
        kind: RegionKind,
        image_path: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, RegionCutError> {
        let detections = self.registry.detect(kind, image_path)?;
        self.extractor
            .extract(image_path, kind, &detections, output_dir)
    }

    /// Detect regions of `kind` and draw their padded outlines onto a copy
    /// of the source.
    pub fn mark(
        &self,
        kind: RegionKind,
        image_path: &Path,
        output_dir: &Path,
    ) -> Result<Overlay, RegionCutError> {
        let detections = self.registry.detect(kind, image_path)?;
        self.annotator
            .annotate(image_path, kind, &detections, output_dir)
    }

    /// Detect regions of `kind` and composite them sharp over a blurred
    /// copy of the source.
    pub fn spotlight(
        &self,
        kind: RegionKind,
        image_path: &Path,
        output_dir: &Path,
    ) -> Result<Overlay, RegionCutError> {
        let detections = self.registry.detect(kind, image_path)?;
        self.compositor
            .spotlight(image_path, kind, &detections, output_dir)
    }
}
