use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use tracing::{debug, warn};

use crate::detector::{Detection, RegionKind};
use crate::error::RegionCutError;
use crate::geometry::square_region;
use crate::output;

/// Turns each detected region into a padded, square, fixed-resolution crop.
///
/// Configure with the builder methods, then call [`extract`](Self::extract)
/// once per image. Defaults: 512px output edge, 30% padding.
#[derive(Debug, Clone)]
pub struct SquareExtractor {
    target_size: u32,
    padding_ratio: f64,
}

impl SquareExtractor {
    /// Create an extractor with the default target size and padding.
    pub fn new() -> Self {
        Self {
            target_size: 512,
            padding_ratio: 0.3,
        }
    }

    /// Set the output square edge length in pixels (default: 512).
    pub fn target_size(mut self, size: u32) -> Self {
        self.target_size = size;
        self
    }

    /// Set the outward expansion ratio applied on both sides of the region
    /// (default: 0.3).
    pub fn padding_ratio(mut self, ratio: f64) -> Self {
        self.padding_ratio = ratio;
        self
    }

    /// Extract one square PNG per detection into `output_dir`.
    ///
    /// Regions whose square collapses after clamping are skipped; their
    /// index is still consumed, so surviving files keep the position of
    /// their detection in `detections`. An empty detection list, or one
    /// where every region collapses, is an error rather than an empty
    /// success.
    pub fn extract(
        &self,
        image_path: &Path,
        kind: RegionKind,
        detections: &[Detection],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, RegionCutError> {
        if self.target_size == 0 {
            return Err(RegionCutError::InvalidTargetSize);
        }
        if !(self.padding_ratio >= 0.0) {
            return Err(RegionCutError::InvalidPaddingRatio(self.padding_ratio));
        }
        if detections.is_empty() {
            return Err(RegionCutError::NoDetections);
        }

        fs::create_dir_all(output_dir)?;

        let image =
            image::open(image_path).map_err(|e| RegionCutError::Decode(e.to_string()))?;
        let (width, height) = (image.width(), image.height());

        let mut result_paths = Vec::with_capacity(detections.len());
        for (index, detection) in detections.iter().enumerate() {
            let Some(square) = square_region(&detection.bounds, width, height, self.padding_ratio)
            else {
                warn!(index, label = %detection.label, "region collapsed after clamping, skipping");
                continue;
            };

            let crop = image.crop_imm(square.x, square.y, square.size, square.size);
            let scaled =
                crop.resize_exact(self.target_size, self.target_size, FilterType::Lanczos3);

            let output_path = output::crop_path(output_dir, image_path, kind, index);
            scaled
                .save(&output_path)
                .map_err(|e| RegionCutError::Encode(e.to_string()))?;
            debug!(path = %output_path.display(), "saved square crop");
            result_paths.push(output_path);
        }

        if result_paths.is_empty() {
            return Err(RegionCutError::NoUsableRegions);
        }
        Ok(result_paths)
    }
}

impl Default for SquareExtractor {
    fn default() -> Self {
        Self::new()
    }
}
