use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, warn};

use crate::detector::{Detection, RegionKind};
use crate::error::RegionCutError;
use crate::geometry::{padded_rect, PaddedRect};
use crate::output;
use crate::Overlay;

/// Draws one outlined rectangle per detection onto a copy of the source.
///
/// All boxes land in a single output file; the image keeps its original
/// dimensions. Defaults: 20% padding, red outline, 8px stroke.
#[derive(Debug, Clone)]
pub struct RegionAnnotator {
    padding_ratio: f64,
    color: Rgb<u8>,
    stroke_width: u32,
}

impl RegionAnnotator {
    /// Create an annotator with the default padding, color, and stroke.
    pub fn new() -> Self {
        Self {
            padding_ratio: 0.2,
            color: Rgb([255, 0, 0]),
            stroke_width: 8,
        }
    }

    /// Set the outward expansion ratio per axis (default: 0.2).
    pub fn padding_ratio(mut self, ratio: f64) -> Self {
        self.padding_ratio = ratio;
        self
    }

    /// Set the outline color (default: red).
    pub fn color(mut self, color: Rgb<u8>) -> Self {
        self.color = color;
        self
    }

    /// Set the outline stroke width in pixels (default: 8).
    pub fn stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Draw padded boxes for every detection and save one annotated PNG.
    ///
    /// With zero detections nothing is written and the untouched source
    /// path comes back as [`Overlay::Skipped`].
    pub fn annotate(
        &self,
        image_path: &Path,
        kind: RegionKind,
        detections: &[Detection],
        output_dir: &Path,
    ) -> Result<Overlay, RegionCutError> {
        if !(self.padding_ratio >= 0.0) {
            return Err(RegionCutError::InvalidPaddingRatio(self.padding_ratio));
        }
        if detections.is_empty() {
            warn!(kind = %kind, "no regions to annotate, leaving source untouched");
            return Ok(Overlay::Skipped(image_path.to_path_buf()));
        }

        let mut image = image::open(image_path)
            .map_err(|e| RegionCutError::Decode(e.to_string()))?
            .to_rgb8();
        let (width, height) = (image.width(), image.height());

        for detection in detections {
            let Some(rect) = padded_rect(&detection.bounds, width, height, self.padding_ratio)
            else {
                warn!(label = %detection.label, "padded box collapsed after clamping, skipping");
                continue;
            };
            draw_outline(&mut image, &rect, self.color, self.stroke_width);
        }

        fs::create_dir_all(output_dir)?;
        let output_path = output::marked_path(output_dir, image_path, kind);
        image
            .save(&output_path)
            .map_err(|e| RegionCutError::Encode(e.to_string()))?;
        debug!(path = %output_path.display(), boxes = detections.len(), "saved annotated image");
        Ok(Overlay::Written(output_path))
    }
}

impl Default for RegionAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw an unfilled rectangle with the given stroke width by nesting hollow
/// rects inward from the padded box edge.
pub(crate) fn draw_outline(
    canvas: &mut RgbImage,
    rect: &PaddedRect,
    color: Rgb<u8>,
    stroke_width: u32,
) {
    for inset in 0..stroke_width {
        let w = rect.width().saturating_sub(2 * inset);
        let h = rect.height().saturating_sub(2 * inset);
        if w == 0 || h == 0 {
            break;
        }
        let ring = Rect::at((rect.x0 + inset) as i32, (rect.y0 + inset) as i32).of_size(w, h);
        draw_hollow_rect_mut(canvas, ring, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::BoundingBox;

    #[test]
    fn no_detections_skip_without_reading_the_source() {
        let annotator = RegionAnnotator::new();
        let result = annotator
            .annotate(
                Path::new("does_not_exist.png"),
                RegionKind::Faces,
                &[],
                Path::new("unused"),
            )
            .unwrap();
        assert_eq!(
            result,
            Overlay::Skipped(Path::new("does_not_exist.png").to_path_buf())
        );
    }

    #[test]
    fn outline_covers_stroke_width_and_leaves_interior() {
        let mut canvas = RgbImage::from_pixel(40, 40, Rgb([0, 0, 0]));
        let rect = PaddedRect { x0: 5, y0: 5, x1: 25, y1: 25 };
        draw_outline(&mut canvas, &rect, Rgb([255, 0, 0]), 3);

        // Outer edge and two insets are painted
        assert_eq!(canvas.get_pixel(5, 5), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(7, 15), &Rgb([255, 0, 0]));
        // Interior stays untouched
        assert_eq!(canvas.get_pixel(15, 15), &Rgb([0, 0, 0]));
        // So does everything outside the box
        assert_eq!(canvas.get_pixel(3, 3), &Rgb([0, 0, 0]));
    }

    #[test]
    fn thick_stroke_on_a_small_box_stops_at_the_middle() {
        let mut canvas = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let rect = PaddedRect { x0: 2, y0: 2, x1: 8, y1: 8 };
        draw_outline(&mut canvas, &rect, Rgb([0, 255, 0]), 50);
        // Fully filled by the collapsing rings, no panic
        assert_eq!(canvas.get_pixel(4, 4), &Rgb([0, 255, 0]));
    }

    #[test]
    fn negative_padding_is_rejected() {
        let detections = vec![Detection::new(
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            "face",
            0.9,
        )];
        let result = RegionAnnotator::new().padding_ratio(-1.0).annotate(
            Path::new("does_not_exist.png"),
            RegionKind::Faces,
            &detections,
            Path::new("unused"),
        );
        assert!(matches!(
            result,
            Err(RegionCutError::InvalidPaddingRatio(_))
        ));
    }
}
