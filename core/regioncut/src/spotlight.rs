use std::fs;
use std::path::Path;

use image::{imageops, GrayImage, Luma, Rgb};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, warn};

use crate::annotate::draw_outline;
use crate::detector::{Detection, RegionKind};
use crate::error::RegionCutError;
use crate::geometry::padded_rect;
use crate::output;
use crate::Overlay;

/// Blurs the whole image and restores sharpness inside padded detection
/// boxes, optionally drawing their outlines on top.
///
/// Defaults: 30% padding, blur sigma 15, outlines off (red, 8px stroke when
/// enabled).
#[derive(Debug, Clone)]
pub struct SpotlightCompositor {
    padding_ratio: f64,
    blur_sigma: f32,
    draw_outlines: bool,
    outline_color: Rgb<u8>,
    outline_width: u32,
}

impl SpotlightCompositor {
    /// Create a compositor with the default padding, blur, and outline
    /// settings.
    pub fn new() -> Self {
        Self {
            padding_ratio: 0.3,
            blur_sigma: 15.0,
            draw_outlines: false,
            outline_color: Rgb([255, 0, 0]),
            outline_width: 8,
        }
    }

    /// Set the outward expansion ratio per axis (default: 0.3).
    pub fn padding_ratio(mut self, ratio: f64) -> Self {
        self.padding_ratio = ratio;
        self
    }

    /// Set the Gaussian blur sigma in pixels (default: 15).
    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    /// Draw box outlines over the composite (default: off).
    pub fn draw_outlines(mut self, enable: bool) -> Self {
        self.draw_outlines = enable;
        self
    }

    /// Set the outline color used when outlines are on (default: red).
    pub fn outline_color(mut self, color: Rgb<u8>) -> Self {
        self.outline_color = color;
        self
    }

    /// Set the outline stroke width used when outlines are on (default: 8).
    pub fn outline_width(mut self, width: u32) -> Self {
        self.outline_width = width;
        self
    }

    /// Composite sharp regions over a blurred copy and save one PNG.
    ///
    /// The selection is binary per pixel: inside any padded box the source
    /// pixel is kept, everywhere else the blurred pixel is used. Overlapping
    /// boxes form a plain union. With zero detections nothing is written and
    /// the untouched source path comes back as [`Overlay::Skipped`].
    pub fn spotlight(
        &self,
        image_path: &Path,
        kind: RegionKind,
        detections: &[Detection],
        output_dir: &Path,
    ) -> Result<Overlay, RegionCutError> {
        if !(self.padding_ratio >= 0.0) {
            return Err(RegionCutError::InvalidPaddingRatio(self.padding_ratio));
        }
        if !(self.blur_sigma > 0.0) {
            return Err(RegionCutError::InvalidBlurSigma(self.blur_sigma));
        }
        if detections.is_empty() {
            warn!(kind = %kind, "no regions to highlight, leaving source untouched");
            return Ok(Overlay::Skipped(image_path.to_path_buf()));
        }

        let source = image::open(image_path)
            .map_err(|e| RegionCutError::Decode(e.to_string()))?
            .to_rgb8();
        let (width, height) = (source.width(), source.height());

        let blurred = imageops::blur(&source, self.blur_sigma);

        // 0 = blurred, 255 = sharp. Overlaps just refill the same pixels.
        let mut mask = GrayImage::new(width, height);
        let mut rects = Vec::with_capacity(detections.len());
        for detection in detections {
            let Some(rect) = padded_rect(&detection.bounds, width, height, self.padding_ratio)
            else {
                warn!(label = %detection.label, "padded box collapsed after clamping, skipping");
                continue;
            };
            draw_filled_rect_mut(
                &mut mask,
                Rect::at(rect.x0 as i32, rect.y0 as i32).of_size(rect.width(), rect.height()),
                Luma([255u8]),
            );
            rects.push(rect);
        }

        let mut composite = blurred;
        for (x, y, pixel) in composite.enumerate_pixels_mut() {
            if mask.get_pixel(x, y).0[0] != 0 {
                *pixel = *source.get_pixel(x, y);
            }
        }

        if self.draw_outlines {
            for rect in &rects {
                draw_outline(&mut composite, rect, self.outline_color, self.outline_width);
            }
        }

        fs::create_dir_all(output_dir)?;
        let output_path = output::highlighted_path(output_dir, image_path, kind);
        composite
            .save(&output_path)
            .map_err(|e| RegionCutError::Encode(e.to_string()))?;
        debug!(path = %output_path.display(), sharp_regions = rects.len(), "saved spotlight composite");
        Ok(Overlay::Written(output_path))
    }
}

impl Default for SpotlightCompositor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::BoundingBox;

    fn detections() -> Vec<Detection> {
        vec![Detection::new(
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            "face",
            0.9,
        )]
    }

    #[test]
    fn no_detections_skip_without_reading_the_source() {
        let result = SpotlightCompositor::new()
            .spotlight(
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
    fn zero_blur_sigma_is_rejected() {
        let result = SpotlightCompositor::new().blur_sigma(0.0).spotlight(
            Path::new("does_not_exist.png"),
            RegionKind::Faces,
            &detections(),
            Path::new("unused"),
        );
        assert!(matches!(result, Err(RegionCutError::InvalidBlurSigma(_))));
    }

    #[test]
    fn negative_padding_is_rejected() {
        let result = SpotlightCompositor::new().padding_ratio(-0.5).spotlight(
            Path::new("does_not_exist.png"),
            RegionKind::Faces,
            &detections(),
            Path::new("unused"),
        );
        assert!(matches!(
            result,
            Err(RegionCutError::InvalidPaddingRatio(_))
        ));
    }
}
