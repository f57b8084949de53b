//! Generate every derived output for a synthetic scene.
//!
//! Usage:
//!   cargo run --example generate_outputs
//!
//! Output goes to `<temp>/regioncut_demo/`.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use regioncut::{
    BoundingBox, Detection, DetectorRegistry, RegionDetector, RegionKind, RegionPipeline,
    SpotlightCompositor,
};

/// Stand-in for a real inference backend: two fixed face boxes.
struct DemoDetector;

impl RegionDetector for DemoDetector {
    fn detect(&self, _image_path: &Path) -> Vec<Detection> {
        vec![
            Detection::new(BoundingBox::new(120.0, 80.0, 280.0, 260.0), "face", 0.97),
            Detection::new(BoundingBox::new(420.0, 150.0, 560.0, 310.0), "face", 0.88),
        ]
    }
}

/// Paint a scene with two bright "subjects" on a gradient backdrop so the
/// crops and the blur composite are visually obvious.
fn paint_scene(path: &Path) {
    let mut img = RgbImage::new(640, 480);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([(x / 4) as u8, (y / 4) as u8, 96]);
    }
    for (x0, y0, x1, y1, color) in [
        (120u32, 80u32, 280u32, 260u32, Rgb([230, 180, 60])),
        (420, 150, 560, 310, Rgb([70, 200, 160])),
    ] {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, color);
            }
        }
    }
    img.save(path).expect("failed to write demo scene");
}

fn main() {
    let demo_dir: PathBuf = std::env::temp_dir().join("regioncut_demo");
    std::fs::create_dir_all(&demo_dir).expect("failed to create demo directory");

    let scene = demo_dir.join("scene.png");
    paint_scene(&scene);

    let mut registry = DetectorRegistry::new();
    registry.register(RegionKind::Faces, Box::new(DemoDetector));

    let pipeline = RegionPipeline::new(registry)
        .with_compositor(SpotlightCompositor::new().draw_outlines(true));

    let crops = pipeline
        .square(RegionKind::Faces, &scene, &demo_dir)
        .expect("square extraction failed");
    for path in &crops {
        println!("crop:      {}", path.display());
    }

    let marked = pipeline
        .mark(RegionKind::Faces, &scene, &demo_dir)
        .expect("annotation failed");
    println!("marked:    {}", marked.path().display());

    let highlighted = pipeline
        .spotlight(RegionKind::Faces, &scene, &demo_dir)
        .expect("spotlight failed");
    println!("spotlight: {}", highlighted.path().display());
}
