use std::path::{Path, PathBuf};

use crate::detector::RegionKind;

/// File stem of the source image, falling back to "image" for pathological
/// paths.
pub fn source_stem(image_path: &Path) -> &str {
    image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
}

/// `{stem}_{kind}_{index}.png`: one file per extracted square.
pub fn crop_path(output_dir: &Path, image_path: &Path, kind: RegionKind, index: usize) -> PathBuf {
    output_dir.join(format!("{}_{kind}_{index}.png", source_stem(image_path)))
}

/// `{stem}_{kind}_marked.png`: the single annotated copy.
pub fn marked_path(output_dir: &Path, image_path: &Path, kind: RegionKind) -> PathBuf {
    output_dir.join(format!("{}_{kind}_marked.png", source_stem(image_path)))
}

/// `{stem}_{kind}_highlighted.png`: the single spotlight composite.
pub fn highlighted_path(output_dir: &Path, image_path: &Path, kind: RegionKind) -> PathBuf {
    output_dir.join(format!("{}_{kind}_highlighted.png", source_stem(image_path)))
}
