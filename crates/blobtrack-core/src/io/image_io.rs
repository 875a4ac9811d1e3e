use std::path::{Path, PathBuf};

use crate::consts::IMAGE_SEQUENCE_EXTENSIONS;
use crate::error::{BlobTrackError, Result};
use crate::frame::ColorFrame;

/// Load an image file into an 8-bit RGB frame. Alpha is discarded and
/// higher bit depths are reduced to 8 bits.
pub fn load_color_image(path: &Path) -> Result<ColorFrame> {
    let img = image::open(path)?;
    Ok(ColorFrame::from_rgb_image(&img.to_rgb8()))
}

/// True if the path has one of the extensions accepted for image sequences.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_SEQUENCE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// List the image files of a directory, sorted by file name.
pub fn list_image_sequence(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(BlobTrackError::EmptySequence(dir.display().to_string()));
    }

    paths.sort();
    Ok(paths)
}
