//! CLI command implementations

pub mod batch;
pub mod classify;
pub mod layout;

use anyhow::{Context, Result};
use std::path::Path;
use wallfit_core::RgbaImage;

/// Load image from path
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    wallfit_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path as PNG
pub fn save_image(path: &Path, image: &RgbaImage) -> Result<()> {
    wallfit_io::write_png(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// File name for messages, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
