//! # wallfit-io
//!
//! Image I/O for the wallpaper pipeline.
//!
//! Every decoder yields a [`wallfit_core::RgbaImage`]; output is always
//! 8-bit RGBA PNG.
//!
//! # Supported Formats
//!
//! | Format | Read | Write |
//! |--------|------|-------|
//! | PNG    | yes  | yes   |
//! | JPEG   | yes  | no    |
//!
//! # Example
//!
//! ```rust,ignore
//! use wallfit_io::{read, write_png};
//!
//! let image = read("photo.jpg")?;
//! write_png("photo.png", &image)?;
//! ```

#![warn(missing_docs)]

mod detect;
mod error;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

pub use detect::{is_supported_extension, Format};
pub use error::{IoError, IoResult};

use std::path::Path;
use tracing::debug;
use wallfit_core::RgbaImage;

/// Reads an image file, detecting the format from magic bytes then extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbaImage> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), format = format.name(), "Reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),

        _ => Err(IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}

/// Decodes an in-memory image, detecting the format from magic bytes.
pub fn read_from_memory(data: &[u8]) -> IoResult<RgbaImage> {
    match Format::from_bytes(data) {
        #[cfg(feature = "png")]
        Format::Png => png::read_from_memory(data),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read_from_memory(data),

        format => Err(IoError::UnsupportedFormat(format.name().to_string())),
    }
}

/// Writes an image as an 8-bit RGBA PNG, whatever the path's extension.
#[cfg(feature = "png")]
pub fn write_png<P: AsRef<Path>>(path: P, image: &RgbaImage) -> IoResult<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), width = image.width(), height = image.height(), "Writing PNG");
    png::write(path, image)
}
