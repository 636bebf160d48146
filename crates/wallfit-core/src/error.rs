//! Error types for wallfit-core.
//!
//! The [`Error`] enum covers the failure modes of constructing and
//! addressing image buffers. Higher crates wrap it in their own error
//! types (`OpsError`, `IoError`, `LayoutError`).
//!
//! # Usage
//!
//! ```rust
//! use wallfit_core::{Error, Result};
//!
//! fn check(width: u32, height: u32) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_dimensions(width, height, "zero-sized"));
//!     }
//!     Ok(())
//! }
//! assert!(check(0, 10).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or addressing image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or the size would overflow
    /// buffer length calculations.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Pixel buffer length does not match `width * height * channels`.
    #[error("buffer length {got} does not match {width}x{height}x{channels} = {expected}")]
    BufferLength {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Channels per pixel
        channels: u32,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
