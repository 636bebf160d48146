//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Images have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer construction failed.
    #[error(transparent)]
    Core(#[from] wallfit_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Checks that `src` holds exactly `width * height * channels` values.
pub(crate) fn check_len(src: &[f32], width: usize, height: usize, channels: usize) -> OpsResult<()> {
    let expected = width * height * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} values for {}x{}x{}, got {}",
            expected,
            width,
            height,
            channels,
            src.len()
        )));
    }
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "image size must be > 0, got {}x{}",
            width, height
        )));
    }
    Ok(())
}
