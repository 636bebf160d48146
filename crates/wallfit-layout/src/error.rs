//! Error types for the layout engine.

use thiserror::Error;
use wallfit_ops::OpsError;

/// Layout failure.
///
/// A decoded image always satisfies the buffer invariants, so these errors
/// indicate a caller bug (for example forcing a policy whose placement does
/// not fit the canvas) rather than bad input data.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Invalid image buffer or dimensions.
    #[error(transparent)]
    Image(#[from] wallfit_core::Error),

    /// A pixel operation rejected its arguments.
    #[error(transparent)]
    Ops(#[from] OpsError),
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
