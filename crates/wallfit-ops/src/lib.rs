//! # wallfit-ops
//!
//! Pixel operations used by the wallpaper layout engine.
//!
//! All operations work on interleaved, normalized `f32` slices described by
//! width, height and channel count, and return freshly allocated buffers
//! (or mutate in place where noted).
//!
//! # Modules
//!
//! - [`resize`] - Lanczos-3 resampling, windowed resampling and cover/contain dimension math
//! - [`filter`] - Box and Gaussian blur
//! - [`composite`] - Paste, masked paste, alpha premultiplication
//! - [`mask`] - Rounded-rectangle coverage masks
//!
//! # Example
//!
//! ```rust
//! use wallfit_ops::{filter, resize};
//!
//! let src = vec![0.5f32; 32 * 32 * 4];
//! let blurred = filter::gaussian_blur(&src, 32, 32, 4, 3.0).unwrap();
//! let scaled = resize::resize_rgba(&blurred, 32, 32, 64, 64).unwrap();
//! assert_eq!(scaled.len(), 64 * 64 * 4);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod composite;
pub mod filter;
pub mod mask;
pub mod resize;

pub use error::{OpsError, OpsResult};
pub use resize::SourceRect;
