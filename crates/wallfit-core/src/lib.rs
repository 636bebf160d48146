//! # wallfit-core
//!
//! Core types shared by the wallfit crates:
//!
//! - [`RgbaImage`] - 8-bit RGBA image buffer
//! - [`Mask`] - single-channel coverage mask
//! - [`Error`], [`Result`] - buffer construction errors
//!
//! ## Crate Structure
//!
//! ```text
//! wallfit-core (this crate)
//!    ^
//!    +-- wallfit-ops (pixel operations)
//!    +-- wallfit-io (PNG/JPEG codecs)
//!    +-- wallfit-layout (wallpaper layout engine)
//!    +-- wallfit-cli (batch driver)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;

pub use error::{Error, Result};
pub use image::{f32_to_u8, u8_to_f32, Mask, RgbaImage, RGBA_CHANNELS};
