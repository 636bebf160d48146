//! # wallfit-layout
//!
//! Turns an arbitrary RGBA image into a 1920x1080 wallpaper canvas.
//!
//! The source is classified by aspect ratio ([`AspectClass`]) and handed to
//! one of four policies:
//!
//! | Class          | Foreground                          | Mask            |
//! |----------------|-------------------------------------|-----------------|
//! | `Exact1080p`   | the source itself                   | none            |
//! | `Portrait9x16` | full height, centered horizontally  | own alpha       |
//! | `Square`       | fixed 500x500, centered             | rounded corners |
//! | `Other`        | fitted inside the canvas, centered  | rounded corners |
//!
//! Every policy except `Exact1080p` draws the foreground over a blurred,
//! cover-scaled copy of the source ([`background::blurred_background`]).
//!
//! # Example
//!
//! ```rust
//! use wallfit_core::RgbaImage;
//! use wallfit_layout::{layout, AspectClass};
//!
//! let square = RgbaImage::filled(64, 64, [200, 40, 40, 255]).unwrap();
//! assert_eq!(AspectClass::classify(64, 64), AspectClass::Square);
//!
//! let canvas = layout(&square).unwrap();
//! assert_eq!(canvas.dimensions(), (1920, 1080));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod aspect;
pub mod background;
mod error;
pub mod layout;

pub use aspect::AspectClass;
pub use error::{LayoutError, LayoutResult};
pub use layout::{compose, layout, layout_with_class, MaskSource, Placement};

/// Canvas width in pixels.
pub const TARGET_WIDTH: u32 = 1920;

/// Canvas height in pixels.
pub const TARGET_HEIGHT: u32 = 1080;

/// Side of the foreground tile used for square sources.
pub const SQUARE_SIZE: u32 = 500;

/// Corner radius of rounded foregrounds.
pub const CORNER_RADIUS: f32 = 20.0;

/// Standard deviation of the background blur.
pub const BACKGROUND_BLUR_SIGMA: f32 = 30.0;

/// Maximum absolute distance (exclusive) from a canonical aspect ratio.
pub const ASPECT_TOLERANCE: f64 = 0.1;
