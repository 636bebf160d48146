//! Aspect ratio classification.

use crate::{ASPECT_TOLERANCE, TARGET_HEIGHT, TARGET_WIDTH};
use std::fmt;

/// Layout class of a source image, derived from its width/height ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectClass {
    /// 16:9 and exactly 1920x1080: used as-is.
    Exact1080p,
    /// Close to 9:16: full-height foreground over a blurred background.
    Portrait9x16,
    /// Close to 1:1: fixed 500x500 rounded tile over a blurred background.
    Square,
    /// Anything else: fitted rounded foreground over a blurred background.
    Other,
}

impl AspectClass {
    /// Classifies an image by its dimensions.
    ///
    /// Checks run in priority order; the first match wins. A ratio "matches"
    /// when it lies strictly within [`ASPECT_TOLERANCE`] of the canonical
    /// ratio. `Exact1080p` additionally requires the exact target size, so a
    /// 3840x2160 image is not `Exact1080p`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wallfit_layout::AspectClass;
    ///
    /// assert_eq!(AspectClass::classify(1920, 1080), AspectClass::Exact1080p);
    /// assert_eq!(AspectClass::classify(1080, 1920), AspectClass::Portrait9x16);
    /// assert_eq!(AspectClass::classify(800, 760), AspectClass::Square);
    /// assert_eq!(AspectClass::classify(3840, 2160), AspectClass::Other);
    /// ```
    pub fn classify(width: u32, height: u32) -> Self {
        let ratio = width as f64 / height as f64;
        let near = |canonical: f64| (ratio - canonical).abs() < ASPECT_TOLERANCE;

        if near(16.0 / 9.0) && width == TARGET_WIDTH && height == TARGET_HEIGHT {
            AspectClass::Exact1080p
        } else if near(9.0 / 16.0) {
            AspectClass::Portrait9x16
        } else if near(1.0) {
            AspectClass::Square
        } else {
            AspectClass::Other
        }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            AspectClass::Exact1080p => "exact-1080p",
            AspectClass::Portrait9x16 => "portrait-9x16",
            AspectClass::Square => "square",
            AspectClass::Other => "other",
        }
    }
}

impl fmt::Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
