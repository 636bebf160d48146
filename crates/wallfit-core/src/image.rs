//! Image buffer types.
//!
//! - [`RgbaImage`] - Owned 8-bit RGBA buffer, the unit the layout engine consumes and produces
//! - [`Mask`] - Owned single-channel 8-bit coverage buffer
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, with channels
//! interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//! ```
//!
//! Pixel operations in `wallfit-ops` work on normalized `f32` slices; use
//! [`RgbaImage::to_f32`] and [`RgbaImage::from_f32`] to cross that boundary.

use crate::{Error, Result};

/// Number of interleaved channels in an [`RgbaImage`].
pub const RGBA_CHANNELS: usize = 4;

/// Validates that `width * height * channels` fits and equals `len`.
fn check_buffer(width: u32, height: u32, channels: u32, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))?;
    if len != expected {
        return Err(Error::BufferLength {
            width,
            height,
            channels,
            expected,
            got: len,
        });
    }
    Ok(())
}

/// Converts an 8-bit channel value to normalized float.
#[inline]
pub fn u8_to_f32(v: u8) -> f32 {
    v as f32 / 255.0
}

/// Converts a normalized float to an 8-bit channel value (clamped, rounded).
#[inline]
pub fn f32_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Owned 8-bit RGBA image.
///
/// Invariant: `data.len() == width * height * 4`, width and height > 0.
///
/// # Example
///
/// ```rust
/// use wallfit_core::RgbaImage;
///
/// let img = RgbaImage::transparent(4, 2).unwrap();
/// assert_eq!(img.data().len(), 4 * 2 * 4);
/// assert_eq!(img.pixel(3, 1), [0, 0, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Wraps an existing RGBA8 buffer, validating its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_buffer(width, height, RGBA_CHANNELS as u32, data.len())?;
        Ok(Self { width, height, data })
    }

    /// Creates a fully transparent image (every channel 0).
    pub fn transparent(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Creates an image filled with a single color.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Result<Self> {
        check_buffer(width, height, 1, (width as usize) * (height as usize))?;
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * RGBA_CHANNELS)
            .collect();
        Ok(Self { width, height, data })
    }

    /// Builds an image from normalized `f32` RGBA data.
    ///
    /// Values are clamped to `[0, 1]` and rounded to the nearest 8-bit level.
    pub fn from_f32(width: u32, height: u32, data: &[f32]) -> Result<Self> {
        check_buffer(width, height, RGBA_CHANNELS as u32, data.len())?;
        Ok(Self {
            width,
            height,
            data: data.iter().map(|&v| f32_to_u8(v)).collect(),
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width divided by height.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Raw RGBA8 data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * RGBA_CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Converts to normalized `f32` RGBA data.
    pub fn to_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&v| u8_to_f32(v)).collect()
    }

    /// Returns `true` if every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(RGBA_CHANNELS).all(|px| px[3] == 255)
    }
}

/// Owned single-channel 8-bit coverage mask.
///
/// 255 means fully covered, 0 means not covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Wraps an existing coverage buffer, validating its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_buffer(width, height, 1, data.len())?;
        Ok(Self { width, height, data })
    }

    /// Mask width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw coverage data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "mask ({x}, {y}) out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Converts to normalized `f32` coverage.
    pub fn to_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&v| u8_to_f32(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_validates_length() {
        assert!(RgbaImage::new(2, 2, vec![0; 16]).is_ok());
        let err = RgbaImage::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::BufferLength { expected: 16, got: 15, .. }));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            RgbaImage::new(0, 10, vec![]),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(RgbaImage::transparent(10, 0).is_err());
        assert!(Mask::new(0, 0, vec![]).is_err());
    }

    #[test]
    fn test_transparent_canvas() {
        let img = RgbaImage::transparent(3, 3).unwrap();
        assert!(img.data().iter().all(|&v| v == 0));
        assert!(!img.is_opaque());
    }

    #[test]
    fn test_filled_and_pixel() {
        let img = RgbaImage::filled(5, 4, [10, 20, 30, 255]).unwrap();
        assert_eq!(img.pixel(4, 3), [10, 20, 30, 255]);
        assert!(img.is_opaque());
    }

    #[test]
    fn test_aspect_ratio() {
        let img = RgbaImage::transparent(1920, 1080).unwrap();
        assert_relative_eq!(img.aspect_ratio(), 16.0 / 9.0);
    }

    #[test]
    fn test_f32_roundtrip_is_exact() {
        let data: Vec<u8> = (0..=255u8).collect();
        let img = RgbaImage::new(8, 8, data.clone()).unwrap();
        let back = RgbaImage::from_f32(8, 8, &img.to_f32()).unwrap();
        assert_eq!(back.data(), &data[..]);
    }

    #[test]
    fn test_f32_to_u8_clamps() {
        assert_eq!(f32_to_u8(-0.5), 0);
        assert_eq!(f32_to_u8(1.5), 255);
        assert_eq!(f32_to_u8(0.5), 128);
    }

    #[test]
    fn test_mask_access() {
        let mask = Mask::new(2, 2, vec![0, 64, 128, 255]).unwrap();
        assert_eq!(mask.get(1, 0), 64);
        assert_eq!(mask.get(0, 1), 128);
        assert!(Mask::new(2, 2, vec![0; 3]).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds_panics() {
        RgbaImage::transparent(2, 2).unwrap().pixel(2, 0);
    }
}
