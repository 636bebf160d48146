//! Lanczos-3 resampling and the dimension arithmetic used to cover or fit a
//! target rectangle.
//!
//! Resampling is separable (horizontal, then vertical) with precomputed,
//! normalized taps. [`resize_region_rgba`] resamples only a window of the
//! source, so a cover-then-crop never materializes the oversized
//! intermediate image.
//!
//! # Example
//!
//! ```rust
//! use wallfit_ops::resize::resize_f32;
//!
//! let src: Vec<f32> = vec![0.0; 64 * 64 * 4]; // 64x64 RGBA
//! let dst = resize_f32(&src, 64, 64, 4, 128, 128).unwrap();
//! assert_eq!(dst.len(), 128 * 128 * 4);
//! ```

use crate::composite::{premultiply_inplace, unpremultiply_inplace};
use crate::error::check_len;
use crate::{OpsError, OpsResult};
use tracing::trace;

/// Lanczos lobe count, also the kernel support radius at unit scale.
const LANCZOS_A: f32 = 3.0;

/// Evaluates the Lanczos-3 kernel at position x.
#[inline]
pub fn lanczos3(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < LANCZOS_A {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / LANCZOS_A;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Fractional window of a source image, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Window width.
    pub width: f64,
    /// Window height.
    pub height: f64,
}

impl SourceRect {
    /// The whole `width x height` source.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
        }
    }

    fn check(&self, src_w: usize, src_h: usize) -> OpsResult<()> {
        const SLACK: f64 = 1e-6;
        let finite = [self.x, self.y, self.width, self.height].iter().all(|v| v.is_finite());
        if !finite
            || self.x < 0.0
            || self.y < 0.0
            || self.width <= 0.0
            || self.height <= 0.0
            || self.x + self.width > src_w as f64 + SLACK
            || self.y + self.height > src_h as f64 + SLACK
        {
            return Err(OpsError::InvalidDimensions(format!(
                "source window {:?} outside {}x{}",
                self, src_w, src_h
            )));
        }
        Ok(())
    }
}

/// Normalized filter taps for one destination coordinate.
struct Contribution {
    start: usize,
    weights: Vec<f32>,
}

/// Precomputes the taps mapping the source span `[offset, offset + span)`
/// onto `dst_len` samples.
///
/// Taps outside the source are dropped and the remaining weights renormalized.
fn contributions(src_len: usize, dst_len: usize, offset: f64, span: f64) -> Vec<Contribution> {
    let scale = span / dst_len as f64;
    let filter_scale = scale.max(1.0) as f32;
    let support = LANCZOS_A * filter_scale;

    (0..dst_len)
        .map(|i| {
            let center = (offset + (i as f64 + 0.5) * scale - 0.5) as f32;
            let left = ((center - support).floor() as isize).clamp(0, src_len as isize - 1) as usize;
            let right = ((center + support).ceil() as isize).clamp(0, src_len as isize - 1) as usize;

            let mut weights: Vec<f32> = (left..=right)
                .map(|s| lanczos3((s as f32 - center) / filter_scale))
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum.abs() > f32::EPSILON {
                for w in &mut weights {
                    *w /= sum;
                }
            } else {
                // Degenerate window: fall back to the nearest sample.
                let nearest = (center.round().max(0.0) as usize).min(src_len - 1);
                return Contribution { start: nearest, weights: vec![1.0] };
            }
            Contribution { start: left, weights }
        })
        .collect()
}

/// Resizes f32 image data with Lanczos-3.
///
/// Identity sizes return a copy of the input.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `src_w` - Source width
/// * `src_h` - Source height
/// * `channels` - Number of interleaved channels
/// * `dst_w` - Destination width
/// * `dst_h` - Destination height
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
) -> OpsResult<Vec<f32>> {
    if (src_w, src_h) == (dst_w, dst_h) {
        check_len(src, src_w, src_h, channels)?;
        return Ok(src.to_vec());
    }
    resize_region_f32(src, src_w, src_h, channels, SourceRect::full(src_w, src_h), dst_w, dst_h)
}

/// Resamples the `rect` window of the source to `dst_w x dst_h`.
///
/// Equivalent to resizing the whole source by `dst / rect` and cropping at
/// `rect`'s origin, but only the rows and columns the window reaches are
/// touched.
pub fn resize_region_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    rect: SourceRect,
    dst_w: usize,
    dst_h: usize,
) -> OpsResult<Vec<f32>> {
    trace!(src_w, src_h, ?rect, dst_w, dst_h, "resize_region_f32");
    check_len(src, src_w, src_h, channels)?;
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(
            "destination size must be > 0".into(),
        ));
    }
    rect.check(src_w, src_h)?;

    let h_taps = contributions(src_w, dst_w, rect.x, rect.width);
    let v_taps = contributions(src_h, dst_h, rect.y, rect.height);

    // Only rows some vertical tap reads go through the horizontal pass.
    let first_row = v_taps.iter().map(|t| t.start).min().unwrap_or(0);
    let last_row = v_taps
        .iter()
        .map(|t| t.start + t.weights.len())
        .max()
        .unwrap_or(first_row);

    let rows = &src[first_row * src_w * channels..last_row * src_w * channels];
    let temp = resize_horizontal(rows, src_w, last_row - first_row, channels, dst_w, &h_taps);
    Ok(resize_vertical(&temp, dst_w, channels, dst_h, &v_taps, first_row))
}

/// Resizes straight-alpha RGBA data through premultiplied space.
///
/// Premultiplying first keeps fully transparent pixels from bleeding their
/// color into neighbours.
pub fn resize_rgba(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
) -> OpsResult<Vec<f32>> {
    check_len(src, src_w, src_h, 4)?;
    if (src_w, src_h) == (dst_w, dst_h) {
        return Ok(src.to_vec());
    }
    resize_region_rgba(src, src_w, src_h, SourceRect::full(src_w, src_h), dst_w, dst_h)
}

/// [`resize_region_f32`] for straight-alpha RGBA data, through premultiplied space.
pub fn resize_region_rgba(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    rect: SourceRect,
    dst_w: usize,
    dst_h: usize,
) -> OpsResult<Vec<f32>> {
    check_len(src, src_w, src_h, 4)?;
    let mut premul = src.to_vec();
    premultiply_inplace(&mut premul);
    let mut dst = resize_region_f32(&premul, src_w, src_h, 4, rect, dst_w, dst_h)?;
    unpremultiply_inplace(&mut dst);
    Ok(dst)
}

fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    rows: usize,
    channels: usize,
    dst_w: usize,
    taps: &[Contribution],
) -> Vec<f32> {
    let mut dst = vec![0.0f32; dst_w * rows * channels];

    for y in 0..rows {
        let row = &src[y * src_w * channels..(y + 1) * src_w * channels];
        for (x, tap) in taps.iter().enumerate() {
            let dst_idx = (y * dst_w + x) * channels;
            for (k, &w) in tap.weights.iter().enumerate() {
                let src_idx = (tap.start + k) * channels;
                for c in 0..channels {
                    dst[dst_idx + c] += row[src_idx + c] * w;
                }
            }
        }
    }

    dst
}

/// Vertical pass over `src`, whose first row is source row `first_row`.
fn resize_vertical(
    src: &[f32],
    width: usize,
    channels: usize,
    dst_h: usize,
    taps: &[Contribution],
    first_row: usize,
) -> Vec<f32> {
    let row_len = width * channels;
    let mut dst = vec![0.0f32; row_len * dst_h];

    for (y, tap) in taps.iter().enumerate() {
        let out = &mut dst[y * row_len..(y + 1) * row_len];
        for (k, &w) in tap.weights.iter().enumerate() {
            let r = tap.start + k - first_row;
            let row = &src[r * row_len..(r + 1) * row_len];
            for (o, &s) in out.iter_mut().zip(row) {
                *o += s * w;
            }
        }
    }

    dst
}

/// Calculates dimensions that cover the target rectangle (may overflow one axis).
///
/// A source relatively wider than the target is scaled to the target height
/// and overflows in width; otherwise it is scaled to the target width and
/// overflows in height. The overflowing side is truncated, never below the
/// target size.
///
/// # Example
///
/// ```rust
/// use wallfit_ops::resize::cover_dimensions;
///
/// // Square source over a 16:9 target: width-led, height overflows
/// assert_eq!(cover_dimensions(1000, 1000, 1920, 1080), (1920, 1920));
/// ```
pub fn cover_dimensions(
    src_w: usize,
    src_h: usize,
    target_w: usize,
    target_h: usize,
) -> (usize, usize) {
    let src_aspect = src_w as f64 / src_h as f64;
    let target_aspect = target_w as f64 / target_h as f64;

    if src_aspect > target_aspect {
        let new_w = (target_h as f64 * src_aspect).floor() as usize;
        (new_w.max(target_w), target_h)
    } else {
        let new_h = (target_w as f64 / src_aspect).floor() as usize;
        (target_w, new_h.max(target_h))
    }
}

/// Calculates aspect-preserving dimensions that fit inside a bounding box.
///
/// Fits by height first; if the resulting width overflows, fits by width
/// instead, deriving the height from the original aspect ratio. Both sides
/// are rounded and at least 1.
///
/// # Example
///
/// ```rust
/// use wallfit_ops::resize::contain_dimensions;
///
/// // Panorama: height-first would give 3240 wide, so fit by width
/// assert_eq!(contain_dimensions(3000, 1000, 1920, 1080), (1920, 640));
/// ```
pub fn contain_dimensions(
    src_w: usize,
    src_h: usize,
    max_w: usize,
    max_h: usize,
) -> (usize, usize) {
    let aspect = src_w as f64 / src_h as f64;

    let by_height = ((max_h as f64 * aspect).round() as usize).max(1);
    if by_height <= max_w {
        return (by_height, max_h);
    }
    let by_width = ((max_w as f64 / aspect).round() as usize).clamp(1, max_h);
    (max_w, by_width)
}

/// Source window that survives covering `target_w x target_h` and center
/// cropping.
///
/// The source is conceptually scaled to [`cover_dimensions`] and cropped at
/// offsets `((cover_w - target_w) / 2, (cover_h - target_h) / 2)` (floor);
/// the returned rectangle is that crop mapped back into source pixels.
///
/// # Example
///
/// ```rust
/// use wallfit_ops::resize::cover_source_rect;
///
/// // 1000x1000 covers 1920x1080 at 1920x1920; rows 420..1500 survive
/// let rect = cover_source_rect(1000, 1000, 1920, 1080);
/// assert_eq!(rect.x, 0.0);
/// assert!((rect.width - 1000.0).abs() < 1e-9);
/// assert!((rect.y - 218.75).abs() < 1e-9);
/// assert!((rect.height - 562.5).abs() < 1e-9);
/// ```
pub fn cover_source_rect(
    src_w: usize,
    src_h: usize,
    target_w: usize,
    target_h: usize,
) -> SourceRect {
    let (cover_w, cover_h) = cover_dimensions(src_w, src_h, target_w, target_h);
    let scale_x = src_w as f64 / cover_w as f64;
    let scale_y = src_h as f64 / cover_h as f64;
    SourceRect {
        x: ((cover_w - target_w) / 2) as f64 * scale_x,
        y: ((cover_h - target_h) / 2) as f64 * scale_y,
        width: target_w as f64 * scale_x,
        height: target_h as f64 * scale_y,
    }
}
