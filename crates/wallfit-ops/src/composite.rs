//! Compositing operations.
//!
//! - [`paste`] - Copy a region onto a larger image, replacing pixels
//! - [`paste_masked`] - Blend a region through a coverage mask
//! - [`premultiply_inplace`], [`unpremultiply_inplace`] - Alpha representation changes
//! - [`set_alpha`] - Force every pixel to one alpha value
//!
//! Masked pasting blends every channel, alpha included:
//! `dst = src * m + dst * (1 - m)`.
//!
//! # Example
//!
//! ```rust
//! use wallfit_ops::composite::paste_masked;
//!
//! let mut dst = vec![0.0f32; 4 * 4 * 4];
//! let src = vec![1.0f32; 2 * 2 * 4];
//! let mask = vec![1.0f32; 2 * 2];
//! paste_masked(&mut dst, 4, 4, &src, 2, 2, 1, 1, &mask).unwrap();
//! assert_eq!(dst[(1 * 4 + 1) * 4], 1.0);
//! assert_eq!(dst[0], 0.0);
//! ```

use crate::error::check_len;
use crate::{OpsError, OpsResult};
use tracing::trace;

/// Premultiplies alpha in place for RGBA data: `RGB *= A`.
pub fn premultiply_inplace(data: &mut [f32]) {
    for chunk in data.chunks_exact_mut(4) {
        let a = chunk[3];
        chunk[0] *= a;
        chunk[1] *= a;
        chunk[2] *= a;
    }
}

/// Unpremultiplies alpha in place for RGBA data: `RGB /= A`.
///
/// Alpha is clamped to `[0, 1]` first so that filter overshoot cannot
/// amplify color. Pixels with (near) zero alpha become transparent black.
pub fn unpremultiply_inplace(data: &mut [f32]) {
    for chunk in data.chunks_exact_mut(4) {
        let a = chunk[3].clamp(0.0, 1.0);
        chunk[3] = a;
        if a > 1e-8 {
            let inv_a = 1.0 / a;
            chunk[0] = (chunk[0] * inv_a).clamp(0.0, 1.0);
            chunk[1] = (chunk[1] * inv_a).clamp(0.0, 1.0);
            chunk[2] = (chunk[2] * inv_a).clamp(0.0, 1.0);
        } else {
            chunk[0] = 0.0;
            chunk[1] = 0.0;
            chunk[2] = 0.0;
        }
    }
}

/// Sets the alpha of every RGBA pixel to `alpha`.
pub fn set_alpha(data: &mut [f32], alpha: f32) {
    for chunk in data.chunks_exact_mut(4) {
        chunk[3] = alpha;
    }
}

/// Validates that a `src_w x src_h` region at (x, y) lies inside the destination.
fn check_region(
    dst_w: usize,
    dst_h: usize,
    src_w: usize,
    src_h: usize,
    x: usize,
    y: usize,
) -> OpsResult<()> {
    if x + src_w > dst_w || y + src_h > dst_h {
        return Err(OpsError::SizeMismatch(format!(
            "region {}x{} at ({},{}) exceeds {}x{}",
            src_w, src_h, x, y, dst_w, dst_h
        )));
    }
    Ok(())
}

/// Copies an RGBA region onto `dst` at (x, y), replacing the covered pixels.
pub fn paste(
    dst: &mut [f32],
    dst_w: usize,
    dst_h: usize,
    src: &[f32],
    src_w: usize,
    src_h: usize,
    x: usize,
    y: usize,
) -> OpsResult<()> {
    trace!(dst_w, dst_h, src_w, src_h, x, y, "composite::paste");
    check_len(dst, dst_w, dst_h, 4)?;
    check_len(src, src_w, src_h, 4)?;
    check_region(dst_w, dst_h, src_w, src_h, x, y)?;

    let row_len = src_w * 4;
    for row in 0..src_h {
        let src_start = row * row_len;
        let dst_start = ((y + row) * dst_w + x) * 4;
        dst[dst_start..dst_start + row_len].copy_from_slice(&src[src_start..src_start + row_len]);
    }
    Ok(())
}

/// Blends an RGBA region onto `dst` at (x, y) through a coverage mask.
///
/// `mask` holds one normalized coverage value per source pixel. Every
/// channel, alpha included, is interpolated towards the source by the mask.
pub fn paste_masked(
    dst: &mut [f32],
    dst_w: usize,
    dst_h: usize,
    src: &[f32],
    src_w: usize,
    src_h: usize,
    x: usize,
    y: usize,
    mask: &[f32],
) -> OpsResult<()> {
    trace!(dst_w, dst_h, src_w, src_h, x, y, "composite::paste_masked");
    check_len(dst, dst_w, dst_h, 4)?;
    check_len(src, src_w, src_h, 4)?;
    check_len(mask, src_w, src_h, 1)?;
    check_region(dst_w, dst_h, src_w, src_h, x, y)?;

    for row in 0..src_h {
        for col in 0..src_w {
            let m = mask[row * src_w + col].clamp(0.0, 1.0);
            if m <= 0.0 {
                continue;
            }
            let s = (row * src_w + col) * 4;
            let d = ((y + row) * dst_w + x + col) * 4;
            for c in 0..4 {
                dst[d + c] = src[s + c] * m + dst[d + c] * (1.0 - m);
            }
        }
    }
    Ok(())
}
