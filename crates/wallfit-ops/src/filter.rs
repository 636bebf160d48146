//! Blur filters.
//!
//! - [`box_blur`] - Separable sliding-window box blur, O(1) per pixel
//! - [`gaussian_blur`] - Gaussian approximated by three successive box blurs
//!
//! Both filters extend edges by clamping, so borders do not darken.
//!
//! # Example
//!
//! ```rust
//! use wallfit_ops::filter::gaussian_blur;
//!
//! let src = vec![0.5f32; 16 * 16 * 4];
//! let blurred = gaussian_blur(&src, 16, 16, 4, 2.0).unwrap();
//! assert_eq!(blurred.len(), src.len());
//! ```

use crate::error::check_len;
use crate::{OpsError, OpsResult};
use tracing::{debug, trace};

/// Number of box passes used to approximate a Gaussian.
const GAUSS_PASSES: usize = 3;

/// Fast box blur using sliding window (separable).
///
/// # Example
///
/// ```rust
/// use wallfit_ops::filter::box_blur;
///
/// let src = vec![0.5f32; 16 * 16 * 4];
/// let result = box_blur(&src, 16, 16, 4, 3).unwrap();
/// ```
pub fn box_blur(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, radius, "box_blur");
    check_len(src, width, height, channels)?;
    if radius == 0 {
        return Ok(src.to_vec());
    }

    let temp = blur_horizontal(src, width, height, channels, radius);
    Ok(blur_vertical(&temp, width, height, channels, radius))
}

/// Box radii whose successive application approximates a Gaussian of `sigma`.
///
/// Box widths are chosen so the summed variance matches `sigma^2`: the first
/// `m` boxes use the lower odd width, the rest the next odd width up.
pub fn gaussian_box_radii(sigma: f32, passes: usize) -> Vec<usize> {
    let n = passes as f32;
    let w_ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;

    let wlf = wl as f32;
    let m_ideal =
        (12.0 * sigma * sigma - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round().max(0.0) as usize;

    (0..passes)
        .map(|i| {
            let w = if i < m { wl } else { wu };
            ((w - 1) / 2) as usize
        })
        .collect()
}

/// Gaussian blur with standard deviation `sigma`, edges extended.
///
/// Runs three box blurs, which stays linear in image size regardless of
/// `sigma`.
pub fn gaussian_blur(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    sigma: f32,
) -> OpsResult<Vec<f32>> {
    check_len(src, width, height, channels)?;
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "gaussian sigma must be finite and >= 0, got {}",
            sigma
        )));
    }
    if sigma == 0.0 {
        return Ok(src.to_vec());
    }

    let radii = gaussian_box_radii(sigma, GAUSS_PASSES);
    debug!(width, height, sigma, ?radii, "Applying gaussian blur");

    let mut out = src.to_vec();
    for radius in radii {
        out = box_blur(&out, width, height, channels, radius)?;
    }
    Ok(out)
}

fn blur_horizontal(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; width * height * channels];
    let inv_size = 1.0 / (2 * radius + 1) as f32;

    for y in 0..height {
        let row = y * width;
        for c in 0..channels {
            // Window [-radius, radius] around x = 0, left side clamped to the edge
            let mut sum = src[row * channels + c] * radius as f32;
            for kx in 0..=radius {
                sum += src[(row + kx.min(width - 1)) * channels + c];
            }

            for x in 0..width {
                dst[(row + x) * channels + c] = sum * inv_size;

                let left = x.saturating_sub(radius);
                let right = (x + radius + 1).min(width - 1);
                sum -= src[(row + left) * channels + c];
                sum += src[(row + right) * channels + c];
            }
        }
    }

    dst
}

fn blur_vertical(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; width * height * channels];
    let inv_size = 1.0 / (2 * radius + 1) as f32;

    for x in 0..width {
        for c in 0..channels {
            let mut sum = src[x * channels + c] * radius as f32;
            for ky in 0..=radius {
                sum += src[(ky.min(height - 1) * width + x) * channels + c];
            }

            for y in 0..height {
                dst[(y * width + x) * channels + c] = sum * inv_size;

                let top = y.saturating_sub(radius);
                let bottom = (y + radius + 1).min(height - 1);
                sum -= src[(top * width + x) * channels + c];
                sum += src[(bottom * width + x) * channels + c];
            }
        }
    }

    dst
}
