//! Coverage mask generation.
//!
//! [`rounded_rect`] renders an anti-aliased rounded rectangle that fills the
//! whole mask, the shape used to clip foreground corners.

use crate::OpsResult;
use tracing::trace;
use wallfit_core::{f32_to_u8, Mask};

/// Signed distance from `(px, py)` to a rounded box.
///
/// The box is centered at `(cx, cy)` with half extents `(hx, hy)` and corner
/// radius `r`. Negative inside, positive outside.
fn rounded_box_sdf(px: f32, py: f32, cx: f32, cy: f32, hx: f32, hy: f32, r: f32) -> f32 {
    let qx = (px - cx).abs() - (hx - r);
    let qy = (py - cy).abs() - (hy - r);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

/// Renders a rounded-rectangle mask of `width x height`.
///
/// The rectangle spans the inclusive pixel bounds `(0, 0, width - 1, height - 1)`,
/// so straight edges are fully covered and only the corners fade. Coverage is
/// taken from the signed distance at each pixel center, giving a one-pixel
/// anti-aliased transition. `radius` is clamped to half the shorter side.
///
/// # Example
///
/// ```rust
/// use wallfit_ops::mask::rounded_rect;
///
/// let mask = rounded_rect(100, 60, 20.0).unwrap();
/// assert_eq!(mask.get(50, 30), 255); // center
/// assert_eq!(mask.get(50, 0), 255);  // middle of top edge
/// assert_eq!(mask.get(0, 0), 0);     // corner
/// ```
pub fn rounded_rect(width: u32, height: u32, radius: f32) -> OpsResult<Mask> {
    trace!(width, height, radius, "mask::rounded_rect");
    let (w, h) = (width as f32, height as f32);
    let r = radius.max(0.0).min(w.min(h) / 2.0);
    let (hx, hy) = (w / 2.0, h / 2.0);

    let data: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let d = rounded_box_sdf(x as f32 + 0.5, y as f32 + 0.5, hx, hy, hx, hy, r);
            f32_to_u8(0.5 - d)
        })
        .collect();
    Ok(Mask::new(width, height, data)?)
}
