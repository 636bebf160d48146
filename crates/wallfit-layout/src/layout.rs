//! Layout policies and the top-level [`layout`] entry point.
//!
//! Each [`AspectClass`] maps to one policy function. Policies other than
//! [`exact_1080p`] share the same shape: compute a [`Placement`], build the
//! blurred background, then [`compose`] the resized foreground over it.

use crate::background::blurred_background;
use crate::{
    AspectClass, LayoutResult, CORNER_RADIUS, SQUARE_SIZE, TARGET_HEIGHT, TARGET_WIDTH,
};
use tracing::{debug, trace};
use wallfit_core::{RgbaImage, RGBA_CHANNELS};
use wallfit_ops::{composite, mask, resize};

/// How the foreground's coverage is derived when it is pasted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaskSource {
    /// The resized foreground's own alpha channel.
    Alpha,
    /// A rounded rectangle with the given corner radius.
    Rounded {
        /// Corner radius in pixels.
        radius: f32,
    },
}

/// Where and how the foreground lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Left edge on the canvas.
    pub x: u32,
    /// Top edge on the canvas.
    pub y: u32,
    /// Resized foreground width.
    pub width: u32,
    /// Resized foreground height.
    pub height: u32,
    /// Coverage used when pasting.
    pub mask: MaskSource,
}

impl Placement {
    /// Centers a `width x height` foreground on the canvas.
    ///
    /// Offsets use floor division; a foreground wider or taller than the
    /// canvas is pinned to 0 on that axis.
    pub fn centered(width: u32, height: u32, mask: MaskSource) -> Self {
        Self {
            x: TARGET_WIDTH.saturating_sub(width) / 2,
            y: TARGET_HEIGHT.saturating_sub(height) / 2,
            width,
            height,
            mask,
        }
    }

    /// Full-height foreground centered horizontally, masked by its own alpha.
    ///
    /// Width is `round(1080 * aspect)`.
    pub fn portrait(src_w: u32, src_h: u32) -> Self {
        let aspect = src_w as f64 / src_h as f64;
        let width = ((TARGET_HEIGHT as f64 * aspect).round() as u32).max(1);
        Self {
            x: TARGET_WIDTH.saturating_sub(width) / 2,
            y: 0,
            width,
            height: TARGET_HEIGHT,
            mask: MaskSource::Alpha,
        }
    }

    /// Fixed 500x500 rounded tile in the middle of the canvas.
    pub fn square() -> Self {
        Self::centered(SQUARE_SIZE, SQUARE_SIZE, MaskSource::Rounded { radius: CORNER_RADIUS })
    }

    /// Aspect-preserving fit inside the canvas with rounded corners.
    ///
    /// Fits by height unless that overflows the canvas width, in which case
    /// it fits by width using the original aspect ratio.
    pub fn fitted(src_w: u32, src_h: u32) -> Self {
        let (width, height) = resize::contain_dimensions(
            src_w as usize,
            src_h as usize,
            TARGET_WIDTH as usize,
            TARGET_HEIGHT as usize,
        );
        Self::centered(
            width as u32,
            height as u32,
            MaskSource::Rounded { radius: CORNER_RADIUS },
        )
    }

    /// Placement used by `class` for a `src_w x src_h` source.
    ///
    /// `None` for [`AspectClass::Exact1080p`], which has no foreground.
    pub fn for_class(class: AspectClass, src_w: u32, src_h: u32) -> Option<Self> {
        match class {
            AspectClass::Exact1080p => None,
            AspectClass::Portrait9x16 => Some(Self::portrait(src_w, src_h)),
            AspectClass::Square => Some(Self::square()),
            AspectClass::Other => Some(Self::fitted(src_w, src_h)),
        }
    }
}

/// Composites `image`, resized per `placement`, over `background`.
///
/// The canvas starts fully transparent, receives the background, then the
/// foreground is blended through its mask. `background` must already be
/// canvas-sized.
pub fn compose(
    background: &RgbaImage,
    image: &RgbaImage,
    placement: &Placement,
) -> LayoutResult<RgbaImage> {
    trace!(?placement, "compose");
    let (canvas_w, canvas_h) = (TARGET_WIDTH as usize, TARGET_HEIGHT as usize);
    let (fg_w, fg_h) = (placement.width as usize, placement.height as usize);

    let mut canvas = vec![0.0f32; canvas_w * canvas_h * RGBA_CHANNELS];
    composite::paste(
        &mut canvas,
        canvas_w,
        canvas_h,
        &background.to_f32(),
        background.width() as usize,
        background.height() as usize,
        0,
        0,
    )?;

    let foreground = resize::resize_rgba(
        &image.to_f32(),
        image.width() as usize,
        image.height() as usize,
        fg_w,
        fg_h,
    )?;

    let coverage: Vec<f32> = match placement.mask {
        MaskSource::Alpha => foreground.chunks_exact(RGBA_CHANNELS).map(|px| px[3]).collect(),
        MaskSource::Rounded { radius } => {
            mask::rounded_rect(placement.width, placement.height, radius)?.to_f32()
        }
    };

    composite::paste_masked(
        &mut canvas,
        canvas_w,
        canvas_h,
        &foreground,
        fg_w,
        fg_h,
        placement.x as usize,
        placement.y as usize,
        &coverage,
    )?;

    Ok(RgbaImage::from_f32(TARGET_WIDTH, TARGET_HEIGHT, &canvas)?)
}

/// Resamples `canvas` to exactly 1920x1080.
///
/// Returns the canvas untouched when it already has that size.
pub fn finalize(canvas: RgbaImage) -> LayoutResult<RgbaImage> {
    if canvas.dimensions() == (TARGET_WIDTH, TARGET_HEIGHT) {
        return Ok(canvas);
    }
    debug!(width = canvas.width(), height = canvas.height(), "Resampling canvas to target size");
    let resized = resize::resize_rgba(
        &canvas.to_f32(),
        canvas.width() as usize,
        canvas.height() as usize,
        TARGET_WIDTH as usize,
        TARGET_HEIGHT as usize,
    )?;
    Ok(RgbaImage::from_f32(TARGET_WIDTH, TARGET_HEIGHT, &resized)?)
}

/// Exact 1080p policy: the source is the canvas.
pub fn exact_1080p(image: &RgbaImage) -> LayoutResult<RgbaImage> {
    Ok(image.clone())
}

/// Portrait policy: full-height foreground over a blurred background.
pub fn portrait_9x16(image: &RgbaImage) -> LayoutResult<RgbaImage> {
    with_background(image, Placement::portrait(image.width(), image.height()))
}

/// Square policy: 500x500 rounded tile over a blurred background.
pub fn square(image: &RgbaImage) -> LayoutResult<RgbaImage> {
    with_background(image, Placement::square())
}

/// Fallback policy: fitted rounded foreground over a blurred background.
pub fn other(image: &RgbaImage) -> LayoutResult<RgbaImage> {
    with_background(image, Placement::fitted(image.width(), image.height()))
}

fn with_background(image: &RgbaImage, placement: Placement) -> LayoutResult<RgbaImage> {
    let background = blurred_background(image, TARGET_WIDTH, TARGET_HEIGHT)?;
    compose(&background, image, &placement)
}

/// Runs the policy for `class` on `image`, then [`finalize`]s the canvas.
///
/// Forcing a class that does not match the image is allowed; it fails only
/// when the resulting placement cannot fit on the canvas (a portrait
/// placement for a very wide image, for example).
pub fn layout_with_class(image: &RgbaImage, class: AspectClass) -> LayoutResult<RgbaImage> {
    debug!(width = image.width(), height = image.height(), %class, "Laying out image");
    let canvas = match class {
        AspectClass::Exact1080p => exact_1080p(image)?,
        AspectClass::Portrait9x16 => portrait_9x16(image)?,
        AspectClass::Square => square(image)?,
        AspectClass::Other => other(image)?,
    };
    finalize(canvas)
}

/// Converts `image` into a 1920x1080 wallpaper canvas.
///
/// # Example
///
/// ```rust
/// use wallfit_core::RgbaImage;
/// use wallfit_layout::layout;
///
/// let image = RgbaImage::filled(1920, 1080, [1, 2, 3, 255]).unwrap();
/// let canvas = layout(&image).unwrap();
/// assert_eq!(canvas, image);
/// ```
pub fn layout(image: &RgbaImage) -> LayoutResult<RgbaImage> {
    layout_with_class(image, AspectClass::classify(image.width(), image.height()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];

    fn blue_background() -> RgbaImage {
        RgbaImage::filled(TARGET_WIDTH, TARGET_HEIGHT, BLUE).unwrap()
    }

    #[test]
    fn test_portrait_placement() {
        let p = Placement::portrait(1080, 1920);
        assert_eq!((p.x, p.y, p.width, p.height), (656, 0, 608, 1080));
        assert_eq!(p.mask, MaskSource::Alpha);
    }

    #[test]
    fn test_square_placement_ignores_source() {
        assert_eq!(Placement::for_class(AspectClass::Square, 1000, 1000), Some(Placement::square()));
        assert_eq!(Placement::for_class(AspectClass::Square, 1090, 1000), Some(Placement::square()));
        let p = Placement::square();
        assert_eq!((p.x, p.y, p.width, p.height), (710, 290, 500, 500));
    }

    #[test]
    fn test_fitted_placement() {
        let tall = Placement::fitted(1000, 1500);
        assert_eq!((tall.x, tall.y, tall.width, tall.height), (600, 0, 720, 1080));

        let wide = Placement::fitted(3000, 1000);
        assert_eq!((wide.x, wide.y, wide.width, wide.height), (0, 220, 1920, 640));

        let uhd = Placement::fitted(3840, 2160);
        assert_eq!((uhd.x, uhd.y, uhd.width, uhd.height), (0, 0, 1920, 1080));
    }

    #[test]
    fn test_exact_has_no_placement() {
        assert_eq!(Placement::for_class(AspectClass::Exact1080p, 1920, 1080), None);
    }

    #[test]
    fn test_compose_square_geometry() {
        let image = RgbaImage::filled(1000, 1000, RED).unwrap();
        let canvas = compose(&blue_background(), &image, &Placement::square()).unwrap();

        assert_eq!(canvas.pixel(960, 540), RED);
        // Edge midpoints are inside the tile
        assert_eq!(canvas.pixel(710, 540), RED);
        assert_eq!(canvas.pixel(1209, 540), RED);
        assert_eq!(canvas.pixel(960, 290), RED);
        assert_eq!(canvas.pixel(960, 789), RED);
        // Just outside
        assert_eq!(canvas.pixel(709, 540), BLUE);
        assert_eq!(canvas.pixel(1210, 540), BLUE);
        assert_eq!(canvas.pixel(960, 289), BLUE);
        assert_eq!(canvas.pixel(960, 790), BLUE);
        // Rounded corners show the background
        assert_eq!(canvas.pixel(710, 290), BLUE);
        assert_eq!(canvas.pixel(1209, 789), BLUE);
    }

    #[test]
    fn test_compose_portrait_uses_alpha() {
        // Left half transparent, right half opaque red
        let mut data = Vec::new();
        for _y in 0..160 {
            for x in 0..90 {
                if x < 45 {
                    data.extend_from_slice(&[0, 255, 0, 0]);
                } else {
                    data.extend_from_slice(&RED);
                }
            }
        }
        let image = RgbaImage::new(90, 160, data).unwrap();
        let placement = Placement::portrait(90, 160);
        let canvas = compose(&blue_background(), &image, &placement).unwrap();

        let left = placement.x + 20;
        let right = placement.x + placement.width - 20;
        assert_eq!(canvas.pixel(left, 540), BLUE);
        assert_eq!(canvas.pixel(right, 540), RED);
        // No rounded corners: the opaque top-right pixel is foreground
        assert_eq!(canvas.pixel(placement.x + placement.width - 1, 0), RED);
    }

    #[test]
    fn test_compose_rejects_oversized_placement() {
        let image = RgbaImage::filled(10, 10, RED).unwrap();
        let placement = Placement {
            x: 0,
            y: 0,
            width: TARGET_WIDTH + 1,
            height: 10,
            mask: MaskSource::Alpha,
        };
        assert!(compose(&blue_background(), &image, &placement).is_err());
    }

    #[test]
    fn test_finalize_noop_and_resample() {
        let canvas = RgbaImage::filled(TARGET_WIDTH, TARGET_HEIGHT, RED).unwrap();
        assert_eq!(finalize(canvas.clone()).unwrap(), canvas);

        let small = RgbaImage::filled(16, 9, RED).unwrap();
        let resized = finalize(small).unwrap();
        assert_eq!(resized.dimensions(), (TARGET_WIDTH, TARGET_HEIGHT));
        assert_eq!(resized.pixel(100, 100), RED);
    }

    #[test]
    fn test_forcing_portrait_on_panorama_fails() {
        let image = RgbaImage::filled(400, 100, RED).unwrap();
        assert!(layout_with_class(&image, AspectClass::Portrait9x16).is_err());
    }
}
