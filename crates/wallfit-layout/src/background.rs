//! Blurred, edge-to-edge background fill.

use crate::{LayoutResult, BACKGROUND_BLUR_SIGMA};
use tracing::debug;
use wallfit_core::{RgbaImage, RGBA_CHANNELS};
use wallfit_ops::{composite, filter, resize};

/// Builds an opaque `target_w x target_h` background from `image`.
///
/// The source is blurred (Gaussian, sigma [`BACKGROUND_BLUR_SIGMA`], edges
/// extended), scaled with Lanczos-3 until it covers the target while keeping
/// its aspect ratio, then center-cropped to the target size. Alpha is forced
/// to fully opaque.
///
/// Scaling and cropping happen in one windowed resample of the part of the
/// source that survives the crop, so extreme aspect ratios cost no more
/// memory than the target itself.
pub fn blurred_background(image: &RgbaImage, target_w: u32, target_h: u32) -> LayoutResult<RgbaImage> {
    let (src_w, src_h) = (image.width() as usize, image.height() as usize);
    let (target_w_us, target_h_us) = (target_w as usize, target_h as usize);

    let blurred = filter::gaussian_blur(
        &image.to_f32(),
        src_w,
        src_h,
        RGBA_CHANNELS,
        BACKGROUND_BLUR_SIGMA,
    )?;

    let window = resize::cover_source_rect(src_w, src_h, target_w_us, target_h_us);
    debug!(src_w, src_h, ?window, "Cropping background from covering window");
    let mut cropped =
        resize::resize_region_rgba(&blurred, src_w, src_h, window, target_w_us, target_h_us)?;
    composite::set_alpha(&mut cropped, 1.0);

    Ok(RgbaImage::from_f32(target_w, target_h, &cropped)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_target_sized_and_opaque() {
        let image = RgbaImage::filled(40, 30, [10, 200, 30, 0]).unwrap();
        let bg = blurred_background(&image, 192, 108).unwrap();
        assert_eq!(bg.dimensions(), (192, 108));
        assert!(bg.is_opaque());
    }

    #[test]
    fn test_solid_source_gives_solid_background() {
        let image = RgbaImage::filled(30, 50, [120, 60, 240, 255]).unwrap();
        let bg = blurred_background(&image, 160, 90).unwrap();
        for px in bg.data().chunks_exact(4) {
            assert!((px[0] as i32 - 120).abs() <= 1, "{:?}", px);
            assert!((px[1] as i32 - 60).abs() <= 1, "{:?}", px);
            assert!((px[2] as i32 - 240).abs() <= 1, "{:?}", px);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_background_is_blurred() {
        // Hard vertical edge in the middle of the source
        let mut data = Vec::new();
        for _y in 0..60 {
            for x in 0..200 {
                let v = if x < 100 { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let image = RgbaImage::new(200, 60, data).unwrap();
        let bg = blurred_background(&image, 200, 60).unwrap();
        // Pixels just either side of the edge are pulled towards grey
        let left = bg.pixel(98, 30)[0];
        let right = bg.pixel(101, 30)[0];
        assert!(left > 60 && left < 200, "left {left}");
        assert!(right > 60 && right < 200, "right {right}");
    }

    #[test]
    fn test_extreme_strip_background() {
        let image = RgbaImage::filled(20000, 2, [90, 20, 200, 255]).unwrap();
        let bg = blurred_background(&image, 1920, 1080).unwrap();
        assert_eq!(bg.dimensions(), (1920, 1080));
        assert_eq!(bg.pixel(960, 540), [90, 20, 200, 255]);
    }
}
