//! Alpha math for watermark compositing.
//!
//! Opacity is applied by attenuating the watermark's alpha channel only;
//! color channels are never touched. The "over" blend itself is done by
//! `image::imageops::overlay` in the compositor.

use image::RgbaImage;

/// Scale every pixel's alpha by `opacity`, leaving RGB untouched.
///
/// Each alpha becomes `round(alpha * opacity)` clamped to `[0, 255]`.
/// Fully transparent pixels stay transparent. An opacity of `1.0` or more
/// leaves the image as-is.
pub fn apply_opacity(watermark: &mut RgbaImage, opacity: f32) {
    if opacity >= 1.0 {
        return;
    }
    let opacity = opacity.max(0.0);

    for px in watermark.pixels_mut() {
        px[3] = to_u8(f32::from(px[3]) * opacity);
    }
}

/// Round and clamp a channel value into `u8` range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn opacity_scales_alpha_only() {
        let mut wm = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        wm.put_pixel(0, 0, Rgba([40, 50, 60, 0]));
        apply_opacity(&mut wm, 0.5);

        assert_eq!(*wm.get_pixel(1, 1), Rgba([10, 20, 30, 128]));
        assert_eq!(*wm.get_pixel(0, 0), Rgba([40, 50, 60, 0]));
    }

    #[test]
    fn full_opacity_is_a_no_op() {
        let mut wm = RgbaImage::from_fn(8, 8, |x, y| {
            let (x, y) = (u8::try_from(x).unwrap(), u8::try_from(y).unwrap());
            Rgba([x * 30, y * 30, 7, x * y * 4])
        });
        let original = wm.clone();
        apply_opacity(&mut wm, 1.0);
        assert_eq!(wm, original);
    }

    #[test]
    fn zero_opacity_makes_everything_transparent() {
        let mut wm = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 200]));
        apply_opacity(&mut wm, 0.0);
        assert!(wm.pixels().all(|p| p[3] == 0));
    }
}
