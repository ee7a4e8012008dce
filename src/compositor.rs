//! Watermark compositing.
//!
//! [`compose`] scales a watermark (an image file or rendered text) to a
//! fraction of the base image width, attenuates it by the requested opacity,
//! places it at an [`Anchor`] and blends it over a copy of the base image.
//! The base image is never modified; a fresh opaque RGB image is returned.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, RgbImage, RgbaImage};
use tracing::debug;

use crate::blending::{self, to_u8};
use crate::error::{Error, Result};
use crate::geometry::Anchor;
use crate::text::{self, TextWatermark};

/// Text watermarks are never rendered below this size in pixels.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Largest watermark, in pixels, that will be allocated (1 GiB as RGBA).
pub const MAX_WATERMARK_PIXELS: u64 = 1 << 28;

/// Where a watermark comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum WatermarkSource {
    /// A raster image on disk, composited with its own transparency.
    Image {
        /// Path of the watermark image.
        path: PathBuf,
    },
    /// A line of text rendered with the given styling.
    Text(TextWatermark),
}

impl WatermarkSource {
    /// Image watermark from a file path.
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::Image { path: path.into() }
    }

    /// Build a source from loosely supplied options.
    ///
    /// Exactly one of `image` and `text` must be given. `style` supplies the
    /// font size, color and font file for text watermarks and is ignored for
    /// image watermarks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWatermarkSource`] when both or neither are
    /// given, or when the text is blank.
    pub fn from_parts(
        image: Option<PathBuf>,
        text: Option<String>,
        style: TextWatermark,
    ) -> Result<Self> {
        let source = match (image, text) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidWatermarkSource(
                    "both an image and text were supplied; choose one".to_string(),
                ))
            }
            (None, None) => {
                return Err(Error::InvalidWatermarkSource(
                    "neither an image nor text was supplied".to_string(),
                ))
            }
            (Some(path), None) => Self::Image { path },
            (None, Some(content)) => Self::Text(TextWatermark { content, ..style }),
        };
        source.validate()?;
        Ok(source)
    }

    /// Check the source is usable without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWatermarkSource`] for blank text or an empty
    /// path, and [`Error::InvalidParameter`] for a non-positive font size.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Image { path } if path.as_os_str().is_empty() => Err(
                Error::InvalidWatermarkSource("watermark image path is empty".to_string()),
            ),
            Self::Image { .. } => Ok(()),
            Self::Text(text) => check_text(text),
        }
    }
}

/// Composite a watermark onto `base`.
///
/// `opacity` is in `[0, 1]`; `scale` is the watermark width as a fraction of
/// the base width and must be positive. The result always has the base
/// image's dimensions.
///
/// # Errors
///
/// - [`Error::InvalidWatermarkSource`] for an unusable source or unreadable
///   watermark file
/// - [`Error::Decode`] when the watermark file is not a decodable image
/// - [`Error::DegenerateScale`] when the scale or a derived size is zero or
///   not finite
/// - [`Error::InvalidParameter`] when opacity is out of range
pub fn compose(
    base: &DynamicImage,
    source: &WatermarkSource,
    anchor: Anchor,
    opacity: f32,
    scale: f32,
) -> Result<RgbImage> {
    check_opacity(opacity)?;
    check_scale(scale)?;
    source.validate()?;

    let watermark = match source {
        WatermarkSource::Image { path } => {
            let original = load_watermark_image(path)?;
            prepare_image_watermark(&original, base.width(), opacity, scale)?
        }
        WatermarkSource::Text(text) => prepare_text_watermark(text, base.width(), opacity, scale)?,
    };

    Ok(composite(base, &watermark, anchor))
}

/// Place a prepared watermark at `anchor` and blend it over a copy of `base`.
///
/// The watermark's own alpha is used as-is and blended with the "over"
/// operator; parts falling outside the base are clipped. Alpha is dropped
/// from the result.
#[must_use]
pub fn composite(base: &DynamicImage, watermark: &RgbaImage, anchor: Anchor) -> RgbImage {
    let mut canvas = base.to_rgba8();
    let (x, y) = anchor.offset(
        canvas.width(),
        canvas.height(),
        watermark.width(),
        watermark.height(),
    );
    debug!(
        %anchor,
        x,
        y,
        wm_width = watermark.width(),
        wm_height = watermark.height(),
        "compositing watermark"
    );
    imageops::overlay(&mut canvas, watermark, x, y);
    DynamicImage::ImageRgba8(canvas).to_rgb8()
}

/// Load a watermark image as RGBA.
///
/// # Errors
///
/// Returns [`Error::InvalidWatermarkSource`] if the file cannot be read and
/// [`Error::Decode`] if its contents are not a supported image.
pub fn load_watermark_image(path: &Path) -> Result<RgbaImage> {
    match image::open(path) {
        Ok(img) => Ok(img.to_rgba8()),
        Err(ImageError::IoError(e)) => Err(Error::InvalidWatermarkSource(format!(
            "cannot read {}: {e}",
            path.display()
        ))),
        Err(e) => Err(Error::Decode(e)),
    }
}

/// Resize an image watermark to `round(base_width * scale)` pixels wide,
/// keeping its aspect ratio, and attenuate its alpha by `opacity`.
///
/// Resampling uses a Lanczos3 filter.
///
/// # Errors
///
/// Returns [`Error::DegenerateScale`] if either target dimension rounds to
/// zero or the watermark would exceed [`MAX_WATERMARK_PIXELS`], and
/// [`Error::InvalidWatermarkSource`] for an empty watermark.
pub fn prepare_image_watermark(
    watermark: &RgbaImage,
    base_width: u32,
    opacity: f32,
    scale: f32,
) -> Result<RgbaImage> {
    check_scale(scale)?;
    if watermark.width() == 0 || watermark.height() == 0 {
        return Err(Error::InvalidWatermarkSource(
            "watermark image has no pixels".to_string(),
        ));
    }

    let target_w = (f64::from(base_width) * f64::from(scale)).round();
    let target_h = (f64::from(watermark.height()) * target_w / f64::from(watermark.width())).round();
    let (target_w, target_h) = dimension(target_w).zip(dimension(target_h)).ok_or_else(|| {
        Error::DegenerateScale(format!(
            "scale {scale} on a {base_width}px wide image gives a {target_w}x{target_h} watermark"
        ))
    })?;
    check_canvas(u64::from(target_w), u64::from(target_h))?;

    let mut resized = imageops::resize(watermark, target_w, target_h, FilterType::Lanczos3);
    blending::apply_opacity(&mut resized, opacity);
    Ok(resized)
}

/// Render a text watermark whose width is close to `base_width * scale`.
///
/// The ink box of the text is measured at its initial size and the size is
/// rescaled so the measured width matches the target (never below
/// [`MIN_FONT_SIZE`]). The text is re-measured at that size and corrected
/// once more, then rendered onto a canvas sized to its ink box with alpha
/// `round(255 * opacity)`.
///
/// # Errors
///
/// Returns [`Error::DegenerateScale`] if the text has no ink, the scale
/// factor is not finite or the canvas would be too large, plus any
/// validation error of the source.
pub fn prepare_text_watermark(
    text: &TextWatermark,
    base_width: u32,
    opacity: f32,
    scale: f32,
) -> Result<RgbaImage> {
    check_scale(scale)?;
    check_text(text)?;

    let font = text::resolve_font(text.font_path.as_deref())?;
    #[allow(clippy::cast_precision_loss)]
    let target = base_width as f32 * scale;

    let initial = text::measure_text(&font, &text.content, text.font_size)?;
    let first = rescale(text.font_size, initial.width, target, &text.content)?;
    // A small initial size measures coarsely; correct once at the new size.
    let remeasured = text::measure_text(&font, &text.content, first)?;
    let font_size = rescale(first, remeasured.width, target, &text.content)?;
    debug!(
        initial_size = text.font_size,
        font_size,
        target,
        "autoscaled text watermark"
    );

    let alpha = to_u8(255.0 * opacity.clamp(0.0, 1.0));
    text::render_text(&font, &text.content, font_size, text.color, alpha)
}

/// Font size at which text measuring `width` pixels at `size` would measure
/// `target` pixels, never below [`MIN_FONT_SIZE`].
#[allow(clippy::cast_precision_loss)]
fn rescale(size: f32, width: u32, target: f32, content: &str) -> Result<f32> {
    if width == 0 {
        return Err(Error::DegenerateScale(format!(
            "text '{content}' has no visible ink at {size}px"
        )));
    }
    let factor = target / width as f32;
    if !factor.is_finite() || factor <= 0.0 {
        return Err(Error::DegenerateScale(format!(
            "text scale factor {factor} is not usable"
        )));
    }
    Ok((size * factor).round().max(MIN_FONT_SIZE))
}

/// Reject canvases larger than [`MAX_WATERMARK_PIXELS`].
pub(crate) fn check_canvas(width: u64, height: u64) -> Result<()> {
    match width.checked_mul(height) {
        Some(area) if area <= MAX_WATERMARK_PIXELS => Ok(()),
        _ => Err(Error::DegenerateScale(format!(
            "a {width}x{height} watermark is too large"
        ))),
    }
}

fn check_text(text: &TextWatermark) -> Result<()> {
    if text.content.trim().is_empty() {
        return Err(Error::InvalidWatermarkSource(
            "watermark text is empty".to_string(),
        ));
    }
    if !text.font_size.is_finite() || text.font_size <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "font size must be positive, got {}",
            text.font_size
        )));
    }
    Ok(())
}

pub(crate) fn check_scale(scale: f32) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(Error::DegenerateScale(format!(
            "scale must be positive and finite, got {scale}"
        )))
    }
}

pub(crate) fn check_opacity(opacity: f32) -> Result<()> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "opacity must be between 0.0 and 1.0, got {opacity}"
        )))
    }
}

/// A rounded pixel dimension, if it is at least one pixel and fits `u32`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn dimension(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX)).then(|| value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(color))
    }

    fn base(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(solid(w, h, [0, 0, 0, 255]))
    }

    #[test]
    fn image_watermark_width_follows_scale() {
        let wm = solid(200, 100, [255, 255, 255, 255]);
        for (base_w, scale) in [(1000, 0.2f32), (640, 0.25), (333, 0.5), (1920, 0.05)] {
            let out = prepare_image_watermark(&wm, base_w, 1.0, scale).unwrap();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let expected = (f64::from(base_w) * f64::from(scale)).round() as u32;
            assert_eq!(out.width(), expected);
            assert!(out.height().abs_diff(expected / 2) <= 1);
        }
    }

    #[test]
    fn image_watermark_keeps_aspect_ratio() {
        let wm = solid(300, 90, [255, 0, 0, 255]);
        let out = prepare_image_watermark(&wm, 400, 1.0, 0.25).unwrap();
        assert_eq!((out.width(), out.height()), (100, 30));
    }

    #[test]
    fn opacity_is_applied_to_alpha_only() {
        let wm = solid(10, 10, [40, 80, 120, 255]);
        let out = prepare_image_watermark(&wm, 10, 0.5, 1.0).unwrap();
        let px = out.get_pixel(5, 5);
        assert_eq!(px[3], 128);
        assert_eq!((px[0], px[1], px[2]), (40, 80, 120));
    }

    #[test]
    fn full_opacity_matches_skipped_attenuation() {
        let wm = RgbaImage::from_fn(50, 20, |x, y| {
            let v = u8::try_from((x * 5 + y * 3) % 256).unwrap();
            Rgba([v, 255 - v, 90, v])
        });
        let background = DynamicImage::ImageRgba8(solid(120, 80, [30, 60, 90, 255]));

        let prepared = prepare_image_watermark(&wm, 120, 1.0, 0.5).unwrap();
        let unattenuated = imageops::resize(&wm, 60, 24, FilterType::Lanczos3);
        assert_eq!(prepared, unattenuated);
        assert_eq!(
            composite(&background, &prepared, Anchor::Center),
            composite(&background, &unattenuated, Anchor::Center)
        );
    }

    #[test]
    fn zero_or_invalid_scale_is_degenerate() {
        let wm = solid(10, 10, [255, 255, 255, 255]);
        for scale in [0.0, -0.5, f32::NAN, f32::INFINITY] {
            let err = prepare_image_watermark(&wm, 100, 1.0, scale).unwrap_err();
            assert!(matches!(err, Error::DegenerateScale(_)), "scale {scale}");
        }
        // 100 * 0.001 rounds to zero pixels
        let err = prepare_image_watermark(&wm, 100, 1.0, 0.001).unwrap_err();
        assert!(matches!(err, Error::DegenerateScale(_)));
    }

    #[test]
    fn very_wide_watermark_with_zero_height_is_degenerate() {
        let wm = solid(1000, 1, [255, 255, 255, 255]);
        let err = prepare_image_watermark(&wm, 100, 1.0, 0.1).unwrap_err();
        assert!(matches!(err, Error::DegenerateScale(_)));
    }

    #[test]
    fn text_autoscale_converges_regardless_of_initial_size() {
        for initial in [10.0, 200.0] {
            let text = TextWatermark {
                font_size: initial,
                ..TextWatermark::new("TEST")
            };
            let out = prepare_text_watermark(&text, 1000, 1.0, 0.5).unwrap();
            assert!(
                out.width().abs_diff(500) <= 5,
                "initial size {initial} gave width {}",
                out.width()
            );
        }
    }

    #[test]
    fn text_size_never_drops_below_minimum() {
        let text = TextWatermark::new("Copyright");
        let out = prepare_text_watermark(&text, 100, 1.0, 0.01).unwrap();
        let font = text::default_font().unwrap();
        let metrics = text::measure_text(&font, "Copyright", MIN_FONT_SIZE).unwrap();
        assert_eq!((out.width(), out.height()), (metrics.width, metrics.height));
    }

    #[test]
    fn text_alpha_comes_from_opacity() {
        let text = TextWatermark::new("WM");
        let out = prepare_text_watermark(&text, 400, 0.4, 0.5).unwrap();
        let max_alpha = out.pixels().map(|p| p[3]).max().unwrap();
        assert_eq!(max_alpha, 102);
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = prepare_text_watermark(&TextWatermark::new("   "), 400, 1.0, 0.5).unwrap_err();
        assert!(matches!(err, Error::InvalidWatermarkSource(_)));
    }

    #[test]
    fn from_parts_requires_exactly_one_source() {
        let style = TextWatermark::default();
        assert!(matches!(
            WatermarkSource::from_parts(None, None, style.clone()),
            Err(Error::InvalidWatermarkSource(_))
        ));
        assert!(matches!(
            WatermarkSource::from_parts(
                Some(PathBuf::from("logo.png")),
                Some("text".to_string()),
                style.clone()
            ),
            Err(Error::InvalidWatermarkSource(_))
        ));

        let source =
            WatermarkSource::from_parts(None, Some("(c) me".to_string()), style.clone()).unwrap();
        assert!(matches!(source, WatermarkSource::Text(ref t) if t.content == "(c) me"));

        let source =
            WatermarkSource::from_parts(Some(PathBuf::from("logo.png")), None, style).unwrap();
        assert_eq!(source, WatermarkSource::image("logo.png"));
    }

    #[test]
    fn output_keeps_base_dimensions_when_watermark_is_larger() {
        let background = base(100, 100);
        let wm = solid(200, 200, [255, 0, 0, 255]);
        let out = composite(&background, &wm, Anchor::TopLeft);
        assert_eq!(out.dimensions(), (100, 100));
        assert!(out.pixels().all(|p| p.0 == [255, 0, 0]));

        let out = composite(&background, &wm, Anchor::BottomRight);
        assert_eq!(out.dimensions(), (100, 100));
    }

    #[test]
    fn oversized_watermark_is_clipped_at_negative_offsets() {
        // 13x4 at bottom-right of 10x10 sits at (-3, 6)
        let background = base(10, 10);
        let wm = solid(13, 4, [255, 0, 0, 255]);
        let out = composite(&background, &wm, Anchor::BottomRight);

        for (x, y, px) in out.enumerate_pixels() {
            let expected = if y >= 6 { [255, 0, 0] } else { [0, 0, 0] };
            assert_eq!(px.0, expected, "({x}, {y})");
        }
    }

    #[test]
    fn half_alpha_blends_evenly() {
        let background = base(1, 1);
        let wm = solid(1, 1, [255, 255, 255, 128]);
        let out = composite(&background, &wm, Anchor::TopLeft);
        let px = out.get_pixel(0, 0);
        assert!((127..=128).contains(&px[0]), "{px:?}");
        assert_eq!(px[0], px[2]);
    }

    #[test]
    fn transparent_watermark_leaves_base_alone() {
        let background = DynamicImage::ImageRgba8(solid(8, 8, [9, 9, 9, 255]));
        let wm = solid(4, 4, [255, 0, 0, 0]);
        let out = composite(&background, &wm, Anchor::Center);
        assert!(out.pixels().all(|p| p.0 == [9, 9, 9]));
    }

    #[test]
    fn huge_scale_is_degenerate_not_an_allocation() {
        let wm = solid(100, 60, [255, 255, 255, 255]);
        let err = prepare_image_watermark(&wm, 4000, 1.0, 500.0).unwrap_err();
        assert!(matches!(err, Error::DegenerateScale(_)));

        let background = base(4000, 10);
        let text = WatermarkSource::Text(TextWatermark::new("TEST"));
        let err = compose(&background, &text, Anchor::Center, 1.0, 500.0).unwrap_err();
        assert!(matches!(err, Error::DegenerateScale(_)));
    }

    #[test]
    fn base_outside_footprint_is_unchanged() {
        let background = DynamicImage::ImageRgba8(RgbaImage::from_fn(40, 30, |x, y| {
            Rgba([u8::try_from(x).unwrap(), u8::try_from(y).unwrap(), 77, 255])
        }));
        let wm = solid(10, 10, [255, 255, 255, 255]);
        let out = composite(&background, &wm, Anchor::BottomRight);
        let original = background.to_rgb8();

        for (x, y, px) in out.enumerate_pixels() {
            if x >= 30 && y >= 20 {
                assert_eq!(px.0, [255, 255, 255]);
            } else {
                assert_eq!(px, original.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn higher_opacity_contributes_more() {
        let wm = solid(20, 20, [255, 255, 255, 255]);
        let background = base(100, 100);

        let low = composite(
            &background,
            &prepare_image_watermark(&wm, 100, 0.3, 0.2).unwrap(),
            Anchor::Center,
        );
        let high = composite(
            &background,
            &prepare_image_watermark(&wm, 100, 0.9, 0.2).unwrap(),
            Anchor::Center,
        );

        for y in 40..60 {
            for x in 40..60 {
                assert!(high.get_pixel(x, y)[0] > low.get_pixel(x, y)[0]);
            }
        }
    }

    #[test]
    fn compose_with_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        solid(50, 25, [255, 255, 255, 255]).save(&path).unwrap();

        let background = base(400, 300);
        let out = compose(
            &background,
            &WatermarkSource::image(&path),
            Anchor::BottomRight,
            1.0,
            0.25,
        )
        .unwrap();

        assert_eq!(out.dimensions(), (400, 300));
        // 100x50 watermark anchored at (300, 250)
        assert_eq!(out.get_pixel(350, 275).0, [255, 255, 255]);
        assert_eq!(out.get_pixel(299, 249).0, [0, 0, 0]);
    }

    #[test]
    fn compose_rejects_bad_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let background = base(100, 100);

        let missing = WatermarkSource::image(dir.path().join("missing.png"));
        let err = compose(&background, &missing, Anchor::Center, 0.5, 0.2).unwrap_err();
        assert!(matches!(err, Error::InvalidWatermarkSource(_)));

        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"definitely not a png").unwrap();
        let err = compose(
            &background,
            &WatermarkSource::image(&garbage),
            Anchor::Center,
            0.5,
            0.2,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));

        let text = WatermarkSource::Text(TextWatermark::new("x"));
        let err = compose(&background, &text, Anchor::Center, 1.5, 0.2).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        let err = compose(&background, &text, Anchor::Center, 0.5, 0.0).unwrap_err();
        assert!(matches!(err, Error::DegenerateScale(_)));
    }

    #[test]
    fn compose_does_not_touch_base() {
        let background = base(64, 64);
        let snapshot = background.clone();
        let source = WatermarkSource::Text(TextWatermark::new("mark"));
        let _ = compose(&background, &source, Anchor::Center, 0.8, 0.5).unwrap();
        assert_eq!(background, snapshot);
    }
}
