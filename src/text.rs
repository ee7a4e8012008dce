//! Text watermark rendering.
//!
//! Text is laid out on a single line by `imageproc` using an `ab_glyph`
//! font: either a caller-supplied TrueType/OpenType file or the embedded
//! DejaVu Sans. Measurements are of the rendered ink, not the advance box,
//! so no part of a glyph is ever cut off.
//! A font file that cannot be loaded is never fatal: a warning is logged
//! and the embedded font is used instead.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ab_glyph::{FontArc, PxScale};
use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, warn};

use crate::blending::to_u8;
use crate::compositor::check_canvas;
use crate::error::{Error, Result};

/// Embedded fallback font (DejaVu Sans, Bitstream Vera license).
const DEFAULT_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");

static DEFAULT_FONT: OnceLock<FontArc> = OnceLock::new();

/// Default initial font size for text watermarks.
pub const DEFAULT_FONT_SIZE: f32 = 36.0;

/// Options describing a text watermark.
#[derive(Debug, Clone, PartialEq)]
pub struct TextWatermark {
    /// The text to render. Must not be blank.
    pub content: String,
    /// Initial font size in pixels, before autoscaling to the target width.
    pub font_size: f32,
    /// Fill color. Alpha is derived from the compositing opacity.
    pub color: Rgb<u8>,
    /// Optional font file; the embedded font is used when absent or unreadable.
    pub font_path: Option<PathBuf>,
}

impl TextWatermark {
    /// Text watermark with default styling (36px, white, embedded font).
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

impl Default for TextWatermark {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            color: Rgb([255, 255, 255]),
            font_path: None,
        }
    }
}

/// Ink bounding box of a rendered line of text, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    /// Width of the inked area.
    pub width: u32,
    /// Height of the inked area.
    pub height: u32,
}

/// The embedded default font.
///
/// # Errors
///
/// Returns [`Error::FontResolution`] if the embedded data cannot be parsed,
/// which only happens if the binary is corrupted.
pub fn default_font() -> Result<FontArc> {
    if let Some(font) = DEFAULT_FONT.get() {
        return Ok(font.clone());
    }
    let font = FontArc::try_from_slice(DEFAULT_FONT_DATA).map_err(|e| Error::FontResolution {
        path: PathBuf::from("<embedded>"),
        reason: e.to_string(),
    })?;
    Ok(DEFAULT_FONT.get_or_init(|| font).clone())
}

/// Load a font file from disk.
///
/// # Errors
///
/// Returns [`Error::FontResolution`] if the file cannot be read or parsed.
pub fn load_font_file(path: &Path) -> Result<FontArc> {
    let data = std::fs::read(path).map_err(|e| Error::FontResolution {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    FontArc::try_from_vec(data).map_err(|e| Error::FontResolution {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Resolve the font for a text watermark.
///
/// Uses `path` when given and loadable; otherwise logs a warning and falls
/// back to the embedded font.
///
/// # Errors
///
/// Only fails if the embedded font itself is unusable.
pub fn resolve_font(path: Option<&Path>) -> Result<FontArc> {
    if let Some(path) = path {
        match load_font_file(path) {
            Ok(font) => {
                debug!(font = %path.display(), "loaded font file");
                return Ok(font);
            }
            Err(e) => warn!(error = %e, "falling back to embedded font"),
        }
    }
    default_font()
}

/// Measure the ink bounding box of a single line of text at `font_size`
/// pixels. This is exactly the size [`render_text`] produces.
///
/// # Errors
///
/// Returns [`Error::DegenerateScale`] if the font size is not positive or
/// the text would need an unreasonably large canvas.
pub fn measure_text(font: &FontArc, text: &str, font_size: f32) -> Result<TextMetrics> {
    let (_, bounds) = coverage(font, text, font_size)?;
    Ok(bounds.map_or(
        TextMetrics {
            width: 0,
            height: 0,
        },
        |(_, _, width, height)| TextMetrics { width, height },
    ))
}

/// Render a single line of text onto a transparent canvas cropped to its
/// ink bounding box.
///
/// Every covered pixel gets `color` with alpha `coverage * alpha`; the
/// alpha is baked into the fill rather than applied afterwards. Text with
/// no ink renders as an empty image.
///
/// # Errors
///
/// Same as [`measure_text`].
pub fn render_text(
    font: &FontArc,
    text: &str,
    font_size: f32,
    color: Rgb<u8>,
    alpha: u8,
) -> Result<RgbaImage> {
    let (mask, bounds) = coverage(font, text, font_size)?;
    let Some((x0, y0, width, height)) = bounds else {
        return Ok(RgbaImage::new(0, 0));
    };

    let [r, g, b] = color.0;
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let cover = mask.get_pixel(x0 + x, y0 + y)[0];
        Rgba([r, g, b, to_u8(f32::from(cover) * f32::from(alpha) / 255.0)])
    }))
}

/// Draw `text` as a coverage mask on a scratch canvas padded by one em on
/// every side, and find the bounding box `(x, y, width, height)` of its ink.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn coverage(
    font: &FontArc,
    text: &str,
    font_size: f32,
) -> Result<(GrayImage, Option<(u32, u32, u32, u32)>)> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(Error::DegenerateScale(format!(
            "font size must be positive, got {font_size}"
        )));
    }
    let scale = PxScale::from(font_size);
    let (advance_w, _) = text_size(scale, font, text);

    // Ink may overhang the advance box by up to an em on either side, and
    // sits within three ems vertically when drawn one em down.
    let pad = u64::from(font_size.ceil() as u32);
    let width = u64::from(advance_w) + 2 * pad;
    let height = 3 * pad;
    check_canvas(width, height)?;

    let mut mask = GrayImage::new(width as u32, height as u32);
    draw_text_mut(&mut mask, Luma([255]), pad as i32, pad as i32, scale, font, text);

    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in mask.enumerate_pixels() {
        if px[0] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    let bounds = bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1));
    Ok((mask, bounds))
}

/// Parse a hex color string (`#RGB` or `#RRGGBB`, `#` optional).
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for any other format.
pub fn parse_hex_color(hex: &str) -> Result<Rgb<u8>> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    let invalid = || Error::InvalidParameter(format!("invalid hex color '{hex}'"));

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let component = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        3 => Ok(Rgb([
            component(&digits[0..1])? * 17,
            component(&digits[1..2])? * 17,
            component(&digits[2..3])? * 17,
        ])),
        6 => Ok(Rgb([
            component(&digits[0..2])?,
            component(&digits[2..4])?,
            component(&digits[4..6])?,
        ])),
        _ => Err(invalid()),
    }
}
