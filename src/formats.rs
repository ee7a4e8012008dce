//! File format helpers: supported extensions, output formats and encoding.

use std::collections::HashSet;
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};

use crate::error::{Error, Result};

/// JPEG output quality.
pub const JPEG_QUALITY: u8 = 100;

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

/// Check if a file looks like a zip archive (by extension).
#[must_use]
pub fn is_zip_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Format that processed images are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JPEG at quality 100.
    #[default]
    Jpeg,
    /// PNG.
    Png,
    /// Lossless WebP.
    WebP,
    /// Uncompressed BMP.
    Bmp,
}

impl OutputFormat {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
            OutputFormat::Bmp => "bmp",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::WebP => ImageFormat::WebP,
            OutputFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            "bmp" => Ok(OutputFormat::Bmp),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Encode an image in memory.
///
/// JPEG is written at [`JPEG_QUALITY`] after dropping any alpha channel.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn encode_image(img: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            img.to_rgb8().write_with_encoder(encoder)?;
        }
        OutputFormat::WebP => {
            // The WebP encoder only accepts 8-bit RGB(A)
            let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
            rgba.write_to(&mut buf, format.image_format())?;
        }
        OutputFormat::Png | OutputFormat::Bmp => {
            img.write_to(&mut buf, format.image_format())?;
        }
    }

    Ok(buf.into_inner())
}

/// Replace the extension of a `/`-separated entry name, keeping its folder.
///
/// Example: `"trip/IMG_01.png"` becomes `"trip/IMG_01.jpg"`.
#[must_use]
pub fn with_extension(name: &str, format: OutputFormat) -> String {
    let (folder, file) = split_name(name);
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    join_name(folder, &format!("{stem}.{}", format.extension()))
}

/// Split an entry name into its folder (possibly empty) and file name.
#[must_use]
pub fn split_name(name: &str) -> (&str, &str) {
    name.rsplit_once('/').unwrap_or(("", name))
}

/// Join a folder (possibly empty) and a file name with `/`.
#[must_use]
pub fn join_name(folder: &str, file: &str) -> String {
    if folder.is_empty() {
        file.to_string()
    } else {
        format!("{folder}/{file}")
    }
}

/// Return `name`, or `name` with `_2`, `_3`, ... appended to its stem, whichever
/// is not yet in `taken`, and record it.
pub(crate) fn unique_name(taken: &mut HashSet<String>, name: &str) -> String {
    if taken.insert(name.to_string()) {
        return name.to_string();
    }

    let (folder, file) = split_name(name);
    let (stem, ext) = match file.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{ext}")),
        None => (file, String::new()),
    };
    let mut n = 2u32;
    loop {
        let candidate = join_name(folder, &format!("{stem}_{n}{ext}"));
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
