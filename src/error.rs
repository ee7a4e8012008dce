//! Error types for the photo-batch crate.

use std::path::PathBuf;

use crate::batch::BatchState;

/// Errors that can occur while compositing watermarks or driving a batch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No usable watermark was supplied, both kinds were supplied at once,
    /// or the watermark image could not be decoded.
    #[error("invalid watermark source: {0}")]
    InvalidWatermarkSource(String),

    /// The requested scale, or a dimension derived from it, is zero,
    /// negative or not finite.
    #[error("degenerate watermark scale: {0}")]
    DegenerateScale(String),

    /// A font file could not be loaded. Recovered by falling back to the
    /// embedded default font.
    #[error("failed to load font {}: {reason}", path.display())]
    FontResolution {
        /// Path of the font file that was requested.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// Image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),

    /// A user-supplied parameter is out of range or unparsable.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file format is not supported.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred during image processing (encode, save).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Reading or writing a zip archive failed.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A batch action was attempted in a state that does not allow it.
    #[error("cannot {action} while batch is {state}")]
    InvalidState {
        /// State the driver was in.
        state: BatchState,
        /// The rejected action.
        action: &'static str,
    },

    /// A batch was started without any input images.
    #[error("no input images collected")]
    EmptyBatch,
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
