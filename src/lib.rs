//! Batch photo processing: watermarking, format conversion and sequential
//! renaming over files, directories and zip archives.
//!
//! The core is [`compose`], which scales a watermark (an image or a line of
//! text) to a fraction of the photo's width, applies an opacity, places it at
//! one of five anchors and alpha-blends it over a copy of the photo.
//!
//! # Quick Start
//!
//! ```no_run
//! use photo_batch::{compose, Anchor, WatermarkSource};
//!
//! let photo = image::open("photo.jpg").unwrap();
//! let logo = WatermarkSource::image("logo.png");
//! let out = compose(&photo, &logo, Anchor::BottomRight, 0.5, 0.2).unwrap();
//! out.save("watermarked.jpg").unwrap();
//! ```
//!
//! # Batches
//!
//! A [`BatchDriver`] collects images from loose files, directories and zip
//! archives, runs one [`Operation`] over all of them and writes the results,
//! with a processing log, to a zip archive or directory. Images that fail
//! are reported and skipped; the rest of the batch is still written.
//!
//! ```no_run
//! use std::path::Path;
//! use photo_batch::{BatchDriver, BatchOptions, Operation, OutputFormat, OutputTarget};
//!
//! let mut batch = BatchDriver::new(BatchOptions::default());
//! batch.add_path(Path::new("holiday.zip")).unwrap();
//! let report = batch
//!     .run(
//!         &Operation::Convert { format: OutputFormat::Png },
//!         &OutputTarget::from_path(Path::new("converted.zip")),
//!     )
//!     .unwrap();
//! println!("{} of {} converted", report.processed(), report.total());
//! ```

#![deny(missing_docs)]

pub mod batch;
pub mod blending;
pub mod compositor;
pub mod error;
pub mod formats;
pub mod geometry;
pub mod input;
pub mod text;

pub use batch::{
    BatchDriver, BatchOptions, BatchReport, BatchState, ItemOutcome, Operation, OutputTarget,
};
pub use compositor::{compose, WatermarkSource};
pub use error::{Error, Result};
pub use formats::{is_supported_image, OutputFormat};
pub use geometry::Anchor;
pub use text::TextWatermark;
