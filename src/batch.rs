//! Batch driver: runs one operation over a collection of images and writes
//! the results plus a processing log.
//!
//! A [`BatchDriver`] moves through an explicit state machine:
//!
//! ```text
//! CollectingInput --add_path--> CollectingInput
//! CollectingInput --run--> Processing --> Done | Failed
//! Done | Failed --reset--> CollectingInput
//! ```
//!
//! Failures of individual images never abort a batch; they are recorded in
//! the report and the log while every other image is still written.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::compositor::{check_opacity, check_scale, compose, WatermarkSource};
use crate::error::{Error, Result};
use crate::formats::{encode_image, join_name, split_name, unique_name, OutputFormat};
use crate::geometry::Anchor;
use crate::input::{InputCollection, RejectedInput, SourceImage, DEFAULT_MAX_INPUT_BYTES};

/// Default name of the processing log written next to the outputs.
pub const DEFAULT_LOG_NAME: &str = "processing_log.txt";

/// Prefix given to watermarked output files.
pub const WATERMARK_PREFIX: &str = "watermarked_";

/// What to do with every image of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Give files sequential names (`{prefix}1.jpg`, `{prefix}2.jpg`, ...)
    /// per folder. File contents are copied unchanged.
    Rename {
        /// Text placed before each number.
        prefix: String,
    },
    /// Re-encode every image to one format.
    Convert {
        /// Target format.
        format: OutputFormat,
    },
    /// Composite a watermark onto every image.
    Watermark {
        /// The watermark to apply.
        source: WatermarkSource,
        /// Where to place it.
        anchor: Anchor,
        /// Opacity in `[0, 1]`.
        opacity: f32,
        /// Watermark width as a fraction of the image width.
        scale: f32,
        /// Format of the written images.
        format: OutputFormat,
    },
}

impl Operation {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Rename { .. } => "rename",
            Operation::Convert { .. } => "convert",
            Operation::Watermark { .. } => "watermark",
        }
    }
    /// Check the parameters of the operation before touching any image.
    ///
    /// # Errors
    ///
    /// Returns the compositor's error for an unusable watermark source,
    /// opacity or scale.
    pub fn validate(&self) -> Result<()> {
        match self {
            Operation::Watermark {
                source,
                opacity,
                scale,
                ..
            } => {
                check_opacity(*opacity)?;
                check_scale(*scale)?;
                source.validate()
            }
            Operation::Rename { .. } | Operation::Convert { .. } => Ok(()),
        }
    }
}

/// Options controlling batch behavior.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Images larger than this are skipped.
    pub max_input_bytes: u64,
    /// Name of the log file written with the outputs.
    pub log_name: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            log_name: DEFAULT_LOG_NAME.to_string(),
        }
    }
}

/// Where the results of a batch go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A zip archive, created or overwritten.
    Archive(PathBuf),
    /// A directory; folders inside it are created as needed.
    Directory(PathBuf),
}

impl OutputTarget {
    /// `.zip` paths become archives, anything else a directory.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if crate::formats::is_zip_archive(path) {
            Self::Archive(path.to_path_buf())
        } else {
            Self::Directory(path.to_path_buf())
        }
    }
}

/// Lifecycle of a [`BatchDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// Accepting inputs.
    CollectingInput,
    /// Running an operation.
    Processing,
    /// Finished and wrote its output.
    Done,
    /// Stopped without writing a complete output.
    Failed,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BatchState::CollectingInput => "collecting input",
            BatchState::Processing => "processing",
            BatchState::Done => "done",
            BatchState::Failed => "failed",
        })
    }
}

/// Result of processing a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// Name of the source image.
    pub source: String,
    /// Name it was written under, if it was written.
    pub output: Option<String>,
    /// Whether processing succeeded (skipped items count as successful).
    pub success: bool,
    /// Whether the item was not processed at all.
    pub skipped: bool,
    /// Human-readable status message.
    pub message: String,
}

impl ItemOutcome {
    fn ok(source: &str, output: String, message: &str) -> Self {
        Self {
            source: source.to_string(),
            output: Some(output),
            success: true,
            skipped: false,
            message: message.to_string(),
        }
    }

    fn skipped(source: &str, reason: String) -> Self {
        Self {
            source: source.to_string(),
            output: None,
            success: true,
            skipped: true,
            message: reason,
        }
    }

    fn failed(source: &str, error: &Error) -> Self {
        Self {
            source: source.to_string(),
            output: None,
            success: false,
            skipped: false,
            message: error.to_string(),
        }
    }

    /// One line of the processing log.
    #[must_use]
    pub fn log_line(&self) -> String {
        match (&self.output, self.skipped, self.success) {
            (_, true, _) => format!("[SKIP] {}: {}", self.source, self.message),
            (Some(output), false, true) => format!("[OK] {} -> {output}", self.source),
            _ => format!("[FAIL] {}: {}", self.source, self.message),
        }
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Name of the operation that ran.
    pub operation: &'static str,
    /// One entry per input, processed items first in input order, then
    /// inputs rejected during collection.
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    /// Number of images written.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.success && !o.skipped)
            .count()
    }

    /// Number of inputs skipped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.skipped).count()
    }

    /// Number of images that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }

    /// Total number of inputs.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Text of the processing log.
    #[must_use]
    pub fn log_text(&self) -> String {
        let mut log = format!("photo-batch {} log\n", self.operation);
        for outcome in &self.outcomes {
            log.push_str(&outcome.log_line());
            log.push('\n');
        }
        log.push_str(&format!(
            "Processed: {}, Skipped: {}, Failed: {} (Total: {})\n",
            self.processed(),
            self.skipped(),
            self.failed(),
            self.total()
        ));
        log
    }
}

/// Drives one batch from input collection to written output.
#[derive(Debug)]
pub struct BatchDriver {
    state: BatchState,
    options: BatchOptions,
    inputs: InputCollection,
}

impl Default for BatchDriver {
    fn default() -> Self {
        Self::new(BatchOptions::default())
    }
}

impl BatchDriver {
    /// New driver in the [`BatchState::CollectingInput`] state.
    #[must_use]
    pub fn new(options: BatchOptions) -> Self {
        let inputs = InputCollection::new(options.max_input_bytes);
        Self {
            state: BatchState::CollectingInput,
            options,
            inputs,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Inputs collected so far.
    #[must_use]
    pub fn inputs(&self) -> &InputCollection {
        &self.inputs
    }

    /// Add an image file, directory or zip archive.
    ///
    /// Returns the number of images added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] outside [`BatchState::CollectingInput`],
    /// or the error from reading the path.
    pub fn add_path(&mut self, path: &Path) -> Result<usize> {
        self.expect_state(BatchState::CollectingInput, "add input")?;
        let added = self.inputs.add_path(path)?;
        info!(path = %path.display(), added, "collected input");
        Ok(added)
    }

    /// Add an in-memory image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] outside [`BatchState::CollectingInput`].
    pub fn add_bytes(&mut self, name: &str, bytes: Vec<u8>) -> Result<bool> {
        self.expect_state(BatchState::CollectingInput, "add input")?;
        Ok(self.inputs.add_bytes(name, bytes))
    }

    /// Run `operation` over every collected image and write the results and
    /// the processing log to `target`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidState`] outside [`BatchState::CollectingInput`]
    /// - the error from [`Operation::validate`], leaving the driver in
    ///   [`BatchState::CollectingInput`]
    /// - [`Error::EmptyBatch`] when nothing was collected
    /// - I/O or archive errors while writing the output
    ///
    /// Per-image failures are not errors; they are reported in the returned
    /// [`BatchReport`].
    pub fn run(&mut self, operation: &Operation, target: &OutputTarget) -> Result<BatchReport> {
        self.expect_state(BatchState::CollectingInput, "run")?;
        operation.validate()?;
        if self.inputs.is_empty() {
            self.transition(BatchState::Failed);
            return Err(Error::EmptyBatch);
        }

        self.transition(BatchState::Processing);
        let inputs = std::mem::replace(
            &mut self.inputs,
            InputCollection::new(self.options.max_input_bytes),
        );
        let (items, rejected) = inputs.into_parts();
        info!(
            operation = operation.name(),
            images = items.len(),
            rejected = rejected.len(),
            "processing batch"
        );

        let processed = process(operation, items);
        let (report, files) = assemble(operation, processed, rejected);

        match write_output(target, &files, &self.options.log_name, &report.log_text()) {
            Ok(()) => {
                self.transition(BatchState::Done);
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "failed to write batch output");
                self.transition(BatchState::Failed);
                Err(e)
            }
        }
    }

    /// Return to [`BatchState::CollectingInput`] with no inputs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] while processing.
    pub fn reset(&mut self) -> Result<()> {
        if self.state == BatchState::Processing {
            return Err(Error::InvalidState {
                state: self.state,
                action: "reset",
            });
        }
        self.inputs = InputCollection::new(self.options.max_input_bytes);
        self.transition(BatchState::CollectingInput);
        Ok(())
    }

    fn expect_state(&self, expected: BatchState, action: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                state: self.state,
                action,
            })
        }
    }

    fn transition(&mut self, next: BatchState) {
        info!(from = %self.state, to = %next, "batch state change");
        self.state = next;
    }
}

/// An item after processing, with its encoded output if it succeeded.
struct Processed {
    source: String,
    result: Result<(String, Vec<u8>)>,
    message: &'static str,
}

fn process(operation: &Operation, items: Vec<SourceImage>) -> Vec<Processed> {
    match operation {
        Operation::Rename { prefix } => {
            let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
            let planned = plan_renames(&names, prefix);
            items
                .into_iter()
                .zip(planned)
                .map(|(item, new_name)| Processed {
                    message: if new_name == item.name {
                        "kept name"
                    } else {
                        "renamed"
                    },
                    result: Ok((new_name, item.bytes)),
                    source: item.name,
                })
                .collect()
        }
        Operation::Convert { format } => map_items(&items, |item| Processed {
            source: item.name.clone(),
            result: convert_one(item, *format),
            message: "converted",
        }),
        Operation::Watermark {
            source,
            anchor,
            opacity,
            scale,
            format,
        } => map_items(&items, |item| Processed {
            source: item.name.clone(),
            result: watermark_one(item, source, *anchor, *opacity, *scale, *format),
            message: "watermarked",
        }),
    }
}

/// Apply `f` to every item, in parallel when rayon is available. Results
/// keep input order.
fn map_items<F>(items: &[SourceImage], f: F) -> Vec<Processed>
where
    F: Fn(&SourceImage) -> Processed + Sync + Send,
{
    #[cfg(feature = "cli")]
    {
        use rayon::prelude::*;
        items.par_iter().map(f).collect()
    }

    #[cfg(not(feature = "cli"))]
    {
        items.iter().map(f).collect()
    }
}

fn decode(item: &SourceImage) -> Result<DynamicImage> {
    image::load_from_memory(&item.bytes).map_err(Error::Decode)
}

fn convert_one(item: &SourceImage, format: OutputFormat) -> Result<(String, Vec<u8>)> {
    let img = decode(item)?;
    let bytes = encode_image(&img, format)?;
    debug!(name = %item.name, %format, "converted image");
    Ok((crate::formats::with_extension(&item.name, format), bytes))
}

fn watermark_one(
    item: &SourceImage,
    source: &WatermarkSource,
    anchor: Anchor,
    opacity: f32,
    scale: f32,
    format: OutputFormat,
) -> Result<(String, Vec<u8>)> {
    let img = decode(item)?;
    let composited = compose(&img, source, anchor, opacity, scale)?;
    let bytes = encode_image(&DynamicImage::ImageRgb8(composited), format)?;
    debug!(name = %item.name, "watermarked image");
    Ok((watermarked_name(&item.name, format), bytes))
}

/// Output name of a watermarked image: same folder, prefixed file name,
/// extension of the output format.
///
/// Example: `"trip/a.png"` becomes `"trip/watermarked_a.jpg"`.
#[must_use]
pub fn watermarked_name(name: &str, format: OutputFormat) -> String {
    let (folder, file) = split_name(name);
    crate::formats::with_extension(&join_name(folder, &format!("{WATERMARK_PREFIX}{file}")), format)
}

/// Plan sequential names for `names`, folder by folder.
///
/// Within each folder, files already named `{prefix}{n}.{ext}` keep their
/// name and reserve their number. The remaining files, sorted by name
/// (case-insensitively, then exactly), get `{prefix}{n}.{ext}` with `n`
/// counting up from 1 and skipping numbers whose name is already taken.
/// Extensions are lower-cased.
#[must_use]
pub fn plan_renames(names: &[&str], prefix: &str) -> Vec<String> {
    let mut by_folder: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, name) in names.iter().enumerate() {
        by_folder.entry(split_name(name).0).or_default().push(i);
    }

    let mut planned = vec![String::new(); names.len()];
    for (folder, mut indices) in by_folder {
        let file_of = |i: usize| split_name(names[i]).1;
        indices.sort_by(|&a, &b| {
            let (fa, fb) = (file_of(a), file_of(b));
            fa.to_lowercase()
                .cmp(&fb.to_lowercase())
                .then_with(|| fa.cmp(fb))
        });

        let mut taken = HashSet::new();
        let mut pending = Vec::new();
        for i in indices {
            let file = file_of(i);
            if is_sequential_name(file, prefix) && taken.insert(file.to_lowercase()) {
                planned[i] = names[i].to_string();
            } else {
                pending.push(i);
            }
        }

        let mut counter = 1u64;
        for i in pending {
            let ext = file_of(i)
                .rsplit_once('.')
                .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default();
            let file = loop {
                let candidate = format!("{prefix}{counter}{ext}");
                counter += 1;
                if taken.insert(candidate.to_lowercase()) {
                    break candidate;
                }
            };
            planned[i] = join_name(folder, &file);
        }
    }

    planned
}

/// Whether `file` is exactly `{prefix}{n}.{ext}` with a canonical number
/// (no leading zeros) and a lower-case extension.
fn is_sequential_name(file: &str, prefix: &str) -> bool {
    let Some((stem, ext)) = file.rsplit_once('.') else {
        return false;
    };
    if ext != ext.to_lowercase() {
        return false;
    }
    stem.strip_prefix(prefix)
        .and_then(|digits| digits.parse::<u64>().ok().map(|n| (digits, n)))
        .is_some_and(|(digits, n)| n > 0 && n.to_string() == digits)
}

fn assemble(
    operation: &Operation,
    processed: Vec<Processed>,
    rejected: Vec<RejectedInput>,
) -> (BatchReport, Vec<(String, Vec<u8>)>) {
    let mut outcomes = Vec::with_capacity(processed.len() + rejected.len());
    let mut files = Vec::new();
    let mut taken = HashSet::new();

    for item in processed {
        match item.result {
            Ok((name, bytes)) => {
                let name = unique_name(&mut taken, &name);
                outcomes.push(ItemOutcome::ok(&item.source, name.clone(), item.message));
                files.push((name, bytes));
            }
            Err(e) => {
                warn!(name = %item.source, error = %e, "image failed");
                outcomes.push(ItemOutcome::failed(&item.source, &e));
            }
        }
    }
    for r in rejected {
        outcomes.push(ItemOutcome::skipped(&r.name, r.reason));
    }

    let report = BatchReport {
        operation: operation.name(),
        outcomes,
    };
    (report, files)
}

fn write_output(
    target: &OutputTarget,
    files: &[(String, Vec<u8>)],
    log_name: &str,
    log: &str,
) -> Result<()> {
    match target {
        OutputTarget::Archive(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            let mut zip = ZipWriter::new(BufWriter::new(File::create(path)?));
            for (name, bytes) in files {
                zip.start_file(name.as_str(), options)?;
                zip.write_all(bytes)?;
            }
            zip.start_file(log_name, options)?;
            zip.write_all(log.as_bytes())?;
            zip.finish()?.flush()?;
        }
        OutputTarget::Directory(dir) => {
            for (name, bytes) in files {
                let path = name.split('/').fold(dir.clone(), |p, part| p.join(part));
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, bytes)?;
            }
            std::fs::create_dir_all(dir)?;
            std::fs::write(dir.join(log_name), log)?;
        }
    }
    info!(files = files.len(), "wrote batch output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_numbers_each_folder_from_one() {
        let names = ["b/z.JPG", "a/y.png", "a/x.jpg", "b/w.jpg"];
        let planned = plan_renames(&names, "");
        assert_eq!(planned, ["b/2.jpg", "a/2.png", "a/1.jpg", "b/1.jpg"]);
    }

    #[test]
    fn rename_sort_is_case_insensitive() {
        let names = ["Beach.jpg", "apple.jpg", "cat.jpg"];
        let planned = plan_renames(&names, "img_");
        assert_eq!(planned, ["img_2.jpg", "img_1.jpg", "img_3.jpg"]);
    }

    #[test]
    fn rename_skips_numbers_already_taken() {
        let names = ["2.jpg", "a.jpg", "b.jpg", "c.jpg"];
        let planned = plan_renames(&names, "");
        assert_eq!(planned, ["2.jpg", "1.jpg", "3.jpg", "4.jpg"]);
    }

    #[test]
    fn rename_is_idempotent() {
        let names = ["q.jpg", "p.png", "r.webp"];
        let first = plan_renames(&names, "photo");
        let first_refs: Vec<&str> = first.iter().map(String::as_str).collect();
        assert_eq!(plan_renames(&first_refs, "photo"), first);
    }

    #[test]
    fn sequential_name_detection() {
        assert!(is_sequential_name("12.jpg", ""));
        assert!(is_sequential_name("img_3.png", "img_"));
        assert!(!is_sequential_name("012.jpg", ""));
        assert!(!is_sequential_name("0.jpg", ""));
        assert!(!is_sequential_name("3.JPG", ""));
        assert!(!is_sequential_name("img_3.png", "photo"));
        assert!(!is_sequential_name("3", ""));
    }

    #[test]
    fn watermarked_name_keeps_folder() {
        assert_eq!(
            watermarked_name("trip/a.png", OutputFormat::Jpeg),
            "trip/watermarked_a.jpg"
        );
        assert_eq!(watermarked_name("b.jpg", OutputFormat::Png), "watermarked_b.png");
    }

    #[test]
    fn log_lines_by_outcome() {
        let ok = ItemOutcome::ok("a.jpg", "1.jpg".to_string(), "renamed");
        let skipped = ItemOutcome::skipped("b.jpg", "exceeds size limit".to_string());
        let failed = ItemOutcome::failed("c.jpg", &Error::EmptyBatch);
        assert_eq!(ok.log_line(), "[OK] a.jpg -> 1.jpg");
        assert_eq!(skipped.log_line(), "[SKIP] b.jpg: exceeds size limit");
        assert_eq!(failed.log_line(), "[FAIL] c.jpg: no input images collected");

        let report = BatchReport {
            operation: "rename",
            outcomes: vec![ok, skipped, failed],
        };
        assert_eq!((report.processed(), report.skipped(), report.failed()), (1, 1, 1));
        assert!(report
            .log_text()
            .ends_with("Processed: 1, Skipped: 1, Failed: 1 (Total: 3)\n"));
    }

    #[test]
    fn state_machine_rejects_invalid_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::Directory(dir.path().join("out"));
        let op = Operation::Rename {
            prefix: String::new(),
        };

        let mut driver = BatchDriver::default();
        assert_eq!(driver.state(), BatchState::CollectingInput);
        assert!(matches!(driver.run(&op, &target), Err(Error::EmptyBatch)));
        assert_eq!(driver.state(), BatchState::Failed);
        assert!(matches!(
            driver.add_bytes("a.jpg", vec![1]),
            Err(Error::InvalidState { .. })
        ));

        driver.reset().unwrap();
        assert!(driver.add_bytes("a.jpg", vec![1, 2, 3]).unwrap());
        let report = driver.run(&op, &target).unwrap();
        assert_eq!(driver.state(), BatchState::Done);
        assert_eq!(report.processed(), 1);
        assert!(matches!(
            driver.run(&op, &target),
            Err(Error::InvalidState { .. })
        ));
        assert_eq!(
            std::fs::read(dir.path().join("out/1.jpg")).unwrap(),
            [1, 2, 3]
        );
    }

    #[test]
    fn invalid_watermark_is_rejected_before_processing() {
        let mut driver = BatchDriver::default();
        driver.add_bytes("a.jpg", vec![1]).unwrap();
        let op = Operation::Watermark {
            source: WatermarkSource::Text(crate::text::TextWatermark::new("  ")),
            anchor: Anchor::Center,
            opacity: 0.5,
            scale: 0.2,
            format: OutputFormat::Jpeg,
        };
        let target = OutputTarget::Directory(PathBuf::from("unused"));
        assert!(matches!(
            driver.run(&op, &target),
            Err(Error::InvalidWatermarkSource(_))
        ));
        assert_eq!(driver.state(), BatchState::CollectingInput);
        assert_eq!(driver.inputs().len(), 1);
    }

    #[test]
    fn conflicting_outputs_get_unique_names() {
        let (report, files) = assemble(
            &Operation::Convert {
                format: OutputFormat::Jpeg,
            },
            vec![
                Processed {
                    source: "a.png".to_string(),
                    result: Ok(("a.jpg".to_string(), vec![1])),
                    message: "converted",
                },
                Processed {
                    source: "a.bmp".to_string(),
                    result: Ok(("a.jpg".to_string(), vec![2])),
                    message: "converted",
                },
            ],
            Vec::new(),
        );
        let names: Vec<_> = files.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a.jpg", "a_2.jpg"]);
        assert_eq!(report.outcomes[1].output.as_deref(), Some("a_2.jpg"));
    }
}
