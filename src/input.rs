//! Collecting source images from files, directories and zip archives.
//!
//! Every collected image gets a `/`-separated name relative to where it was
//! found: the bare file name for loose files, the path below the root for
//! directories, and the entry path for zip archives. Names are unique within
//! a collection.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::formats::{is_supported_image, is_zip_archive, unique_name};

/// Default per-image size limit (50 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 50 * 1024 * 1024;

/// One image waiting to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Relative, `/`-separated name.
    pub name: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

/// An input that was found but not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedInput {
    /// Name the input would have had.
    pub name: String,
    /// Why it was not loaded.
    pub reason: String,
}

/// Images gathered for one batch.
#[derive(Debug)]
pub struct InputCollection {
    max_bytes: u64,
    items: Vec<SourceImage>,
    rejected: Vec<RejectedInput>,
    names: HashSet<String>,
}

impl Default for InputCollection {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_BYTES)
    }
}

impl InputCollection {
    /// Empty collection rejecting images larger than `max_bytes`.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            items: Vec::new(),
            rejected: Vec::new(),
            names: HashSet::new(),
        }
    }

    /// Add an image file, a directory (walked recursively) or a zip archive.
    ///
    /// Returns the number of images added.
    ///
    /// # Errors
    ///
    /// Returns an I/O or archive error if the path cannot be read, and
    /// [`Error::UnsupportedFormat`] for files that are neither images nor
    /// zip archives.
    pub fn add_path(&mut self, path: &Path) -> Result<usize> {
        let metadata = std::fs::metadata(path)?;

        if metadata.is_dir() {
            self.add_directory(path)
        } else if is_zip_archive(path) {
            self.add_archive(path)
        } else if is_supported_image(path) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            Ok(usize::from(self.add_file(path, &name, metadata.len())?))
        } else {
            Err(Error::UnsupportedFormat(path.display().to_string()))
        }
    }

    /// Add an image that is already in memory.
    ///
    /// Returns `false` if it was rejected for exceeding the size limit.
    pub fn add_bytes(&mut self, name: &str, bytes: Vec<u8>) -> bool {
        if bytes.len() as u64 > self.max_bytes {
            self.reject(name, self.size_reason(bytes.len() as u64));
            return false;
        }
        let name = unique_name(&mut self.names, name);
        debug!(%name, size = bytes.len(), "collected image");
        self.items.push(SourceImage { name, bytes });
        true
    }

    fn add_file(&mut self, path: &Path, name: &str, size: u64) -> Result<bool> {
        if size > self.max_bytes {
            self.reject(name, self.size_reason(size));
            return Ok(false);
        }
        let bytes = std::fs::read(path)?;
        Ok(self.add_bytes(name, bytes))
    }

    fn add_directory(&mut self, root: &Path) -> Result<usize> {
        let mut added = 0;
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            if !entry.file_type().is_file() || !is_supported_image(entry.path()) {
                continue;
            }
            let Some(name) = entry
                .path()
                .strip_prefix(root)
                .ok()
                .and_then(relative_name)
            else {
                continue;
            };
            if is_hidden(&name) {
                continue;
            }
            let size = entry.metadata().map_err(|e| Error::Io(e.into()))?.len();
            added += usize::from(self.add_file(entry.path(), &name, size)?);
        }
        Ok(added)
    }

    fn add_archive(&mut self, path: &Path) -> Result<usize> {
        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
        let mut added = 0;

        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let Some(name) = entry
                .enclosed_name()
                .and_then(|p| relative_name(Path::new(&p)))
            else {
                warn!(entry = entry.name(), archive = %path.display(), "skipping unsafe archive entry");
                self.reject(entry.name(), "entry path escapes the archive".to_string());
                continue;
            };
            if is_hidden(&name) || !is_supported_image(Path::new(&name)) {
                debug!(%name, "skipping non-image archive entry");
                continue;
            }
            if entry.size() > self.max_bytes {
                self.reject(&name, self.size_reason(entry.size()));
                continue;
            }

            let mut bytes = Vec::new();
            entry.take(self.max_bytes + 1).read_to_end(&mut bytes)?;
            added += usize::from(self.add_bytes(&name, bytes));
        }

        Ok(added)
    }

    fn reject(&mut self, name: &str, reason: String) {
        debug!(%name, %reason, "rejected input");
        self.rejected.push(RejectedInput {
            name: name.to_string(),
            reason,
        });
    }

    fn size_reason(&self, size: u64) -> String {
        format!(
            "exceeds size limit ({size} bytes > {} bytes)",
            self.max_bytes
        )
    }

    /// Collected images, in the order they were found.
    #[must_use]
    pub fn items(&self) -> &[SourceImage] {
        &self.items
    }

    /// Inputs that were found but not loaded.
    #[must_use]
    pub fn rejected(&self) -> &[RejectedInput] {
        &self.rejected
    }

    /// Number of collected images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no images were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split into collected images and rejected inputs.
    #[must_use]
    pub fn into_parts(self) -> (Vec<SourceImage>, Vec<RejectedInput>) {
        (self.items, self.rejected)
    }
}

/// `/`-joined normal components of a relative path, or `None` if it has any
/// root, prefix or parent components.
fn relative_name(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!parts.is_empty()).then(|| parts.join("/"))
}

/// macOS resource forks and dot-files.
fn is_hidden(name: &str) -> bool {
    name.starts_with("__MACOSX/") || name.split('/').any(|part| part.starts_with('.'))
}
