//! File metadata records and the blocking reader the prefetch worker calls.
//!
//! The reader is an opaque, synchronous dependency of the prefetch cache: it
//! may take arbitrarily long and may fail. Failures are turned into a
//! placeholder record by the worker, never propagated to the list view.

mod error;

pub use error::MetadataError;

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use humansize::BINARY;

/// Extensions probed for pixel dimensions
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico",
];

/// What kind of filesystem entry an item points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Image,
    Directory,
    Symlink,
    Other,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            FileKind::File => "file",
            FileKind::Image => "image",
            FileKind::Directory => "dir",
            FileKind::Symlink => "link",
            FileKind::Other => "other",
        }
    }
}

/// Metadata fetched for one list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Path that was read (the snapshot taken at enqueue time)
    pub path: PathBuf,
    /// False for the placeholder delivered after a failed read
    pub available: bool,
    /// Size in bytes
    pub size: u64,
    /// Last modified time, if the platform reports one
    pub modified: Option<DateTime<Local>>,
    pub kind: FileKind,
    /// Pixel dimensions for images, when probed
    pub dimensions: Option<(u32, u32)>,
}

impl FileMetadata {
    /// Placeholder record for a path whose metadata could not be read.
    pub fn unavailable(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            available: false,
            size: 0,
            modified: None,
            kind: FileKind::Other,
            dimensions: None,
        }
    }

    /// One-line description for list display.
    pub fn summary(&self, date_format: &str) -> String {
        if !self.available {
            return "(unavailable)".to_string();
        }

        let mut parts = vec![self.kind.label().to_string()];
        if self.kind != FileKind::Directory {
            parts.push(format_size(self.size));
        }
        if let Some((w, h)) = self.dimensions {
            parts.push(format!("{}x{}", w, h));
        }
        if let Some(modified) = self.modified {
            // chrono reports a bad specifier as a fmt::Error; omit the date then.
            let mut date = String::new();
            if write!(date, "{}", modified.format(date_format)).is_ok() {
                parts.push(date);
            }
        }
        parts.join("  ")
    }
}

/// Format a byte size as a human-readable string
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, BINARY)
}

/// Synchronous metadata source used by the prefetch worker.
pub trait MetadataReader: Send + Sync + 'static {
    fn read(&self, path: &Path) -> Result<FileMetadata, MetadataError>;
}

impl<F> MetadataReader for F
where
    F: Fn(&Path) -> Result<FileMetadata, MetadataError> + Send + Sync + 'static,
{
    fn read(&self, path: &Path) -> Result<FileMetadata, MetadataError> {
        self(path)
    }
}

/// Reads metadata from the local filesystem.
#[derive(Debug, Clone)]
pub struct FsMetadataReader {
    probe_images: bool,
}

impl FsMetadataReader {
    pub fn new(probe_images: bool) -> Self {
        Self { probe_images }
    }
}

impl Default for FsMetadataReader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MetadataReader for FsMetadataReader {
    fn read(&self, path: &Path) -> Result<FileMetadata, MetadataError> {
        let meta = fs::symlink_metadata(path).map_err(|e| MetadataError::from_io(path, e))?;

        let file_type = meta.file_type();
        let kind = if file_type.is_symlink() {
            FileKind::Symlink
        } else if file_type.is_dir() {
            FileKind::Directory
        } else if file_type.is_file() {
            if is_image_path(path) {
                FileKind::Image
            } else {
                FileKind::File
            }
        } else {
            FileKind::Other
        };

        // A corrupt image still has a valid stat; keep it without dimensions.
        let dimensions = if self.probe_images && kind == FileKind::Image {
            match image::image_dimensions(path) {
                Ok(dims) => Some(dims),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "image probe failed");
                    None
                }
            }
        } else {
            None
        };

        Ok(FileMetadata {
            path: path.to_path_buf(),
            available: true,
            size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
            kind,
            dimensions,
        })
    }
}

/// Whether the path has a known image extension (case-insensitive)
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
