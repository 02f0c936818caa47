//! Metadata read errors.

use std::path::PathBuf;

/// Errors a [`MetadataReader`](super::MetadataReader) can report.
///
/// The prefetch worker never surfaces these to the list view; it logs them and
/// delivers a placeholder record instead.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read metadata for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MetadataError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            MetadataError::NotFound { path }
        } else {
            MetadataError::Io { path, source }
        }
    }
}
