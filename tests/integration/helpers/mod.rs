//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lvmeta::{FileMetadata, MetadataError, MetadataReader};
use tempfile::TempDir;

/// Upper bound for any single wait in these tests
pub const WAIT: Duration = Duration::from_secs(5);

/// Create a temporary directory with a few small files
pub fn sample_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("alpha.txt"), "alpha").unwrap();
    fs::write(dir.path().join("beta.txt"), "beta!!").unwrap();
    image::RgbImage::new(4, 3)
        .save(dir.path().join("gamma.png"))
        .unwrap();
    dir
}

/// Write an empty config file into `dir` and return its path
pub fn empty_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, "").unwrap();
    path
}

/// Reader that records every path it reads and reports success.
///
/// Clones share the same log, so a test can keep one and hand one to the cache.
#[derive(Clone, Default)]
pub struct RecordingReader {
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingReader {
    pub fn seen(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

impl MetadataReader for RecordingReader {
    fn read(&self, path: &Path) -> Result<FileMetadata, MetadataError> {
        self.seen.lock().unwrap().push(path.to_path_buf());
        let mut meta = FileMetadata::unavailable(path);
        meta.available = true;
        Ok(meta)
    }
}
