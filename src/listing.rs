//! List item model fed to the prefetch cache.
//!
//! A `ListEntry` is what a list view row holds: a stable id, a display name,
//! the backing path, and the metadata once the prefetch worker delivers it.
//! Entries are shared as `Arc<ListEntry>` so the cache can keep weak
//! references; the path and metadata sit behind locks because the owner may
//! rename an entry or apply a delivery while the cache holds a snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::{Context, Result};

use crate::metadata::FileMetadata;
use crate::prefetch::{ItemId, PrefetchItem};

/// A row in the list view
#[derive(Debug)]
pub struct ListEntry {
    id: ItemId,
    /// Display name (path relative to the scanned root)
    pub name: String,
    path: RwLock<PathBuf>,
    metadata: RwLock<Option<FileMetadata>>,
}

impl ListEntry {
    pub fn new(id: u64, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            path: RwLock::new(path.into()),
            metadata: RwLock::new(None),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn path(&self) -> PathBuf {
        self.path.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Point the entry at a new path (e.g. after a rename).
    ///
    /// Requests already queued keep the old path.
    pub fn set_path(&self, path: impl Into<PathBuf>) {
        *self.path.write().unwrap_or_else(PoisonError::into_inner) = path.into();
    }

    /// Metadata applied so far, if any
    pub fn metadata(&self) -> Option<FileMetadata> {
        self.metadata
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store delivered metadata
    pub fn apply(&self, metadata: FileMetadata) {
        *self.metadata.write().unwrap_or_else(PoisonError::into_inner) = Some(metadata);
    }
}

impl PrefetchItem for ListEntry {
    fn item_id(&self) -> ItemId {
        self.id
    }

    fn file_path(&self) -> PathBuf {
        self.path()
    }
}

/// List the entries under `root`, sorted by display name.
///
/// With `recursive`, subdirectories are descended into and listed as well.
/// Ids are assigned in display order starting at 1.
pub fn scan_directory(root: &Path, recursive: bool) -> Result<Vec<Arc<ListEntry>>> {
    let mut paths = Vec::new();
    collect_paths(root, recursive, &mut paths)?;

    let mut named: Vec<(String, PathBuf)> = paths
        .into_iter()
        .map(|path| {
            let name = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .to_string();
            (name, path)
        })
        .collect();
    named.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(named
        .into_iter()
        .enumerate()
        .map(|(idx, (name, path))| Arc::new(ListEntry::new(idx as u64 + 1, name, path)))
        .collect())
}

fn collect_paths(dir: &Path, recursive: bool, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        out.push(path.clone());
        if recursive && is_dir {
            collect_paths(&path, recursive, out)?;
        }
    }
    Ok(())
}
