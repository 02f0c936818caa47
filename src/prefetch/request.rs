//! Fetch requests and the item trait the queue snapshots from.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

/// Stable identifier of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A display item whose file metadata can be prefetched.
pub trait PrefetchItem: Send + Sync + 'static {
    /// Identifier used for edit suppression
    fn item_id(&self) -> ItemId;
    /// Path of the backing file, read at enqueue time
    fn file_path(&self) -> PathBuf;
}

/// Snapshot of an item taken when it was enqueued.
///
/// Holds only a weak reference, so a queued request never keeps a removed
/// item alive. The path is not refreshed: if the item is renamed before the
/// worker gets to it, the old path is read.
pub struct FetchRequest<T> {
    item: Weak<T>,
    item_id: ItemId,
    path: PathBuf,
}

impl<T: PrefetchItem> FetchRequest<T> {
    /// Snapshot `item` into a request
    pub fn snapshot(item: &Arc<T>) -> Self {
        Self {
            item: Arc::downgrade(item),
            item_id: item.item_id(),
            path: item.file_path(),
        }
    }
}

impl<T> FetchRequest<T> {
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Split into the parts the worker hands back on delivery
    pub(crate) fn into_item(self) -> Weak<T> {
        self.item
    }
}

impl<T> fmt::Debug for FetchRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchRequest")
            .field("item_id", &self.item_id)
            .field("path", &self.path)
            .finish()
    }
}
