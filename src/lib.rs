//! lvmeta
//!
//! Asynchronous metadata prefetch for list views: a single background worker
//! reads file metadata in FIFO order, skips items under edit, and hands the
//! results back over a channel the UI thread drains.

pub mod cli;
pub mod config;
pub mod listing;
pub mod logging;
pub mod metadata;
pub mod prefetch;

pub use config::Config;
pub use listing::{scan_directory, ListEntry};
pub use metadata::{FileKind, FileMetadata, FsMetadataReader, MetadataError, MetadataReader};
pub use prefetch::{CacheManager, Delivery, ItemId, PrefetchItem, ResultSink};
