//! Integration tests driving the cache the way a list view does:
//! queue visible rows, edit one in place, drain results on the UI thread.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use super::helpers::{sample_dir, WAIT};
use lvmeta::{scan_directory, CacheManager, FsMetadataReader, ListEntry};

fn entry<'a>(entries: &'a [Arc<ListEntry>], name: &str) -> &'a Arc<ListEntry> {
    entries
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("no entry named {}", name))
}

#[test]
fn rename_under_edit_then_refetch() {
    let dir = sample_dir();
    let entries = scan_directory(dir.path(), false).unwrap();
    let (cache, sink) = CacheManager::new(FsMetadataReader::default()).unwrap();
    let alpha = entry(&entries, "alpha.txt");

    // User starts renaming alpha before its row is fetched.
    cache.begin_item_edit(alpha.id());
    for e in &entries {
        cache.add(e);
    }
    for _ in 0..entries.len() - 1 {
        let delivery = sink.recv_timeout(WAIT).unwrap();
        assert_ne!(delivery.item_id, alpha.id());
        delivery.upgrade().unwrap().apply(delivery.metadata);
    }
    assert!(sink.recv_timeout(Duration::from_millis(100)).is_none());
    assert!(alpha.metadata().is_none());

    // Rename lands on disk, edit ends, row is queued again.
    let renamed = dir.path().join("renamed.txt");
    fs::rename(dir.path().join("alpha.txt"), &renamed).unwrap();
    alpha.set_path(&renamed);
    cache.end_item_edit(alpha.id());
    cache.add(alpha);

    let delivery = sink.recv_timeout(WAIT).unwrap();
    assert_eq!(delivery.item_id, alpha.id());
    assert!(delivery.metadata.available);
    assert_eq!(delivery.metadata.path, renamed);
    assert_eq!(delivery.metadata.size, 5);
}

#[test]
fn dispose_on_teardown_is_repeatable() {
    let dir = sample_dir();
    let entries = scan_directory(dir.path(), false).unwrap();
    let (cache, _sink) = CacheManager::new(FsMetadataReader::default()).unwrap();
    for e in &entries {
        cache.add(e);
    }

    cache.dispose();
    cache.dispose();
    assert!(!cache.is_running());
    assert!(cache.wait_terminated(WAIT));
    drop(cache);
}
