//! Integration tests for CacheManager against the public API

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::helpers::{sample_dir, RecordingReader, WAIT};
use lvmeta::{CacheManager, FileKind, FsMetadataReader, ItemId, ListEntry};

#[test]
fn stop_right_after_construction_terminates() {
    let (cache, _sink) = CacheManager::<ListEntry>::new(RecordingReader::default()).unwrap();
    cache.stop();

    assert!(cache.wait_terminated(WAIT));
    cache.dispose();
    cache.dispose();
    assert!(cache.is_terminated());
    assert!(!cache.is_running());
}

#[test]
fn requests_added_after_stop_are_not_fetched() {
    let reader = RecordingReader::default();
    let (cache, sink) = CacheManager::new(reader.clone()).unwrap();
    cache.stop();
    assert!(cache.wait_terminated(WAIT));

    cache.add(&Arc::new(ListEntry::new(1, "late", "/tmp/late")));

    assert!(sink.recv_timeout(Duration::from_millis(100)).is_none());
    assert!(reader.seen().is_empty());
    assert_eq!(cache.pending(), 1);
}

#[test]
fn queued_request_reads_path_captured_at_add() {
    let reader = RecordingReader::default();
    let (cache, sink) = CacheManager::new(reader.clone()).unwrap();
    cache.begin_item_edit(ItemId(1));

    let blocker = Arc::new(ListEntry::new(1, "blocker", "/tmp/blocker"));
    let entry = Arc::new(ListEntry::new(2, "photo", "/tmp/old-name.png"));
    cache.add(&blocker);
    cache.add(&entry);
    entry.set_path("/tmp/new-name.png");

    let delivery = sink.recv_timeout(WAIT).unwrap();
    assert_eq!(delivery.item_id, ItemId(2));
    assert_eq!(delivery.metadata.path, PathBuf::from("/tmp/old-name.png"));
    assert_eq!(reader.seen(), vec![PathBuf::from("/tmp/old-name.png")]);
}

#[test]
fn deliveries_for_dropped_items_do_not_upgrade() {
    let (cache, sink) = CacheManager::new(RecordingReader::default()).unwrap();
    let dropped = Arc::new(ListEntry::new(1, "dropped", "/tmp/dropped"));
    let kept = Arc::new(ListEntry::new(2, "kept", "/tmp/kept"));
    cache.add(&dropped);
    cache.add(&kept);
    drop(dropped);

    let first = sink.recv_timeout(WAIT).unwrap();
    assert_eq!(first.item_id, ItemId(1));
    assert!(first.upgrade().is_none());

    let second = sink.recv_timeout(WAIT).unwrap();
    assert_eq!(second.item_id, ItemId(2));
    assert!(second.upgrade().is_some());
}

#[test]
fn poll_applies_only_live_items() {
    let (cache, sink) = CacheManager::new(RecordingReader::default()).unwrap();
    let dropped = Arc::new(ListEntry::new(1, "dropped", "/tmp/dropped"));
    let kept = Arc::new(ListEntry::new(2, "kept", "/tmp/kept"));
    cache.add(&dropped);
    cache.add(&kept);
    drop(dropped);

    let deadline = Instant::now() + WAIT;
    let mut applied = Vec::new();
    let mut count = 0;
    while applied.is_empty() && Instant::now() < deadline {
        count += sink.poll(|entry, metadata| {
            applied.push(entry.id());
            entry.apply(metadata);
        });
        thread::sleep(Duration::from_millis(5));
    }

    // The dropped entry's result was fetched first, so it was skipped
    // before the live one was applied.
    assert_eq!(count, 1);
    assert_eq!(applied, vec![ItemId(2)]);
    assert!(kept.metadata().is_some());
}

#[test]
fn many_producers_all_get_fetched() {
    let (cache, sink) = CacheManager::new(RecordingReader::default()).unwrap();
    let cache = Arc::new(cache);
    let entries: Vec<Arc<ListEntry>> = (0..40u64)
        .map(|i| Arc::new(ListEntry::new(i, format!("e{}", i), format!("/tmp/e{}", i))))
        .collect();

    let handles: Vec<_> = entries
        .chunks(10)
        .map(|chunk| {
            let cache = Arc::clone(&cache);
            let chunk: Vec<_> = chunk.to_vec();
            thread::spawn(move || {
                for entry in &chunk {
                    cache.add(entry);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut ids: Vec<u64> = (0..40)
        .map(|_| sink.recv_timeout(WAIT).expect("delivery").item_id.0)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..40).collect::<Vec<_>>());
}

#[test]
fn filesystem_reader_end_to_end() {
    let dir = sample_dir();
    let entries = lvmeta::scan_directory(dir.path(), false).unwrap();
    let (cache, sink) = CacheManager::new(FsMetadataReader::default()).unwrap();
    for entry in &entries {
        cache.add(entry);
    }

    for _ in 0..entries.len() {
        let delivery = sink.recv_timeout(WAIT).unwrap();
        delivery.upgrade().unwrap().apply(delivery.metadata);
    }

    let gamma = entries.iter().find(|e| e.name == "gamma.png").unwrap();
    let meta = gamma.metadata().unwrap();
    assert_eq!(meta.kind, FileKind::Image);
    assert_eq!(meta.dimensions, Some((4, 3)));

    let beta = entries.iter().find(|e| e.name == "beta.txt").unwrap();
    assert_eq!(beta.metadata().unwrap().size, 6);
}

#[test]
fn deleted_file_delivers_placeholder() {
    let dir = sample_dir();
    let entries = lvmeta::scan_directory(dir.path(), false).unwrap();
    std::fs::remove_file(dir.path().join("alpha.txt")).unwrap();

    let (cache, sink) = CacheManager::new(FsMetadataReader::default()).unwrap();
    let alpha = entries.iter().find(|e| e.name == "alpha.txt").unwrap();
    cache.add(alpha);

    let delivery = sink.recv_timeout(WAIT).unwrap();
    assert!(!delivery.metadata.available);
}
