//! Scan command handler

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lvmeta::{scan_directory, CacheManager, Config, FsMetadataReader, ItemId, ListEntry, ResultSink};

use super::pad_name;

/// List `dir`, prefetch metadata for every entry, and print the results.
///
/// Entries named in `edit` are put under edit before anything is queued, so
/// their results are dropped and they print as `(editing)`. Entries whose
/// result did not arrive within the settle timeout print as `(pending)`.
pub fn handle(
    config: &Config,
    dir: &Path,
    recursive: bool,
    edit: &[String],
    no_images: bool,
) -> Result<()> {
    let entries = scan_directory(dir, recursive)?;
    if entries.is_empty() {
        println!("No entries in {}", dir.display());
        return Ok(());
    }

    let reader = FsMetadataReader::new(config.prefetch.probe_image_dimensions && !no_images);
    let (cache, sink) = CacheManager::with_thread_name(reader, &config.prefetch.thread_name)
        .context("Failed to start prefetch worker")?;

    let editing: HashSet<ItemId> = entries
        .iter()
        .filter(|e| edit.iter().any(|name| name == &e.name))
        .map(|e| e.id())
        .collect();
    for name in edit {
        if !entries.iter().any(|e| &e.name == name) {
            tracing::warn!(name = %name, "--edit names no entry in the listing");
        }
    }
    for id in &editing {
        cache.begin_item_edit(*id);
    }
    for entry in &entries {
        cache.add(entry);
    }

    let expected = entries.len() - editing.len();
    let timeout = Duration::from_millis(config.prefetch.settle_timeout_ms);
    let applied = drain_until(&sink, expected, timeout);
    cache.dispose();

    if applied < expected {
        tracing::warn!(
            applied,
            expected,
            "settle timeout elapsed before all metadata arrived"
        );
    }

    print_entries(&entries, &editing, &config.display.date_format, dir);
    Ok(())
}

/// Apply deliveries until `expected` have landed or `timeout` elapses.
fn drain_until(sink: &ResultSink<ListEntry>, expected: usize, timeout: Duration) -> usize {
    let deadline = Instant::now() + timeout;
    let mut applied = 0;

    while applied < expected {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        let Some(delivery) = sink.recv_timeout(deadline - now) else {
            break;
        };
        if let Some(entry) = delivery.upgrade() {
            entry.apply(delivery.metadata);
            applied += 1;
        }
        applied += sink.poll(|entry, metadata| entry.apply(metadata));
    }
    applied
}

fn print_entries(
    entries: &[Arc<ListEntry>],
    editing: &HashSet<ItemId>,
    date_format: &str,
    dir: &Path,
) {
    let width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    println!("{} entries in {}", entries.len(), dir.display());
    println!();
    for entry in entries {
        let status = if editing.contains(&entry.id()) {
            "(editing)".to_string()
        } else {
            match entry.metadata() {
                Some(metadata) => metadata.summary(date_format),
                None => "(pending)".to_string(),
            }
        };
        println!("{}  {}", pad_name(&entry.name, width), status);
    }
}
