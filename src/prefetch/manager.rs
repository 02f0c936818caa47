//! Public control surface of the prefetch cache.

use std::io;
use std::sync::mpsc::channel;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::request::{FetchRequest, ItemId, PrefetchItem};
use super::sink::{Delivery, ResultSink};
use super::state::Shared;
use super::worker;
use crate::metadata::MetadataReader;

/// Default name of the worker thread
pub const DEFAULT_THREAD_NAME: &str = "lvmeta-prefetch";

/// Background metadata prefetcher for one list view.
///
/// Items are enqueued with [`add`](Self::add) and fetched one at a time, in
/// order, on a dedicated thread. Results arrive on the [`ResultSink`] returned
/// by the constructor. None of the methods wait on the worker: each holds the
/// shared lock only long enough to update the queue or flags.
///
/// Dropping the manager stops the worker without joining it.
pub struct CacheManager<T> {
    shared: Arc<Shared<T>>,
}

impl<T: PrefetchItem> CacheManager<T> {
    /// Start a manager whose worker reads through `reader`.
    ///
    /// Returns once the worker thread is running.
    pub fn new<R: MetadataReader>(reader: R) -> io::Result<(Self, ResultSink<T>)> {
        Self::with_thread_name(reader, DEFAULT_THREAD_NAME)
    }

    /// Like [`new`](Self::new) with a custom worker thread name.
    pub fn with_thread_name<R: MetadataReader>(
        reader: R,
        thread_name: &str,
    ) -> io::Result<(Self, ResultSink<T>)> {
        let shared = Arc::new(Shared::new());
        let (tx, rx) = channel::<Delivery<T>>();
        let started = Arc::new(Barrier::new(2));

        {
            let shared = Arc::clone(&shared);
            let started = Arc::clone(&started);
            thread::Builder::new()
                .name(thread_name.to_string())
                .spawn(move || worker::run(shared, reader, tx, started))?;
        }
        started.wait();
        debug!(thread = thread_name, "prefetch cache started");

        Ok((Self { shared }, ResultSink::new(rx)))
    }

    /// Queue a metadata fetch for `item`.
    ///
    /// The item's id and path are captured now. Adding the same item twice
    /// fetches it twice. Requests added after [`stop`](Self::stop) are queued
    /// but never fetched.
    pub fn add(&self, item: &Arc<T>) {
        let request = FetchRequest::snapshot(item);
        debug!(item_id = %request.item_id(), path = %request.path().display(), "queued fetch");
        self.shared.lock().queue.push_back(request);
        self.shared.notify();
    }
}

impl<T> CacheManager<T> {
    /// Suppress results for `id` while it is being edited.
    pub fn begin_item_edit(&self, id: ItemId) {
        self.shared.lock().suppressed.insert(id);
    }

    /// Resume delivering results for `id`.
    pub fn end_item_edit(&self, id: ItemId) {
        self.shared.lock().suppressed.remove(&id);
    }

    /// Whether `id` is currently under edit
    pub fn is_editing(&self, id: ItemId) -> bool {
        self.shared.lock().is_suppressed(id)
    }

    /// Ask the worker to exit. Does not wait for it.
    pub fn stop(&self) {
        if self.shared.request_stop() {
            debug!("prefetch cache stopping");
        }
    }

    /// Stop the worker if it is not already stopping. Safe to call repeatedly.
    pub fn dispose(&self) {
        if self.is_running() {
            self.stop();
        }
    }

    /// False once a stop has been requested
    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    /// True once the worker has left its loop
    pub fn is_terminated(&self) -> bool {
        self.shared.lock().terminated
    }

    /// Number of requests waiting to be fetched
    pub fn pending(&self) -> usize {
        self.shared.lock().queue.len()
    }

    /// Block until the worker has exited or `timeout` elapses.
    ///
    /// Returns whether the worker terminated. Intended for shutdown paths
    /// that want to log a slow exit; `stop` and `dispose` never block.
    pub fn wait_terminated(&self, timeout: Duration) -> bool {
        self.shared.wait_terminated(timeout)
    }
}

impl<T> Drop for CacheManager<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}
