//! Background worker that drains the fetch queue.
//!
//! A single thread pops requests in FIFO order, reads metadata without
//! holding the lock, and sends the result back over the delivery channel.
//! The worker exits once `running` is cleared, even with requests queued.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Barrier};

use tracing::{debug, trace, warn};

use super::request::FetchRequest;
use super::sink::Delivery;
use super::state::Shared;
use crate::metadata::{FileMetadata, MetadataReader};

/// Worker thread body.
///
/// Waits on `started` first so the spawner knows the thread is live.
pub(crate) fn run<T, R>(
    shared: Arc<Shared<T>>,
    reader: R,
    tx: Sender<Delivery<T>>,
    started: Arc<Barrier>,
) where
    R: MetadataReader,
{
    started.wait();
    debug!("prefetch worker started");

    while let Some(request) = next_request(&shared) {
        let item_id = request.item_id();
        let metadata = read_or_placeholder(&reader, request.path());

        let mut state = shared.lock();
        if !state.running {
            trace!(%item_id, "stopped during read, discarding result");
            continue;
        }
        if state.is_suppressed(item_id) {
            trace!(%item_id, "item went under edit during read, discarding result");
            continue;
        }

        // Sent under the lock so a concurrent stop cannot slip in between
        // the running check and the hand-off. The channel is unbounded.
        let delivery = Delivery {
            item: request.into_item(),
            item_id,
            metadata,
        };
        if tx.send(delivery).is_err() {
            debug!("result sink dropped, stopping prefetch worker");
            state.running = false;
        }
    }

    shared.lock().terminated = true;
    shared.notify();
    // Idempotent; covers the case where the loop ended on a dropped sink.
    shared.request_stop();
    debug!("prefetch worker terminated");
}

/// Pop the next request that is not under edit.
///
/// Returns `None` once the manager has stopped.
fn next_request<T>(shared: &Shared<T>) -> Option<FetchRequest<T>> {
    let mut state = shared.lock();
    loop {
        state = shared.wait_for_work(state);
        if !state.running {
            return None;
        }
        // wait_for_work only returns running with a non-empty queue; the
        // guard keeps the pop total rather than assuming that.
        let Some(request) = state.queue.pop_front() else {
            continue;
        };
        if state.is_suppressed(request.item_id()) {
            trace!(item_id = %request.item_id(), "item under edit, skipping fetch");
            continue;
        }
        return Some(request);
    }
}

/// Read `path`, turning errors and reader panics into a placeholder.
fn read_or_placeholder<R: MetadataReader>(reader: &R, path: &Path) -> FileMetadata {
    match panic::catch_unwind(AssertUnwindSafe(|| reader.read(path))) {
        Ok(Ok(metadata)) => {
            trace!(path = %path.display(), "metadata fetched");
            metadata
        }
        Ok(Err(e)) => {
            warn!(path = %path.display(), error = %e, "metadata read failed");
            FileMetadata::unavailable(path)
        }
        Err(payload) => {
            warn!(
                path = %path.display(),
                panic = panic_message(payload.as_ref()),
                "metadata reader panicked"
            );
            FileMetadata::unavailable(path)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}
