//! Shared state between the cache manager and its worker.
//!
//! Queue, suppression set and lifecycle flags live in one struct behind one
//! mutex, with one condition variable on that mutex. Every check-then-act on
//! any of them happens under the same lock.

use std::collections::{HashSet, VecDeque};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::request::{FetchRequest, ItemId};

/// State guarded by [`Shared::state`].
pub(crate) struct PrefetchState<T> {
    /// Pending requests, front = next to fetch
    pub queue: VecDeque<FetchRequest<T>>,
    /// Items under edit; results for these are dropped
    pub suppressed: HashSet<ItemId>,
    /// Cleared once stop is requested
    pub running: bool,
    /// Set once, by the worker, as it exits
    pub terminated: bool,
}

impl<T> PrefetchState<T> {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            suppressed: HashSet::new(),
            running: true,
            terminated: false,
        }
    }

    pub fn is_suppressed(&self, id: ItemId) -> bool {
        self.suppressed.contains(&id)
    }
}

/// Mutex/condvar pair shared by the manager and the worker.
pub(crate) struct Shared<T> {
    state: Mutex<PrefetchState<T>>,
    /// Signalled on add, stop and worker exit
    wake: Condvar,
}

impl<T> Shared<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PrefetchState::new()),
            wake: Condvar::new(),
        }
    }

    /// Lock the state, recovering from a poisoned lock.
    ///
    /// The state stays consistent across a panic (every mutation is a single
    /// push, pop, insert or flag store), so poisoning is ignored.
    pub fn lock(&self) -> MutexGuard<'_, PrefetchState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wake everything blocked on the condvar.
    pub fn notify(&self) {
        self.wake.notify_all();
    }

    /// Clear `running` and wake the worker.
    ///
    /// Returns false if a stop had already been requested.
    pub fn request_stop(&self) -> bool {
        let mut guard = self.lock();
        if !guard.running {
            return false;
        }
        guard.running = false;
        drop(guard);
        self.notify();
        true
    }

    /// Block until a request is available or the manager stops running.
    ///
    /// Returns the guard with the queue non-empty or `running == false`.
    pub fn wait_for_work<'a>(
        &'a self,
        guard: MutexGuard<'a, PrefetchState<T>>,
    ) -> MutexGuard<'a, PrefetchState<T>> {
        self.wake
            .wait_while(guard, |s| s.running && s.queue.is_empty())
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the worker has terminated or `timeout` elapses.
    pub fn wait_terminated(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut guard = self.lock();
        while !guard.terminated {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            guard = self
                .wake
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        true
    }
}
