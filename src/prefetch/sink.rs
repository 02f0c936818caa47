//! Hand-off of fetched metadata to the list view's own thread.
//!
//! The worker never touches items. It sends a [`Delivery`] over a channel and
//! the owner drains it from its event loop with [`ResultSink::poll`].

use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Weak};
use std::time::Duration;

use super::request::ItemId;
use crate::metadata::FileMetadata;

/// Metadata fetched for one request.
pub struct Delivery<T> {
    pub item: Weak<T>,
    pub item_id: ItemId,
    pub metadata: FileMetadata,
}

impl<T> Delivery<T> {
    /// The originating item, if the list still holds it
    pub fn upgrade(&self) -> Option<Arc<T>> {
        self.item.upgrade()
    }
}

/// Receiving end owned by the list view.
pub struct ResultSink<T> {
    rx: Receiver<Delivery<T>>,
}

impl<T> ResultSink<T> {
    pub(crate) fn new(rx: Receiver<Delivery<T>>) -> Self {
        Self { rx }
    }

    /// Apply every pending delivery without blocking.
    ///
    /// Deliveries for items that have since been dropped are skipped. Returns
    /// the number of deliveries applied.
    pub fn poll(&self, mut apply: impl FnMut(Arc<T>, FileMetadata)) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            if let Some(item) = delivery.item.upgrade() {
                apply(item, delivery.metadata);
                applied += 1;
            }
        }
        applied
    }

    /// Take one delivery if one is ready
    pub fn try_recv(&self) -> Option<Delivery<T>> {
        match self.rx.try_recv() {
            Ok(delivery) => Some(delivery),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next delivery.
    ///
    /// Returns `None` on timeout or once the worker has exited and every
    /// delivery has been drained.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Delivery<T>> {
        match self.rx.recv_timeout(timeout) {
            Ok(delivery) => Some(delivery),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
