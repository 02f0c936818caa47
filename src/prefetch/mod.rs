//! Asynchronous metadata prefetch for list views
//!
//! A [`CacheManager`] owns a FIFO of fetch requests and one worker thread
//! that reads file metadata off the UI thread. Results come back through a
//! [`ResultSink`] the list view drains from its own loop. Items under edit can
//! be suppressed so a fresh fetch does not clobber what the user is typing.

mod manager;
mod request;
mod sink;
mod state;
mod worker;

pub use manager::{CacheManager, DEFAULT_THREAD_NAME};
pub use request::{FetchRequest, ItemId, PrefetchItem};
pub use sink::{Delivery, ResultSink};
