//! Observable holder of the artist list.
//!
//! The store only ever swaps the whole list. Observers get one
//! [`StoreEvent`] per effective swap and re-render from it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use shared::domain::ArtistList;
use tokio::sync::broadcast;
use tracing::trace;

const STORE_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub artist_ids: ArtistList,
    pub revision: u64,
}

struct ListState {
    artist_ids: ArtistList,
    revision: u64,
}

pub struct ListStore {
    inner: Mutex<ListState>,
    events: broadcast::Sender<StoreEvent>,
}

impl ListStore {
    pub fn new(initial: ArtistList) -> Self {
        let (events, _) = broadcast::channel(STORE_EVENT_CAPACITY);
        Self {
            inner: Mutex::new(ListState {
                artist_ids: initial,
                revision: 0,
            }),
            events,
        }
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ArtistList {
        self.state().artist_ids.clone()
    }

    pub fn len(&self) -> usize {
        self.state().artist_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of effective swaps since construction.
    pub fn revision(&self) -> u64 {
        self.state().revision
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Swaps in `new_list`. Returns `false` (and notifies nobody) when the
    /// list is unchanged.
    pub fn replace(&self, new_list: ArtistList) -> bool {
        self.replace_with(move |_| new_list)
    }

    /// Computes the next list from the current one and swaps it in while
    /// holding the lock, so concurrent callers never lose each other's swap.
    pub fn replace_with<F>(&self, next: F) -> bool
    where
        F: FnOnce(&[String]) -> ArtistList,
    {
        let event = {
            let mut state = self.state();
            let new_list = next(state.artist_ids.as_slice());
            if new_list == state.artist_ids {
                trace!(revision = state.revision, "replace skipped, list unchanged");
                return false;
            }
            state.artist_ids = new_list;
            state.revision += 1;
            StoreEvent {
                artist_ids: state.artist_ids.clone(),
                revision: state.revision,
            }
        };
        trace!(revision = event.revision, len = event.artist_ids.len(), "list replaced");
        let _ = self.events.send(event);
        true
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
