//! Turns user actions into new artist lists.
//!
//! Every operation computes a complete next list and hands it to
//! [`ListStore::replace_with`]; the store never sees a partial edit.

use std::{
    fmt,
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use shared::{
    domain::{ArtistList, SyncState},
    protocol::SaveRequest,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, ClientResult},
    input::InputPort,
    store::ListStore,
    transport::SaveTransport,
};

const CONTROLLER_EVENT_CAPACITY: usize = 64;

/// How responses of overlapping saves are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveOrdering {
    /// A response is applied only if no later-issued save has been applied
    /// already. The list never moves back to an older server version.
    #[default]
    LatestIssued,
    /// Every successful response is applied as it arrives; the last one to
    /// arrive wins.
    CompletionOrder,
}

impl SaveOrdering {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LatestIssued => "latest_issued",
            Self::CompletionOrder => "completion_order",
        }
    }
}

impl fmt::Display for SaveOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaveOrdering {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "latest_issued" => Ok(Self::LatestIssued),
            "completion_order" => Ok(Self::CompletionOrder),
            other => Err(format!(
                "unknown save ordering '{other}', expected latest_issued or completion_order"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Applied { sequence: u64, artist_ids: ArtistList },
    /// The response arrived after a later-issued save had been applied and
    /// was dropped.
    Superseded { sequence: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    SaveStarted { sequence: u64, artists: usize },
    SaveApplied { sequence: u64, artist_ids: ArtistList },
    SaveSuperseded { sequence: u64 },
    SaveFailed { sequence: u64, message: String },
}

struct SyncTracker {
    state: SyncState,
    issued: u64,
    applied: u64,
}

pub struct MutationController {
    store: Arc<ListStore>,
    input: Arc<dyn InputPort>,
    transport: Arc<dyn SaveTransport>,
    ordering: SaveOrdering,
    sync: Mutex<SyncTracker>,
    events: broadcast::Sender<ControllerEvent>,
}

impl MutationController {
    pub fn new(
        store: Arc<ListStore>,
        input: Arc<dyn InputPort>,
        transport: Arc<dyn SaveTransport>,
        ordering: SaveOrdering,
    ) -> Self {
        let (events, _) = broadcast::channel(CONTROLLER_EVENT_CAPACITY);
        Self {
            store,
            input,
            transport,
            ordering,
            sync: Mutex::new(SyncTracker {
                state: SyncState::Initialized,
                issued: 0,
                applied: 0,
            }),
            events,
        }
    }

    fn tracker(&self) -> MutexGuard<'_, SyncTracker> {
        self.sync.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store(&self) -> &Arc<ListStore> {
        &self.store
    }

    pub fn ordering(&self) -> SaveOrdering {
        self.ordering
    }

    pub fn sync_state(&self) -> SyncState {
        self.tracker().state
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// Appends whatever the input field currently holds. The field is
    /// cleared before the new list is published. The text is taken as-is,
    /// including an empty string.
    pub fn add(&self) {
        let raw = self.input.read();
        self.input.clear();
        self.add_value(raw);
    }

    pub fn add_value(&self, raw: impl Into<String>) {
        let raw = raw.into();
        debug!(artist_id = %raw, "adding artist");
        // Tracker before store, as in `apply_save`, so the list and its sync
        // state always change together.
        let mut tracker = self.tracker();
        self.store.replace_with(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend_from_slice(current);
            next.push(raw);
            next
        });
        tracker.state = tracker.state.after_local_edit();
    }

    pub fn delete(&self, index: usize) -> ClientResult<()> {
        let mut out_of_range = None;
        let mut tracker = self.tracker();
        self.store.replace_with(|current| {
            if index >= current.len() {
                out_of_range = Some(ClientError::IndexOutOfRange {
                    index,
                    len: current.len(),
                });
                return current.to_vec();
            }
            current
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, id)| id.clone())
                .collect()
        });
        if let Some(err) = out_of_range {
            return Err(err);
        }
        tracker.state = tracker.state.after_local_edit();
        drop(tracker);
        debug!(index, "deleted artist");
        Ok(())
    }

    /// Sends the current list to the server and, on success, replaces the
    /// local list with the server's answer. The store is not locked while
    /// the request is in flight. A failed save leaves the list untouched.
    pub async fn save(&self) -> ClientResult<SaveOutcome> {
        // Snapshot and sequence are taken together so a later sequence
        // number always carries a list at least as recent.
        let (sequence, artist_ids) = {
            let mut tracker = self.tracker();
            tracker.issued += 1;
            (tracker.issued, self.store.snapshot())
        };
        info!(sequence, artists = artist_ids.len(), "saving artist list");
        let _ = self.events.send(ControllerEvent::SaveStarted {
            sequence,
            artists: artist_ids.len(),
        });

        match self.transport.save(SaveRequest { artist_ids }).await {
            Ok(response) => Ok(self.apply_save(sequence, response.artist_ids)),
            Err(err) => {
                warn!(sequence, "save failed: {err}");
                let _ = self.events.send(ControllerEvent::SaveFailed {
                    sequence,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn apply_save(&self, sequence: u64, artist_ids: ArtistList) -> SaveOutcome {
        let mut tracker = self.tracker();
        if self.ordering == SaveOrdering::LatestIssued && sequence < tracker.applied {
            drop(tracker);
            warn!(sequence, "discarding response of a superseded save");
            let _ = self.events.send(ControllerEvent::SaveSuperseded { sequence });
            return SaveOutcome::Superseded { sequence };
        }

        self.store.replace(artist_ids.clone());
        tracker.applied = tracker.applied.max(sequence);
        tracker.state = tracker.state.after_applied_save();
        drop(tracker);

        info!(sequence, artists = artist_ids.len(), "save applied");
        let _ = self.events.send(ControllerEvent::SaveApplied {
            sequence,
            artist_ids: artist_ids.clone(),
        });
        SaveOutcome::Applied {
            sequence,
            artist_ids,
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
