use serde::{Deserialize, Serialize};

/// Artist identifiers are opaque strings; no format is enforced client-side.
pub type ArtistId = String;

/// Ordered list of saved artists. Order is display order and duplicates are allowed.
pub type ArtistList = Vec<ArtistId>;

pub const DEFAULT_USERNAME: &str = "John";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Seeded from the bootstrap payload, untouched since.
    #[default]
    Initialized,
    /// Locally modified since the last applied save.
    Dirty,
    /// Holds the list most recently confirmed by the server.
    Synced,
}

impl SyncState {
    pub fn after_local_edit(self) -> Self {
        Self::Dirty
    }

    pub fn after_applied_save(self) -> Self {
        Self::Synced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_becomes_dirty_on_edit() {
        for state in [SyncState::Initialized, SyncState::Dirty, SyncState::Synced] {
            assert_eq!(state.after_local_edit(), SyncState::Dirty);
        }
    }

    #[test]
    fn applied_save_always_lands_in_synced() {
        assert_eq!(SyncState::Dirty.after_applied_save(), SyncState::Synced);
        assert_eq!(SyncState::Synced.after_applied_save(), SyncState::Synced);
    }
}
