use std::sync::Arc;

use shared::{
    domain::{ArtistList, SyncState},
    protocol::{BootstrapPayload, SongPreview},
};
use tracing::info;

use crate::{
    bootstrap::{load_bootstrap, PayloadSource},
    controller::{MutationController, SaveOrdering},
    input::InputPort,
    store::ListStore,
    transport::SaveTransport,
};

/// Everything a presentation layer needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerView {
    pub username: String,
    pub song_preview: Option<SongPreview>,
    pub artist_ids: ArtistList,
    pub sync_state: SyncState,
}

/// One mounted instance of the favorite-artists component.
pub struct ExplorerSession {
    payload: BootstrapPayload,
    store: Arc<ListStore>,
    controller: MutationController,
}

impl ExplorerSession {
    /// Reads the bootstrap payload (once) and seeds the store from it.
    pub fn mount(
        source: &dyn PayloadSource,
        input: Arc<dyn InputPort>,
        transport: Arc<dyn SaveTransport>,
        ordering: SaveOrdering,
    ) -> Self {
        let payload = load_bootstrap(source);
        let store = Arc::new(ListStore::new(payload.artist_ids.clone()));
        let controller = MutationController::new(Arc::clone(&store), input, transport, ordering);
        info!(
            username = %payload.username,
            artists = payload.artist_ids.len(),
            ordering = %controller.ordering(),
            "explorer session mounted"
        );
        Self {
            payload,
            store,
            controller,
        }
    }

    pub fn payload(&self) -> &BootstrapPayload {
        &self.payload
    }

    pub fn store(&self) -> &Arc<ListStore> {
        &self.store
    }

    pub fn controller(&self) -> &MutationController {
        &self.controller
    }

    pub fn view(&self) -> ExplorerView {
        ExplorerView {
            username: self.payload.username.clone(),
            song_preview: self.payload.song_preview(),
            artist_ids: self.store.snapshot(),
            sync_state: self.controller.sync_state(),
        }
    }
}
