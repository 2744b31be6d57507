//! Client-side state for the favorite-artists page.
//!
//! A session is seeded once from the page's bootstrap payload, edited
//! locally through the [`MutationController`], and reconciled with the
//! server's version of the list on every save.

pub mod bootstrap;
pub mod controller;
pub mod error;
pub mod input;
mod session;
pub mod store;
pub mod transport;

pub use bootstrap::{
    load_bootstrap, DocumentPayloadSource, FilePayloadSource, MissingPayloadSource,
    PayloadSource, StaticPayloadSource,
};
pub use controller::{ControllerEvent, MutationController, SaveOrdering, SaveOutcome};
pub use error::{ClientError, ClientResult};
pub use input::{BufferedInput, InputPort};
pub use session::{ExplorerSession, ExplorerView};
pub use store::{ListStore, StoreEvent};
pub use transport::{HttpSaveTransport, MissingSaveTransport, SaveTransport};
