//! # atelier-client
//!
//! Client-side flows of the Atelier marketplace over the local record
//! store: session handling, messaging, hiring, mock payment, portfolio
//! and service creation, and reviews.  View rendering, routing shells,
//! and toast display are external collaborators; this crate gives them a
//! typed command surface, a route table, and a notification channel.

pub mod commands;
pub mod config;
pub mod events;
pub mod routes;
pub mod state;

mod error;

use std::sync::{Arc, Mutex};

use tracing_subscriber::{fmt, EnvFilter};

use atelier_store::{Database, Store};

use crate::config::ClientConfig;
use crate::state::{AppState, SharedState};

pub use error::ClientError;

/// Initialise the tracing subscriber.  `RUST_LOG` wins when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("atelier_client=debug,atelier_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Open the store named by `config` and assemble the shared application
/// state, restoring a persisted session if one exists.
pub fn bootstrap(config: ClientConfig) -> Result<SharedState, ClientError> {
    let db = match &config.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(atelier_store::StoreError::from)?;
            Database::open_at(&dir.join("atelier.db"))?
        }
        None => Database::new()?,
    };

    let store = Arc::new(Store::open(db));
    let session = store.session_user()?;

    if let Some(ref user) = session {
        tracing::info!(user = %user.id, "restored session");
    }

    let mut state = AppState::new(store, config);
    state.session = session;
    Ok(Arc::new(Mutex::new(state)))
}
