//! Application state shared across all commands.
//!
//! The [`AppState`] struct is wrapped in `Arc<Mutex<>>` and passed
//! explicitly to every command handler; there is no ambient global.  The
//! store inside it is the process's single mutation entry point.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use atelier_store::{Store, User};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::events::Notice;

/// Central application state.
pub struct AppState {
    /// Runtime configuration.
    pub config: ClientConfig,

    /// Handle to the local collection store.
    pub store: Arc<Store>,

    /// The signed-in user.  `None` until sign-in / session restore.
    pub session: Option<User>,

    /// Sender half of the notification channel, when a toast collaborator
    /// is attached.
    pub notice_tx: Option<mpsc::UnboundedSender<Notice>>,
}

/// Shared handle passed to every command.
pub type SharedState = Arc<Mutex<AppState>>;

impl AppState {
    /// Create a new application state around an open store.
    pub fn new(store: Arc<Store>, config: ClientConfig) -> Self {
        Self {
            config,
            store,
            session: None,
            notice_tx: None,
        }
    }

    /// Wrap this state for sharing across commands.
    pub fn shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    /// Attach a toast collaborator; returns the receiving end.
    pub fn attach_notifier(&mut self) -> mpsc::UnboundedReceiver<Notice> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.notice_tx = Some(tx);
        rx
    }

    /// The signed-in user, or [`ClientError::NotSignedIn`].
    pub fn current_user(&self) -> Result<&User> {
        self.session.as_ref().ok_or(ClientError::NotSignedIn)
    }

    /// Whether a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Lock the shared state, mapping a poisoned lock to a typed error.
pub(crate) fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>> {
    state.lock().map_err(|_| ClientError::LockPoisoned)
}
