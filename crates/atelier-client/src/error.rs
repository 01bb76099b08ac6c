use atelier_shared::ValidationError;
use atelier_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the command layer.
///
/// None of these is fatal: the caller turns the error into a one-shot
/// notification (or a not-found view) and the application stays
/// interactive.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The command needs a signed-in session.  The routing collaborator
    /// redirects to the sign-in view.
    #[error("Not signed in")]
    NotSignedIn,

    /// Application state lock poisoned by a panicking handler.
    #[error("State lock poisoned")]
    LockPoisoned,
}

impl ClientError {
    /// Whether this error should render as a not-found view instead of a
    /// notification.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Store(StoreError::NotFound))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
