//! Session commands.
//!
//! There is no backend: sign-in accepts any credentials and fabricates a
//! user record, which is persisted as the session until sign-out.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use atelier_shared::types::{Role, UserId};
use atelier_shared::ValidationError;
use atelier_store::User;

use crate::error::Result;
use crate::events::{notify, Notice, EVENT_SESSION_CHANGED};
use crate::state::{lock, SharedState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
    pub created_at: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            role: user.role,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Create an account.  The credentials are never checked against
/// anything; the password is accepted and discarded.
pub async fn sign_up(
    state: &SharedState,
    name: &str,
    email: &str,
    _password: &str,
    role: Role,
) -> Result<UserDto> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name").into());
    }
    if email.trim().is_empty() {
        return Err(ValidationError::MissingField("email").into());
    }

    let (latency, avatar) = {
        let guard = lock(state)?;
        (guard.config.request_latency(), guard.config.avatar_url(name))
    };

    // Simulated backend delay; always resolves.
    tokio::time::sleep(latency).await;

    let user = User {
        id: UserId::new(),
        name: name.to_string(),
        email: email.trim().to_string(),
        avatar,
        role,
        created_at: Utc::now(),
    };

    let mut guard = lock(state)?;
    guard.store.save_session(&user)?;
    guard.session = Some(user.clone());

    info!(user = %user.id, event = EVENT_SESSION_CHANGED, "account created");
    notify(
        guard.notice_tx.as_ref(),
        Notice::success("Account created!", "Your account has been successfully created."),
    );

    Ok(UserDto::from(&user))
}

/// Sign in with any credentials.  The fabricated user takes its name
/// from the email's local part and gets the `both` role.
pub async fn sign_in(state: &SharedState, email: &str, _password: &str) -> Result<UserDto> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingField("email").into());
    }

    let name = email.split('@').next().unwrap_or(email).to_string();

    let (latency, avatar) = {
        let guard = lock(state)?;
        (
            guard.config.request_latency(),
            guard.config.avatar_url(&name),
        )
    };

    tokio::time::sleep(latency).await;

    let user = User {
        id: UserId::new(),
        name,
        email: email.to_string(),
        avatar,
        role: Role::Both,
        created_at: Utc::now(),
    };

    let mut guard = lock(state)?;
    guard.store.save_session(&user)?;
    guard.session = Some(user.clone());

    info!(user = %user.id, event = EVENT_SESSION_CHANGED, "signed in");
    notify(
        guard.notice_tx.as_ref(),
        Notice::success("Welcome back!", "You have successfully logged in."),
    );

    Ok(UserDto::from(&user))
}

/// Drop the session.  Marketplace collections are left intact.
pub fn sign_out(state: &SharedState) -> Result<()> {
    let mut guard = lock(state)?;
    guard.store.clear_session()?;
    guard.session = None;

    info!(event = EVENT_SESSION_CHANGED, "signed out");
    notify(
        guard.notice_tx.as_ref(),
        Notice::info("Logged out", "You have been successfully logged out."),
    );
    Ok(())
}

/// The signed-in user, if any.
pub fn current_user(state: &SharedState) -> Result<Option<UserDto>> {
    let guard = lock(state)?;
    Ok(guard.session.as_ref().map(UserDto::from))
}
