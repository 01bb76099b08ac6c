//! Notification seam for the toast collaborator.
//!
//! Commands emit a [`Notice`] per user-facing outcome; the UI shell
//! drains the channel and renders transient toasts.  Nothing here is
//! retried or fatal — a dropped notice is only logged.

use serde::Serialize;
use tokio::sync::mpsc;

pub const EVENT_SESSION_CHANGED: &str = "session-changed";
pub const EVENT_NEW_MESSAGE: &str = "new-message";
pub const EVENT_BOOKING_REQUESTED: &str = "booking-requested";
pub const EVENT_PAYMENT_CONFIRMED: &str = "payment-confirmed";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A one-shot, user-facing notification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Error,
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Info,
        }
    }
}

/// Dispatch `notice` to the attached collaborator, if any.
pub fn notify(tx: Option<&mpsc::UnboundedSender<Notice>>, notice: Notice) {
    match tx {
        Some(tx) => {
            if tx.send(notice.clone()).is_err() {
                tracing::debug!(title = %notice.title, "notice receiver dropped");
            }
        }
        None => tracing::debug!(title = %notice.title, "notice emitted with no collaborator"),
    }
}
