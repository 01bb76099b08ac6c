//! Command handlers, one module per user flow.
//!
//! Every handler takes the explicit [`SharedState`](crate::state::SharedState)
//! handle, validates its input before touching the store, and reports the
//! outcome through the notification seam.  Handlers never hold the state
//! lock across a simulated delay.

pub mod auth;
pub mod dashboard;
pub mod hiring;
pub mod messaging;
pub mod payment;
pub mod portfolio;
pub mod reviews;
pub mod services;
