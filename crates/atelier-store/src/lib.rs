//! # atelier-store
//!
//! Local persistent record store for the Atelier application.
//!
//! Every named collection (conversations, messages, orders, portfolios,
//! services, reviews, the session user) is persisted as one JSON document
//! in a single SQLite table, keyed by the collection name.  The crate
//! exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection`, and a [`Store`] front end that owns the
//! database, serializes every mutation, and notifies subscribers after
//! each committed write.

pub mod conversations;
pub mod database;
pub mod documents;
pub mod messages;
pub mod migrations;
pub mod models;
pub mod orders;
pub mod portfolios;
pub mod reviews;
pub mod services;
pub mod session;
pub mod store;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
pub use store::{Record, Store, StoreEvent};
