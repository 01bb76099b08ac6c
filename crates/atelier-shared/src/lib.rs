//! # atelier-shared
//!
//! Types shared between the store and client crates: id newtypes, the
//! storage-key constants, and validation errors raised before any store
//! mutation happens.

pub mod constants;
pub mod error;
pub mod types;

pub use error::ValidationError;
pub use types::*;
