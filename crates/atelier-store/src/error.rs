use thiserror::Error;

/// Errors produced by the store layer.
///
/// Absence is not an error: a key that was never written reads back as the
/// collection default.  `Corrupt` and `Unavailable` are surfaced to the
/// caller instead of being silently swallowed into defaults.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying SQLite database rejected the operation or could not
    /// be reached (locked file, dropped table, closed handle).
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    /// A stored document exists but no longer deserializes as the
    /// expected collection shape.
    #[error("Corrupt record under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A lookup expected a record that is not in its collection.
    #[error("Record not found")]
    NotFound,

    /// Failed to serialize a collection for persistence.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A store lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
