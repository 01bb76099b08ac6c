//! Raw string-keyed JSON document access.
//!
//! The free functions operate on any `&Connection` (including an open
//! transaction, which derefs to one) so multi-key flows in
//! [`crate::Store`] can rewrite several documents atomically.

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::database::Database;
use crate::error::{Result, StoreError};

/// Read the JSON document stored under `key`.  `Ok(None)` means the key
/// was never written, which is distinct from a storage failure.
pub(crate) fn read_raw(conn: &Connection, key: &str) -> Result<Option<String>> {
    let result: std::result::Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM collections WHERE key = ?1",
        params![key],
        |row| row.get(0),
    );

    match result {
        Ok(json) => Ok(Some(json)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(other) => Err(StoreError::Unavailable(other)),
    }
}

/// Persist `json` under `key`, replacing any previous document.
pub(crate) fn write_raw(conn: &Connection, key: &str, json: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO collections (key, value, updated_at)
         VALUES (?1, ?2, ?3)",
        params![key, json, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Remove the document stored under `key`.  Returns `true` if a row was
/// deleted.
pub(crate) fn delete_raw(conn: &Connection, key: &str) -> Result<bool> {
    let affected = conn.execute("DELETE FROM collections WHERE key = ?1", params![key])?;
    Ok(affected > 0)
}

impl Database {
    /// Read the raw JSON document stored under `key`.
    pub fn read_document(&self, key: &str) -> Result<Option<String>> {
        read_raw(self.conn(), key)
    }

    /// Persist a raw JSON document under `key`.
    pub fn write_document(&self, key: &str, json: &str) -> Result<()> {
        write_raw(self.conn(), key, json)
    }

    /// Delete the document stored under `key`.
    pub fn delete_document(&self, key: &str) -> Result<bool> {
        delete_raw(self.conn(), key)
    }

    /// List every storage key currently present, in insertion order.
    pub fn list_keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT key FROM collections ORDER BY rowid ASC")?;

        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }
}
