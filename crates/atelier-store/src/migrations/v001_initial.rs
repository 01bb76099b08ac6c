//! v001 -- Initial schema creation.
//!
//! Creates the single `collections` table.  Each row holds the full JSON
//! serialization of one named collection (an array of entity records, or
//! a single object for the session `user` key).

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS collections (
    key        TEXT PRIMARY KEY NOT NULL,   -- collection name, e.g. "conversations"
    value      TEXT NOT NULL,               -- JSON document
    updated_at TEXT NOT NULL                -- ISO-8601 / RFC-3339
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
