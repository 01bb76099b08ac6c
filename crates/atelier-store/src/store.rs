//! The single owning [`Store`] instance.
//!
//! Every view of the application reads and writes collections through one
//! `Store`.  Mutations are closures executed while the store holds its
//! database lock, so two logical writers in the same process cannot
//! clobber each other with stale snapshots; multi-key flows run inside a
//! single SQLite transaction.  Subscribers receive a [`StoreEvent`] naming
//! the changed key after each committed write.

use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::database::Database;
use crate::documents::{delete_raw, read_raw, write_raw};
use crate::error::{Result, StoreError};

/// Emitted to subscribers after a committed write, naming the storage key
/// that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub key: String,
}

/// A record that can live in an id-indexed collection.
pub trait Record: Serialize + DeserializeOwned {
    /// The unique id of this record within its collection.
    fn record_id(&self) -> Uuid;
}

/// The process-wide collection store.
///
/// Wrap it in an `Arc` and hand clones of that to every component that
/// needs data access; do not open a second store over the same database
/// file within one process.
pub struct Store {
    db: Mutex<Database>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<StoreEvent>>>,
}

impl Store {
    /// Take ownership of an open database.
    pub fn open(db: Database) -> Self {
        Self {
            db: Mutex::new(db),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a change subscriber.  The receiver yields one event per
    /// committed write, carrying the storage key that changed.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StoreEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }

    pub(crate) fn db(&self) -> Result<MutexGuard<'_, Database>> {
        self.db.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Notify subscribers that `key` changed, dropping closed channels.
    pub(crate) fn notify(&self, key: &str) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return;
        };
        subscribers.retain(|tx| {
            tx.send(StoreEvent {
                key: key.to_string(),
            })
            .is_ok()
        });
        tracing::debug!(key, watchers = subscribers.len(), "collection changed");
    }

    // ------------------------------------------------------------------
    // Generic collection access
    // ------------------------------------------------------------------

    /// Read the collection stored under `key`.
    ///
    /// A key that was never written yields the empty collection; a
    /// document that fails to deserialize yields [`StoreError::Corrupt`].
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let guard = self.db()?;
        read_collection(guard.conn(), key)
    }

    /// Read a single-document key (the session `user`).  Distinguishes
    /// absent (`Ok(None)`) from corrupt from unavailable.
    pub fn read_single<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let guard = self.db()?;
        match read_raw(guard.conn(), key)? {
            Some(json) => decode(key, &json).map(Some),
            None => Ok(None),
        }
    }

    /// Replace the single document stored under `key`.
    pub fn write_single<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        {
            let guard = self.db()?;
            write_raw(guard.conn(), key, &encode(value)?)?;
        }
        self.notify(key);
        Ok(())
    }

    /// Remove the document stored under `key`.
    pub fn delete_key(&self, key: &str) -> Result<bool> {
        let deleted = {
            let guard = self.db()?;
            delete_raw(guard.conn(), key)?
        };
        if deleted {
            self.notify(key);
        }
        Ok(deleted)
    }

    /// Read-modify-write the collection under `key` while holding the
    /// store lock, then persist the result and notify subscribers.
    ///
    /// This is the only way to derive a new collection from the previous
    /// one; callers never write back an independently held snapshot.
    pub fn update<T, F>(&self, key: &str, f: F) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Vec<T>) -> Vec<T>,
    {
        let next = {
            let guard = self.db()?;
            let current = read_collection(guard.conn(), key)?;
            let next = f(current);
            write_raw(guard.conn(), key, &encode(&next)?)?;
            next
        };
        self.notify(key);
        Ok(next)
    }

    /// Keyed upsert: replace the record with the same id, or append.
    pub fn put<T: Record>(&self, key: &str, record: T) -> Result<()> {
        self.update(key, |mut records: Vec<T>| {
            match records
                .iter()
                .position(|r| r.record_id() == record.record_id())
            {
                Some(index) => records[index] = record,
                None => records.push(record),
            }
            records
        })?;
        Ok(())
    }

    /// Keyed delete.  Returns `true` if a record was removed.
    pub fn remove<T: Record>(&self, key: &str, id: Uuid) -> Result<bool> {
        let mut removed = false;
        self.update(key, |mut records: Vec<T>| {
            let before = records.len();
            records.retain(|r| r.record_id() != id);
            removed = records.len() != before;
            records
        })?;
        Ok(removed)
    }

    /// Run `f` inside one SQLite transaction, then notify each key in
    /// `touched`.  Used by multi-key flows (hire, message send) so a
    /// partial write can never be observed or persisted.
    pub(crate) fn transaction<R>(
        &self,
        touched: &[&str],
        f: impl FnOnce(&Connection) -> Result<R>,
    ) -> Result<R> {
        let result = {
            let mut guard = self.db()?;
            let tx = guard.conn_mut().transaction()?;
            let result = f(&tx)?;
            tx.commit()?;
            result
        };
        for key in touched {
            self.notify(key);
        }
        Ok(result)
    }
}

/// Deserialize the collection under `key`; absent means empty.
pub(crate) fn read_collection<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Vec<T>> {
    match read_raw(conn, key)? {
        Some(json) => decode(key, &json),
        None => Ok(Vec::new()),
    }
}

/// Serialize and persist the collection under `key`.
pub(crate) fn write_collection<T: Serialize>(conn: &Connection, key: &str, records: &[T]) -> Result<()> {
    write_raw(conn, key, &encode(&records)?)
}

fn decode<T: DeserializeOwned>(key: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(StoreError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    struct Note {
        id: Uuid,
        body: String,
    }

    impl Record for Note {
        fn record_id(&self) -> Uuid {
            self.id
        }
    }

    fn note(body: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            body: body.to_string(),
        }
    }

    fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).expect("should open");
        (dir, Store::open(db))
    }

    #[test]
    fn never_written_key_reads_default() {
        let (_dir, store) = open_temp();
        let notes: Vec<Note> = store.read("notes").unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn reads_are_idempotent() {
        let (_dir, store) = open_temp();
        store.put("notes", note("a")).unwrap();

        let first: Vec<Note> = store.read("notes").unwrap();
        let second: Vec<Note> = store.read("notes").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn writes_are_visible_to_subsequent_reads() {
        let (_dir, store) = open_temp();
        let written = vec![note("a"), note("b")];
        store
            .update("notes", |_: Vec<Note>| written.clone())
            .unwrap();

        let read: Vec<Note> = store.read("notes").unwrap();
        assert_eq!(read, written);
    }

    #[test]
    fn update_receives_previous_value() {
        let (_dir, store) = open_temp();
        store.put("notes", note("a")).unwrap();

        let next = store
            .update("notes", |mut notes: Vec<Note>| {
                notes.push(note("b"));
                notes
            })
            .unwrap();

        assert_eq!(next.len(), 2);
        assert_eq!(next[0].body, "a");
    }

    #[test]
    fn put_replaces_matching_id() {
        let (_dir, store) = open_temp();
        let mut record = note("draft");
        store.put("notes", record.clone()).unwrap();

        record.body = "final".to_string();
        store.put("notes", record.clone()).unwrap();

        let notes: Vec<Note> = store.read("notes").unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].body, "final");
    }

    #[test]
    fn remove_by_id() {
        let (_dir, store) = open_temp();
        let keep = note("keep");
        let drop = note("drop");
        store.put("notes", keep.clone()).unwrap();
        store.put("notes", drop.clone()).unwrap();

        assert!(store.remove::<Note>("notes", drop.id).unwrap());
        assert!(!store.remove::<Note>("notes", drop.id).unwrap());

        let notes: Vec<Note> = store.read("notes").unwrap();
        assert_eq!(notes, vec![keep]);
    }

    #[test]
    fn corrupt_document_is_surfaced_not_defaulted() {
        let (_dir, store) = open_temp();
        {
            let guard = store.db().unwrap();
            write_raw(guard.conn(), "notes", "{not json").unwrap();
        }

        let err = store.read::<Note>("notes").unwrap_err();
        match err {
            StoreError::Corrupt { key, .. } => assert_eq!(key, "notes"),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn single_document_round_trip() {
        let (_dir, store) = open_temp();
        assert!(store.read_single::<Note>("user").unwrap().is_none());

        let record = note("me");
        store.write_single("user", &record).unwrap();
        assert_eq!(store.read_single::<Note>("user").unwrap(), Some(record));

        assert!(store.delete_key("user").unwrap());
        assert!(store.read_single::<Note>("user").unwrap().is_none());
    }

    #[test]
    fn subscribers_learn_the_changed_key() {
        let (_dir, store) = open_temp();
        let mut rx = store.subscribe();

        store.put("notes", note("a")).unwrap();

        let event = rx.try_recv().expect("one event");
        assert_eq!(event.key, "notes");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn transaction_rolls_back_on_error() {
        let (_dir, store) = open_temp();

        let result: Result<()> = store.transaction(&["notes"], |conn| {
            write_collection(conn, "notes", &[note("half")])?;
            Err(StoreError::NotFound)
        });
        assert!(result.is_err());

        let notes: Vec<Note> = store.read("notes").unwrap();
        assert!(notes.is_empty(), "partial write must not be persisted");
    }
}
