//! Accessors for [`Conversation`] records.
//!
//! Conversations are deduplicated by the unordered participant pair: a
//! second booking or message between the same two users must update the
//! existing thread, never append a duplicate.

use atelier_shared::constants::KEY_CONVERSATIONS;
use atelier_shared::types::{ConversationId, UserId};
use chrono::Utc;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::models::{Conversation, Party};
use crate::store::{read_collection, write_collection, Store};

impl Store {
    /// Conversations involving `user`, most recently updated first.
    pub fn conversations_for(&self, user: UserId) -> Result<Vec<Conversation>> {
        let mut conversations: Vec<Conversation> = self.read(KEY_CONVERSATIONS)?;
        conversations.retain(|c| c.involves(user));
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(conversations)
    }

    /// Fetch a single conversation by id.
    pub fn conversation(&self, id: ConversationId) -> Result<Conversation> {
        self.read::<Conversation>(KEY_CONVERSATIONS)?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)
    }

    /// The existing conversation between `a` and `b`, if any.  When the
    /// collection somehow holds several, the first in array order wins.
    pub fn conversation_between(&self, a: UserId, b: UserId) -> Result<Option<Conversation>> {
        Ok(self
            .read::<Conversation>(KEY_CONVERSATIONS)?
            .into_iter()
            .find(|c| c.is_between(a, b)))
    }

    /// Create the conversation between the two parties, or touch the
    /// existing one with a new last-message preview.
    pub fn upsert_conversation(
        &self,
        a: &Party,
        b: &Party,
        last_message: &str,
    ) -> Result<Conversation> {
        self.transaction(&[KEY_CONVERSATIONS], |conn| {
            touch_or_create(conn, a, b, last_message)
        })
    }
}

/// Shared by [`Store::upsert_conversation`] and the hire flow, which runs
/// it inside a larger transaction.
pub(crate) fn touch_or_create(
    conn: &Connection,
    a: &Party,
    b: &Party,
    last_message: &str,
) -> Result<Conversation> {
    let mut conversations: Vec<Conversation> = read_collection(conn, KEY_CONVERSATIONS)?;

    let touched = match conversations.iter_mut().find(|c| c.is_between(a.id, b.id)) {
        Some(existing) => {
            existing.touch(last_message, Utc::now());
            existing.clone()
        }
        None => {
            let created = Conversation::between(a, b, last_message);
            tracing::info!(conversation = %created.id, "creating conversation");
            conversations.push(created.clone());
            created
        }
    };

    write_collection(conn, KEY_CONVERSATIONS, &conversations)?;
    Ok(touched)
}
