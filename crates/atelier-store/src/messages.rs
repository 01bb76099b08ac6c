//! Accessors for [`Message`] records.
//!
//! Messages are append-only.  Sending patches the parent conversation's
//! preview in the same transaction, so the two keys can never disagree.

use atelier_shared::constants::{KEY_CONVERSATIONS, KEY_MESSAGES};
use atelier_shared::types::{ConversationId, UserId};

use crate::error::{Result, StoreError};
use crate::models::{Conversation, Message};
use crate::store::{read_collection, write_collection, Store};

impl Store {
    /// Append `message` and update its conversation's `lastMessage` /
    /// `updatedAt`, atomically.
    pub fn append_message(&self, message: Message) -> Result<Message> {
        self.transaction(&[KEY_MESSAGES, KEY_CONVERSATIONS], |conn| {
            let mut conversations: Vec<Conversation> = read_collection(conn, KEY_CONVERSATIONS)?;
            let parent = conversations
                .iter_mut()
                .find(|c| c.id == message.conversation_id)
                .ok_or(StoreError::NotFound)?;
            parent.touch(message.content.clone(), message.timestamp);

            let mut messages: Vec<Message> = read_collection(conn, KEY_MESSAGES)?;
            messages.push(message.clone());

            write_collection(conn, KEY_MESSAGES, &messages)?;
            write_collection(conn, KEY_CONVERSATIONS, &conversations)?;

            tracing::info!(
                message = %message.id,
                conversation = %message.conversation_id,
                "message sent"
            );
            Ok(message)
        })
    }

    /// Messages of one conversation, oldest first.
    pub fn messages_for_conversation(&self, id: ConversationId) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> = self.read(KEY_MESSAGES)?;
        messages.retain(|m| m.conversation_id == id);
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(messages)
    }

    /// Messages where `user` appears as sender or receiver, preserving
    /// the collection's original relative order.
    pub fn messages_for_user(&self, user: UserId) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> = self.read(KEY_MESSAGES)?;
        messages.retain(|m| m.involves(user));
        Ok(messages)
    }

    /// Count of messages addressed to `user` that are still unread.
    pub fn unread_count(&self, user: UserId) -> Result<usize> {
        Ok(self
            .read::<Message>(KEY_MESSAGES)?
            .iter()
            .filter(|m| m.receiver_id == user && !m.read)
            .count())
    }

    /// Flag every message in the conversation addressed to `reader` as
    /// read.  Returns the number of messages flipped.
    pub fn mark_conversation_read(
        &self,
        conversation: ConversationId,
        reader: UserId,
    ) -> Result<usize> {
        let mut flipped = 0;
        self.update(KEY_MESSAGES, |mut messages: Vec<Message>| {
            for message in messages
                .iter_mut()
                .filter(|m| m.conversation_id == conversation && m.receiver_id == reader && !m.read)
            {
                message.read = true;
                flipped += 1;
            }
            messages
        })?;
        Ok(flipped)
    }
}
