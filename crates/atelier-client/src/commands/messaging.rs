//! Conversation and message commands.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use atelier_shared::types::{ConversationId, MessageId};
use atelier_shared::ValidationError;
use atelier_store::{Conversation, Message};

use crate::error::Result;
use crate::events::EVENT_NEW_MESSAGE;
use crate::state::{lock, SharedState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub id: String,
    /// The participant opposite the signed-in user.
    pub counterpart_id: String,
    pub counterpart_name: String,
    pub counterpart_avatar: String,
    pub last_message: String,
    pub updated_at: String,
}

impl ConversationDto {
    fn for_user(conversation: &Conversation, user: atelier_shared::types::UserId) -> Option<Self> {
        let other = conversation.counterpart(user)?;
        Some(Self {
            id: conversation.id.to_string(),
            counterpart_id: other.id.to_string(),
            counterpart_name: other.name,
            counterpart_avatar: other.avatar,
            last_message: conversation.last_message.clone(),
            updated_at: conversation.updated_at.to_rfc3339(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub timestamp: String,
    pub read: bool,
}

impl From<&Message> for MessageDto {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id.to_string(),
            conversation_id: m.conversation_id.to_string(),
            sender_id: m.sender_id.to_string(),
            receiver_id: m.receiver_id.to_string(),
            content: m.content.clone(),
            timestamp: m.timestamp.to_rfc3339(),
            read: m.read,
        }
    }
}

/// The signed-in user's conversations, most recently updated first.
pub fn list_conversations(state: &SharedState) -> Result<Vec<ConversationDto>> {
    let guard = lock(state)?;
    let user = guard.current_user()?;

    let conversations = guard.store.conversations_for(user.id)?;
    Ok(conversations
        .iter()
        .filter_map(|c| ConversationDto::for_user(c, user.id))
        .collect())
}

/// One conversation header, resolved against the signed-in user.
pub fn get_conversation(state: &SharedState, id: ConversationId) -> Result<ConversationDto> {
    let guard = lock(state)?;
    let user = guard.current_user()?;

    let conversation = guard.store.conversation(id)?;
    ConversationDto::for_user(&conversation, user.id)
        .ok_or(crate::ClientError::Store(atelier_store::StoreError::NotFound))
}

/// Messages of one conversation, oldest first.  Opening a thread marks
/// the signed-in user's incoming messages as read.
pub fn get_messages(state: &SharedState, id: ConversationId) -> Result<Vec<MessageDto>> {
    let guard = lock(state)?;
    let user = guard.current_user()?;

    guard.store.mark_conversation_read(id, user.id)?;
    let messages = guard.store.messages_for_conversation(id)?;
    Ok(messages.iter().map(MessageDto::from).collect())
}

/// Append a message to a conversation and update its preview.
pub fn send_message(state: &SharedState, id: ConversationId, content: &str) -> Result<MessageDto> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::MissingField("message").into());
    }

    let guard = lock(state)?;
    let user = guard.current_user()?;

    let conversation = guard.store.conversation(id)?;
    let receiver = conversation
        .counterpart(user.id)
        .ok_or(atelier_store::StoreError::NotFound)?;

    let message = Message {
        id: MessageId::new(),
        conversation_id: id,
        sender_id: user.id,
        receiver_id: receiver.id,
        content: content.to_string(),
        timestamp: Utc::now(),
        read: false,
    };

    let stored = guard.store.append_message(message)?;
    info!(message = %stored.id, event = EVENT_NEW_MESSAGE, "message dispatched");
    Ok(MessageDto::from(&stored))
}
