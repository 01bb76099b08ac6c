//! Domain model structs persisted in the local collection store.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase
//! field names, so the persisted JSON matches the documented layout and
//! can be handed directly to a UI layer.

use atelier_shared::constants::FREE_TRIAL_BUDGET;
use atelier_shared::types::{
    ConversationId, MessageId, OrderId, PortfolioId, ReviewId, Role, ServiceId, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The current session user.  Fabricated at sign-in (any credentials are
/// accepted) and persisted under the `user` key until sign-out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Denormalized snapshot of a user embedded in records they own
/// (portfolio creator, service provider, order parties).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
}

impl From<&User> for Party {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// A two-party message thread.
///
/// The name and avatar arrays are parallel to `participants`: index `i`
/// describes `participants[i]`.  Conversations are deduplicated by the
/// unordered participant pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub participants: [UserId; 2],
    pub participant_names: [String; 2],
    pub participant_avatars: [String; 2],
    /// Preview of the most recent message (or booking note).
    pub last_message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Start a new conversation between two parties.
    pub fn between(a: &Party, b: &Party, last_message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            participants: [a.id, b.id],
            participant_names: [a.name.clone(), b.name.clone()],
            participant_avatars: [a.avatar.clone(), b.avatar.clone()],
            last_message: last_message.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user` is one of the two participants.
    pub fn involves(&self, user: UserId) -> bool {
        self.participants.contains(&user)
    }

    /// Whether this conversation links `a` and `b`, in either order.
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        self.involves(a) && self.involves(b) && a != b
    }

    /// The participant opposite `user`, resolved through the parallel
    /// arrays.  `None` if `user` is not a participant.
    pub fn counterpart(&self, user: UserId) -> Option<Party> {
        let index = self.participants.iter().position(|p| *p != user)?;
        if !self.involves(user) {
            return None;
        }
        Some(Party {
            id: self.participants[index],
            name: self.participant_names[index].clone(),
            avatar: self.participant_avatars[index].clone(),
        })
    }

    /// Record a new latest message and bump the update timestamp.
    pub fn touch(&mut self, last_message: impl Into<String>, at: DateTime<Utc>) {
        self.last_message = last_message.into();
        self.updated_at = at;
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A single chat message.  Append-only; only the read flag is ever
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Message {
    /// Whether `user` appears as sender or receiver.
    pub fn involves(&self, user: UserId) -> bool {
        self.sender_id == user || self.receiver_id == user
    }
}

// ---------------------------------------------------------------------------
// Order (canonical hire record)
// ---------------------------------------------------------------------------

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Completed,
}

/// Which side of an order a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Client,
    Creator,
}

/// The canonical record of a hire.
///
/// One order is the whole truth: the client's "order" and the creator's
/// "booking" are role views of this single record, so a status change is
/// visible to both sides by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub client_id: UserId,
    pub client_name: String,
    pub client_avatar: String,
    pub creator_id: UserId,
    pub creator_name: String,
    pub creator_avatar: String,
    pub service_id: ServiceId,
    pub service_name: String,
    pub description: String,
    /// Display string, e.g. `"$120"` or `"Free trial"`.
    pub budget: String,
    /// Display string; `"To be discussed"` when the client left it open.
    pub deadline: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Order {
    /// The side of this order `user` is on, if any.
    pub fn role_of(&self, user: UserId) -> Option<PartyRole> {
        if self.client_id == user {
            Some(PartyRole::Client)
        } else if self.creator_id == user {
            Some(PartyRole::Creator)
        } else {
            None
        }
    }

    /// The party opposite `role`: the creator as seen by the client, the
    /// client as seen by the creator.
    pub fn counterpart(&self, role: PartyRole) -> Party {
        match role {
            PartyRole::Client => Party {
                id: self.creator_id,
                name: self.creator_name.clone(),
                avatar: self.creator_avatar.clone(),
            },
            PartyRole::Creator => Party {
                id: self.client_id,
                name: self.client_name.clone(),
                avatar: self.client_avatar.clone(),
            },
        }
    }

    /// Whether this order requires no payment.
    pub fn is_free(&self) -> bool {
        self.budget == FREE_TRIAL_BUDGET || self.budget == "$0"
    }
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

/// A user-created portfolio piece.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: PortfolioId,
    pub title: String,
    pub category: String,
    pub description: String,
    /// Uploaded image as a data URL.
    pub image: String,
    pub creator: Party,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// A user-created service listing, referenced by orders and reviews.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Whether the provider offers a free trial session.
    pub free_offer: bool,
    pub provider: Party,
}

// ---------------------------------------------------------------------------
// Review
// ---------------------------------------------------------------------------

/// A review of a service.  Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub service_id: ServiceId,
    pub service_name: String,
    pub provider_id: UserId,
    pub provider_name: String,
    /// 1-5, validated before the record is written.
    pub rating: u8,
    pub content: String,
    pub author: String,
    pub author_id: UserId,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Record impls (id-indexed upsert/delete support)
// ---------------------------------------------------------------------------

macro_rules! impl_record {
    ($($model:ty),+) => {
        $(impl crate::store::Record for $model {
            fn record_id(&self) -> uuid::Uuid {
                self.id.0
            }
        })+
    };
}

impl_record!(Conversation, Message, Order, Portfolio, Service, Review);

#[cfg(test)]
mod tests {
    use super::*;

    fn party(name: &str) -> Party {
        Party {
            id: UserId::new(),
            name: name.to_string(),
            avatar: format!("https://example.com/{name}.png"),
        }
    }

    fn sample_order(client: &Party, creator: &Party) -> Order {
        Order {
            id: OrderId::new(),
            client_id: client.id,
            client_name: client.name.clone(),
            client_avatar: client.avatar.clone(),
            creator_id: creator.id,
            creator_name: creator.name.clone(),
            creator_avatar: creator.avatar.clone(),
            service_id: ServiceId::new(),
            service_name: "Logo design".to_string(),
            description: "A new logo".to_string(),
            budget: "$120".to_string(),
            deadline: "To be discussed".to_string(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            paid_at: None,
        }
    }

    #[test]
    fn order_round_trip_loses_no_fields() {
        let order = sample_order(&party("ana"), &party("bea"));
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }

    #[test]
    fn persisted_keys_are_camel_case() {
        let order = sample_order(&party("ana"), &party("bea"));
        let value = serde_json::to_value(&order).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("clientId"));
        assert!(object.contains_key("serviceName"));
        assert!(object.contains_key("createdAt"));
        // paidAt is omitted until payment confirmation
        assert!(!object.contains_key("paidAt"));
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn message_round_trip_preserves_types() {
        let msg = Message {
            id: MessageId::new(),
            conversation_id: ConversationId::new(),
            sender_id: UserId::new(),
            receiver_id: UserId::new(),
            content: "hello".to_string(),
            timestamp: Utc::now(),
            read: false,
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }

    #[test]
    fn conversation_counterpart_follows_parallel_arrays() {
        let ana = party("ana");
        let bea = party("bea");
        let convo = Conversation::between(&ana, &bea, "hi");

        let other = convo.counterpart(ana.id).expect("ana participates");
        assert_eq!(other.id, bea.id);
        assert_eq!(other.name, "bea");

        assert!(convo.counterpart(UserId::new()).is_none());
        assert!(convo.is_between(bea.id, ana.id));
    }

    #[test]
    fn order_role_views() {
        let ana = party("ana");
        let bea = party("bea");
        let order = sample_order(&ana, &bea);

        assert_eq!(order.role_of(ana.id), Some(PartyRole::Client));
        assert_eq!(order.role_of(bea.id), Some(PartyRole::Creator));
        assert_eq!(order.role_of(UserId::new()), None);

        assert_eq!(order.counterpart(PartyRole::Client).name, "bea");
        assert_eq!(order.counterpart(PartyRole::Creator).name, "ana");
    }

    #[test]
    fn free_trial_detection() {
        let mut order = sample_order(&party("ana"), &party("bea"));
        assert!(!order.is_free());
        order.budget = "Free trial".to_string();
        assert!(order.is_free());
        order.budget = "$0".to_string();
        assert!(order.is_free());
    }
}
