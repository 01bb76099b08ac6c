use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a UUID-backed id newtype.  Serialized as a plain string so the
/// persisted JSON keeps flat id fields.
macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identity of a user record.  Fabricated at sign-in; every other
    /// entity references users by this id.
    UserId
);
id_type!(ConversationId);
id_type!(MessageId);
id_type!(OrderId);
id_type!(PortfolioId);
id_type!(ServiceId);
id_type!(ReviewId);

/// Marketplace role a user signs up with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Creator,
    Client,
    Both,
}

impl Role {
    /// Whether this role may offer services and receive bookings.
    pub fn offers_services(&self) -> bool {
        matches!(self, Role::Creator | Role::Both)
    }

    /// Whether this role may hire creators.
    pub fn hires_creators(&self) -> bool {
        matches!(self, Role::Client | Role::Both)
    }
}
