//! Identity newtypes shared across the workspace
//!
//! All four identities are opaque strings supplied by the chat platform
//! (snowflake-style). They only need equality, hashing and display; the
//! newtypes exist so a channel id can never be passed where a server id
//! is expected.

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap a platform-supplied identifier
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// View as a string slice
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

opaque_id! {
    /// A server (guild) identifier
    ServerId
}

opaque_id! {
    /// A text channel identifier within a server
    ChannelId
}

opaque_id! {
    /// A platform user identifier (the command invoker, not a participant name)
    UserId
}

opaque_id! {
    /// A delivered message identifier, used to key pagination sessions
    MessageId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let server = ServerId::new("1311");
        let channel = ChannelId::new("1311");
        assert_eq!(server.as_str(), channel.as_str());
    }

    #[test]
    fn id_display_roundtrip() {
        let id = MessageId::new("msg-42");
        assert_eq!(id.to_string(), "msg-42");
    }
}
