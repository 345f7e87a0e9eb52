//! Board member records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a board member, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new time-ordered user identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `UserId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered board member.
///
/// Members are created once at registration and never removed. The
/// identifier and email are immutable; only `name` and `avatar_url`
/// may change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique member identifier (UUID v7, time-ordered).
    pub id: UserId,
    /// Display name shown on cards and in the activity feed.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Where to fetch this member's avatar image.
    pub avatar_url: String,
}
