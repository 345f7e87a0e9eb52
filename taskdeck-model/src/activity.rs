//! Audit feed records.
//!
//! Activities are denormalized on purpose: they carry the task title and
//! actor display name as plain text, so feed entries stay readable after
//! the task is deleted or the member is renamed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::Timestamp;

/// Unique identifier for a feed entry, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(Uuid);

impl ActivityId {
    /// Creates a new time-ordered activity identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates an `ActivityId` from an existing UUID.
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

impl Default for ActivityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of board event a feed entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityAction {
    /// A task was created.
    Created,
    /// A task's fields were edited.
    Updated,
    /// A task moved between columns.
    Moved,
    /// A task was handed to another member.
    Assigned,
    /// A task reached the done column.
    Completed,
    /// A task was removed from the board.
    Deleted,
    /// A member joined the board session.
    Login,
    /// A member left the board session.
    Logout,
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Moved => write!(f, "moved"),
            Self::Assigned => write!(f, "assigned"),
            Self::Completed => write!(f, "completed"),
            Self::Deleted => write!(f, "deleted"),
            Self::Login => write!(f, "login"),
            Self::Logout => write!(f, "logout"),
        }
    }
}

/// One entry in the board's activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique entry identifier (UUID v7, time-ordered).
    pub id: ActivityId,
    /// What happened.
    pub action: ActivityAction,
    /// Title of the task involved, empty for session events.
    pub task_title: String,
    /// Display name of the member who acted.
    pub actor: String,
    /// When the entry was recorded.
    pub timestamp: Timestamp,
    /// Human-readable summary line.
    pub details: String,
}
