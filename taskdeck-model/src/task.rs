//! Task card records and their draft/patch forms.
//!
//! A [`Task`] is the canonical record stored by the engine. Callers never
//! hand the engine a full task: creation goes through [`TaskDraft`] and
//! edits through [`TaskPatch`], so the engine keeps sole authority over
//! identifiers, timestamps, and attribution fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::Timestamp;
use crate::user::UserId;

/// Unique identifier for a task card, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
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

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which board column a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// The human-readable column heading for this status.
    #[must_use]
    pub const fn column_label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Urgency level of a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal urgency.
    Medium,
    /// Needs attention soon.
    High,
}

impl Priority {
    /// All priorities, least urgent first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A task card on the shared board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (UUID v7, time-ordered).
    pub id: TaskId,
    /// Card title, unique across the board at creation time.
    pub title: String,
    /// Free-form description body.
    pub description: String,
    /// Which column the card sits in.
    pub status: TaskStatus,
    /// Urgency level.
    pub priority: Priority,
    /// Member currently responsible for the task.
    pub assigned_to: UserId,
    /// Member who created the task (immutable).
    pub created_by: UserId,
    /// Member whose edit produced the current revision.
    pub updated_by: UserId,
    /// When the task was created (immutable).
    pub created_at: Timestamp,
    /// When the task was last modified. Never precedes `created_at`.
    pub updated_at: Timestamp,
}

/// Input for creating a new task.
///
/// New cards always start in the [`TaskStatus::Todo`] column, so drafts
/// carry no status field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Requested card title.
    pub title: String,
    /// Description body.
    pub description: String,
    /// Urgency level.
    pub priority: Priority,
    /// Member the new card is assigned to.
    pub assigned_to: UserId,
    /// Member creating the card.
    pub created_by: UserId,
}

/// A partial edit to an existing task.
///
/// `None` fields are left unchanged. Identity, creation, and attribution
/// fields are not patchable; the engine stamps those itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title, if changing.
    pub title: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
    /// New status, if changing.
    pub status: Option<TaskStatus>,
    /// New priority, if changing.
    pub priority: Option<Priority>,
    /// New assignee, if changing.
    pub assigned_to: Option<UserId>,
}

impl TaskPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assigned_to.is_none()
    }

    /// Overlays the patched fields onto `task`, leaving `None` fields alone.
    ///
    /// Timestamps and attribution are untouched; stamping those is the
    /// caller's job.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description.clone_from(description);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(assigned_to) = &self.assigned_to {
            task.assigned_to.clone_from(assigned_to);
        }
    }
}
