//! Concurrent-edit conflict records.
//!
//! When an edit arrives against a task revision the editor never saw, the
//! engine refuses to apply it and hands back a [`Conflict`] holding both
//! candidate snapshots. The caller shows the snapshots to the user and
//! submits a [`ResolutionStrategy`] plus a [`ChosenVersion`] to settle it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// Which of the two conflicting snapshots the resolving user selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChosenVersion {
    /// The resolving user's own rejected edit.
    Yours,
    /// The revision the other editor already committed.
    Theirs,
}

/// How a detected edit conflict should be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStrategy {
    /// Replace the task with the chosen snapshot as-is.
    Overwrite,
    /// Keep the chosen snapshot but combine both descriptions.
    Merge,
}

impl std::fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Merge => write!(f, "merge"),
        }
    }
}

/// Error returned when a resolution strategy string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resolution strategy: {0}")]
pub struct ParseStrategyError(pub String);

impl FromStr for ResolutionStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(Self::Overwrite),
            "merge" => Ok(Self::Merge),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

/// A detected concurrent edit, awaiting explicit resolution.
///
/// `yours` is the rejected edit replayed onto the revision its author
/// last observed; `theirs` is the revision currently on the board. Both
/// are full snapshots so the caller can render a side-by-side diff
/// without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The task both edits target.
    pub task_id: TaskId,
    /// The rejected edit, as its author intended the task to look.
    pub yours: Task,
    /// The revision already committed by the other editor.
    pub theirs: Task,
    /// Display name of the rejected edit's author.
    pub your_name: String,
    /// Display name of the member who committed first.
    pub their_name: String,
}

impl Conflict {
    /// Returns the snapshot the resolving user selected.
    #[must_use]
    pub const fn chosen(&self, version: ChosenVersion) -> &Task {
        match version {
            ChosenVersion::Yours => &self.yours,
            ChosenVersion::Theirs => &self.theirs,
        }
    }
}
