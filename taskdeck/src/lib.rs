//! `TaskDeck` -- collaborative task board coordination engine.
//!
//! An in-memory state engine for a shared kanban-style board: task and
//! member records, a bounded activity feed, load-balanced assignment,
//! and optimistic concurrency control for concurrent edits. Rendering,
//! transport, and persistence are the embedder's business; everything
//! here is driven through [`Board`].

pub mod balance;
pub mod board;
pub mod config;
pub mod conflict;
pub mod demo;
pub mod log;
pub mod sim;
pub mod store;

pub use board::{Board, EditOutcome};
pub use log::ActivityLog;
pub use store::TaskStore;

use taskdeck_model::task::TaskId;
use taskdeck_model::user::UserId;
use thiserror::Error;

/// Errors that can occur during board operations.
///
/// Every failure leaves the store and the activity feed exactly as they
/// were; no operation mutates partially.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Task title cannot be empty.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// Another task already uses this title (compared case-insensitively).
    #[error("task title already in use: {0}")]
    DuplicateTitle(String),
    /// The title collides with a status-column name.
    #[error("task title is reserved for a board column: {0}")]
    ReservedTitle(String),
    /// Task with the given ID was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// User with the given ID was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The resolution strategy string was not recognized.
    #[error("unknown resolution strategy: {0}")]
    InvalidStrategy(String),
    /// A conflict resolution was submitted without picking a version.
    #[error("no version selected for conflict resolution")]
    MissingSelection,
}
