//! Board controller: the single entry point for all state changes.
//!
//! [`Board`] owns the entity store and the activity feed and keeps them
//! consistent: every successful mutation appends exactly one feed entry,
//! and every failure leaves both untouched. Concurrent edits are caught
//! here and turned into [`EditOutcome::Conflict`] values instead of
//! silent overwrites.

use taskdeck_model::activity::{Activity, ActivityAction};
use taskdeck_model::conflict::{ChosenVersion, Conflict, ResolutionStrategy};
use taskdeck_model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use taskdeck_model::time::Timestamp;
use taskdeck_model::user::{User, UserId};

use crate::log::ActivityLog;
use crate::store::TaskStore;
use crate::{BoardError, balance, conflict};

/// Result of submitting an edit against a possibly-stale revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit was committed; here is the new revision.
    Applied(Task),
    /// The edit was rejected as a concurrent-edit conflict. Nothing was
    /// committed; resolve via [`Board::resolve_conflict`].
    Conflict(Conflict),
}

/// Coordinates the entity store, the activity feed, and conflict
/// handling for one shared board.
#[derive(Debug, Default)]
pub struct Board {
    store: TaskStore,
    log: ActivityLog,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a board from a pre-populated store and feed.
    #[must_use]
    pub fn from_parts(store: TaskStore, log: ActivityLog) -> Self {
        Self { store, log }
    }

    // --- reads ---

    /// Returns all registered members in registration order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        self.store.users()
    }

    /// Returns the member with the given id, if registered.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.store.user(id)
    }

    /// Returns the task with the given id, if present.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.store.task(id)
    }

    /// Returns all tasks in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Returns the tasks in one column, creation order preserved.
    #[must_use]
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.store.list_by_status(status)
    }

    /// Returns a snapshot of the activity feed, newest first.
    #[must_use]
    pub fn activities(&self) -> Vec<Activity> {
        self.log.snapshot()
    }

    // --- membership and sessions ---

    /// Registers a new board member. Registration itself is not a feed
    /// event; sessions are recorded via [`record_login`](Self::record_login).
    pub fn register_user(&mut self, name: &str, email: &str, avatar_url: &str) -> User {
        let user = self.store.register_user(name, email, avatar_url);
        tracing::debug!(user = %user.id, name = %user.name, "member registered");
        user
    }

    /// Records a member joining the board session.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UserNotFound`] if the id is not registered.
    pub fn record_login(&mut self, user: &UserId) -> Result<Activity, BoardError> {
        let name = self.known_name(user)?;
        Ok(self
            .log
            .append(ActivityAction::Login, "", &name, "Joined the board"))
    }

    /// Records a member leaving the board session.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UserNotFound`] if the id is not registered.
    pub fn record_logout(&mut self, user: &UserId) -> Result<Activity, BoardError> {
        let name = self.known_name(user)?;
        Ok(self
            .log
            .append(ActivityAction::Logout, "", &name, "Left the board"))
    }

    // --- task mutations ---

    /// Creates a task from a draft and records a `created` feed entry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TitleEmpty`], [`BoardError::DuplicateTitle`],
    /// or [`BoardError::ReservedTitle`] if the title fails validation.
    pub fn create_task(&mut self, draft: &TaskDraft) -> Result<Task, BoardError> {
        let task = self.store.create_task(draft)?;
        let actor = self.store.display_name(&draft.created_by);
        self.log.append(
            ActivityAction::Created,
            &task.title,
            &actor,
            &format!("Created new task with {} priority", task.priority),
        );
        tracing::debug!(task = %task.id, title = %task.title, "task created");
        Ok(task)
    }

    /// Submits an edit against the revision the editor last observed.
    ///
    /// If the stored revision has advanced past `observed`, nothing is
    /// committed and the conflict is returned for explicit resolution.
    /// Otherwise the patch is applied and an `updated` entry recorded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if `id` is unknown.
    pub fn edit_task(
        &mut self,
        id: &TaskId,
        patch: &TaskPatch,
        observed: Timestamp,
        editor: &UserId,
    ) -> Result<EditOutcome, BoardError> {
        let stored = self
            .store
            .task(id)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))?;

        if conflict::is_stale(stored, observed) {
            let your_name = self.store.display_name(editor);
            let their_name = self.store.display_name(&stored.updated_by);
            let conflict =
                conflict::build_conflict(stored, patch, observed, &your_name, &their_name);
            tracing::info!(
                task = %id,
                observed = %observed,
                stored = %stored.updated_at,
                "stale edit rejected as conflict"
            );
            return Ok(EditOutcome::Conflict(conflict));
        }

        let task = self.store.update_task(id, patch, editor)?;
        let actor = self.store.display_name(editor);
        self.log
            .append(ActivityAction::Updated, &task.title, &actor, "Updated task details");
        Ok(EditOutcome::Applied(task))
    }

    /// Moves a task to another column and records a `moved` feed entry.
    ///
    /// Dropping a task onto the column it is already in is a silent
    /// no-op: no revision bump, no feed entry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if `id` is unknown.
    pub fn move_task(
        &mut self,
        id: &TaskId,
        status: TaskStatus,
        actor: &UserId,
    ) -> Result<Task, BoardError> {
        let stored = self
            .store
            .task(id)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))?;
        let from = stored.status;
        if from == status {
            return Ok(stored.clone());
        }

        let patch = TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        };
        let task = self.store.update_task(id, &patch, actor)?;
        let actor_name = self.store.display_name(actor);
        self.log.append(
            ActivityAction::Moved,
            &task.title,
            &actor_name,
            &format!("Moved from {from} to {status}"),
        );
        Ok(task)
    }

    /// Reassigns a task to the least-loaded member and records an
    /// `assigned` feed entry.
    ///
    /// With no members registered the task is returned unchanged and
    /// nothing is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if `id` is unknown.
    pub fn smart_assign(&mut self, id: &TaskId, actor: &UserId) -> Result<Task, BoardError> {
        let stored = self
            .store
            .task(id)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))?;

        let Some(winner) = balance::pick_assignee(self.store.users(), self.store.tasks()) else {
            return Ok(stored.clone());
        };
        let winner_id = winner.id.clone();
        let winner_name = winner.name.clone();

        let patch = TaskPatch {
            assigned_to: Some(winner_id),
            ..TaskPatch::default()
        };
        let task = self.store.update_task(id, &patch, actor)?;
        let actor_name = self.store.display_name(actor);
        self.log.append(
            ActivityAction::Assigned,
            &task.title,
            &actor_name,
            &format!("Smart assigned to {winner_name}"),
        );
        Ok(task)
    }

    /// Removes a task and records a `deleted` feed entry. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if `id` is unknown.
    pub fn delete_task(&mut self, id: &TaskId, actor: &UserId) -> Result<Task, BoardError> {
        let removed = self.store.delete_task(id)?;
        let actor_name = self.store.display_name(actor);
        self.log
            .append(ActivityAction::Deleted, &removed.title, &actor_name, "Deleted task");
        tracing::debug!(task = %removed.id, title = %removed.title, "task deleted");
        Ok(removed)
    }

    /// Settles a detected conflict and commits the resolved revision.
    ///
    /// The conflict is consumed: resolution is terminal and the same
    /// conflict cannot be resolved twice. `strategy` is caller-supplied
    /// text (`"overwrite"` or `"merge"`); `chosen` must name one of the
    /// two snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidStrategy`] for an unrecognized
    /// strategy, [`BoardError::MissingSelection`] if no version was
    /// chosen, or [`BoardError::TaskNotFound`] if the task was deleted
    /// while the conflict was pending. Nothing is committed on error.
    pub fn resolve_conflict(
        &mut self,
        conflict: Conflict,
        strategy: &str,
        chosen: Option<ChosenVersion>,
        actor: &UserId,
    ) -> Result<Task, BoardError> {
        let strategy = strategy
            .parse::<ResolutionStrategy>()
            .map_err(|e| BoardError::InvalidStrategy(e.0))?;
        let chosen = chosen.ok_or(BoardError::MissingSelection)?;
        let stored_now = self
            .store
            .task(&conflict.task_id)
            .ok_or_else(|| BoardError::TaskNotFound(conflict.task_id.clone()))?;

        let resolved = conflict::resolve(stored_now, &conflict, strategy, chosen);
        let task = self.store.replace_task(resolved, actor)?;
        let actor_name = self.store.display_name(actor);
        self.log.append(
            ActivityAction::Updated,
            &task.title,
            &actor_name,
            &format!("Resolved edit conflict ({strategy})"),
        );
        tracing::info!(task = %task.id, %strategy, "conflict resolved");
        Ok(task)
    }

    fn known_name(&self, user: &UserId) -> Result<String, BoardError> {
        self.store
            .user(user)
            .map(|u| u.name.clone())
            .ok_or_else(|| BoardError::UserNotFound(user.clone()))
    }
}
