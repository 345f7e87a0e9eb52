//! In-memory entity store for task and member records.
//!
//! [`TaskStore`] is the single source of truth for board state. Records
//! live in insertion order, which downstream consumers rely on: column
//! listings render in creation order and assignment balancing breaks
//! ties by enumeration order.

use taskdeck_model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use taskdeck_model::time::Timestamp;
use taskdeck_model::user::{User, UserId};

use crate::BoardError;

/// Owns all task and member records for one board.
///
/// Mutations stamp timestamps and attribution themselves; callers never
/// hand the store a finished record except through the conflict
/// resolution path ([`replace_task`](Self::replace_task)).
#[derive(Debug, Default)]
pub struct TaskStore {
    users: Vec<User>,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- members ---

    /// Registers a new board member and returns the stored record.
    pub fn register_user(&mut self, name: &str, email: &str, avatar_url: &str) -> User {
        let user = User {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            avatar_url: avatar_url.to_string(),
        };
        self.users.push(user.clone());
        user
    }

    /// Returns the member with the given id, if registered.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Returns all registered members in registration order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Returns the display name for a member id, or `"Unknown"` if the
    /// id is not registered.
    ///
    /// Feed entries and conflict attributions want a printable name even
    /// when the referenced member is gone.
    #[must_use]
    pub fn display_name(&self, id: &UserId) -> String {
        self.user(id)
            .map_or_else(|| "Unknown".to_string(), |u| u.name.clone())
    }

    // --- tasks ---

    /// Creates a new task from a draft. New cards start in the todo
    /// column with `created_at == updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TitleEmpty`] if the title is empty or
    /// whitespace-only, [`BoardError::DuplicateTitle`] if another task
    /// already uses the title (case-insensitive), or
    /// [`BoardError::ReservedTitle`] if the title collides with a
    /// status-column name.
    pub fn create_task(&mut self, draft: &TaskDraft) -> Result<Task, BoardError> {
        self.validate_title(&draft.title)?;

        let now = Timestamp::now();
        let task = Task {
            id: TaskId::new(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: TaskStatus::Todo,
            priority: draft.priority,
            assigned_to: draft.assigned_to.clone(),
            created_by: draft.created_by.clone(),
            updated_by: draft.created_by.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Returns the task with the given id, if present.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Returns all tasks in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns all tasks in the given column, creation order preserved.
    #[must_use]
    pub fn list_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Applies a patch to an existing task, stamping `updated_at` and
    /// `updated_by`, and returns the new revision.
    ///
    /// Title uniqueness is enforced at creation only; a patch may rename
    /// a task onto an existing title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if `id` is unknown.
    pub fn update_task(
        &mut self,
        id: &TaskId,
        patch: &TaskPatch,
        editor: &UserId,
    ) -> Result<Task, BoardError> {
        let task = self.task_mut(id)?;
        patch.apply_to(task);
        Self::stamp(task, editor);
        Ok(task.clone())
    }

    /// Replaces a stored task wholesale with a resolved snapshot,
    /// keeping the stored creation lineage and stamping `updated_at`
    /// and `updated_by`.
    ///
    /// This is the commit path for conflict resolution, where the new
    /// revision was built outside the store.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if no task with the
    /// snapshot's id is stored.
    pub fn replace_task(&mut self, resolved: Task, editor: &UserId) -> Result<Task, BoardError> {
        let task = self.task_mut(&resolved.id)?;
        let created_at = task.created_at;
        let created_by = task.created_by.clone();
        let floor = task.updated_at;

        *task = resolved;
        task.created_at = created_at;
        task.created_by = created_by;
        task.updated_at = floor;
        Self::stamp(task, editor);
        Ok(task.clone())
    }

    /// Removes a task from the board and returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] if `id` is unknown.
    pub fn delete_task(&mut self, id: &TaskId) -> Result<Task, BoardError> {
        let index = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))?;
        Ok(self.tasks.remove(index))
    }

    // --- internals ---

    /// Stamps the revision fields after a mutation. `updated_at` never
    /// moves backwards, even when the wall clock does.
    fn stamp(task: &mut Task, editor: &UserId) {
        task.updated_at = Timestamp::now().max(task.updated_at);
        task.updated_by = editor.clone();
    }

    fn task_mut(&mut self, id: &TaskId) -> Result<&mut Task, BoardError> {
        self.tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound(id.clone()))
    }

    fn validate_title(&self, title: &str) -> Result<(), BoardError> {
        if title.trim().is_empty() {
            return Err(BoardError::TitleEmpty);
        }

        let title_lower = title.to_lowercase();
        if self.tasks.iter().any(|t| t.title.to_lowercase() == title_lower) {
            return Err(BoardError::DuplicateTitle(title.to_string()));
        }

        for status in TaskStatus::ALL {
            if title_lower == status.to_string()
                || title_lower == status.column_label().to_lowercase()
            {
                return Err(BoardError::ReservedTitle(title.to_string()));
            }
        }

        Ok(())
    }
}
