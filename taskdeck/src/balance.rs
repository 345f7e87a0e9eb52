//! Pure assignment balancing over the task collection.
//!
//! No hidden state: both functions read only their arguments, so the
//! same inputs always produce the same result.

use taskdeck_model::task::{Task, TaskStatus};
use taskdeck_model::user::{User, UserId};

/// Counts the tasks assigned to `user` that are not yet done.
///
/// Done tasks cost nothing; only open work counts toward load.
#[must_use]
pub fn active_task_count(user: &UserId, tasks: &[Task]) -> usize {
    tasks
        .iter()
        .filter(|t| &t.assigned_to == user && t.status != TaskStatus::Done)
        .count()
}

/// Picks the least-loaded member as the next assignee.
///
/// Ties break toward the member encountered first in `users`, so the
/// choice is stable for a given member order. Returns `None` when
/// `users` is empty.
#[must_use]
pub fn pick_assignee<'a>(users: &'a [User], tasks: &[Task]) -> Option<&'a User> {
    users.iter().min_by_key(|u| active_task_count(&u.id, tasks))
}
