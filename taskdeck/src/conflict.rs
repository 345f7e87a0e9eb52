//! Optimistic concurrency: staleness detection and conflict resolution.
//!
//! Edits carry the `updated_at` the editor last observed. An edit is
//! stale when the stored revision has advanced past that point; stale
//! edits are never applied silently. Instead the engine builds a
//! [`Conflict`] from the rejected edit and the stored revision, and the
//! resolving user settles it with an explicit strategy.
//!
//! All functions here are pure; committing a resolved task back into
//! the store is the board controller's job.

use taskdeck_model::conflict::{ChosenVersion, Conflict, ResolutionStrategy};
use taskdeck_model::task::{Task, TaskPatch};
use taskdeck_model::time::Timestamp;

/// Returns `true` if the stored revision has advanced past the revision
/// the editor observed.
///
/// Equal timestamps are not stale: the editor saw the current revision.
#[must_use]
pub fn is_stale(stored: &Task, observed: Timestamp) -> bool {
    stored.updated_at > observed
}

/// Builds the conflict record for a rejected stale edit.
///
/// `yours` is the edit's intended outcome: the stored task with the
/// patch applied, carrying the revision timestamp the editor observed.
/// `theirs` is the stored revision as-is. Neither side is committed.
#[must_use]
pub fn build_conflict(
    stored: &Task,
    patch: &TaskPatch,
    observed: Timestamp,
    your_name: &str,
    their_name: &str,
) -> Conflict {
    let mut yours = stored.clone();
    patch.apply_to(&mut yours);
    yours.updated_at = observed;

    Conflict {
        task_id: stored.id.clone(),
        yours,
        theirs: stored.clone(),
        your_name: your_name.to_string(),
        their_name: their_name.to_string(),
    }
}

/// Produces the resolved task for a conflict, without committing it.
///
/// `stored_now` is the task currently on the board at resolution time,
/// which may have moved on since the conflict was detected.
///
/// - [`ResolutionStrategy::Overwrite`] returns the chosen snapshot as-is.
/// - [`ResolutionStrategy::Merge`] keeps every field of the chosen
///   snapshot but prepends the stored description to its description,
///   separated by a blank line.
#[must_use]
pub fn resolve(
    stored_now: &Task,
    conflict: &Conflict,
    strategy: ResolutionStrategy,
    chosen: ChosenVersion,
) -> Task {
    let mut resolved = conflict.chosen(chosen).clone();
    if strategy == ResolutionStrategy::Merge {
        resolved.description = format!("{}\n\n{}", stored_now.description, resolved.description);
    }
    resolved
}
