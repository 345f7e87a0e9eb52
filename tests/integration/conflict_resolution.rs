//! Integration tests for concurrent-edit detection and resolution:
//! staleness boundaries, conflict payloads, merge and overwrite
//! semantics, and the failure paths around resolution.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use taskdeck::{Board, BoardError, EditOutcome};
use taskdeck_model::activity::ActivityAction;
use taskdeck_model::conflict::{ChosenVersion, Conflict};
use taskdeck_model::task::{Priority, TaskDraft, TaskId, TaskPatch, TaskStatus};
use taskdeck_model::user::UserId;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Creates a board where Alice committed an edit Bob has not seen, and
/// Bob's own edit has been returned as a conflict.
fn conflicted_board() -> (Board, UserId, UserId, TaskId, Conflict) {
    let mut board = Board::new();
    let alice = board
        .register_user("Alice Johnson", "alice@example.com", "")
        .id;
    let bob = board.register_user("Bob Smith", "bob@example.com", "").id;

    let task = board
        .create_task(&TaskDraft {
            title: "Contested".to_string(),
            description: "original".to_string(),
            priority: Priority::Medium,
            assigned_to: alice.clone(),
            created_by: alice.clone(),
        })
        .unwrap();

    // Alice's edit lands first.
    let patch = TaskPatch {
        description: Some("alice version".to_string()),
        ..TaskPatch::default()
    };
    board
        .edit_task(&task.id, &patch, task.updated_at, &alice)
        .unwrap();

    // Bob edits against a revision older than Alice's.
    let stored = board.task(&task.id).unwrap().clone();
    let patch = TaskPatch {
        description: Some("bob version".to_string()),
        priority: Some(Priority::High),
        ..TaskPatch::default()
    };
    let outcome = board
        .edit_task(&task.id, &patch, stored.updated_at.rewound(1), &bob)
        .unwrap();
    let EditOutcome::Conflict(conflict) = outcome else {
        panic!("expected Conflict, got {outcome:?}");
    };

    (board, alice, bob, task.id, conflict)
}

// --- detection tests ---

#[test]
fn equal_observed_timestamp_is_not_a_conflict() {
    let mut board = Board::new();
    let alice = board
        .register_user("Alice Johnson", "alice@example.com", "")
        .id;
    let task = board
        .create_task(&TaskDraft {
            title: "Uncontested".to_string(),
            description: String::new(),
            priority: Priority::Low,
            assigned_to: alice.clone(),
            created_by: alice.clone(),
        })
        .unwrap();

    let patch = TaskPatch {
        description: Some("still fine".to_string()),
        ..TaskPatch::default()
    };
    let outcome = board
        .edit_task(&task.id, &patch, task.updated_at, &alice)
        .unwrap();

    assert!(matches!(outcome, EditOutcome::Applied(_)));
}

#[test]
fn conflict_carries_both_versions_and_both_names() {
    let (board, _, _, task_id, conflict) = conflicted_board();

    assert_eq!(conflict.task_id, task_id);
    // Yours: the rejected edit as the editor intended it.
    assert_eq!(conflict.yours.description, "bob version");
    assert_eq!(conflict.yours.priority, Priority::High);
    // Theirs: the revision currently stored.
    let stored = board.task(&task_id).unwrap();
    assert_eq!(&conflict.theirs, stored);
    // Attribution comes from the last committed editor.
    assert_eq!(conflict.your_name, "Bob Smith");
    assert_eq!(conflict.their_name, "Alice Johnson");
    // The rejected edit keeps the revision its author saw.
    assert!(conflict.yours.updated_at < stored.updated_at);
}

#[test]
fn detection_leaves_the_board_untouched() {
    let (board, _, _, task_id, _) = conflicted_board();

    let stored = board.task(&task_id).unwrap();
    assert_eq!(stored.description, "alice version");
    assert_eq!(stored.priority, Priority::Medium);
    // Feed: one created entry, one updated entry, nothing for the conflict.
    let feed = board.activities();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].action, ActivityAction::Updated);
    assert_eq!(feed[1].action, ActivityAction::Created);
}

// --- merge tests ---

#[test]
fn merge_prepends_the_stored_description() {
    let (mut board, _, bob, task_id, conflict) = conflicted_board();
    let created_at = conflict.theirs.created_at;
    let created_by = conflict.theirs.created_by.clone();

    let resolved = board
        .resolve_conflict(conflict, "merge", Some(ChosenVersion::Yours), &bob)
        .unwrap();

    assert_eq!(resolved.description, "alice version\n\nbob version");
    // Everything else comes from the chosen snapshot.
    assert_eq!(resolved.priority, Priority::High);
    assert_eq!(resolved.status, TaskStatus::Todo);
    // Lineage survives resolution.
    assert_eq!(resolved.created_at, created_at);
    assert_eq!(resolved.created_by, created_by);
    assert_eq!(resolved.updated_by, bob);
    assert_eq!(board.task(&task_id).unwrap(), &resolved);
}

#[test]
fn merge_reads_the_description_stored_at_resolution_time() {
    let (mut board, alice, bob, task_id, conflict) = conflicted_board();

    // Alice edits again while Bob's conflict dialog is open.
    let stored = board.task(&task_id).unwrap().clone();
    let patch = TaskPatch {
        description: Some("alice second pass".to_string()),
        ..TaskPatch::default()
    };
    board
        .edit_task(&task_id, &patch, stored.updated_at, &alice)
        .unwrap();

    let resolved = board
        .resolve_conflict(conflict, "merge", Some(ChosenVersion::Yours), &bob)
        .unwrap();

    assert_eq!(resolved.description, "alice second pass\n\nbob version");
}

// --- overwrite tests ---

#[test]
fn overwrite_commits_the_chosen_version_wholesale() {
    let (mut board, _, bob, task_id, conflict) = conflicted_board();
    let theirs_updated_at = conflict.theirs.updated_at;

    let resolved = board
        .resolve_conflict(conflict, "overwrite", Some(ChosenVersion::Yours), &bob)
        .unwrap();

    assert_eq!(resolved.description, "bob version");
    assert_eq!(resolved.priority, Priority::High);
    // Only the revision stamp is refreshed.
    assert!(resolved.updated_at >= theirs_updated_at);
    assert_eq!(board.task(&task_id).unwrap(), &resolved);
}

#[test]
fn overwrite_with_theirs_keeps_the_stored_content() {
    let (mut board, _, bob, task_id, conflict) = conflicted_board();

    let resolved = board
        .resolve_conflict(conflict, "overwrite", Some(ChosenVersion::Theirs), &bob)
        .unwrap();

    assert_eq!(resolved.description, "alice version");
    assert_eq!(resolved.priority, Priority::Medium);
    assert_eq!(board.task(&task_id).unwrap().description, "alice version");
}

// --- resolution bookkeeping tests ---

#[test]
fn resolution_is_recorded_and_attributed() {
    let (mut board, _, bob, _, conflict) = conflicted_board();

    let resolved = board
        .resolve_conflict(conflict, "overwrite", Some(ChosenVersion::Yours), &bob)
        .unwrap();

    assert_eq!(resolved.updated_by, bob);
    let newest = board.activities().remove(0);
    assert_eq!(newest.action, ActivityAction::Updated);
    assert_eq!(newest.details, "Resolved edit conflict (overwrite)");
    assert_eq!(newest.actor, "Bob Smith");
}

#[test]
fn unknown_strategy_is_rejected_without_mutating() {
    let (mut board, _, bob, task_id, conflict) = conflicted_board();
    let feed_len = board.activities().len();

    let err = board
        .resolve_conflict(conflict, "force", Some(ChosenVersion::Yours), &bob)
        .unwrap_err();

    assert_eq!(err, BoardError::InvalidStrategy("force".to_string()));
    assert_eq!(board.task(&task_id).unwrap().description, "alice version");
    assert_eq!(board.activities().len(), feed_len);
}

#[test]
fn resolution_requires_a_selection() {
    let (mut board, _, bob, task_id, conflict) = conflicted_board();

    let err = board
        .resolve_conflict(conflict, "merge", None, &bob)
        .unwrap_err();

    assert_eq!(err, BoardError::MissingSelection);
    assert_eq!(board.task(&task_id).unwrap().description, "alice version");
}

#[test]
fn resolving_after_deletion_fails_cleanly() {
    let (mut board, alice, bob, task_id, conflict) = conflicted_board();
    board.delete_task(&task_id, &alice).unwrap();
    let feed_len = board.activities().len();

    let err = board
        .resolve_conflict(conflict, "overwrite", Some(ChosenVersion::Yours), &bob)
        .unwrap_err();

    assert!(matches!(err, BoardError::TaskNotFound(_)));
    assert!(board.task(&task_id).is_none());
    assert_eq!(board.activities().len(), feed_len);
}

#[test]
fn cancelling_a_conflict_has_no_side_effects() {
    let (mut board, _, bob, task_id, conflict) = conflicted_board();
    let feed_len = board.activities().len();

    drop(conflict);

    assert_eq!(board.task(&task_id).unwrap().description, "alice version");
    assert_eq!(board.activities().len(), feed_len);

    // Bob can retry against the current revision and succeed.
    let stored = board.task(&task_id).unwrap().clone();
    let patch = TaskPatch {
        description: Some("bob version".to_string()),
        ..TaskPatch::default()
    };
    let outcome = board
        .edit_task(&task_id, &patch, stored.updated_at, &bob)
        .unwrap();
    assert!(matches!(outcome, EditOutcome::Applied(_)));
}
