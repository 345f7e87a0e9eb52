//! Canned board fixtures and a scripted walkthrough for the demo binary.
//!
//! [`demo_board`] seeds a small four-person board with six tasks and a
//! pre-populated activity feed; [`demo_script`] produces a deterministic
//! event sequence against it, including one deliberately stale edit.

use taskdeck_model::activity::{Activity, ActivityAction, ActivityId};
use taskdeck_model::task::{Priority, Task, TaskDraft, TaskPatch, TaskStatus};
use taskdeck_model::time::Timestamp;
use taskdeck_model::user::User;

use crate::BoardError;
use crate::board::Board;
use crate::log::ActivityLog;
use crate::sim::PeerEvent;
use crate::store::TaskStore;

/// Builds the demo board: four members, six tasks spread across the
/// columns, and five historical feed entries. `log_capacity` bounds the
/// activity feed; a capacity below five truncates the seeded history.
///
/// # Errors
///
/// Returns [`BoardError`] if the fixture data fails validation; with the
/// canned data this does not happen.
pub fn demo_board(log_capacity: usize) -> Result<Board, BoardError> {
    let mut store = TaskStore::new();

    let alice = store.register_user(
        "Alice Johnson",
        "alice@example.com",
        "https://images.pexels.com/photos/1239291/pexels-photo-1239291.jpeg?auto=compress&cs=tinysrgb&w=400",
    );
    let bob = store.register_user(
        "Bob Smith",
        "bob@example.com",
        "https://images.pexels.com/photos/614810/pexels-photo-614810.jpeg?auto=compress&cs=tinysrgb&w=400",
    );
    let carol = store.register_user(
        "Carol Williams",
        "carol@example.com",
        "https://images.pexels.com/photos/1130626/pexels-photo-1130626.jpeg?auto=compress&cs=tinysrgb&w=400",
    );
    let david = store.register_user(
        "David Brown",
        "david@example.com",
        "https://images.pexels.com/photos/1040880/pexels-photo-1040880.jpeg?auto=compress&cs=tinysrgb&w=400",
    );

    store.create_task(&TaskDraft {
        title: "Design Homepage Layout".to_string(),
        description: "Create wireframes and mockups for the new homepage design".to_string(),
        priority: Priority::High,
        assigned_to: alice.id.clone(),
        created_by: alice.id.clone(),
    })?;
    let auth = store.create_task(&TaskDraft {
        title: "Implement User Authentication".to_string(),
        description: "Set up JWT-based authentication system with login/register functionality"
            .to_string(),
        priority: Priority::High,
        assigned_to: bob.id.clone(),
        created_by: alice.id.clone(),
    })?;
    store.create_task(&TaskDraft {
        title: "Write API Documentation".to_string(),
        description: "Document all REST API endpoints with examples and response formats"
            .to_string(),
        priority: Priority::Medium,
        assigned_to: carol.id.clone(),
        created_by: bob.id.clone(),
    })?;
    let schema = store.create_task(&TaskDraft {
        title: "Set up Database Schema".to_string(),
        description: "Design and implement the database schema for users and tasks".to_string(),
        priority: Priority::High,
        assigned_to: david.id.clone(),
        created_by: alice.id.clone(),
    })?;
    let mobile = store.create_task(&TaskDraft {
        title: "Create Mobile Responsive Design".to_string(),
        description: "Ensure the application works well on mobile devices".to_string(),
        priority: Priority::Medium,
        assigned_to: alice.id.clone(),
        created_by: carol.id.clone(),
    })?;
    store.create_task(&TaskDraft {
        title: "Implement Real-time Features".to_string(),
        description: "Add WebSocket support for real-time updates".to_string(),
        priority: Priority::Low,
        assigned_to: bob.id.clone(),
        created_by: david.id.clone(),
    })?;

    // New tasks land in the todo column; place the rest.
    store.update_task(&auth.id, &status_patch(TaskStatus::InProgress), &bob.id)?;
    store.update_task(&schema.id, &status_patch(TaskStatus::Done), &david.id)?;
    store.update_task(&mobile.id, &status_patch(TaskStatus::InProgress), &alice.id)?;

    // Historical feed entries, oldest first so the newest ends up at
    // the head.
    let seeds: [(u64, ActivityAction, &str, &str, &str); 5] = [
        (
            1_800_000,
            ActivityAction::Updated,
            "Create Mobile Responsive Design",
            "Alice Johnson",
            "Updated description and priority",
        ),
        (
            1_200_000,
            ActivityAction::Completed,
            "Set up Database Schema",
            "David Brown",
            "Marked as completed",
        ),
        (
            900_000,
            ActivityAction::Assigned,
            "Write API Documentation",
            "Carol Williams",
            "Assigned to Carol Williams",
        ),
        (
            600_000,
            ActivityAction::Updated,
            "Implement User Authentication",
            "Bob Smith",
            "Changed status to In Progress",
        ),
        (
            300_000,
            ActivityAction::Created,
            "Design Homepage Layout",
            "Alice Johnson",
            "Created new task with high priority",
        ),
    ];
    let now = Timestamp::now();
    let mut log = ActivityLog::with_capacity(log_capacity);
    for (age_ms, action, title, actor, details) in seeds {
        log.record(Activity {
            id: ActivityId::new(),
            action,
            task_title: title.to_string(),
            actor: actor.to_string(),
            timestamp: now.rewound(age_ms),
            details: details.to_string(),
        });
    }

    Ok(Board::from_parts(store, log))
}

/// Produces the demo walkthrough: a column move, a fresh creation, a
/// clean edit, a smart assignment, and one edit submitted against an
/// outdated revision.
///
/// Returns an empty script when the board does not carry the demo
/// fixtures.
#[must_use]
pub fn demo_script(board: &Board) -> Vec<PeerEvent> {
    script(board).unwrap_or_default()
}

fn script(board: &Board) -> Option<Vec<PeerEvent>> {
    let alice = find_user(board, "Alice Johnson")?;
    let bob = find_user(board, "Bob Smith")?;
    let carol = find_user(board, "Carol Williams")?;
    let david = find_user(board, "David Brown")?;
    let homepage = find_task(board, "Design Homepage Layout")?;
    let auth = find_task(board, "Implement User Authentication")?;
    let docs = find_task(board, "Write API Documentation")?;
    let realtime = find_task(board, "Implement Real-time Features")?;

    Some(vec![
        PeerEvent::Move {
            task_id: homepage.id.clone(),
            status: TaskStatus::InProgress,
            actor: alice.id.clone(),
        },
        PeerEvent::Create {
            draft: TaskDraft {
                title: "Review Pull Requests".to_string(),
                description: "Walk the open pull requests and leave review notes".to_string(),
                priority: Priority::Medium,
                assigned_to: bob.id.clone(),
                created_by: bob.id.clone(),
            },
        },
        PeerEvent::Edit {
            task_id: docs.id.clone(),
            patch: TaskPatch {
                description: Some(
                    "Document all REST API endpoints with examples, response formats, and error codes"
                        .to_string(),
                ),
                ..TaskPatch::default()
            },
            observed: docs.updated_at,
            actor: carol.id.clone(),
        },
        PeerEvent::SmartAssign {
            task_id: realtime.id.clone(),
            actor: david.id.clone(),
        },
        // Submitted one tick behind the stored revision; surfaces as a
        // conflict and is discarded by the feed driver.
        PeerEvent::Edit {
            task_id: auth.id.clone(),
            patch: TaskPatch {
                priority: Some(Priority::Medium),
                ..TaskPatch::default()
            },
            observed: auth.updated_at.rewound(1),
            actor: david.id.clone(),
        },
    ])
}

fn status_patch(status: TaskStatus) -> TaskPatch {
    TaskPatch {
        status: Some(status),
        ..TaskPatch::default()
    }
}

fn find_user<'a>(board: &'a Board, name: &str) -> Option<&'a User> {
    board.users().iter().find(|u| u.name == name)
}

fn find_task<'a>(board: &'a Board, title: &str) -> Option<&'a Task> {
    board.tasks().iter().find(|t| t.title == title)
}
