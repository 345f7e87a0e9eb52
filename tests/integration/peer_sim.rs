//! Integration tests for the synthetic peer feed: scripted replay,
//! seeded random traffic, and the tally the feed driver reports.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use taskdeck::demo::{demo_board, demo_script};
use taskdeck::log::DEFAULT_LOG_CAPACITY;
use taskdeck::sim::{PeerEvent, RandomPeer, ScriptedSource, spawn_feed};
use taskdeck_model::task::{Priority, TaskDraft, TaskStatus};

#[tokio::test]
async fn scripted_feed_replays_the_demo_walkthrough() {
    let board = demo_board(DEFAULT_LOG_CAPACITY).unwrap();
    let script = demo_script(&board);
    let board = Arc::new(Mutex::new(board));

    let handle = spawn_feed(
        Arc::clone(&board),
        ScriptedSource::new(script),
        Duration::from_millis(1),
    );
    let stats = handle.await.unwrap();

    assert_eq!(stats.applied, 4);
    assert_eq!(stats.conflicted, 1);
    assert_eq!(stats.rejected, 0);

    let board = board.lock();
    assert_eq!(board.tasks().len(), 7);
    let homepage = board
        .tasks()
        .iter()
        .find(|t| t.title == "Design Homepage Layout")
        .unwrap();
    assert_eq!(homepage.status, TaskStatus::InProgress);
    assert!(
        board
            .tasks()
            .iter()
            .any(|t| t.title == "Review Pull Requests")
    );
    // The stale edit was discarded.
    let auth = board
        .tasks()
        .iter()
        .find(|t| t.title == "Implement User Authentication")
        .unwrap();
    assert_eq!(auth.priority, Priority::High);
}

#[tokio::test]
async fn empty_script_finishes_with_a_zero_tally() {
    let board = demo_board(DEFAULT_LOG_CAPACITY).unwrap();
    let feed_before = board.activities();
    let board = Arc::new(Mutex::new(board));

    let handle = spawn_feed(
        Arc::clone(&board),
        ScriptedSource::new(Vec::new()),
        Duration::from_millis(1),
    );
    let stats = handle.await.unwrap();

    assert_eq!(stats.total(), 0);
    assert_eq!(board.lock().activities(), feed_before);
}

#[tokio::test]
async fn random_feed_processes_its_whole_budget() {
    let board = demo_board(DEFAULT_LOG_CAPACITY).unwrap();
    let board = Arc::new(Mutex::new(board));

    let handle = spawn_feed(
        Arc::clone(&board),
        RandomPeer::new(42, 25),
        Duration::from_millis(1),
    );
    let stats = handle.await.unwrap();

    assert_eq!(stats.total(), 25);

    let board = board.lock();
    // Random peers move, edit, and assign; they never create or delete.
    assert_eq!(board.tasks().len(), 6);
    assert!(board.activities().len() <= DEFAULT_LOG_CAPACITY);
}

#[tokio::test]
async fn rejected_events_are_tallied() {
    let board = demo_board(DEFAULT_LOG_CAPACITY).unwrap();
    let author = board.users()[0].id.clone();
    let board = Arc::new(Mutex::new(board));

    // The fixture board already has a task by this title.
    let script = vec![PeerEvent::Create {
        draft: TaskDraft {
            title: "design homepage layout".to_string(),
            description: String::new(),
            priority: Priority::Low,
            assigned_to: author.clone(),
            created_by: author,
        },
    }];
    let handle = spawn_feed(
        Arc::clone(&board),
        ScriptedSource::new(script),
        Duration::from_millis(1),
    );
    let stats = handle.await.unwrap();

    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.applied, 0);
    assert_eq!(board.lock().tasks().len(), 6);
}
