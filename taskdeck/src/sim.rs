//! Synthetic peer activity for demos and tests.
//!
//! Peers are modeled as an [`EventSource`] yielding [`PeerEvent`]s, each of
//! which is routed through the same public [`Board`] entry points as any
//! real caller. Peers never bypass validation or staleness checks: a peer
//! that submits an edit against an outdated revision gets a conflict like
//! anyone else, and the feed driver discards it (cancel semantics).
//!
//! [`ScriptedSource`] replays a fixed sequence for deterministic tests;
//! [`RandomPeer`] generates seeded pseudo-random traffic for the demo
//! binary, including deliberately stale edits.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use taskdeck_model::task::{Priority, TaskDraft, TaskId, TaskPatch, TaskStatus};
use taskdeck_model::time::Timestamp;
use taskdeck_model::user::UserId;

use crate::BoardError;
use crate::board::{Board, EditOutcome};

/// One board mutation submitted by a synthetic peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    /// Create a task from a draft.
    Create {
        /// The draft to submit.
        draft: TaskDraft,
    },
    /// Edit a task against the revision the peer last observed.
    Edit {
        /// Target task.
        task_id: TaskId,
        /// Fields to change.
        patch: TaskPatch,
        /// The `updated_at` the peer last saw.
        observed: Timestamp,
        /// Acting peer.
        actor: UserId,
    },
    /// Move a task to another column.
    Move {
        /// Target task.
        task_id: TaskId,
        /// Destination column.
        status: TaskStatus,
        /// Acting peer.
        actor: UserId,
    },
    /// Hand a task to the least-loaded member.
    SmartAssign {
        /// Target task.
        task_id: TaskId,
        /// Acting peer.
        actor: UserId,
    },
}

/// What became of a submitted [`PeerEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Committed and recorded in the feed.
    Applied,
    /// Rejected as a stale edit; the conflict was discarded.
    Conflicted,
    /// Rejected by validation or lookup.
    Rejected(BoardError),
}

/// Produces peer events, one per feed tick.
pub trait EventSource {
    /// Returns the next event, or `None` when the source is exhausted.
    ///
    /// The current board state is provided so sources can target live
    /// tasks and members.
    fn next_event(&mut self, board: &Board) -> Option<PeerEvent>;
}

/// Replays a fixed event sequence, ignoring board state.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    events: VecDeque<PeerEvent>,
}

impl ScriptedSource {
    /// Wraps a sequence of events to be replayed in order.
    #[must_use]
    pub fn new(events: Vec<PeerEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl EventSource for ScriptedSource {
    fn next_event(&mut self, _board: &Board) -> Option<PeerEvent> {
        self.events.pop_front()
    }
}

/// Seeded pseudo-random peer traffic.
///
/// Emits a bounded number of moves, edits, and smart-assigns against
/// whatever tasks currently exist. Roughly a quarter of the events (half
/// of the edits) are submitted against a deliberately outdated revision,
/// so conflicts surface through the normal staleness check rather than
/// by chance.
#[derive(Debug)]
pub struct RandomPeer {
    rng: StdRng,
    remaining: u32,
}

impl RandomPeer {
    /// Creates a peer that will emit at most `events` events.
    ///
    /// The same seed over the same board history yields the same events.
    #[must_use]
    pub fn new(seed: u64, events: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            remaining: events,
        }
    }
}

impl EventSource for RandomPeer {
    fn next_event(&mut self, board: &Board) -> Option<PeerEvent> {
        if self.remaining == 0 {
            return None;
        }
        let users = board.users();
        let tasks = board.tasks();
        if users.is_empty() || tasks.is_empty() {
            return None;
        }
        self.remaining -= 1;

        let actor = users[self.rng.random_range(0..users.len())].id.clone();
        let task = &tasks[self.rng.random_range(0..tasks.len())];
        let priority = Priority::ALL[self.rng.random_range(0..Priority::ALL.len())];

        let event = match self.rng.random_range(0..4_u8) {
            0 => PeerEvent::Move {
                task_id: task.id.clone(),
                status: TaskStatus::ALL[self.rng.random_range(0..TaskStatus::ALL.len())],
                actor,
            },
            1 => PeerEvent::SmartAssign {
                task_id: task.id.clone(),
                actor,
            },
            2 => PeerEvent::Edit {
                task_id: task.id.clone(),
                patch: TaskPatch {
                    priority: Some(priority),
                    ..TaskPatch::default()
                },
                observed: task.updated_at,
                actor,
            },
            // Edit against a revision one tick behind the stored one.
            _ => PeerEvent::Edit {
                task_id: task.id.clone(),
                patch: TaskPatch {
                    priority: Some(priority),
                    ..TaskPatch::default()
                },
                observed: task.updated_at.rewound(1),
                actor,
            },
        };
        Some(event)
    }
}

/// Routes one peer event through the board's public entry points.
///
/// Conflicted edits are reported and discarded; the board stays as it was.
pub fn apply_event(board: &mut Board, event: PeerEvent) -> EventOutcome {
    let result = match event {
        PeerEvent::Create { draft } => board.create_task(&draft).map(|_| ()),
        PeerEvent::Edit {
            task_id,
            patch,
            observed,
            actor,
        } => match board.edit_task(&task_id, &patch, observed, &actor) {
            Ok(EditOutcome::Applied(_)) => Ok(()),
            Ok(EditOutcome::Conflict(conflict)) => {
                tracing::info!(
                    task = %conflict.task_id,
                    yours = %conflict.your_name,
                    theirs = %conflict.their_name,
                    "peer edit conflicted, discarding"
                );
                return EventOutcome::Conflicted;
            }
            Err(e) => Err(e),
        },
        PeerEvent::Move {
            task_id,
            status,
            actor,
        } => board.move_task(&task_id, status, &actor).map(|_| ()),
        PeerEvent::SmartAssign { task_id, actor } => {
            board.smart_assign(&task_id, &actor).map(|_| ())
        }
    };

    match result {
        Ok(()) => EventOutcome::Applied,
        Err(e) => {
            tracing::debug!(error = %e, "peer event rejected");
            EventOutcome::Rejected(e)
        }
    }
}

/// Tally of a completed feed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Events committed to the board.
    pub applied: usize,
    /// Stale edits discarded as conflicts.
    pub conflicted: usize,
    /// Events rejected by validation or lookup.
    pub rejected: usize,
}

impl FeedStats {
    /// Total number of events processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.applied + self.conflicted + self.rejected
    }
}

/// Spawns a background task that drains `source` into the shared board.
///
/// One event is applied per `period` tick. The task finishes when the
/// source is exhausted and yields the final tally.
pub fn spawn_feed<S>(
    board: Arc<Mutex<Board>>,
    mut source: S,
    period: Duration,
) -> tokio::task::JoinHandle<FeedStats>
where
    S: EventSource + Send + 'static,
{
    tokio::spawn(async move {
        let mut stats = FeedStats::default();
        let mut tick = tokio::time::interval(period);
        loop {
            tick.tick().await;
            // Guard scoped so it is released before the next tick.
            let outcome = {
                let mut board = board.lock();
                let Some(event) = source.next_event(&board) else {
                    break;
                };
                apply_event(&mut board, event)
            };
            match outcome {
                EventOutcome::Applied => stats.applied += 1,
                EventOutcome::Conflicted => stats.conflicted += 1,
                EventOutcome::Rejected(_) => stats.rejected += 1,
            }
        }
        tracing::info!(
            applied = stats.applied,
            conflicted = stats.conflicted,
            rejected = stats.rejected,
            "peer feed drained"
        );
        stats
    })
}
