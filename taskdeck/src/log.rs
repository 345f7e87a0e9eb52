//! Bounded activity feed for the board.
//!
//! The feed keeps the most recent entries only, newest first. When the
//! cap is exceeded the oldest entry is evicted, so the feed is a
//! rolling window rather than a full audit trail.

use std::collections::VecDeque;

use taskdeck_model::activity::{Activity, ActivityAction, ActivityId};
use taskdeck_model::time::Timestamp;

/// Default maximum number of feed entries before eviction.
pub const DEFAULT_LOG_CAPACITY: usize = 20;

/// Rolling window of recent board activity, newest first.
#[derive(Debug)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    /// Creates an empty feed with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Creates an empty feed with a custom capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a new entry at the head of the feed, evicting the oldest
    /// entry if the feed is full. Returns the stored entry.
    pub fn append(
        &mut self,
        action: ActivityAction,
        task_title: &str,
        actor: &str,
        details: &str,
    ) -> Activity {
        let entry = Activity {
            id: ActivityId::new(),
            action,
            task_title: task_title.to_string(),
            actor: actor.to_string(),
            timestamp: Timestamp::now(),
            details: details.to_string(),
        };
        self.record(entry.clone());
        entry
    }

    /// Inserts a fully-built entry at the head of the feed, evicting the
    /// oldest entry if the feed is full. Used to seed a feed with entries
    /// carrying their own timestamps.
    pub fn record(&mut self, entry: Activity) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Returns a snapshot of the feed, newest first.
    ///
    /// The snapshot is detached; later appends do not affect it.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Activity> {
        self.entries.iter().cloned().collect()
    }

    /// Returns the most recent entry, if any.
    #[must_use]
    pub fn newest(&self) -> Option<&Activity> {
        self.entries.front()
    }

    /// Returns the number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the feed has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
