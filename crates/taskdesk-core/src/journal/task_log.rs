//! Task event log, newest first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::clock::{self, Clock};
use crate::ids::IdGenerator;

/// One recorded task event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLog {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub action: String,
    pub details: String,
    /// ISO-8601, set once at construction.
    pub created_at: String,
}

/// Append-only log of task events. No referential checks on task or user ids.
#[derive(Debug, Clone, Default)]
pub struct TaskLogStore {
    entries: VecDeque<TaskLog>,
}

impl TaskLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an existing newest-first sequence.
    pub fn from_entries(entries: Vec<TaskLog>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Insert at the front.
    pub fn append(&mut self, entry: TaskLog) {
        self.entries.push_front(entry);
    }

    /// Build a log entry stamped with a fresh id and the current time,
    /// append it and hand back a copy.
    pub fn record_event(
        &mut self,
        ids: &IdGenerator,
        clock: &dyn Clock,
        task_id: impl Into<String>,
        user_id: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> TaskLog {
        let entry = TaskLog {
            id: ids.next_id(),
            task_id: task_id.into(),
            user_id: user_id.into(),
            action: action.into(),
            details: details.into(),
            created_at: clock::iso8601(clock.now()),
        };
        self.append(entry.clone());
        entry
    }

    pub fn entries(&self) -> impl Iterator<Item = &TaskLog> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<TaskLog> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for one task, newest first.
    pub fn for_task<'a>(&'a self, task_id: &'a str) -> impl Iterator<Item = &'a TaskLog> + 'a {
        self.entries.iter().filter(move |e| e.task_id == task_id)
    }
}
