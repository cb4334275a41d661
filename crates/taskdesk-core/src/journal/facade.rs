//! The journal façade: task log + notification mirror + event outbox.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use super::collection::NotificationCollection;
use super::notification::{Notification, NotificationKind, NotificationMirror};
use super::task_log::{TaskLog, TaskLogStore};
use crate::clock::{self, Clock, SystemClock, DEFAULT_DISPLAY_FORMAT};
use crate::events::JournalEvent;
use crate::ids::IdGenerator;

/// Journal settings that come from configuration.
#[derive(Debug, Clone)]
pub struct JournalOptions {
    pub ids: IdGenerator,
    pub display_format: String,
}

impl Default for JournalOptions {
    fn default() -> Self {
        Self {
            ids: IdGenerator::default(),
            display_format: DEFAULT_DISPLAY_FORMAT.to_string(),
        }
    }
}

pub struct Journal {
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
    display_format: String,
    task_logs: TaskLogStore,
    notifications: NotificationMirror,
    outbox: VecDeque<JournalEvent>,
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("ids", &self.ids)
            .field("display_format", &self.display_format)
            .field("task_logs", &self.task_logs.len())
            .field("notifications", &self.notifications.len())
            .field("pending_events", &self.outbox.len())
            .finish_non_exhaustive()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(JournalOptions::default())
    }
}

impl Journal {
    pub fn new(options: JournalOptions) -> Self {
        Self::with_clock(options, Arc::new(SystemClock))
    }

    pub fn with_clock(options: JournalOptions, clock: Arc<dyn Clock>) -> Self {
        Self {
            ids: options.ids,
            clock,
            display_format: options.display_format,
            task_logs: TaskLogStore::new(),
            notifications: NotificationMirror::new(),
            outbox: VecDeque::new(),
        }
    }

    /// Seed the task log from a previously saved newest-first sequence.
    pub fn with_task_logs(mut self, entries: Vec<TaskLog>) -> Self {
        self.task_logs = TaskLogStore::from_entries(entries);
        self
    }

    pub fn record_event(
        &mut self,
        task_id: impl Into<String>,
        user_id: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> TaskLog {
        self.task_logs.record_event(
            &self.ids,
            self.clock.as_ref(),
            task_id,
            user_id,
            action,
            details,
        )
    }

    /// Replace the mirror with the owner's current list.
    pub fn sync(&mut self, external: &[Notification]) {
        self.notifications.sync(external);
    }

    /// Resync from the owner's collection if its revision moved.
    pub fn sync_collection(&mut self, collection: &NotificationCollection) -> bool {
        self.notifications
            .sync_revision(collection.revision, &collection.items)
    }

    /// System-wide notification (no recipient).
    pub fn add_system_entry(
        &mut self,
        message: impl Into<String>,
        kind: Option<NotificationKind>,
        related_id: Option<String>,
    ) -> Notification {
        self.insert(
            None,
            message.into(),
            kind.unwrap_or(NotificationKind::System),
            related_id.unwrap_or_default(),
        )
    }

    /// Notification addressed to one user.
    pub fn add_user_entry(
        &mut self,
        user_id: impl Into<String>,
        message: impl Into<String>,
        kind: Option<NotificationKind>,
        related_id: Option<String>,
    ) -> Notification {
        self.insert(
            Some(user_id.into()),
            message.into(),
            kind.unwrap_or(NotificationKind::User),
            related_id.unwrap_or_default(),
        )
    }

    fn insert(
        &mut self,
        user_id: Option<String>,
        message: String,
        kind: NotificationKind,
        related_id: String,
    ) -> Notification {
        let now = self.clock.now();
        let notification = Notification {
            id: self.ids.next_id(),
            user_id,
            message,
            kind,
            related_id,
            read: false,
            created_at: clock::iso8601(now),
            timestamp: clock::display(now, &self.display_format),
        };
        self.notifications.prepend(notification.clone());
        self.outbox.push_back(JournalEvent::NotificationAdded {
            notification: notification.clone(),
        });
        notification
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<JournalEvent> {
        self.outbox.drain(..).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.outbox.len()
    }

    pub fn task_logs(&self) -> &TaskLogStore {
        &self.task_logs
    }

    pub fn notifications(&self) -> &NotificationMirror {
        &self.notifications
    }
}
