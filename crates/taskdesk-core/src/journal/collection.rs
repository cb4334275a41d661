//! Owner-side notification collection.

use serde::{Deserialize, Serialize};

use super::notification::Notification;
use crate::events::JournalEvent;

/// The authoritative notification list, held by whoever owns the journal.
///
/// Every mutation bumps `revision`, which is what the journal's mirror uses
/// to decide whether it must resync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCollection {
    #[serde(default)]
    pub revision: u64,
    #[serde(default)]
    pub items: Vec<Notification>,
}

impl NotificationCollection {
    pub fn new(items: Vec<Notification>) -> Self {
        Self { revision: 0, items }
    }

    /// Replace the whole list (e.g. after a fetch from the backing store).
    pub fn replace(&mut self, items: Vec<Notification>) {
        self.items = items;
        self.revision += 1;
    }

    /// Apply one journal event.
    pub fn apply(&mut self, event: &JournalEvent) {
        match event {
            JournalEvent::NotificationAdded { notification } => {
                self.items.insert(0, notification.clone());
                self.revision += 1;
            }
        }
    }

    /// Mark one unread notification as read. Returns false if the id is
    /// unknown or already read; only a real change bumps `revision`.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.read => {
                n.read = true;
                self.revision += 1;
                true
            }
            Some(_) | None => false,
        }
    }
}
