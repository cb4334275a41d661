use serde::{Deserialize, Serialize};

use crate::journal::Notification;

/// Every change the journal makes to state it does not own.
/// The owner drains these from the journal and applies them to the
/// collection it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalEvent {
    /// A notification was inserted locally and belongs at the front of the
    /// owner's collection.
    NotificationAdded { notification: Notification },
}
