//! In-memory task journal and notification mirror.
//!
//! The journal owns its task log outright. Notifications are different: the
//! authoritative list belongs to the caller, so the journal keeps a mirror of
//! it and reports its own insertions as [`JournalEvent`](crate::events::JournalEvent)s
//! that the caller drains and applies.
//!
//! ## Usage
//! ```rust
//! use taskdesk_core::journal::{Journal, NotificationCollection};
//!
//! let mut owner = NotificationCollection::default();
//! let mut journal = Journal::default();
//! journal.sync_collection(&owner);
//!
//! journal.record_event("T1", "U1", "status-change", "moved to in-progress");
//! journal.add_user_entry("U1", "You were assigned T1", None, Some("T1".into()));
//!
//! for event in journal.drain_events() {
//!     owner.apply(&event);
//! }
//! assert_eq!(owner.items.len(), 1);
//! ```

mod collection;
mod facade;
mod notification;
mod task_log;

pub use collection::NotificationCollection;
pub use facade::{Journal, JournalOptions};
pub use notification::{Notification, NotificationKind, NotificationMirror};
pub use task_log::{TaskLog, TaskLogStore};
