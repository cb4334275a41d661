//! JSON file holding the notification collection and task log between
//! CLI invocations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::Result;
use crate::journal::{Journal, NotificationCollection, TaskLog};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    #[serde(default)]
    pub notifications: NotificationCollection,
    /// Newest first.
    #[serde(default)]
    pub task_logs: Vec<TaskLog>,
}

impl JournalSnapshot {
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("journal.json"))
    }

    /// Read the snapshot, or an empty one if the file does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Apply everything the journal queued and capture its task log.
    pub fn absorb(&mut self, journal: &mut Journal) {
        for event in journal.drain_events() {
            self.notifications.apply(&event);
        }
        self.task_logs = journal.task_logs().to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let snap = JournalSnapshot::load_from(&dir.path().join("journal.json")).unwrap();
        assert_eq!(snap, JournalSnapshot::default());
    }

    #[test]
    fn absorb_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");

        let mut snap = JournalSnapshot::default();
        let mut journal = Journal::default();
        journal.sync_collection(&snap.notifications);
        journal.record_event("T1", "U1", "created", "");
        journal.add_system_entry("hello", None, None);
        snap.absorb(&mut journal);
        snap.save_to(&path).unwrap();

        let loaded = JournalSnapshot::load_from(&path).unwrap();
        assert_eq!(loaded.notifications.revision, 1);
        assert_eq!(loaded.notifications.items[0].message, "hello");
        assert_eq!(loaded.task_logs.len(), 1);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
