//! Notification records and the local mirror of the owner's collection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification category. Unknown strings round-trip through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    System,
    User,
    Other(String),
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::System => "system",
            NotificationKind::User => "user",
            NotificationKind::Other(s) => s,
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(s: &str) -> Self {
        match s {
            "system" => NotificationKind::System,
            "user" => NotificationKind::User,
            other => NotificationKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NotificationKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NotificationKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NotificationKind::from(s.as_str()))
    }
}

/// A notification as stored in the owner's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Absent for system-wide notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub related_id: String,
    #[serde(default)]
    pub read: bool,
    /// ISO-8601.
    pub created_at: String,
    /// Display form of `created_at`.
    #[serde(default)]
    pub timestamp: String,
}

/// Local copy of the externally owned notification collection.
///
/// Baseline is whatever the last sync supplied; entries inserted locally
/// after that sync sit in front of it until the next sync replaces them.
#[derive(Debug, Clone, Default)]
pub struct NotificationMirror {
    items: Vec<Notification>,
    last_revision: Option<u64>,
}

impl NotificationMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the mirror wholesale.
    pub fn sync(&mut self, external: &[Notification]) {
        self.items = external.to_vec();
    }

    /// Replace the mirror only if the owner's revision moved since the last
    /// call. Returns whether a replace happened.
    pub fn sync_revision(&mut self, revision: u64, external: &[Notification]) -> bool {
        if self.last_revision == Some(revision) {
            return false;
        }
        self.last_revision = Some(revision);
        self.sync(external);
        true
    }

    pub fn prepend(&mut self, notification: Notification) {
        self.items.insert(0, notification);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Notifications addressed to `user_id`, plus system-wide ones.
    pub fn for_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Notification> + 'a {
        self.items
            .iter()
            .filter(move |n| n.user_id.as_deref().map_or(true, |u| u == user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, user: Option<&str>, read: bool) -> Notification {
        Notification {
            id: id.to_string(),
            user_id: user.map(str::to_string),
            message: format!("message {id}"),
            kind: NotificationKind::System,
            related_id: String::new(),
            read,
            created_at: "2024-01-01T00:00:00.000Z".into(),
            timestamp: "2024/01/01 00:00:00".into(),
        }
    }

    #[test]
    fn sync_replaces_everything() {
        let mut mirror = NotificationMirror::new();
        mirror.prepend(note("local", None, false));
        let external = vec![note("a", None, false), note("b", Some("u1"), true)];
        mirror.sync(&external);
        assert_eq!(mirror.items(), external.as_slice());
    }

    #[test]
    fn sync_revision_skips_unchanged_revision() {
        let mut mirror = NotificationMirror::new();
        assert!(mirror.sync_revision(1, &[note("a", None, false)]));
        mirror.prepend(note("local", None, false));
        assert!(!mirror.sync_revision(1, &[note("a", None, false)]));
        assert_eq!(mirror.len(), 2);
        assert!(mirror.sync_revision(2, &[note("b", None, false)]));
        assert_eq!(mirror.items()[0].id, "b");
        assert_eq!(mirror.len(), 1);
    }

    #[test]
    fn unread_and_user_filters() {
        let mut mirror = NotificationMirror::new();
        mirror.sync(&[
            note("a", None, false),
            note("b", Some("u1"), true),
            note("c", Some("u2"), false),
        ]);
        assert_eq!(mirror.unread_count(), 2);
        let ids: Vec<_> = mirror.for_user("u1").map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn kind_round_trips_unknown_strings() {
        let json = r#"{"id":"1","message":"m","type":"deadline","createdAt":"x"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationKind::Other("deadline".into()));
        assert!(!n.read);
        assert_eq!(n.related_id, "");
        let back = serde_json::to_value(&n).unwrap();
        assert_eq!(back["type"], "deadline");
        assert!(back.get("userId").is_none());
    }
}
