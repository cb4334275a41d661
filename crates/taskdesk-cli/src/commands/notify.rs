use clap::Subcommand;
use taskdesk_core::{JournalSnapshot, Notification, NotificationKind};

use super::{read_journal, with_journal};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Add a system-wide notification
    System {
        message: String,
        /// Notification type (default "system")
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        related: Option<String>,
    },
    /// Add a notification for one user
    User {
        user_id: String,
        message: String,
        /// Notification type (default "user")
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        related: Option<String>,
    },
    /// List notifications, newest first
    List {
        /// Only this user's notifications plus system ones
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification as read
    Read { id: String },
}

pub fn run(action: NotifyAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        NotifyAction::System {
            message,
            kind,
            related,
        } => {
            let kind = kind.as_deref().map(NotificationKind::from);
            let n = with_journal(|j| Ok(j.add_system_entry(message, kind, related)))?;
            println!("{}", serde_json::to_string_pretty(&n)?);
        }
        NotifyAction::User {
            user_id,
            message,
            kind,
            related,
        } => {
            let kind = kind.as_deref().map(NotificationKind::from);
            let n = with_journal(|j| Ok(j.add_user_entry(user_id, message, kind, related)))?;
            println!("{}", serde_json::to_string_pretty(&n)?);
        }
        NotifyAction::List { user, unread } => {
            let journal = read_journal()?;
            let mirror = journal.notifications();
            let visible: Vec<&Notification> = match user.as_deref() {
                Some(u) => mirror.for_user(u).collect(),
                None => mirror.items().iter().collect(),
            };
            let items: Vec<&Notification> =
                visible.into_iter().filter(|n| !unread || !n.read).collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        NotifyAction::Read { id } => {
            let path = JournalSnapshot::path()?;
            let mut snapshot = JournalSnapshot::load_from(&path)?;
            if !snapshot.notifications.mark_read(&id) {
                return Err(format!("no unread notification '{id}'").into());
            }
            snapshot.save_to(&path)?;
            println!("ok");
        }
    }
    Ok(())
}
