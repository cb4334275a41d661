use chrono::{DateTime, Utc};
use clap::Subcommand;
use taskdesk_core::report::activity_by_action;
use taskdesk_core::{JournalSnapshot, TaskLog};

use super::with_journal;

#[derive(Subcommand)]
pub enum LogAction {
    /// Record a task event
    Record {
        task_id: String,
        user_id: String,
        /// Free-form action name (e.g. "created", "status_changed")
        action: String,
        #[arg(long, default_value = "")]
        details: String,
    },
    /// List recorded events, newest first
    List {
        /// Only events for this task
        #[arg(long)]
        task: Option<String>,
        /// Only events at or after this RFC 3339 instant
        #[arg(long)]
        since: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Count events per action
    Activity,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        LogAction::Record {
            task_id,
            user_id,
            action,
            details,
        } => {
            let entry =
                with_journal(|j| Ok(j.record_event(task_id, user_id, action, details)))?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        LogAction::List { task, since, limit } => {
            let since = since
                .map(|s| DateTime::parse_from_rfc3339(&s).map(|t| t.with_timezone(&Utc)))
                .transpose()
                .map_err(|e| format!("invalid --since: {e}"))?;
            let entries: Vec<TaskLog> = load_logs()?
                .into_iter()
                .filter(|e| task.as_deref().map_or(true, |t| e.task_id == t))
                .filter(|e| since.map_or(true, |s| created_at(e).is_some_and(|at| at >= s)))
                .take(limit.unwrap_or(usize::MAX))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        LogAction::Activity => {
            let logs = load_logs()?;
            println!("{}", serde_json::to_string_pretty(&activity_by_action(&logs))?);
        }
    }
    Ok(())
}

fn load_logs() -> Result<Vec<TaskLog>, Box<dyn std::error::Error>> {
    Ok(JournalSnapshot::load_from(&JournalSnapshot::path()?)?.task_logs)
}

fn created_at(entry: &TaskLog) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&entry.created_at)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
