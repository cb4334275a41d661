pub mod auth;
pub mod config;
pub mod line;
pub mod log;
pub mod notify;
pub mod report;
pub mod telegram;

use std::error::Error;
use std::io::Read;

use taskdesk_core::{Config, ForwardResponse, IdGenerator, Journal, JournalSnapshot};

/// Load the journal snapshot, run `f` against a journal seeded from it,
/// then fold the journal's events back in and save.
pub(crate) fn with_journal<T>(
    f: impl FnOnce(&mut Journal) -> Result<T, Box<dyn Error>>,
) -> Result<T, Box<dyn Error>> {
    let config = Config::load()?;
    let path = JournalSnapshot::path()?;
    let mut snapshot = JournalSnapshot::load_from(&path)?;

    let mut options = config.journal_options();
    let saved_ids = snapshot
        .task_logs
        .iter()
        .map(|e| e.id.as_str())
        .chain(snapshot.notifications.items.iter().map(|n| n.id.as_str()));
    options.ids = IdGenerator::resume_after(options.ids.strategy(), saved_ids);

    let mut journal = Journal::new(options).with_task_logs(snapshot.task_logs.clone());
    journal.sync_collection(&snapshot.notifications);

    let out = f(&mut journal)?;

    snapshot.absorb(&mut journal);
    snapshot.save_to(&path)?;
    Ok(out)
}

/// Journal seeded from the saved snapshot, for commands that only read.
/// Nothing is written back.
pub(crate) fn read_journal() -> Result<Journal, Box<dyn Error>> {
    let config = Config::load()?;
    let snapshot = JournalSnapshot::load_from(&JournalSnapshot::path()?)?;

    let mut journal = Journal::new(config.journal_options()).with_task_logs(snapshot.task_logs);
    journal.sync_collection(&snapshot.notifications);
    Ok(journal)
}

/// A JSON body given inline, or read from stdin when it is `-`.
pub(crate) fn read_body(arg: &str) -> Result<serde_json::Value, Box<dyn Error>> {
    let raw = if arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        arg.to_string()
    };
    if raw.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(&raw).map_err(|e| format!("invalid JSON body: {e}").into())
}

/// Print the upstream body; a non-2xx status is an error.
pub(crate) fn print_forwarded(
    service: &str,
    forwarded: ForwardResponse,
) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(&forwarded.body)?);
    if !forwarded.is_success() {
        return Err(format!("{service} responded with status {}", forwarded.status).into());
    }
    Ok(())
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn Error>> {
    Ok(tokio::runtime::Runtime::new()?)
}
