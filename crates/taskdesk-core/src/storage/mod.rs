mod config;
pub mod snapshot;

pub use config::{
    Config, HttpConfig, JournalConfig, LineConfig, ServerConfig, TelegramConfig, LINE_TOKEN_ENV,
    LINE_TOKEN_KEY, TELEGRAM_TOKEN_ENV, TELEGRAM_TOKEN_KEY,
};
pub use snapshot::JournalSnapshot;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the taskdesk data directory, creating it if needed.
///
/// `TASKDESK_DATA_DIR` wins when set. Otherwise `~/.config/taskdesk[-dev]/`,
/// with the `-dev` suffix selected by `TASKDESK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TASKDESK_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TASKDESK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("taskdesk-dev")
            } else {
                base_dir.join("taskdesk")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
