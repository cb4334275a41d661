pub mod line;
pub mod telegram;
pub mod traits;

pub use line::{LineClient, LineEndpoint};
pub use telegram::TelegramClient;
pub use traits::{ForwardResponse, MessagingService};

use std::time::Duration;

use crate::error::{ForwardError, Result};

/// Shared outbound client for the forwarders.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialised.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("taskdesk/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            ForwardError::Transport {
                service: "http",
                message: e.to_string(),
            }
            .into()
        })
}

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "taskdesk";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
