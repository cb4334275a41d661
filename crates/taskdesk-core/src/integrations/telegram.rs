//! Telegram Bot API forwarder.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::line::parse_base;
use crate::error::{ConfigError, ForwardError, Result};
use crate::integrations::traits::{ForwardResponse, MessagingService};
use crate::storage::Config;

const SERVICE: &str = "Telegram";

#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: Client,
    api_base: Url,
    token: Option<String>,
}

impl TelegramClient {
    /// A blank token counts as missing; any other token must have the Bot
    /// API shape `<digits>:<[A-Za-z0-9_-]+>`.
    pub fn new(http: Client, api_base: &str, token: Option<String>) -> Result<Self> {
        let api_base = parse_base(api_base, "telegram.api_base")?;
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if let Some(t) = token.as_deref() {
            if !is_bot_token(t) {
                // the token itself stays out of the message
                return Err(ConfigError::InvalidValue {
                    key: "telegram.bot_token".into(),
                    message: "expected <bot id>:<secret>".into(),
                }
                .into());
            }
        }
        Ok(Self {
            http,
            api_base,
            token,
        })
    }

    /// Build from configuration, resolving the token from env/config/keyring.
    pub fn from_config(config: &Config, http: Client) -> Result<Self> {
        Self::new(http, &config.telegram.api_base, config.resolve_telegram_token())
    }

    /// Convenience constructor with its own HTTP client.
    pub fn from_config_standalone(config: &Config) -> Result<Self> {
        let http = super::http_client(Duration::from_secs(config.http.timeout_secs))?;
        Self::from_config(config, http)
    }

    pub async fn send_message(
        &self,
        body: &serde_json::Value,
    ) -> Result<ForwardResponse, ForwardError> {
        self.call("sendMessage", body).await
    }

    pub async fn call(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<ForwardResponse, ForwardError> {
        self.call_with_query(method, None, body).await
    }

    /// POST `body` verbatim to `bot<token>/<method>`, appending `query`
    /// unchanged.
    pub async fn call_with_query(
        &self,
        method: &str,
        query: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<ForwardResponse, ForwardError> {
        validate_method(method)?;
        let token = self
            .token
            .as_deref()
            .ok_or(ForwardError::MissingCredential { service: SERVICE })?;

        let mut url = self
            .api_base
            // "./" keeps the colon in "bot<id>:<secret>" from parsing as a scheme
            .join(&format!("./bot{token}/{method}"))
            .map_err(|e| ForwardError::InvalidRequest(e.to_string()))?;
        url.set_query(query.filter(|q| !q.is_empty()));

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            // reqwest errors include the URL, which carries the token
            .map_err(|e| ForwardError::Transport {
                service: SERVICE,
                message: e.without_url().to_string(),
            })?;

        let forwarded = ForwardResponse::read(SERVICE, resp).await?;
        if forwarded.is_success() {
            debug!(method, status = forwarded.status, "Telegram call succeeded");
        } else {
            warn!(method, status = forwarded.status, "Telegram call returned error status");
        }
        Ok(forwarded)
    }
}

impl MessagingService for TelegramClient {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn display_name(&self) -> &'static str {
        "Telegram"
    }

    fn is_configured(&self) -> bool {
        self.token.is_some()
    }
}

fn is_bot_token(token: &str) -> bool {
    let Some((id, secret)) = token.split_once(':') else {
        return false;
    };
    !id.is_empty()
        && id.chars().all(|c| c.is_ascii_digit())
        && !secret.is_empty()
        && secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Bot API method names are plain identifiers such as `sendMessage`.
pub fn validate_method(method: &str) -> Result<(), ForwardError> {
    if method.is_empty() || !method.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ForwardError::InvalidRequest(format!(
            "invalid Telegram method name: '{method}'"
        )));
    }
    Ok(())
}
