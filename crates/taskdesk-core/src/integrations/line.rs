//! LINE Messaging API forwarder for push, reply and multicast.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ConfigError, ForwardError, Result};
use crate::integrations::traits::{ForwardResponse, MessagingService};
use crate::storage::Config;

const SERVICE: &str = "LINE";

/// Message endpoints the proxy exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEndpoint {
    Push,
    Reply,
    Multicast,
}

impl LineEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            LineEndpoint::Push => "v2/bot/message/push",
            LineEndpoint::Reply => "v2/bot/message/reply",
            LineEndpoint::Multicast => "v2/bot/message/multicast",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineClient {
    http: Client,
    api_base: Url,
    token: Option<String>,
}

impl LineClient {
    /// `api_base` must be an absolute URL such as `https://api.line.me`.
    pub fn new(http: Client, api_base: &str, token: Option<String>) -> Result<Self> {
        let api_base = parse_base(api_base, "line.api_base")?;
        Ok(Self {
            http,
            api_base,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Build from configuration, resolving the token from env/config/keyring.
    pub fn from_config(config: &Config, http: Client) -> Result<Self> {
        Self::new(http, &config.line.api_base, config.resolve_line_token())
    }

    /// Convenience constructor with its own HTTP client.
    pub fn from_config_standalone(config: &Config) -> Result<Self> {
        let http = super::http_client(Duration::from_secs(config.http.timeout_secs))?;
        Self::from_config(config, http)
    }

    pub async fn push(&self, body: &serde_json::Value) -> Result<ForwardResponse, ForwardError> {
        self.forward(LineEndpoint::Push, body).await
    }

    pub async fn reply(&self, body: &serde_json::Value) -> Result<ForwardResponse, ForwardError> {
        self.forward(LineEndpoint::Reply, body).await
    }

    pub async fn multicast(
        &self,
        body: &serde_json::Value,
    ) -> Result<ForwardResponse, ForwardError> {
        self.forward(LineEndpoint::Multicast, body).await
    }

    pub async fn forward(
        &self,
        endpoint: LineEndpoint,
        body: &serde_json::Value,
    ) -> Result<ForwardResponse, ForwardError> {
        self.forward_with_query(endpoint, None, body).await
    }

    /// POST `body` verbatim to the endpoint with the bearer credential
    /// attached. `query` is appended unchanged.
    pub async fn forward_with_query(
        &self,
        endpoint: LineEndpoint,
        query: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<ForwardResponse, ForwardError> {
        let token = self
            .token
            .as_deref()
            .ok_or(ForwardError::MissingCredential { service: SERVICE })?;

        let mut url = self
            .api_base
            .join(endpoint.path())
            .map_err(|e| ForwardError::InvalidRequest(e.to_string()))?;
        url.set_query(query.filter(|q| !q.is_empty()));

        let resp = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .map_err(|e| ForwardError::Transport {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let forwarded = ForwardResponse::read(SERVICE, resp).await?;
        if forwarded.is_success() {
            debug!(endpoint = endpoint.path(), status = forwarded.status, "LINE call succeeded");
        } else {
            warn!(endpoint = endpoint.path(), status = forwarded.status, "LINE call returned error status");
        }
        Ok(forwarded)
    }
}

impl MessagingService for LineClient {
    fn name(&self) -> &'static str {
        "line"
    }

    fn display_name(&self) -> &'static str {
        "LINE"
    }

    fn is_configured(&self) -> bool {
        self.token.is_some()
    }
}

/// Parse an API base and make sure `join` appends to it rather than
/// replacing its last segment.
pub(crate) fn parse_base(raw: &str, key: &str) -> Result<Url> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash).map_err(|e| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}
