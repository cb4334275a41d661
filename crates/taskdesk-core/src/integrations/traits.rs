use serde::{Deserialize, Serialize};

/// Every messaging forwarder implements this trait. Forwarders are stateless
/// between calls; the credential is fixed when the client is built.
pub trait MessagingService: Send + Sync {
    /// Unique identifier (e.g. "line", "telegram").
    fn name(&self) -> &'static str;

    /// Human-readable display name.
    fn display_name(&self) -> &'static str;

    /// Whether a credential is available.
    fn is_configured(&self) -> bool;
}

/// What came back from the upstream API, relayed to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ForwardResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read an upstream response. An empty body becomes `{}`; a body that is
    /// not JSON is relayed as a JSON string.
    pub(crate) async fn read(
        service: &'static str,
        resp: reqwest::Response,
    ) -> Result<Self, crate::error::ForwardError> {
        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| crate::error::ForwardError::Transport {
                service,
                message: e.without_url().to_string(),
            })?;
        Ok(Self {
            status,
            body: parse_body(&text),
        })
    }
}

fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}
