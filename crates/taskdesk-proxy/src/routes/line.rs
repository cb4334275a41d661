use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    response::{Json as ResponseJson, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use taskdesk_core::{integrations::LineEndpoint, NotificationKind};
use tracing::{info, warn};

use super::{json_body, relay};
use crate::{error::ProxyError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/line/push", post(push))
        .route("/api/line/reply", post(reply))
        .route("/api/line/multicast", post(multicast))
        .route("/api/line/webhook", post(webhook))
}

async fn forward(
    state: &AppState,
    endpoint: LineEndpoint,
    query: Option<String>,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let payload = json_body(&body)?;
    let forwarded = state
        .line
        .forward_with_query(endpoint, query.as_deref(), &payload)
        .await?;
    Ok(relay(forwarded))
}

/// POST /api/line/push
pub async fn push(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, ProxyError> {
    forward(&state, LineEndpoint::Push, query, body).await
}

/// POST /api/line/reply
pub async fn reply(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, ProxyError> {
    forward(&state, LineEndpoint::Reply, query, body).await
}

/// POST /api/line/multicast
pub async fn multicast(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, ProxyError> {
    forward(&state, LineEndpoint::Multicast, query, body).await
}

#[derive(Debug, Default, Deserialize)]
struct WebhookPayload {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookEvent {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: Option<WebhookMessage>,
    #[serde(default)]
    source: Option<WebhookSource>,
}

#[derive(Debug, Deserialize)]
struct WebhookMessage {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookSource {
    #[serde(default)]
    user_id: Option<String>,
}

/// Text messages in a webhook delivery as `(sender, text)` pairs.
fn text_messages(payload: WebhookPayload) -> Vec<(Option<String>, String)> {
    payload
        .events
        .into_iter()
        .filter(|event| event.kind == "message")
        .filter_map(|event| {
            let message = event.message?;
            if message.kind != "text" {
                return None;
            }
            let sender = event.source.and_then(|s| s.user_id);
            message.text.map(|text| (sender, text))
        })
        .collect()
}

/// POST /api/line/webhook
/// Always acknowledges with 200 so LINE does not redeliver.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> ResponseJson<Value> {
    let ack = ResponseJson(json!({ "status": "ok" }));

    let payload: WebhookPayload = match json_body(&body)
        .and_then(|v| serde_json::from_value(v).map_err(|e| ProxyError::InvalidBody(e.to_string())))
    {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Ignoring malformed LINE webhook payload");
            return ack;
        }
    };

    let messages = text_messages(payload);
    if messages.is_empty() {
        return ack;
    }

    let mut inbox = state.inbox.lock().await;
    for (sender, text) in messages {
        let from = sender.as_deref().unwrap_or("unknown");
        info!(sender = from, "LINE message received");
        inbox.record(
            format!("LINE message from {from}: {text}"),
            NotificationKind::from("line"),
            sender,
        );
    }
    ack
}
