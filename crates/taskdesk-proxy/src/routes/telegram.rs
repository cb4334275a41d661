use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    response::{Json as ResponseJson, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use taskdesk_core::NotificationKind;
use tracing::{info, warn};

use super::{json_body, relay};
use crate::{error::ProxyError, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/telegram/send", post(send))
        .route("/api/telegram/webhook", post(webhook))
        .route("/api/telegram/{method}", post(call))
}

/// POST /api/telegram/send
/// Forwards to `sendMessage`.
pub async fn send(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let payload = json_body(&body)?;
    let forwarded = state
        .telegram
        .call_with_query("sendMessage", query.as_deref(), &payload)
        .await?;
    Ok(relay(forwarded))
}

/// POST /api/telegram/{method}
pub async fn call(
    State(state): State<AppState>,
    Path(method): Path<String>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let payload = json_body(&body)?;
    let forwarded = state
        .telegram
        .call_with_query(&method, query.as_deref(), &payload)
        .await?;
    Ok(relay(forwarded))
}

#[derive(Debug, Deserialize)]
struct Update {
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    #[serde(default)]
    from: Option<User>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
}

impl Message {
    fn sender(&self) -> String {
        self.from
            .as_ref()
            .and_then(|u| u.username.clone().or_else(|| u.first_name.clone()))
            .unwrap_or_else(|| self.chat.id.to_string())
    }
}

/// POST /api/telegram/webhook
/// Always acknowledges with 200 so Telegram does not redeliver.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> ResponseJson<Value> {
    let ack = ResponseJson(json!({ "ok": true }));

    let update: Update = match json_body(&body)
        .and_then(|v| serde_json::from_value(v).map_err(|e| ProxyError::InvalidBody(e.to_string())))
    {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "Ignoring malformed Telegram update");
            return ack;
        }
    };

    let Some(message) = update.message else {
        return ack;
    };
    let Some(text) = message.text.as_deref() else {
        return ack;
    };

    let sender = message.sender();
    info!(chat_id = message.chat.id, "Telegram message received");
    state.inbox.lock().await.record(
        format!("Telegram message from {sender}: {text}"),
        NotificationKind::from("telegram"),
        Some(message.chat.id.to_string()),
    );
    ack
}
