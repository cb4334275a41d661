use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskdesk_core::Notification;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/notifications", get(list))
        .route("/api/notifications/{id}/read", post(mark_read))
}

/// GET /health
pub async fn health() -> ResponseJson<Value> {
    ResponseJson(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    pub unread: usize,
    pub items: Vec<Notification>,
}

/// GET /api/notifications?user_id=
/// Newest first. With `user_id`, only that user's entries plus system ones.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ResponseJson<NotificationList> {
    let inbox = state.inbox.lock().await;
    ResponseJson(NotificationList {
        unread: inbox.unread_count(),
        items: inbox.list(query.user_id.as_deref()),
    })
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, ResponseJson<Value>) {
    if state.inbox.lock().await.mark_read(&id) {
        (StatusCode::OK, ResponseJson(json!({ "status": "ok" })))
    } else {
        (
            StatusCode::NOT_FOUND,
            ResponseJson(json!({ "error": format!("no unread notification '{id}'") })),
        )
    }
}
