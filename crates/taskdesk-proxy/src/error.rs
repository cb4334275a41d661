use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use taskdesk_core::ForwardError;
use thiserror::Error;

/// Errors a proxy handler can answer with. Upstream error statuses are not
/// in here: they are relayed as ordinary responses.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Forward(#[from] ForwardError),
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ProxyError::Forward(ForwardError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            ProxyError::Forward(ForwardError::MissingCredential { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::Forward(ForwardError::Transport { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "proxy request failed");
        } else {
            tracing::debug!(error = %self, "proxy request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
