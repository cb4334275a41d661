pub mod line;
pub mod notifications;
pub mod telegram;

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use taskdesk_core::ForwardResponse;

use crate::error::ProxyError;

/// Parse a request body as JSON. An empty body is `{}`.
pub(crate) fn json_body(body: &Bytes) -> Result<Value, ProxyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|e| ProxyError::InvalidBody(e.to_string()))
}

/// Relay an upstream status and body unchanged.
pub(crate) fn relay(forwarded: ForwardResponse) -> Response {
    let status = StatusCode::from_u16(forwarded.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(forwarded.body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_empty_object() {
        assert_eq!(json_body(&Bytes::new()).unwrap(), serde_json::json!({}));
        assert_eq!(json_body(&Bytes::from_static(b"  \n")).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn malformed_body_is_rejected() {
        let err = json_body(&Bytes::from_static(b"{not json")).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidBody(_)));
    }

    #[test]
    fn relay_keeps_upstream_status() {
        let resp = relay(ForwardResponse {
            status: 429,
            body: serde_json::json!({"message": "slow down"}),
        });
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
