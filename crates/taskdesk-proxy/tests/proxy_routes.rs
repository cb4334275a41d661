use mockito::Matcher;
use reqwest::StatusCode;
use serde_json::{json, Value};
use taskdesk_core::{Journal, LineClient, TelegramClient};
use taskdesk_proxy::AppState;
use tokio::net::TcpListener;

struct TestServer {
    base: String,
    http: reqwest::Client,
}

impl TestServer {
    async fn start(upstream: &str, line_token: Option<&str>, bot_token: Option<&str>) -> Self {
        let http = reqwest::Client::new();
        let line = LineClient::new(http.clone(), upstream, line_token.map(String::from)).unwrap();
        let telegram =
            TelegramClient::new(http.clone(), upstream, bot_token.map(String::from)).unwrap();
        let state = AppState::new(line, telegram, Journal::default());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(taskdesk_proxy::serve(listener, state, std::future::pending()));

        Self {
            base: format!("http://{addr}"),
            http,
        }
    }

    async fn post(&self, path: &str, body: &str) -> (StatusCode, Value) {
        let resp = self
            .http
            .post(format!("{}{path}", self.base))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .http
            .get(format!("{}{path}", self.base))
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }
}

#[tokio::test]
async fn line_push_is_passed_through() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/v2/bot/message/push")
        .match_header("authorization", "Bearer line-secret")
        .match_body(Matcher::Json(json!({"to": "U1", "messages": [{"type": "text", "text": "hi"}]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sentMessages":[{"id":"1"}]}"#)
        .create_async()
        .await;

    let server = TestServer::start(&upstream.url(), Some("line-secret"), None).await;
    let (status, body) = server
        .post(
            "/api/line/push",
            r#"{"to":"U1","messages":[{"type":"text","text":"hi"}]}"#,
        )
        .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"sentMessages": [{"id": "1"}]}));
}

#[tokio::test]
async fn line_upstream_error_status_is_relayed() {
    let mut upstream = mockito::Server::new_async().await;
    upstream
        .mock("POST", "/v2/bot/message/reply")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Invalid reply token"}"#)
        .create_async()
        .await;

    let server = TestServer::start(&upstream.url(), Some("line-secret"), None).await;
    let (status, body) = server
        .post("/api/line/reply", r#"{"replyToken":"x","messages":[]}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid reply token");
}

#[tokio::test]
async fn missing_credential_answers_500_with_error() {
    let server = TestServer::start("http://127.0.0.1:9", None, None).await;

    let (status, body) = server.post("/api/line/multicast", "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("LINE"));

    let (status, body) = server.post("/api/telegram/send", "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Telegram"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let server = TestServer::start("http://127.0.0.1:9", Some("t"), Some("1:x")).await;
    let (status, body) = server.post("/api/line/push", "{nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn telegram_method_route_forwards_to_bot_path() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/bot42:secret/getMe")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":{"id":42}}"#)
        .create_async()
        .await;

    let server = TestServer::start(&upstream.url(), None, Some("42:secret")).await;
    let (status, body) = server.post("/api/telegram/getMe", "").await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["id"], 42);
}

#[tokio::test]
async fn telegram_send_uses_send_message() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/bot42:secret/sendMessage")
        .match_body(Matcher::PartialJson(json!({"chat_id": 5})))
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":false,"description":"Forbidden: bot was blocked by the user"}"#)
        .create_async()
        .await;

    let server = TestServer::start(&upstream.url(), None, Some("42:secret")).await;
    let (status, body) = server
        .post("/api/telegram/send", r#"{"chat_id":5,"text":"hi"}"#)
        .await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn line_webhook_records_notifications_and_acks() {
    let server = TestServer::start("http://127.0.0.1:9", None, None).await;

    let (status, body) = server
        .post(
            "/api/line/webhook",
            r#"{"events":[{"type":"message","message":{"type":"text","text":"hello"},"source":{"userId":"U9"}}]}"#,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, list) = server.get("/api/notifications").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["unread"], 1);
    assert_eq!(list["items"][0]["message"], "LINE message from U9: hello");
    assert_eq!(list["items"][0]["type"], "line");
    assert_eq!(list["items"][0]["relatedId"], "U9");
}

#[tokio::test]
async fn webhooks_ack_even_when_payload_is_malformed() {
    let server = TestServer::start("http://127.0.0.1:9", None, None).await;

    let (status, body) = server.post("/api/line/webhook", "not json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = server.post("/api/telegram/webhook", "[1,2]").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true}));

    let (_, list) = server.get("/api/notifications").await;
    assert_eq!(list["items"], json!([]));
}

#[tokio::test]
async fn telegram_webhook_then_mark_read() {
    let server = TestServer::start("http://127.0.0.1:9", None, None).await;

    server
        .post(
            "/api/telegram/webhook",
            r#"{"update_id":1,"message":{"message_id":3,"chat":{"id":77},"from":{"id":8,"username":"bob"},"text":"ping"}}"#,
        )
        .await;

    let (_, list) = server.get("/api/notifications").await;
    assert_eq!(list["items"][0]["message"], "Telegram message from bob: ping");
    let id = list["items"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = server.post(&format!("/api/notifications/{id}/read"), "").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = server.post(&format!("/api/notifications/{id}/read"), "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = server.get("/api/notifications").await;
    assert_eq!(list["unread"], 0);
    assert_eq!(list["items"][0]["read"], true);
}

#[tokio::test]
async fn health_reports_ok() {
    let server = TestServer::start("http://127.0.0.1:9", None, None).await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn query_string_is_forwarded_verbatim() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/bot42:secret/getUpdates")
        .match_query(Matcher::UrlEncoded("offset".into(), "5".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":[]}"#)
        .create_async()
        .await;

    let server = TestServer::start(&upstream.url(), None, Some("42:secret")).await;
    let (status, body) = server.post("/api/telegram/getUpdates?offset=5", "{}").await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], json!([]));
}
