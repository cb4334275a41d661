//! Forwarder tests against mocked LINE and Telegram servers.

use mockito::Matcher;
use serde_json::json;
use taskdesk_core::error::ForwardError;
use taskdesk_core::{LineClient, MessagingService, TelegramClient};

fn http() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn line_push_relays_upstream_json() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({"to": "U123", "messages": [{"type": "text", "text": "hi"}]});
    let mock = server
        .mock("POST", "/v2/bot/message/push")
        .match_header("authorization", "Bearer line-token")
        .match_body(Matcher::Json(body.clone()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sentMessages":[{"id":"461230966842064897","quoteToken":"q"}]}"#)
        .create_async()
        .await;

    let client = LineClient::new(http(), &server.url(), Some("line-token".into())).unwrap();
    assert!(client.is_configured());
    let resp = client.push(&body).await.unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["sentMessages"][0]["id"], "461230966842064897");
    mock.assert_async().await;
}

#[tokio::test]
async fn line_error_status_is_relayed_not_raised() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/bot/message/reply")
        .with_status(400)
        .with_body(r#"{"message":"Invalid reply token"}"#)
        .create_async()
        .await;

    let client = LineClient::new(http(), &server.url(), Some("t".into())).unwrap();
    let resp = client.reply(&json!({"replyToken": "x"})).await.unwrap();

    assert_eq!(resp.status, 400);
    assert_eq!(resp.body, json!({"message": "Invalid reply token"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn line_multicast_with_empty_upstream_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/bot/message/multicast")
        .with_status(200)
        .create_async()
        .await;

    let client = LineClient::new(http(), &server.url(), Some("t".into())).unwrap();
    let resp = client.multicast(&json!({"to": ["U1", "U2"]})).await.unwrap();
    assert_eq!(resp.body, json!({}));
    mock.assert_async().await;
}

#[tokio::test]
async fn telegram_send_message_uses_token_in_path() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({"chat_id": 42, "text": "deploy finished"});
    let mock = server
        .mock("POST", "/bot123:ABC/sendMessage")
        .match_body(Matcher::Json(body.clone()))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{"message_id":7}}"#)
        .create_async()
        .await;

    let client = TelegramClient::new(http(), &server.url(), Some("123:ABC".into())).unwrap();
    let resp = client.send_message(&body).await.unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["result"]["message_id"], 7);
    mock.assert_async().await;
}

#[tokio::test]
async fn telegram_arbitrary_method() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/bot1:x/getMe")
        .with_status(401)
        .with_body(r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#)
        .create_async()
        .await;

    let client = TelegramClient::new(http(), &server.url(), Some("1:x".into())).unwrap();
    let resp = client.call("getMe", &json!({})).await.unwrap();
    assert_eq!(resp.status, 401);
    assert_eq!(resp.body["description"], "Unauthorized");
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    // Port 9 (discard) is not listening on test machines.
    let client = TelegramClient::new(http(), "http://127.0.0.1:9", Some("1:x".into())).unwrap();
    let err = client.send_message(&json!({})).await.unwrap_err();
    match err {
        ForwardError::Transport { service, message } => {
            assert_eq!(service, "Telegram");
            assert!(!message.contains("1:x"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn line_forward_appends_caller_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/bot/message/push")
        .match_query(Matcher::UrlEncoded("dry".into(), "1".into()))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = LineClient::new(http(), &server.url(), Some("line-token".into())).unwrap();
    let resp = client
        .forward_with_query(
            taskdesk_core::integrations::LineEndpoint::Push,
            Some("dry=1"),
            &json!({}),
        )
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    mock.assert_async().await;
}
