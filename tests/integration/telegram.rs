//! Integration tests for the Telegram notifier

use std::time::Duration;
use trendscan::config::TelegramConfig;
use trendscan::services::{Notifier, TelegramNotifier};
use trendscan::ScanError;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> TelegramConfig {
    TelegramConfig {
        token: "123:secret".to_string(),
        chat_id: "-1001".to_string(),
        api_url: server.uri(),
    }
}

#[tokio::test]
async fn posts_html_message_to_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:secret/sendMessage"))
        .and(body_string_contains("chat_id=-1001"))
        .and(body_string_contains("parse_mode=HTML"))
        .and(body_string_contains("Scanner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&config_for(&server), Duration::from_secs(2))
        .expect("client builds");
    notifier
        .notify("Scanner started")
        .await
        .expect("delivery succeeds");
}

#[tokio::test]
async fn rejected_message_is_notify_unavailable_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::with_client(&config_for(&server), reqwest::Client::new());
    let err = notifier.notify("hello").await.unwrap_err();

    assert!(matches!(err, ScanError::NotifyUnavailable(_)));
    assert!(err.to_string().contains("401"));
    assert!(!err.to_string().contains("secret"));
}

#[tokio::test]
async fn slow_api_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&config_for(&server), Duration::from_millis(50))
        .expect("client builds");
    let err = notifier.notify("hello").await.unwrap_err();
    assert_eq!(err.kind(), "notify_unavailable");
}
