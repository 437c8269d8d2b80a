//! POST /send-logs から Webhook 到達までの結合テスト
//!
//! 実ポートでルーターを起動し、取得元サイトと通知先をwiremockで置き換える。

use std::time::{Duration, Instant};

use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::http::spawn_app;
use crate::support::monitor::{build_monitor, TestMonitor};

fn relay_body(site: &str, return_url: &str) -> Value {
    json!({
        "channel_id": "01951279-015e-7baa-b755-dd631bdba9bf",
        "return_url": return_url,
        "settings": [
            {"label": "interval", "type": "text", "required": false, "default": "* * * * *"},
            {"label": "site_url", "type": "text", "required": true, "default": site}
        ]
    })
}

/// リクエストを投げ、サーバー停止とワーカーの排出まで待つ
async fn trigger_and_drain(monitor: TestMonitor, body: Value) -> reqwest::StatusCode {
    let TestMonitor { router, worker, .. } = monitor;
    let server = spawn_app(router).await;

    let response = reqwest::Client::new()
        .post(server.url("/send-logs"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    let accepted: Value = response.json().await.unwrap();
    assert_eq!(accepted, json!({"status": "accepted"}));

    server.stop().await;
    assert!(worker.drain(Duration::from_secs(10)).await);
    status
}

async fn webhook_bodies(webhook: &MockServer) -> Vec<Value> {
    webhook
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn relay_delivers_site_logs_with_success_status() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/logs/\d{4}-\d{2}-\d{2}$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": [{"id": 1, "file_path": "/srv/a.txt", "deleted_by": "alice"}]
        })))
        .expect(1)
        .mount(&site)
        .await;

    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&webhook)
        .await;

    let monitor = build_monitor(Vec::new());
    let metrics = monitor.metrics.clone();
    let status = trigger_and_drain(
        monitor,
        relay_body(&format!("{}/logs", site.uri()), &format!("{}/hook", webhook.uri())),
    )
    .await;
    assert_eq!(status, reqwest::StatusCode::ACCEPTED);

    let bodies = webhook_bodies(&webhook).await;
    assert_eq!(bodies.len(), 1);
    let payload = &bodies[0];
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["event_name"], "❌ DELETE LOGS");
    assert_eq!(payload["username"], "DELETE LOGGER");

    let message: Value = serde_json::from_str(payload["message"].as_str().unwrap()).unwrap();
    assert_eq!(message[0]["deleted_by"], "alice");

    assert_eq!(metrics.runs("success"), 1);
}

#[tokio::test]
async fn relay_reports_error_status_when_site_has_no_logs() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"logs": []})))
        .mount(&site)
        .await;

    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&webhook)
        .await;

    let monitor = build_monitor(Vec::new());
    trigger_and_drain(monitor, relay_body(&site.uri(), &webhook.uri())).await;

    let bodies = webhook_bodies(&webhook).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["status"], "error");
    assert_eq!(bodies[0]["message"], "No deletion logs found");
}

#[tokio::test]
async fn relay_forwards_fetch_error_text_when_site_fails() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&site)
        .await;

    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&webhook)
        .await;

    let monitor = build_monitor(Vec::new());
    let metrics = monitor.metrics.clone();
    trigger_and_drain(monitor, relay_body(&site.uri(), &webhook.uri())).await;

    let bodies = webhook_bodies(&webhook).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["status"], "error");
    assert!(bodies[0]["message"].as_str().unwrap().contains("502"));
    assert_eq!(metrics.fetch_failures(), 1);
}

#[tokio::test]
async fn relay_without_site_setting_sends_nothing() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&webhook)
        .await;

    let monitor = build_monitor(Vec::new());
    let metrics = monitor.metrics.clone();
    let body = json!({
        "channel_id": "chan",
        "return_url": webhook.uri(),
        "settings": [{"label": "interval", "type": "text", "required": true, "default": "1h"}]
    });
    let status = trigger_and_drain(monitor, body).await;

    // 受付は常に成功し、失敗はバックグラウンドでのみ観測される
    assert_eq!(status, reqwest::StatusCode::ACCEPTED);
    assert!(webhook_bodies(&webhook).await.is_empty());
    assert_eq!(metrics.runs("configuration_invalid"), 1);
}

#[tokio::test]
async fn send_logs_answers_before_slow_site_responds() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"logs": [{"id": 7}]}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&site)
        .await;

    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&webhook)
        .await;

    let TestMonitor { router, worker, .. } = build_monitor(Vec::new());
    let server = spawn_app(router).await;

    let started = Instant::now();
    let response = reqwest::Client::new()
        .post(server.url("/send-logs"))
        .json(&relay_body(&site.uri(), &webhook.uri()))
        .send()
        .await
        .unwrap();
    let answered_in = started.elapsed();

    assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
    assert!(
        answered_in < Duration::from_secs(1),
        "trigger waited {answered_in:?} for the relay"
    );
    assert!(webhook_bodies(&webhook).await.is_empty());

    server.stop().await;
    assert!(worker.drain(Duration::from_secs(10)).await);

    let bodies = webhook_bodies(&webhook).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["status"], "success");
    assert!(started.elapsed() >= Duration::from_secs(3));
}

#[tokio::test]
async fn relay_forwards_site_records_verbatim() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": [
                {"id": 1, "error": "EACCES", "file_path": "/srv/a", "deleted_by": "bob"},
                "rm /srv/b by carol"
            ]
        })))
        .mount(&site)
        .await;

    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&webhook)
        .await;

    let monitor = build_monitor(Vec::new());
    let metrics = monitor.metrics.clone();
    trigger_and_drain(monitor, relay_body(&site.uri(), &webhook.uri())).await;

    let bodies = webhook_bodies(&webhook).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["status"], "success");
    let message: Value = serde_json::from_str(bodies[0]["message"].as_str().unwrap()).unwrap();
    assert_eq!(
        message,
        json!([
            {"id": 1, "error": "EACCES", "file_path": "/srv/a", "deleted_by": "bob"},
            "rm /srv/b by carol"
        ])
    );
    assert_eq!(metrics.fetch_failures(), 0);
}
