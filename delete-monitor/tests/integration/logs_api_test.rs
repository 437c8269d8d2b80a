//! GET /logs の結合テスト（実ポート経由）

use chrono::NaiveDateTime;
use delete_monitor::common::types::DeletionEvent;
use serde_json::Value;

use crate::support::http::spawn_app;
use crate::support::monitor::build_monitor;

fn event(id: i32, ts: &str, user: &str) -> DeletionEvent {
    DeletionEvent {
        id,
        timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
        file_path: format!("/var/tmp/{id}.log"),
        deleted_by: user.to_string(),
    }
}

#[tokio::test]
async fn logs_endpoints_serve_history_over_http() {
    let monitor = build_monitor(vec![
        event(10, "2025-02-20 12:00:00", "bob"),
        event(11, "2025-02-22 07:15:00", "carol"),
        event(12, "2025-02-22 21:40:00", "dave"),
    ]);
    let server = spawn_app(monitor.router).await;
    let client = reqwest::Client::new();

    let all: Value = client
        .get(server.url("/logs"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<i64> = all["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![12, 11, 10]);

    let day: Value = client
        .get(server.url("/logs/2025-02-22"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let users: Vec<&str> = day["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["deleted_by"].as_str().unwrap())
        .collect();
    assert_eq!(users, vec!["dave", "carol"]);

    let empty: Value = client
        .get(server.url("/logs/1999-01-01"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(empty["logs"].as_array().unwrap().len(), 0);

    let bad = client.get(server.url("/logs/yesterday")).send().await.unwrap();
    assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);

    server.stop().await;
}
