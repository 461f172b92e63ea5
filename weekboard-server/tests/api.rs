//! Endpoint tests driving the router directly, one request per call.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use weekboard_core::Vault;
use weekboard_server::{AppState, app};

fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(Vault::new(dir.path()));
    (dir, app(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

fn json_request(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_get_week_is_monday_aligned() {
    let (_dir, app) = test_app();

    let (status, body) = send(&app, get("/week?date=2026-02-05")).await;
    assert_eq!(status, StatusCode::OK);

    let dates: Vec<&str> = body["dates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert_eq!(dates.len(), 7);
    assert_eq!(dates[0], "2026-02-02");
    assert_eq!(dates[6], "2026-02-08");

    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    for (date, day) in dates.iter().zip(days) {
        assert_eq!(day["date"], *date);
        assert_eq!(day["exists"], false);
    }
}

#[tokio::test]
async fn test_get_week_without_date_defaults_to_today() {
    let (_dir, app) = test_app();

    let (status, body) = send(&app, get("/week")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dates"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_get_week_rejects_malformed_date() {
    let (_dir, app) = test_app();

    let (status, body) = send(&app, get("/week?date=2026-2-5")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("2026-2-5"));
}

#[tokio::test]
async fn test_get_missing_day_is_empty_not_404() {
    let (_dir, app) = test_app();

    let (status, body) = send(&app, get("/day/2026-02-05")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2026-02-05");
    assert_eq!(body["exists"], false);
    assert_eq!(body["tasks"], json!([]));
}

#[tokio::test]
async fn test_put_day_replaces_note() {
    let (dir, app) = test_app();

    let tasks = json!([
        {"text": "Buy milk", "completed": true, "format": "checkbox"},
        {"text": "Plain note", "completed": false, "format": "plain"},
    ]);
    let (status, body) = send(
        &app,
        json_request("PUT", "/day/2026-02-05", json!({"tasks": tasks})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["tasks"], tasks);

    let content = std::fs::read_to_string(dir.path().join("2026-02-05.md")).unwrap();
    assert_eq!(content, "# 2026-02-05\n\n- [x] Buy milk\n- Plain note\n");

    let (status, body) = send(&app, get("/day/2026-02-05")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], true);
    assert_eq!(body["tasks"], tasks);
}

#[tokio::test]
async fn test_post_task_defaults_to_plain_and_appends() {
    let (_dir, app) = test_app();

    send(
        &app,
        json_request(
            "POST",
            "/day/2026-02-05/task",
            json!({"text": "First", "format": "checkbox"}),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request("POST", "/day/2026-02-05/task", json!({"text": "Second"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["text"], "First");
    assert_eq!(tasks[1]["text"], "Second");
    assert_eq!(tasks[1]["format"], "plain");
    assert_eq!(tasks[1]["completed"], false);
}

#[tokio::test]
async fn test_delete_task_by_index() {
    let (_dir, app) = test_app();

    for text in ["a", "b", "c"] {
        send(
            &app,
            json_request("POST", "/day/2026-02-05/task", json!({"text": text})),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        Request::delete("/day/2026-02-05/task/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let texts: Vec<&str> = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["a", "c"]);
}

#[tokio::test]
async fn test_delete_out_of_range_index_is_400() {
    let (dir, app) = test_app();

    send(
        &app,
        json_request("POST", "/day/2026-02-05/task", json!({"text": "only"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Request::delete("/day/2026-02-05/task/5")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("index"));

    let content = std::fs::read_to_string(dir.path().join("2026-02-05.md")).unwrap();
    assert_eq!(content, "# 2026-02-05\n\n- only\n");
}

#[tokio::test]
async fn test_malformed_date_path_is_400() {
    let (_dir, app) = test_app();

    for request in [
        get("/day/not-a-date"),
        json_request("PUT", "/day/2026-02-30", json!({"tasks": []})),
        json_request("POST", "/day/05-02-2026/task", json!({"text": "x"})),
    ] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some());
    }
}

#[tokio::test]
async fn test_events_endpoint_is_an_sse_stream() {
    let (_dir, app) = test_app();

    let response = app.oneshot(get("/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );
}
