//! HTTP contract tests for the webhook receiver and the read API.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use hl_serve::{app, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    _dir: TempDir,
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("events.db");
        let state = AppState::new(path.to_string_lossy().into_owned());
        Self { _dir: dir, state }
    }

    /// State whose database lives in a directory that does not exist.
    fn unavailable() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("events.db");
        let state = AppState::new(path.to_string_lossy().into_owned());
        Self { _dir: dir, state }
    }

    /// Creates the schema, then makes every insert into `events` fail.
    fn reject_inserts(&self) {
        let conn = hl_db::schema::open_and_migrate(&self.state.db_path).expect("open db");
        conn.execute_batch(
            "CREATE TRIGGER reject_inserts BEFORE INSERT ON events \
             BEGIN SELECT RAISE(ABORT, 'events are read-only'); END;",
        )
        .expect("create trigger");
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = app(self.state.clone())
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    async fn deliver(&self, event: Option<&str>, payload: &Value) -> (StatusCode, Value) {
        self.deliver_raw(event, payload.to_string()).await
    }

    async fn deliver_raw(&self, event: Option<&str>, body: String) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/webhook/receiver")
            .header("content-type", "application/json");
        if let Some(event) = event {
            builder = builder.header("X-GitHub-Event", event);
        }
        self.send(builder.body(Body::from(body)).expect("request"))
            .await
    }

    async fn events(&self) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri("/api/events")
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }
}

fn push(git_ref: &str, timestamp: &str) -> Value {
    json!({
        "ref": git_ref,
        "before": "0000000",
        "after": "c0ffee1",
        "commits": [{ "id": "c0ffee1", "message": "Fix login" }],
        "head_commit": {
            "id": "c0ffee1",
            "message": "Fix login",
            "timestamp": timestamp,
            "author": { "name": "Travis", "email": "travis@example.com" }
        },
        "pusher": { "name": "Travis", "email": "travis@example.com" },
        "sender": { "login": "travis" }
    })
}

fn pull_request(action: &str, merged: bool) -> Value {
    let state = if merged { "closed" } else { "open" };
    json!({
        "action": action,
        "number": 12,
        "pull_request": {
            "number": 12,
            "state": state,
            "merged": merged,
            "created_at": "2021-04-01T09:00:00Z",
            "merged_at": "2021-04-02T10:15:00Z",
            "head": { "ref": "staging" },
            "base": { "ref": "master" }
        },
        "sender": { "login": "octocat" }
    })
}

#[tokio::test]
async fn liveness() {
    let app = TestApp::new();
    for uri in ["/webhook", "/webhook/"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Webhook receiver is running" }));
    }
}

#[tokio::test]
async fn push_is_stored_and_formatted() {
    let app = TestApp::new();
    let (status, body) = app
        .deliver(Some("push"), &push("refs/heads/staging", "2021-04-01T21:30:00Z"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Webhook received" }));

    let (status, body) = app.events().await;
    assert_eq!(status, StatusCode::OK);
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert!(event["id"].as_str().unwrap().starts_with("evt_"));
    assert_eq!(event["request_id"], "c0ffee1");
    assert_eq!(event["author"], "Travis");
    assert_eq!(event["action"], "PUSH");
    assert_eq!(event["from_branch"], "");
    assert_eq!(event["to_branch"], "staging");
    assert_eq!(event["timestamp"], "2021-04-01T21:30:00Z");
    assert_eq!(event["formatted_timestamp"], "1st April 2021 - 9:30 PM UTC");
    assert_eq!(
        event["display_message"],
        "Travis pushed to staging on 1st April 2021 - 9:30 PM UTC"
    );
}

#[tokio::test]
async fn pull_request_lifecycle() {
    let app = TestApp::new();
    app.deliver(Some("pull_request"), &pull_request("opened", false))
        .await;
    app.deliver(Some("pull_request"), &pull_request("synchronize", false))
        .await;
    app.deliver(Some("pull_request"), &pull_request("closed", false))
        .await;
    app.deliver(Some("pull_request"), &pull_request("closed", true))
        .await;

    let (_, body) = app.events().await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["action"], "MERGE");
    assert_eq!(events[0]["timestamp"], "2021-04-02T10:15:00Z");
    assert_eq!(
        events[0]["display_message"],
        "octocat merged branch staging to master on 2nd April 2021 - 10:15 AM UTC"
    );
    assert_eq!(events[1]["action"], "PULL_REQUEST");
    assert_eq!(events[1]["request_id"], "12");
    assert_eq!(events[1]["timestamp"], "2021-04-01T09:00:00Z");
}

#[tokio::test]
async fn header_less_delivery_is_classified_by_shape() {
    let app = TestApp::new();
    app.deliver(None, &push("refs/heads/main", "2021-04-03T08:00:00Z"))
        .await;
    app.deliver(None, &pull_request("opened", false)).await;

    let (_, body) = app.events().await;
    let actions: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, ["PUSH", "PULL_REQUEST"]);
}

#[tokio::test]
async fn tag_push_is_acknowledged_but_not_stored() {
    let app = TestApp::new();
    let (status, body) = app
        .deliver(Some("push"), &push("refs/tags/v1.0.0", "2021-04-01T21:30:00Z"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Webhook received");

    let (_, body) = app.events().await;
    assert_eq!(body, json!({ "events": [] }));
}

#[tokio::test]
async fn malformed_bodies_are_acknowledged() {
    let app = TestApp::new();
    for raw in ["", "{not json", "[]", "null"] {
        let (status, body) = app.deliver_raw(None, raw.to_string()).await;
        assert_eq!(status, StatusCode::OK, "body {raw:?}");
        assert_eq!(body, json!({ "message": "Webhook received" }));
    }
    let (status, body) = app.deliver(Some("issues"), &json!({ "action": "opened" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Webhook received");

    let (_, body) = app.events().await;
    assert_eq!(body["events"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn missing_authors_default_to_unknown() {
    let app = TestApp::new();
    let mut payload = push("refs/heads/main", "2021-04-01T21:30:00Z");
    payload["pusher"] = Value::Null;
    payload["sender"] = Value::Null;
    app.deliver(Some("push"), &payload).await;

    let mut payload = pull_request("opened", false);
    payload.as_object_mut().unwrap().remove("sender");
    app.deliver(Some("pull_request"), &payload).await;

    let (_, body) = app.events().await;
    for event in body["events"].as_array().unwrap() {
        assert_eq!(event["author"], "Unknown");
    }
}

#[tokio::test]
async fn read_api_is_capped_and_newest_first() {
    let app = TestApp::new();
    for i in 0..55 {
        let timestamp = format!("2021-04-01T{:02}:{:02}:00Z", i / 60 + 10, i % 60);
        app.deliver(Some("push"), &push("refs/heads/main", &timestamp))
            .await;
    }

    let (status, body) = app.events().await;
    assert_eq!(status, StatusCode::OK);
    let timestamps: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["timestamp"].as_str().unwrap())
        .collect();
    assert_eq!(timestamps.len(), 50);
    assert_eq!(timestamps[0], "2021-04-01T10:54:00Z");
    assert!(timestamps.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn unavailable_store_is_reported() {
    let app = TestApp::unavailable();

    let (status, body) = app
        .deliver(Some("push"), &push("refs/heads/main", "2021-04-01T21:30:00Z"))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Webhook received");
    assert_eq!(body["error"], "Database not initialized");

    let (status, body) = app.events().await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Database not available" }));
}

#[tokio::test]
async fn failed_insert_is_still_acknowledged() {
    let app = TestApp::new();
    app.reject_inserts();

    let (status, body) = app
        .deliver(Some("push"), &push("refs/heads/main", "2021-04-01T21:30:00Z"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Webhook received" }));

    let (status, body) = app
        .deliver(Some("pull_request"), &pull_request("opened", false))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Webhook received" }));

    let (status, body) = app.events().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "events": [] }));
}

#[tokio::test]
async fn loosely_typed_payloads_are_stored_with_defaults() {
    let app = TestApp::new();
    let mut payload = push("refs/heads/main", "2021-04-01T21:30:00Z");
    payload["pusher"] = json!({ "name": 7 });
    payload["head_commit"] = json!({ "message": "Fix login", "tree_id": "abc" });
    app.deliver(Some("push"), &payload).await;

    let mut payload = pull_request("opened", false);
    payload["pull_request"]["number"] = json!("12");
    app.deliver(Some("pull_request"), &payload).await;

    let (_, body) = app.events().await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    let pull = events.iter().find(|e| e["action"] == "PULL_REQUEST").unwrap();
    assert_eq!(pull["request_id"], "12");
    let push = events.iter().find(|e| e["action"] == "PUSH").unwrap();
    assert_eq!(push["author"], "travis");
    assert_eq!(push["request_id"], "");
    assert_eq!(push["timestamp"], "");
    assert_eq!(push["formatted_timestamp"], "unknown time");
}

#[tokio::test]
async fn correlation_id_is_echoed() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/webhook/")
        .header("x-correlation-id", "corr_test")
        .body(Body::empty())
        .unwrap();
    let response = hl_serve::app(app.state.clone())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.headers()["x-correlation-id"], "corr_test");
}

#[tokio::test]
async fn dashboard_and_openapi_are_served() {
    let app = TestApp::new();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = hl_serve::app(app.state.clone())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&html).contains("/api/events"));

    let request = Request::builder()
        .uri("/api/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/webhook/receiver"].is_object());
    assert!(body["paths"]["/api/events"].is_object());
}
