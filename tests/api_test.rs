// tests/api_test.rs — Integration test: HTTP adapter over the session machine

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use hcpcoach::api::{build_router, ApiState};
use hcpcoach::assessment::FixedAssessor;
use hcpcoach::dialogue::ScriptedResponder;
use hcpcoach::persona::PersonaCatalog;
use hcpcoach::session::Coach;

fn state_with_delays(reply: Duration, event_timeout: Duration) -> ApiState {
    let coach = Coach::new(
        Arc::new(PersonaCatalog::builtin()),
        Arc::new(ScriptedResponder::seeded(5)),
        Arc::new(FixedAssessor),
    )
    .with_delays(reply, Duration::ZERO);
    ApiState::new(Arc::new(coach), event_timeout)
}

fn app() -> Router {
    build_router(state_with_delays(Duration::ZERO, Duration::from_secs(5)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn new_session(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

async fn post_event(app: &Router, id: &str, event: Value) -> (StatusCode, Value) {
    send(app, "POST", &format!("/api/v1/sessions/{id}/events"), Some(event)).await
}

#[tokio::test]
async fn test_list_personas_with_filter() {
    let app = app();
    let (status, all) = send(&app, "GET", "/api/v1/personas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, hard) = send(&app, "GET", "/api/v1/personas?difficulty=hard", None).await;
    let hard = hard.as_array().unwrap();
    assert_eq!(hard.len(), 2);
    assert_eq!(hard[0]["badge"], "red");

    let (status, body) = send(&app, "GET", "/api/v1/personas?difficulty=extreme", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");
}

#[tokio::test]
async fn test_get_persona_by_name() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/personas/Dr.%20Sarah%20Chen", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["specialty"], "Cardiologist");

    let (status, body) = send(&app, "GET", "/api/v1/personas/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn test_full_session_over_http() {
    let app = app();
    let id = new_session(&app).await;

    let (_, body) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
    assert_eq!(body["view"]["screen"], "dashboard");

    let (status, body) =
        post_event(&app, &id, json!({"type": "navigate", "target": "persona_list"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["screen"], "persona_list");
    assert_eq!(body["view"]["personas"].as_array().unwrap().len(), 3);

    let (_, body) = post_event(
        &app,
        &id,
        json!({"type": "select_persona", "id": "Dr. Sarah Chen"}),
    )
    .await;
    assert_eq!(body["view"]["screen"], "in_conversation");
    assert_eq!(body["view"]["messages"].as_array().unwrap().len(), 1);

    let (_, body) = post_event(&app, &id, json!({"type": "send_message", "text": "hello"})).await;
    let messages = body["view"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["speaker"], "You");
    assert_eq!(body["view"]["exchange_count"], 1);

    let (_, body) = post_event(&app, &id, json!({"type": "end_session"})).await;
    assert_eq!(body["view"]["screen"], "session_complete");
    assert_eq!(body["view"]["assessment"]["overall_score"], 87);
    assert_eq!(body["view"]["score_delta"], 7);

    let (_, body) = post_event(&app, &id, json!({"type": "return_to_dashboard"})).await;
    assert_eq!(body["view"]["screen"], "dashboard");
}

#[tokio::test]
async fn test_error_status_mapping() {
    let app = app();
    let id = new_session(&app).await;

    let (status, body) = post_event(&app, &id, json!({"type": "end_session"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "invalid_event");

    post_event(&app, &id, json!({"type": "navigate", "target": "persona_list"})).await;
    let (status, body) = post_event(
        &app,
        &id,
        json!({"type": "select_persona", "id": "nonexistent"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    let (_, body) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
    assert_eq!(body["view"]["screen"], "persona_list");
}

#[tokio::test]
async fn test_event_timeout_is_service_unavailable() {
    let app = build_router(state_with_delays(
        Duration::from_millis(500),
        Duration::from_millis(50),
    ));
    let id = new_session(&app).await;
    post_event(&app, &id, json!({"type": "navigate", "target": "persona_list"})).await;
    post_event(
        &app,
        &id,
        json!({"type": "select_persona", "id": "Dr. Michael Roberts"}),
    )
    .await;

    let (status, body) =
        post_event(&app, &id, json!({"type": "send_message", "text": "hello"})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["kind"], "backend_unavailable");

    let (_, body) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
    assert_eq!(body["view"]["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let app = app();
    let a = new_session(&app).await;
    let b = new_session(&app).await;
    assert_ne!(a, b);

    post_event(&app, &a, json!({"type": "navigate", "target": "persona_list"})).await;

    let (_, body_a) = send(&app, "GET", &format!("/api/v1/sessions/{a}"), None).await;
    let (_, body_b) = send(&app, "GET", &format!("/api/v1/sessions/{b}"), None).await;
    assert_eq!(body_a["view"]["screen"], "persona_list");
    assert_eq!(body_b["view"]["screen"], "dashboard");
}

#[tokio::test]
async fn test_slow_event_does_not_block_other_reads() {
    let state = state_with_delays(Duration::from_millis(400), Duration::from_secs(5));
    let app = build_router(state);
    let id = new_session(&app).await;
    post_event(&app, &id, json!({"type": "navigate", "target": "persona_list"})).await;
    post_event(
        &app,
        &id,
        json!({"type": "select_persona", "id": "Dr. Sarah Chen"}),
    )
    .await;

    let slow_app = app.clone();
    let slow_id = id.clone();
    let slow = tokio::spawn(async move {
        post_event(&slow_app, &slow_id, json!({"type": "send_message", "text": "hi"})).await
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    let started = std::time::Instant::now();
    let (status, stats) = send(&app, "GET", "/api/v1/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats.as_array().unwrap().len(), 4);
    assert!(started.elapsed() < Duration::from_millis(300));

    let (status, _) = slow.await.unwrap();
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_session() {
    let app = app();
    let id = new_session(&app).await;
    let (status, _) = send(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analytics_endpoint() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trend"].as_array().unwrap().len(), 8);
    assert_eq!(body["history"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_malformed_requests_are_bad_request_with_error_body() {
    let app = app();
    let id = new_session(&app).await;

    let (status, body) = post_event(&app, &id, json!({"type": "fly_away"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");
    assert!(body["error"].as_str().unwrap().starts_with("Invalid event"));

    let (status, body) = post_event(&app, &id, json!({"type": "send_message"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "bad_request");

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, method, "/api/v1/sessions/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "bad_request");
    }

    let (status, body) = post_event(&app, "not-a-uuid", json!({"type": "end_session"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid session id"));

    // Blank text on the dashboard is still a state error, not a parse error.
    let (status, body) = post_event(&app, &id, json!({"type": "send_message", "text": ""})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "invalid_event");
}

#[tokio::test]
async fn test_full_registry_refuses_new_sessions() {
    let state = state_with_delays(Duration::ZERO, Duration::from_secs(5))
        .with_session_limits(Duration::from_secs(600), 2);
    let app = build_router(state.clone());
    let first = new_session(&app).await;
    new_session(&app).await;

    let (status, body) = send(&app, "POST", "/api/v1/sessions", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["kind"], "backend_unavailable");
    assert_eq!(state.session_count(), 2);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/sessions/{first}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    new_session(&app).await;
    assert_eq!(state.session_count(), 2);
}

#[tokio::test]
async fn test_idle_session_expires() {
    let state = state_with_delays(Duration::ZERO, Duration::from_secs(5))
        .with_session_limits(Duration::from_millis(40), 100);
    let app = build_router(state.clone());
    let id = new_session(&app).await;

    tokio::time::sleep(Duration::from_millis(80)).await;
    let (status, body) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    assert_eq!(state.session_count(), 0);
}
