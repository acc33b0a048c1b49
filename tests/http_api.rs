//! Integration tests for the HTTP API.
//!
//! Requests go through the full router, including the auth middleware, with
//! `MockSessionValidator` tokens and in-memory stores behind it.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use complaint_desk::adapters::auth::MockSessionValidator;
use complaint_desk::adapters::clock::ManualClock;
use complaint_desk::adapters::http::{api_router, ComplaintAppState};
use complaint_desk::adapters::memory::{
    InMemoryComplaintRepository, InMemoryStatusEventStore, InMemoryUserDirectory,
};
use complaint_desk::application::PageLimits;
use complaint_desk::domain::complaint::DuplicateRule;
use complaint_desk::domain::foundation::{Role, Timestamp};

// =============================================================================
// Test Infrastructure
// =============================================================================

const CUSTOMER: &str = "customer-token";
const BUDI: &str = "budi-token";
const SARI: &str = "sari-token";
const ADMIN: &str = "admin-token";

fn app() -> Router {
    let state = ComplaintAppState {
        complaints: Arc::new(InMemoryComplaintRepository::new()),
        events: Arc::new(InMemoryStatusEventStore::new()),
        users: Arc::new(InMemoryUserDirectory::new()),
        clock: Arc::new(ManualClock::new(Timestamp::from_unix_secs(1_760_000_000))),
        duplicate_rule: DuplicateRule::default(),
        page_limits: PageLimits::default(),
    };
    let validator = MockSessionValidator::new()
        .with_test_user(CUSTOMER, "cust-1", Role::Customer)
        .with_test_user(BUDI, "tech-budi", Role::Technician)
        .with_test_user(SARI, "tech-sari", Role::Technician)
        .with_test_user(ADMIN, "admin-1", Role::Admin);
    api_router(state, Arc::new(validator))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn file(app: &Router, title: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/complaints",
        Some(CUSTOMER),
        Some(json!({
            "title": title,
            "category": "internet",
            "location": {"city": "Bandung", "contact_phone": "0812"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_needs_no_token() {
    let (status, body) = send(&app(), Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn api_requires_authentication() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/api/complaints", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, "/api/complaints", Some("forged"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn filed_complaint_is_visible_to_owner() {
    let app = app();
    let id = file(&app, "No internet").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/complaints/{id}"), Some(CUSTOMER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "filed");
    assert_eq!(body["location"]["city"], "Bandung");
    assert!(body["assignee_id"].is_null());

    let (status, body) = send(&app, Method::GET, "/api/complaints", Some(CUSTOMER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["total_pages"], 1);
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/complaints",
        Some(CUSTOMER),
        Some(json!({"title": "   ", "category": "internet"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn claim_then_resolve_through_technician_routes() {
    let app = app();
    let id = file(&app, "Router dead").await;

    let (status, body) = send(&app, Method::GET, "/api/technician/complaints/ready", Some(BUDI), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let claim = format!("/api/technician/complaints/{id}/claim");
    let (status, body) = send(&app, Method::PATCH, &claim, Some(BUDI), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "assigned");
    assert_eq!(body["assignee_id"], "tech-budi");

    let (status, body) = send(&app, Method::PATCH, &claim, Some(SARI), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_IN_PROGRESS");

    let (status, body) = send(&app, Method::GET, "/api/technician/complaints/progress", Some(BUDI), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/technician/complaints/{id}/status"),
        Some(BUDI),
        Some(json!({"status": "completed", "resolution_notes": "Replaced power adapter"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["complaint"]["status"], "completed");
    assert_eq!(body["complaint"]["resolution_notes"], "Replaced power adapter");
    assert_eq!(body["history"].as_array().unwrap().len(), 3);
    assert_eq!(body["history"][0]["status"], "completed");

    let (status, body) = send(&app, Method::GET, &format!("/api/complaints/{id}/history"), Some(CUSTOMER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[2]["reason"], "complaint filed");

    let (status, body) = send(&app, Method::GET, "/api/technician/dashboard", Some(BUDI), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"ready": 0, "in_progress": 0, "completed": 1, "pending": 0, "total_assigned": 1})
    );
}

#[tokio::test]
async fn error_kinds_map_to_status_codes() {
    let app = app();
    let id = file(&app, "Slow speed").await;

    let (status, _) = send(&app, Method::GET, "/api/technician/dashboard", Some(CUSTOMER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, "/api/technician/complaints/archived", Some(BUDI), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/complaints/not-a-uuid", Some(CUSTOMER), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = "/api/complaints/00000000-0000-4000-8000-000000000000";
    let (status, body) = send(&app, Method::GET, missing, Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "COMPLAINT_NOT_FOUND");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/complaints/{id}/status"),
        Some(ADMIN),
        Some(json!({"status": "assigned"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "TRANSITION_NOT_ALLOWED");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/complaints/{id}/status"),
        Some(BUDI),
        Some(json!({"status": "escalated"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATUS");
}
