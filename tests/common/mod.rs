// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use exercise_tracker::config::Config;
use exercise_tracker::db::{FirestoreDb, MemoryDb};
use exercise_tracker::routes::create_router;
use exercise_tracker::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::test_default(),
        Arc::new(MemoryDb::new()),
    ));

    (create_router(state.clone()), state)
}

/// Send a request and return status plus body text.
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// POST an urlencoded form.
#[allow(dead_code)]
pub async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();

    send(app, request).await
}

/// POST a JSON body.
#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

/// GET a path.
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Register a user through the API and return its id.
#[allow(dead_code)]
pub async fn create_user(app: &Router, username: &str) -> u64 {
    let (status, body) = post_form(
        app,
        "/api/exercise/new-user",
        &format!("username={}", username),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {}", body);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    json["_id"].as_u64().unwrap()
}

/// Record an exercise through the API.
#[allow(dead_code)]
pub async fn add_exercise(app: &Router, user_id: u64, description: &str, duration: u32, date: &str) {
    let (status, body) = post_form(
        app,
        "/api/exercise/add",
        &format!(
            "userId={}&description={}&duration={}&date={}",
            user_id, description, duration, date
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "add exercise failed: {}", body);
}
