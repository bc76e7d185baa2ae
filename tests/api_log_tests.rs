// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise log query tests, including the filter/limit coupling.

use axum::http::StatusCode;

mod common;

/// A user with three exercises on Jan 1, 2 and 3 2024.
async fn app_with_log() -> (axum::Router, u64) {
    let (app, _) = common::create_test_app();
    let user_id = common::create_user(&app, "logkeeper").await;

    common::add_exercise(&app, user_id, "Run", 30, "2024-01-02").await;
    common::add_exercise(&app, user_id, "Swim", 40, "2024-01-01").await;
    common::add_exercise(&app, user_id, "Bike", 50, "2024-01-03").await;

    (app, user_id)
}

#[tokio::test]
async fn test_log_requires_user_id() {
    let (app, _) = app_with_log().await;

    let (status, body) = common::get(&app, "/api/exercise/log").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid userId...");

    let (status, body) = common::get(&app, "/api/exercise/log?userId=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid userId...");
}

#[tokio::test]
async fn test_log_unknown_user() {
    let (app, _) = app_with_log().await;

    let (status, body) = common::get(&app, "/api/exercise/log?userId=999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "User does not exist...");
}

#[tokio::test]
async fn test_log_malformed_user_id() {
    let (app, _) = app_with_log().await;

    let (status, body) = common::get(&app, "/api/exercise/log?userId=xyz").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "unknown _id");
}

#[tokio::test]
async fn test_log_full_range_with_limit() {
    let (app, user_id) = app_with_log().await;

    let (status, body) = common::get(
        &app,
        &format!(
            "/api/exercise/log?userId={}&from=2023-12-31&to=2024-01-31&limit=1",
            user_id
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "_id": user_id,
            "username": "logkeeper",
            "count": 1,
            "log": [{"description": "Swim", "duration": 40, "date": "Mon Jan 01 2024"}]
        })
    );
}

#[tokio::test]
async fn test_log_range_filters_by_date() {
    let (app, user_id) = app_with_log().await;

    let (status, body) = common::get(
        &app,
        &format!(
            "/api/exercise/log?userId={}&from=2024-01-02&to=2024-01-03&limit=10",
            user_id
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["log"][0]["description"], "Run");
    assert_eq!(json["log"][1]["description"], "Bike");
    assert!(json["log"][0].get("userId").is_none());
}

#[tokio::test]
async fn test_log_only_from_returns_nothing() {
    let (app, user_id) = app_with_log().await;

    let (status, body) = common::get(
        &app,
        &format!("/api/exercise/log?userId={}&from=2023-01-01&limit=5", user_id),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found...");
}

#[tokio::test]
async fn test_log_without_filters_returns_nothing() {
    let (app, user_id) = app_with_log().await;

    for uri in [
        format!("/api/exercise/log?userId={}", user_id),
        format!("/api/exercise/log?userId={}&to=2030-01-01&limit=5", user_id),
        format!(
            "/api/exercise/log?userId={}&from=2023-01-01&to=2030-01-01",
            user_id
        ),
    ] {
        let (status, body) = common::get(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri: {}", uri);
        assert_eq!(body, "Not Found...");
    }
}

#[tokio::test]
async fn test_log_rejects_bad_parameters() {
    let (app, user_id) = app_with_log().await;

    let (status, body) = common::get(
        &app,
        &format!("/api/exercise/log?userId={}&from=soon", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Cast to date failed for value \"soon\" at path \"from\"");

    let (status, _) = common::get(
        &app,
        &format!(
            "/api/exercise/log?userId={}&from=2024-01-01&to=2024-02-01&limit=-1",
            user_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
