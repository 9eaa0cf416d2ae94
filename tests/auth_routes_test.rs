// ABOUTME: Integration tests for the authentication route handlers
// ABOUTME: Registration, login, refresh, and protected-route token checks over HTTP
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_app, ScriptedLlmProvider};
use helpers::{axum_test::AxumTestRequest, flows};
use serde_json::{json, Value};

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_returns_bearer_token_pair() {
    let (app, _) = create_test_app(ScriptedLlmProvider::replying("")).await;

    let body = flows::register(&app, "New.Lifter@Example.com", "198.51.100.1").await;

    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().unwrap().len() > 20);
    assert!(body["refresh_token"].as_str().unwrap().len() > 20);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts_case_insensitively() {
    let (app, _) = create_test_app(ScriptedLlmProvider::replying("")).await;
    flows::register(&app, "dup@example.com", "198.51.100.1").await;

    let response = AxumTestRequest::post("/api/v1/auth/register")
        .peer("198.51.100.2")
        .json(&json!({"email": "DUP@example.com", "password": "another-password"}))
        .send(app)
        .await
        .assert_status(StatusCode::CONFLICT);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_bad_email_and_password() {
    let (app, _) = create_test_app(ScriptedLlmProvider::replying("")).await;

    AxumTestRequest::post("/api/v1/auth/register")
        .peer("198.51.100.10")
        .json(&json!({"email": "not-an-email", "password": "long-enough-pw"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::post("/api/v1/auth/register")
        .peer("198.51.100.11")
        .json(&json!({"email": "short@example.com", "password": "1234567"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::post("/api/v1/auth/register")
        .peer("198.51.100.12")
        .json(&json!({"email": "long@example.com", "password": "x".repeat(101)}))
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_auth_bodies_use_error_envelope() {
    let (app, _) = create_test_app(ScriptedLlmProvider::replying("")).await;

    let missing_password: Value = AxumTestRequest::post("/api/v1/auth/register")
        .peer("198.51.100.20")
        .json(&json!({"email": "half@example.com"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(missing_password["error"]["code"], "INVALID_INPUT");

    let wrong_type: Value = AxumTestRequest::post("/api/v1/auth/login")
        .json(&json!({"email": "typed@example.com", "password": 12_345_678}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(wrong_type["error"]["code"], "INVALID_INPUT");

    let not_json: Value = AxumTestRequest::post("/api/v1/auth/refresh")
        .raw_json("{refresh_token")
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(not_json["error"]["code"], "INVALID_INPUT");
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_with_correct_and_wrong_password() {
    let (app, _) = create_test_app(ScriptedLlmProvider::replying("")).await;
    flows::register(&app, "login@example.com", "198.51.100.1").await;

    let ok: Value = AxumTestRequest::post("/api/v1/auth/login")
        .json(&json!({"email": "LOGIN@example.com", "password": "correct-horse-battery"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(ok["token_type"], "bearer");

    let denied: Value = AxumTestRequest::post("/api/v1/auth/login")
        .json(&json!({"email": "login@example.com", "password": "wrong-password"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(denied["error"]["message"], "Incorrect email or password");

    AxumTestRequest::post("/api/v1/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "whatever-pw"}))
        .send(app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_requires_email() {
    let (app, _) = create_test_app(ScriptedLlmProvider::replying("")).await;

    let body: Value = AxumTestRequest::post("/api/v1/auth/login")
        .json(&json!({"email": "  ", "password": "whatever-pw"}))
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["error"]["message"], "Email is required");
}

// ============================================================================
// Refresh and token types
// ============================================================================

#[tokio::test]
async fn test_refresh_issues_new_access_token_and_keeps_refresh_token() {
    let (app, _) = create_test_app(ScriptedLlmProvider::replying("")).await;
    let tokens = flows::register(&app, "refresh@example.com", "198.51.100.1").await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap();

    let refreshed: Value = AxumTestRequest::post("/api/v1/auth/refresh")
        .json(&json!({"refresh_token": refresh_token}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(refreshed["refresh_token"], refresh_token);
    assert_eq!(refreshed["token_type"], "bearer");

    // The new access token works on a protected route
    AxumTestRequest::get("/api/v1/workouts/history")
        .bearer(refreshed["access_token"].as_str().unwrap())
        .send(app)
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_access_token_and_garbage() {
    let (app, _) = create_test_app(ScriptedLlmProvider::replying("")).await;
    let tokens = flows::register(&app, "wrongtype@example.com", "198.51.100.1").await;

    let body: Value = AxumTestRequest::post("/api/v1/auth/refresh")
        .json(&json!({"refresh_token": tokens["access_token"]}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["error"]["message"], "Invalid refresh token");

    AxumTestRequest::post("/api/v1/auth/refresh")
        .json(&json!({"refresh_token": "garbage"}))
        .send(app)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_accept_only_access_tokens() {
    let (app, _) = create_test_app(ScriptedLlmProvider::replying("")).await;
    let tokens = flows::register(&app, "guard@example.com", "198.51.100.1").await;

    AxumTestRequest::get("/api/v1/profile/me")
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    AxumTestRequest::get("/api/v1/profile/me")
        .bearer(tokens["refresh_token"].as_str().unwrap())
        .send(app.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // Authenticated but no profile yet
    AxumTestRequest::get("/api/v1/profile/me")
        .bearer(tokens["access_token"].as_str().unwrap())
        .send(app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
