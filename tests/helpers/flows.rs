// ABOUTME: Multi-step API flows reused by integration tests
// ABOUTME: Registration and profile creation through the public HTTP routes

use axum::{http::StatusCode, Router};
use serde_json::{json, Value};

use super::axum_test::AxumTestRequest;

/// Register `email` over a connection from `client_ip` and return the token body
pub async fn register(app: &Router, email: &str, client_ip: &str) -> Value {
    AxumTestRequest::post("/api/v1/auth/register")
        .peer(client_ip)
        .json(&json!({"email": email, "password": "correct-horse-battery"}))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

/// Register and return only the access token
pub async fn access_token(app: &Router, email: &str, client_ip: &str) -> String {
    register(app, email, client_ip).await["access_token"]
        .as_str()
        .expect("access_token")
        .to_owned()
}

/// Create `profile` for the token's user
pub async fn create_profile(app: &Router, token: &str, profile: &Value) -> Value {
    AxumTestRequest::post("/api/v1/profile/create")
        .bearer(token)
        .json(profile)
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}
