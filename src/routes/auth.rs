// ABOUTME: User authentication route handlers for registration, login, and token refresh
// ABOUTME: Issues access/refresh token pairs and throttles credential endpoints
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Authentication routes
//!
//! Registration is throttled per client IP, login per email. Both return the
//! `X-RateLimit-*` headers of the decision that let them through.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    auth::{hash_password, verify_password},
    constants::{
        auth::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH},
        rate_limits,
    },
    errors::AppError,
    logging::AppLogger,
    middleware::{create_rate_limit_headers, enforce_rate_limit},
    models::User,
    resources::ServerResources,
    routes::JsonBody,
};

/// User registration request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterRequest {
    /// Account email, stored lowercased
    pub email: String,
    /// Plain-text password, 8 to 100 characters
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    /// Account email, matched case-insensitively
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshTokenRequest {
    /// Refresh token issued at register or login
    pub refresh_token: String,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register", post(Self::handle_register))
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/refresh", post(Self::handle_refresh))
            .with_state(resources)
    }

    /// Minimal structural email check: non-empty local part, dotted domain
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && !domain.contains('@')
            && !email.contains(char::is_whitespace)
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            && !domain.ends_with('.')
    }

    /// Password length check in characters
    #[must_use]
    pub fn is_valid_password(password: &str) -> bool {
        (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password.chars().count())
    }

    /// Client address used as the registration rate-limit key
    ///
    /// The socket peer unless `trust_proxy_headers` is set, in which case the
    /// first `X-Forwarded-For` hop or `X-Real-IP` wins when present.
    fn client_ip(
        headers: &HeaderMap,
        peer: Option<SocketAddr>,
        trust_proxy_headers: bool,
    ) -> String {
        let forwarded = trust_proxy_headers
            .then(|| {
                headers
                    .get("x-forwarded-for")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|v| v.split(',').next())
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .or_else(|| {
                        headers
                            .get("x-real-ip")
                            .and_then(|h| h.to_str().ok())
                            .map(str::trim)
                            .filter(|v| !v.is_empty())
                    })
            })
            .flatten();

        forwarded
            .map(ToOwned::to_owned)
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| "unknown".to_owned())
    }

    /// Handle POST /auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        peer: Option<ConnectInfo<SocketAddr>>,
        headers: HeaderMap,
        JsonBody(request): JsonBody<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let ip = Self::client_ip(
            &headers,
            peer.map(|ConnectInfo(addr)| addr),
            resources.config.rate_limit.trust_proxy_headers,
        );
        let decision = enforce_rate_limit(
            &resources.rate_limiter,
            &format!("register:{ip}"),
            resources.config.rate_limit.register,
            rate_limits::REGISTER_LIMIT_MESSAGE,
        )
        .await
        .inspect_err(|_| {
            AppLogger::log_security_event(
                "register_rate_limited",
                "low",
                &format!("Registration throttled for {ip}"),
                None,
            );
        })?;

        let email = request.email.trim().to_lowercase();
        if !Self::is_valid_email(&email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(format!(
                "Password must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters"
            )));
        }

        if resources.database.get_user_by_email(&email).await?.is_some() {
            return Err(AppError::already_exists("Email already registered"));
        }

        let password_hash = hash_password(request.password).await?;
        let user = User::new(email, password_hash);
        resources.database.create_user(&user).await?;

        let tokens = resources.auth_manager.create_tokens(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "register", true, None);
        info!(user_id = %user.id, "User registered");

        Ok((
            StatusCode::CREATED,
            create_rate_limit_headers(&decision),
            Json(tokens),
        )
            .into_response())
    }

    /// Handle POST /auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<LoginRequest>,
    ) -> Result<Response, AppError> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::invalid_input("Email is required"));
        }

        let decision = enforce_rate_limit(
            &resources.rate_limiter,
            &format!("login:{email}"),
            resources.config.rate_limit.login,
            rate_limits::LOGIN_LIMIT_MESSAGE,
        )
        .await?;

        let invalid = || AppError::auth_invalid("Incorrect email or password");

        let Some(user) = resources.database.get_user_by_email(&email).await? else {
            warn!("Login attempt for unknown email");
            return Err(invalid());
        };

        if !verify_password(request.password, user.password_hash.clone()).await? {
            AppLogger::log_auth_event(
                &user.id.to_string(),
                "login",
                false,
                Some("password mismatch"),
            );
            return Err(invalid());
        }

        let tokens = resources.auth_manager.create_tokens(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

        Ok((
            StatusCode::OK,
            create_rate_limit_headers(&decision),
            Json(tokens),
        )
            .into_response())
    }

    /// Handle POST /auth/refresh
    async fn handle_refresh(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<RefreshTokenRequest>,
    ) -> Result<Response, AppError> {
        let tokens = resources
            .auth_manager
            .refresh(&request.refresh_token)
            .map_err(|e| {
                debug!(error = %e, "Refresh token rejected");
                AppError::auth_invalid("Invalid refresh token")
            })?;

        Ok((StatusCode::OK, Json(tokens)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(AuthRoutes::is_valid_email("lifter@example.com"));
        assert!(AuthRoutes::is_valid_email("a.b+c@gym.co.uk"));
        assert!(!AuthRoutes::is_valid_email("no-at-sign.com"));
        assert!(!AuthRoutes::is_valid_email("@example.com"));
        assert!(!AuthRoutes::is_valid_email("user@localhost"));
        assert!(!AuthRoutes::is_valid_email("user@.com"));
        assert!(!AuthRoutes::is_valid_email("user@example."));
        assert!(!AuthRoutes::is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(!AuthRoutes::is_valid_password("short"));
        assert!(AuthRoutes::is_valid_password("12345678"));
        assert!(AuthRoutes::is_valid_password(&"x".repeat(100)));
        assert!(!AuthRoutes::is_valid_password(&"x".repeat(101)));
    }

    #[test]
    fn test_client_ip_ignores_proxy_headers_by_default() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "203.0.113.8".parse().unwrap());
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();

        assert_eq!(AuthRoutes::client_ip(&headers, Some(peer), false), "127.0.0.1");
        assert_eq!(AuthRoutes::client_ip(&headers, None, false), "unknown");
    }

    #[test]
    fn test_client_ip_uses_proxy_headers_when_trusted() {
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();

        let mut forwarded = HeaderMap::new();
        forwarded.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        forwarded.insert("x-real-ip", "203.0.113.8".parse().unwrap());
        assert_eq!(AuthRoutes::client_ip(&forwarded, Some(peer), true), "203.0.113.7");

        let mut real_ip = HeaderMap::new();
        real_ip.insert("x-real-ip", "203.0.113.8".parse().unwrap());
        assert_eq!(AuthRoutes::client_ip(&real_ip, Some(peer), true), "203.0.113.8");

        assert_eq!(AuthRoutes::client_ip(&HeaderMap::new(), Some(peer), true), "127.0.0.1");
    }
}
