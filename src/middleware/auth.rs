// ABOUTME: Bearer token authentication for protected API routes
// ABOUTME: Accepts only access tokens whose user still exists in the database
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use axum::http::HeaderMap;
use tracing::{debug, warn, Span};
use uuid::Uuid;

use crate::auth::{AuthManager, JwtValidationError, TokenType};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

/// Caller identity attached to a protected request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User ID from the token subject
    pub user_id: Uuid,
    /// Email stored for the user
    pub email: String,
}

/// Authenticates requests carrying `Authorization: Bearer <jwt>`
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: AuthManager,
    database: Database,
}

impl AuthMiddleware {
    /// Create the middleware over the shared token manager and database
    #[must_use]
    pub const fn new(auth_manager: AuthManager, database: Database) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate using the request headers
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the header is missing or malformed,
    /// the token fails validation or is not an access token, or the user no
    /// longer exists
    pub async fn authenticate_headers(&self, headers: &HeaderMap) -> AppResult<AuthenticatedUser> {
        let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
        self.authenticate_request(auth_header).await
    }

    /// Authenticate a raw `Authorization` header value
    ///
    /// # Errors
    ///
    /// See [`AuthMiddleware::authenticate_headers`]
    #[tracing::instrument(
        skip(self, auth_header),
        fields(user_id = tracing::field::Empty, success = tracing::field::Empty)
    )]
    pub async fn authenticate_request(
        &self,
        auth_header: Option<&str>,
    ) -> AppResult<AuthenticatedUser> {
        let Some(header) = auth_header else {
            Span::current().record("success", false);
            debug!("Authentication failed: missing authorization header");
            return Err(AppError::auth_required());
        };

        let Some(token) = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
        else {
            Span::current().record("success", false);
            warn!("Authentication failed: authorization header is not a bearer token");
            return Err(AppError::auth_invalid("Invalid authentication credentials"));
        };

        let claims = self
            .auth_manager
            .validate_token(token.trim(), TokenType::Access)
            .map_err(|e| {
                Span::current().record("success", false);
                match e {
                    JwtValidationError::WrongTokenType { .. } => {
                        AppError::auth_invalid("Invalid token type")
                    }
                    JwtValidationError::TokenExpired { .. } => AppError::auth_expired(),
                    _ => AppError::auth_invalid("Invalid authentication credentials"),
                }
            })?;

        let user_id = claims
            .user_id()
            .map_err(|_| AppError::auth_invalid("Invalid authentication credentials"))?;

        let user = self
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| {
                AppLogger::log_security_event(
                    "token_for_missing_user",
                    "medium",
                    &format!("Valid token presented for deleted user {user_id}"),
                    None,
                );
                AppError::auth_invalid("User not found")
            })?;

        Span::current()
            .record("user_id", user_id.to_string())
            .record("success", true);

        Ok(AuthenticatedUser {
            user_id: user.id,
            email: user.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::database::test_utils::create_test_db;
    use crate::errors::ErrorCode;
    use crate::models::User;

    async fn setup() -> (AuthMiddleware, AuthManager, User) {
        let db = create_test_db().await;
        let manager = AuthManager::new(&AuthConfig {
            jwt_secret: "middleware-test-secret-that-is-long-enough".to_owned(),
            access_token_expire_minutes: 60,
            refresh_token_expire_days: 30,
        });
        let user = User::new("auth@example.com".to_owned(), "h".to_owned());
        db.create_user(&user).await.unwrap();
        (AuthMiddleware::new(manager.clone(), db), manager, user)
    }

    #[tokio::test]
    async fn test_access_token_is_accepted() {
        let (middleware, manager, user) = setup().await;
        let token = manager.generate_token(&user, TokenType::Access).unwrap();

        let authed = middleware
            .authenticate_request(Some(&format!("Bearer {token}")))
            .await
            .unwrap();
        assert_eq!(authed.user_id, user.id);
        assert_eq!(authed.email, "auth@example.com");
    }

    #[tokio::test]
    async fn test_refresh_token_is_rejected() {
        let (middleware, manager, user) = setup().await;
        let token = manager.generate_token(&user, TokenType::Refresh).unwrap();

        let err = middleware
            .authenticate_request(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
        assert_eq!(err.message, "Invalid token type");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_headers() {
        let (middleware, _, _) = setup().await;

        let missing = middleware.authenticate_request(None).await.unwrap_err();
        assert_eq!(missing.code, ErrorCode::AuthRequired);

        let basic = middleware
            .authenticate_request(Some("Basic dXNlcjpwYXNz"))
            .await
            .unwrap_err();
        assert_eq!(basic.code, ErrorCode::AuthInvalid);

        let garbage = middleware
            .authenticate_request(Some("Bearer not.a.jwt"))
            .await
            .unwrap_err();
        assert_eq!(garbage.http_status(), 401);
    }

    #[tokio::test]
    async fn test_token_for_unknown_user_is_rejected() {
        let (middleware, manager, _) = setup().await;
        let ghost = User::new("ghost@example.com".to_owned(), "h".to_owned());
        let token = manager.generate_token(&ghost, TokenType::Access).unwrap();

        let err = middleware
            .authenticate_request(Some(&format!("Bearer {token}")))
            .await
            .unwrap_err();
        assert_eq!(err.message, "User not found");
    }
}
