// ABOUTME: JWT-based user authentication with access and refresh token lifecycles
// ABOUTME: Handles HS256 token generation, typed validation, and bcrypt password hashing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Authentication and Token Management
//!
//! Tokens are HS256 JWTs carrying `sub` (user id), `email`, `type`, `iat` and `exp`.
//! Access tokens authorize API calls; refresh tokens can only mint new access
//! tokens. [`AuthManager::validate_token`] rejects a token whose `type` does not
//! match the caller's expectation.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::constants::auth::TOKEN_TYPE_BEARER;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Which lifecycle a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token for API calls
    Access,
    /// Long-lived token that can only mint access tokens
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Token lifecycle
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Parse the subject as a user ID
    ///
    /// # Errors
    ///
    /// Returns [`JwtValidationError::TokenMalformed`] if `sub` is not a UUID
    pub fn user_id(&self) -> Result<Uuid, JwtValidationError> {
        Uuid::parse_str(&self.sub).map_err(|e| JwtValidationError::TokenMalformed {
            details: format!("subject is not a valid user id: {e}"),
        })
    }
}

/// `JWT` validation error with detailed information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtValidationError {
    /// Token has expired
    #[error("JWT token expired at {}", expired_at.format("%Y-%m-%d %H:%M:%S UTC"))]
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature is invalid
    #[error("JWT token signature is invalid: {reason}")]
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    #[error("JWT token is malformed: {details}")]
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
    /// Token is valid but of the wrong lifecycle
    #[error("expected a {expected} token but received a {actual} token")]
    WrongTokenType {
        /// Type the caller required
        expected: TokenType,
        /// Type carried by the token
        actual: TokenType,
    },
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid("Could not validate credentials").with_source(other),
        }
    }
}

/// Token pair returned by register, login, and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token
    pub access_token: String,
    /// Refresh token
    pub refresh_token: String,
    /// Always `bearer`
    pub token_type: String,
}

/// Issues and validates HS256 tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl AuthManager {
    /// Create an authentication manager from configuration
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_token_ttl: Duration::minutes(config.access_token_expire_minutes),
            refresh_token_ttl: Duration::days(config.refresh_token_expire_days),
        }
    }

    /// Generate a token of the given type for `user`
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User, token_type: TokenType) -> AppResult<String> {
        self.generate_token_at(user, token_type, Utc::now())
    }

    fn generate_token_at(
        &self,
        user: &User,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
    ) -> AppResult<String> {
        let ttl = match token_type {
            TokenType::Access => self.access_token_ttl,
            TokenType::Refresh => self.refresh_token_ttl,
        };
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            token_type,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    /// Generate an access and refresh token pair
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn create_tokens(&self, user: &User) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: self.generate_token(user, TokenType::Access)?,
            refresh_token: self.generate_token(user, TokenType::Refresh)?,
            token_type: TOKEN_TYPE_BEARER.to_owned(),
        })
    }

    /// Validate signature, expiry, and lifecycle of a token
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is expired, tampered with,
    /// malformed, or not of the `expected` type
    pub fn validate_token(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))?;

        if claims.token_type != expected {
            warn!(
                user.id = %claims.sub,
                expected = %expected,
                actual = %claims.token_type,
                "JWT token type mismatch"
            );
            return Err(JwtValidationError::WrongTokenType {
                expected,
                actual: claims.token_type,
            });
        }

        debug!(user.id = %claims.sub, token_type = %expected, "JWT token validated");
        Ok(claims)
    }

    /// Mint a new access token from a valid refresh token
    ///
    /// The refresh token itself is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh token is invalid, expired, or an access token
    pub fn refresh(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        let claims = self.validate_token(refresh_token, TokenType::Refresh)?;
        let user = User {
            id: claims.user_id()?,
            email: claims.email,
            password_hash: String::new(),
            created_at: Utc::now(),
        };

        Ok(TokenResponse {
            access_token: self.generate_token(&user, TokenType::Access)?,
            refresh_token: refresh_token.to_owned(),
            token_type: TOKEN_TYPE_BEARER.to_owned(),
        })
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &JwtError) -> JwtValidationError {
        match e.kind() {
            ErrorKind::ExpiredSignature => JwtValidationError::TokenExpired {
                expired_at: Utc::now(),
            },
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Hash a password with bcrypt on the blocking pool
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics
pub async fn hash_password(password: String) -> AppResult<String> {
    task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against a bcrypt hash on the blocking pool
///
/// # Errors
///
/// Returns an error if the blocking task panics; a malformed hash verifies as `false`
pub async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    task::spawn_blocking(move || bcrypt::verify(&password, &password_hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}
