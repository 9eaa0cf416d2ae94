// ABOUTME: HTTP glue for the request rate limiter
// ABOUTME: Turns limiter decisions into 429 errors and standard rate-limit headers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Rate Limiting Middleware with HTTP Headers
//!
//! Handlers call [`enforce_rate_limit`] before doing work. Denials become a
//! `429` carrying `Retry-After`; allowed requests can echo the remaining
//! allowance through [`create_rate_limit_headers`].

use chrono::Utc;
use http::{HeaderMap, HeaderValue};

use crate::config::RateLimitPolicy;
use crate::errors::{AppError, AppResult};
use crate::rate_limiting::{RateLimitDecision, RateLimiter};

/// HTTP header names for rate limiting
pub mod headers {
    /// Maximum requests allowed in the current window
    pub const X_RATE_LIMIT_LIMIT: &str = "X-RateLimit-Limit";
    /// Remaining requests in the current window
    pub const X_RATE_LIMIT_REMAINING: &str = "X-RateLimit-Remaining";
    /// Unix timestamp when the oldest counted request leaves the window
    pub const X_RATE_LIMIT_RESET: &str = "X-RateLimit-Reset";
}

/// Create a `HeaderMap` with rate limit headers
#[must_use]
pub fn create_rate_limit_headers(decision: &RateLimitDecision) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(headers::X_RATE_LIMIT_LIMIT, HeaderValue::from(decision.limit));
    map.insert(
        headers::X_RATE_LIMIT_REMAINING,
        HeaderValue::from(decision.remaining),
    );
    if let Some(reset_at) = decision.reset_at {
        map.insert(
            headers::X_RATE_LIMIT_RESET,
            HeaderValue::from(reset_at.timestamp()),
        );
    }
    map
}

/// Create a rate limit exceeded error from a denied decision
#[must_use]
pub fn create_rate_limit_error(decision: &RateLimitDecision, message: &str) -> AppError {
    let retry_after = decision.retry_after_secs.unwrap_or(1);
    let reset_at = decision.reset_at.unwrap_or_else(Utc::now);
    AppError::rate_limit_exceeded(message, decision.limit, retry_after, reset_at)
}

/// Check `identifier` against `policy`, failing with 429 when denied
///
/// # Errors
///
/// Returns a rate-limit error when the request is denied, or the store's
/// error if it cannot be reached
pub async fn enforce_rate_limit(
    limiter: &RateLimiter,
    identifier: &str,
    policy: RateLimitPolicy,
    message: &str,
) -> AppResult<RateLimitDecision> {
    let decision = limiter
        .check_detailed(identifier, policy.max_requests, policy.window_secs)
        .await?;

    if decision.allowed {
        Ok(decision)
    } else {
        Err(create_rate_limit_error(&decision, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[tokio::test]
    async fn test_denial_becomes_429_with_retry_after() {
        let limiter = RateLimiter::in_memory();
        let policy = RateLimitPolicy {
            max_requests: 1,
            window_secs: 60,
        };

        let first = enforce_rate_limit(&limiter, "ip:1", policy, "slow down")
            .await
            .unwrap();
        assert_eq!(first.remaining, 0);

        let err = enforce_rate_limit(&limiter, "ip:1", policy, "slow down")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RateLimitExceeded);
        assert_eq!(err.message, "slow down");
        assert!(err.retry_after_secs.unwrap() <= 60);
    }

    #[tokio::test]
    async fn test_headers_reflect_decision() {
        let limiter = RateLimiter::in_memory();
        let decision = limiter.check_detailed("k", 5, 900).await.unwrap();
        let map = create_rate_limit_headers(&decision);

        assert_eq!(map[headers::X_RATE_LIMIT_LIMIT], "5");
        assert_eq!(map[headers::X_RATE_LIMIT_REMAINING], "4");
    }
}
