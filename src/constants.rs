// ABOUTME: System-wide constants and defaults for the gym coach server
// ABOUTME: Service names, ports, token lifetimes, rate-limit policies, and model settings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Constants Module
//!
//! Hardcoded defaults. Environment overrides are read by [`crate::config`].

/// Service identifiers used in logs and health responses
pub mod service_names {
    /// HTTP server
    pub const GYM_COACH_SERVER: &str = "gym-coach-server";
    /// Language model provider
    pub const ANTHROPIC: &str = "anthropic";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
}

/// Route prefixes
pub mod endpoints {
    /// Prefix for every versioned API route
    pub const API_V1: &str = "/api/v1";
}

/// Token lifetimes
pub mod auth {
    /// Access token lifetime in minutes
    pub const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 1440;
    /// Refresh token lifetime in days
    pub const REFRESH_TOKEN_EXPIRE_DAYS: i64 = 30;
    /// Token type reported in token responses
    pub const TOKEN_TYPE_BEARER: &str = "bearer";
    /// Minimum password length
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Maximum password length
    pub const MAX_PASSWORD_LENGTH: usize = 100;
}

/// Built-in rate-limit policies
pub mod rate_limits {
    /// Registrations allowed per client IP per window
    pub const REGISTER_MAX_REQUESTS: u32 = 3;
    /// Registration window in seconds
    pub const REGISTER_WINDOW_SECS: u64 = 3600;
    /// Login attempts allowed per email per window
    pub const LOGIN_MAX_REQUESTS: u32 = 5;
    /// Login window in seconds
    pub const LOGIN_WINDOW_SECS: u64 = 900;
    /// Message returned when registration is throttled
    pub const REGISTER_LIMIT_MESSAGE: &str =
        "Too many registration attempts. Please try again in 1 hour.";
    /// Message returned when login is throttled
    pub const LOGIN_LIMIT_MESSAGE: &str =
        "Too many login attempts. Please try again in 15 minutes.";
    /// Seconds between sweeps of idle in-memory buckets
    pub const EVICTION_INTERVAL_SECS: u64 = 300;
    /// Redis key prefix for rate-limit buckets
    pub const REDIS_KEY_PREFIX: &str = "gym_coach:ratelimit:";
}

/// Language model defaults
pub mod llm {
    /// Model used for workout generation
    pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
    /// Maximum output tokens per generation
    pub const DEFAULT_MAX_TOKENS: u32 = 4000;
    /// Sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// Anthropic API base URL
    pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
    /// Anthropic API version header value
    pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
    /// Seconds the orchestrator waits for a plan before giving up
    pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;
    /// Seconds for the HTTP connect phase
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Default CORS origins for local frontends
pub mod cors {
    /// Comma-separated origins allowed when `CORS_ALLOWED_ORIGINS` is unset
    pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
}
