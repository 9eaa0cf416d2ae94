// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports environment-driven server, auth, LLM, rate-limit, and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the gym coach server
//!
//! All settings come from environment variables; there is no configuration file.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LlmConfig,
    RateLimitBackend, RateLimitConfig, RateLimitPolicy, ServerConfig,
};
