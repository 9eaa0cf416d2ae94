// ABOUTME: HTTP middleware for authentication, CORS, and rate limiting
// ABOUTME: Shared by every route module through ServerResources
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub mod auth;
pub mod cors;
pub mod rate_limiting;

// Authentication middleware
pub use auth::{AuthMiddleware, AuthenticatedUser};

// CORS configuration
pub use cors::setup_cors;

// Rate limiting helpers
pub use rate_limiting::{
    create_rate_limit_error, create_rate_limit_headers, enforce_rate_limit, headers,
};
