// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the oneshot request builder and API flow helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
pub mod flows;
