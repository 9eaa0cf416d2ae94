// ABOUTME: HTTP server assembly and lifecycle for the gym coach API
// ABOUTME: Layers tracing, request IDs, CORS, and a request deadline over the route tree
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # HTTP Server
//!
//! [`build_router`] is what tests drive with `oneshot`; [`run`] binds the
//! listener and serves until SIGINT or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{http::HeaderName, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::{
    constants::rate_limits, middleware::setup_cors, resources::ServerResources, routes,
};

/// Header carrying the per-request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Slack added on top of the generation deadline for the whole request
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 30;

/// Build the complete application router with middleware layers
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let request_timeout = Duration::from_secs(
        resources
            .config
            .llm
            .generation_timeout_secs
            .saturating_add(REQUEST_TIMEOUT_MARGIN_SECS),
    );

    routes::api_router(resources).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(setup_cors(&resources.config.cors))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

/// Serve the API until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let app = build_router(&resources);
    let eviction = resources.rate_limiter.spawn_idle_eviction(
        resources.config.rate_limit.max_window_secs(),
        Duration::from_secs(rate_limits::EVICTION_INTERVAL_SECS),
    );
    info!("HTTP server listening on {addr}");

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;
    eviction.abort();
    served.context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
