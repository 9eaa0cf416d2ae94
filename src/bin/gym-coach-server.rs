// ABOUTME: Server binary for the gym coach API
// ABOUTME: Loads configuration, prepares the database, and serves HTTP until shutdown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Gym Coach API Server Binary
//!
//! Configuration comes from the environment; `--host` and `--http-port`
//! override the bind address.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use gym_coach_server::{
    config::ServerConfig, database::Database, exercise_library, logging,
    resources::ServerResources, server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "gym-coach-server")]
#[command(about = "Gym Coach API - workout plans generated from your training profile")]
pub struct Args {
    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;
    config.validate()?;

    info!("Starting Gym Coach API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;

    if config.database.seed_exercises && database.count_exercises().await? == 0 {
        let inserted = database
            .seed_exercises(&exercise_library::default_exercises(), false)
            .await?;
        info!("Seeded {inserted} exercises into an empty library");
    }

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::from_config(database, config).await?);
    info!(
        "Rate limiter backend: {}",
        resources.rate_limiter.backend_name()
    );

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
