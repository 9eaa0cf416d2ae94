// ABOUTME: Exercise library seeding utility for the gym coach server
// ABOUTME: Inserts the built-in exercises, skipping or replacing existing names
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Exercise library seeder.
//!
//! Usage:
//! ```bash
//! # Seed exercises (uses DATABASE_URL from environment)
//! cargo run --bin seed-exercises
//!
//! # Override database URL
//! cargo run --bin seed-exercises -- --database-url sqlite:./data/gym_coach.db
//!
//! # Overwrite exercises that already exist
//! cargo run --bin seed-exercises -- --force
//! ```

use std::env;

use anyhow::Result;
use clap::Parser;
use gym_coach_server::{
    config::DatabaseUrl, database::Database, exercise_library::default_exercises, logging,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-exercises",
    about = "Gym Coach Exercise Library Seeder",
    long_about = "Load the built-in exercise reference library into the database"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Replace exercises that already exist by name
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();
    logging::init_from_env()?;

    let raw_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DatabaseUrl::default().to_connection_string());
    let url = DatabaseUrl::parse_url(&raw_url)?;

    info!("Seeding exercise library into {url}");
    let database = Database::new(&url).await?;

    let exercises = default_exercises();
    let written = database.seed_exercises(&exercises, args.force).await?;
    let total = database.count_exercises().await?;

    info!(
        "Seed complete: {written} of {} exercises written ({}), {total} in library",
        exercises.len(),
        if args.force { "replace" } else { "skip existing" }
    );

    Ok(())
}
