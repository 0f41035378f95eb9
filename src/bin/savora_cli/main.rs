// ABOUTME: Operator CLI for the Savora meal planning service
// ABOUTME: One-shot plan generation and recommended-defaults inspection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Savora

//! Savora operator CLI.
//!
//! Drives the plan-generation pipeline one-shot against the configured
//! external APIs, and prints the bundled recommended preferences for
//! inspection.
//!
//! Usage:
//! ```bash
//! # Generate and store a plan from a preferences file
//! cargo run --bin savora-cli -- generate \
//!     --client-id client-42 --preferences prefs.json --start-date 2025-09-01
//!
//! # Print the bundled recommended preferences
//! cargo run --bin savora-cli -- defaults
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use savora_core::models::MealPlanPreferences;
use savora_planner::backend::BackendClient;
use savora_planner::config::environment::ServerConfig;
use savora_planner::logging;
use savora_planner::rate_limiting::RequestRateLimiter;
use savora_planner::services::plan_generator::{GeneratePlanRequest, PlanGenerator};
use savora_providers::http_client::initialize_shared_client;
use savora_providers::recipes::RecipeClient;
use savora_providers::solver::SolverClient;

#[derive(Parser)]
#[command(
    name = "savora-cli",
    about = "Savora meal planning CLI",
    long_about = "Generate meal plans against the configured solver, recipe, and backend APIs"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a plan from a preferences JSON file and persist it
    Generate {
        /// Client to generate the plan for
        #[arg(long)]
        client_id: String,

        /// Path to a preferences JSON file
        #[arg(long)]
        preferences: PathBuf,

        /// First day of the plan (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Auto-log meals as their scheduled time passes
        #[arg(long)]
        auto_log: bool,
    },
    /// Print the bundled recommended preferences as JSON
    Defaults,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            client_id,
            preferences,
            start_date,
            auto_log,
        } => generate(client_id, preferences, start_date, auto_log).await,
        Command::Defaults => {
            println!(
                "{}",
                serde_json::to_string_pretty(&MealPlanPreferences::recommended())?
            );
            Ok(())
        }
    }
}

async fn generate(
    client_id: String,
    preferences_path: PathBuf,
    start_date: Option<NaiveDate>,
    auto_log_meals: bool,
) -> Result<()> {
    let config = ServerConfig::from_env().context("loading configuration")?;
    initialize_shared_client(config.http_timeout_secs, config.http_connect_timeout_secs);

    let raw = tokio::fs::read_to_string(&preferences_path)
        .await
        .with_context(|| format!("reading {}", preferences_path.display()))?;
    let preferences: MealPlanPreferences =
        serde_json::from_str(&raw).context("parsing preferences JSON")?;

    let start_day = start_date.unwrap_or_else(|| Utc::now().date_naive());
    let start = Utc.from_utc_datetime(&start_day.and_time(NaiveTime::MIN));

    let generator = PlanGenerator::new(
        Arc::new(SolverClient::new(config.solver_config())),
        Arc::new(RecipeClient::new(config.recipe_config())),
        Arc::new(BackendClient::new(config.backend_config())),
        Arc::new(RequestRateLimiter::new(config.rate_limit.clone())),
    );

    let generated = generator
        .generate_and_store(&GeneratePlanRequest {
            client_id,
            start_date: start,
            auto_log_meals,
            preferences,
        })
        .await?;

    info!(
        plan_id = generated.plan.id.as_deref().unwrap_or("-"),
        days = generated.plan.day_count(),
        recipes = generated.recipes.len(),
        meals = generated.meals.len(),
        skipped = generated.skipped_slots,
        "plan stored"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "planId": generated.plan.id,
            "startDate": generated.plan.start_date,
            "endDate": generated.plan.end_date,
            "recipes": generated.recipes.len(),
            "meals": generated.meals.len(),
            "skippedSlots": generated.skipped_slots,
        }))?
    );

    Ok(())
}
