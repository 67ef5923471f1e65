// In app/src/main.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::prelude::*;

mod cli;
mod views;

use crate::cli::{Cli, Commands};

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings_from(&cli.config_dir)
        .with_context(|| format!("Failed to load settings from {}", cli.config_dir.display()))?;

    init_tracing(&settings.app.log_level, cli.verbose)?;
    tracing::info!(environment = %settings.app.environment, "Starting Copin Analyzer");

    let output = match &cli.command {
        Commands::List(args) => views::run_list(args, &settings)?,
        Commands::Events { input, now } => handle_events(input, now.unwrap_or_else(Utc::now))?,
    };

    // Results go to stdout, logs to stderr.
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing(log_level: &str, verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        log_level
            .parse::<tracing::Level>()
            .with_context(|| format!("Invalid log level `{log_level}`"))?
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
    Ok(())
}

/// Handles the logic for the `events` subcommand.
fn handle_events(input: &Path, now: DateTime<Utc>) -> Result<serde_json::Value> {
    let windows: Vec<events::EventWindow> = views::read_rows(input)?;
    tracing::info!(count = windows.len(), %now, "Classifying events.");

    let listed = events::list_events(&windows, now)?;
    let hidden = windows.len() - listed.len();
    if hidden > 0 {
        tracing::info!(hidden, "Some events ended too long ago and are hidden.");
    }

    Ok(serde_json::to_value(&listed)?)
}
