//! # Bwrs Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! `bwrs` manages a single bitwarden_rs container on the local Docker host.
//! This file handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and connecting to Docker
//! - Dispatching the chosen operation and printing its result
//!
//! ## Examples
//!
//! ```bash
//! bwrs start
//! bwrs status
//! bwrs -v restart
//! BWRS_CONFIG=/etc/bwrs.toml bwrs purge
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap (invalid operations exit here, before Docker is touched)
//! 2. Configure logging based on verbosity level
//! 3. Load and check configuration, then build the Docker-backed controller
//! 4. Run the operation, print the outcome, or print the error and exit 1
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Lifecycle operations and dispatch
mod common; // Docker layer
mod core; // Configuration and errors

use crate::common::docker::{connect::connect_docker, BollardEngine};
use crate::core::error::Result;
use commands::{LifecycleController, Operation};

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "bwrs",
    about = "Manage the bitwarden_rs docker service",
    long_about = "Start, stop, inspect, remove or restart the bitwarden_rs container.\n\
                  Container name, image, domain, data directory and port come from the configuration file.",
    version
)]
struct Cli {
    /// Operation to perform
    #[arg(value_enum)]
    operation: Operation,

    /// Configuration file (defaults to the user config directory, then built-in defaults)
    #[arg(long, value_name = "FILE", env = "BWRS_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Builds the controller and performs the single requested operation.
async fn run(cli: Cli) -> Result<()> {
    let config = core::config::load_config(cli.config.as_deref())?;
    // Connecting fails outright without a daemon, so config errors go first.
    cli.operation.preflight(&config)?;
    let engine = BollardEngine::new(connect_docker().await?);
    let controller = LifecycleController::new(engine, config);
    tracing::info!(
        "Managing container '{}' ({})",
        controller.config().service.container_name,
        controller.config().service.image
    );

    let outcome = commands::dispatch(&controller, cli.operation).await?;
    println!("{}", outcome);
    Ok(())
}
