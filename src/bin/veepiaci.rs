//! Veepiaci CLI Binary
//!
//! Command-line interface for verifying a directory against a checksum file.

use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::process;
use tracing::{error, info};
use veepiaci::cli::{exit_code, map_error, Cli, RunContext, EXIT_FATAL};
use veepiaci::config::ConfigLoader;
use veepiaci::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_FATAL);
    }

    info!("Veepiaci CLI starting");

    let working_dir = match std::env::current_dir().context("Cannot determine working directory") {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(EXIT_FATAL);
        }
    };

    let context = match RunContext::new(&working_dir, cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FATAL);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!(success = output.success, "Command completed");
            println!("{}", output.text);
            process::exit(exit_code(output.success));
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FATAL);
        }
    }
}

/// Build logging configuration from CLI args and the config file
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = load_logging_section(cli.config.as_deref());

    if cli.quiet {
        config.enabled = false;
        return config;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }

    // CLI arguments have the highest priority
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

/// Logging starts before the full configuration is validated, so load errors fall back to defaults.
fn load_logging_section(config_path: Option<&Path>) -> LoggingConfig {
    let loaded = match config_path {
        Some(path) => ConfigLoader::load_from_file(path).ok(),
        None => std::env::current_dir()
            .ok()
            .and_then(|dir| ConfigLoader::load(&dir).ok()),
    };
    loaded.map(|c| c.logging).unwrap_or_default()
}
