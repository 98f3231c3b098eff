//! Coffer CLI Binary
//!
//! Opcode-driven front end: `coffer <path> [opcode] [partCount]`. Missing or
//! unrecognized arguments print usage; operation failures print a message.
//! Either way the process exits 0 once it has run.

use clap::Parser;
use coffer::cli::{map_error, usage, Cli, RunContext};
use coffer::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let operation = match cli.operation() {
        Some(op) => op,
        None => {
            println!("{}", usage());
            return;
        }
    };

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Coffer CLI starting");

    let context = match RunContext::new(cli.config.as_deref(), &cli.format) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            return;
        }
    };

    match context.execute(&operation) {
        Ok(output) => {
            info!("Operation completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Operation failed: {}", e);
            eprintln!("{}", map_error(&e));
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    // Without --verbose the tool stays quiet; the rendered output is the
    // product, not the log.
    if !cli.verbose {
        let mut config = LoggingConfig::default();
        config.level = "off".to_string();
        return config;
    }

    let mut config = cli
        .config
        .as_deref()
        .and_then(|path| coffer::config::ConfigLoader::load(Some(path)).ok())
        .map(|c| c.logging)
        .unwrap_or_default();

    // CLI arguments take highest priority.
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
        config.file = file.clone();
    }

    config
}
