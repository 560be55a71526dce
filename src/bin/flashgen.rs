//! flashgen CLI Binary
//!
//! Command-line interface for generating, storing and reviewing flashcard sets.

use anyhow::Context;
use clap::Parser;
use flashgen::cli::{map_error, Cli, RunContext};
use flashgen::config::{ConfigLoader, FlashgenConfig};
use flashgen::error::FlashgenError;
use flashgen::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            match e.downcast_ref::<FlashgenError>() {
                Some(domain) => eprintln!("{}", map_error(domain)),
                None => eprintln!("Error: {:#}", e),
            }
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = ConfigLoader::resolve(&cli.workspace, cli.config.as_deref())?;
    if cli.data_dir.is_some() {
        config.storage.data_dir = cli.data_dir.clone();
    }
    let data_dir = config.storage.resolve_data_dir(&cli.workspace);

    let logging_config = build_logging_config(cli, &config);
    init_logging(&logging_config, &data_dir).context("Failed to initialize logging")?;
    info!("flashgen starting");

    let context = RunContext::from_parts(config, data_dir).map_err(|e| {
        error!("Error initializing flashgen: {}", e);
        e
    })?;

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            Ok(output)
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e.into())
        }
    }
}

/// Build logging configuration from CLI args and the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &FlashgenConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }

    logging
}
