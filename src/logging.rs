//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format and destination
//! come from `[logging]` config, `FLASHGEN_LOG*` environment variables and CLI
//! flags. Command output goes to stdout, so logs default to stderr.

use crate::error::FlashgenError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Full filter directive, e.g. `FLASHGEN_LOG=flashgen::workflow=trace`.
pub const ENV_FILTER: &str = "FLASHGEN_LOG";
/// Comma-separated `module=level` pairs added on top of the configured level.
pub const ENV_MODULES: &str = "FLASHGEN_LOG_MODULES";
pub const ENV_FORMAT: &str = "FLASHGEN_LOG_FORMAT";
pub const ENV_OUTPUT: &str = "FLASHGEN_LOG_OUTPUT";

const LOG_FILE_NAME: &str = "flashgen.log";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch; when false no subscriber is installed
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is "file". Defaults to `<data_dir>/flashgen.log`.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        parse_level(&self.level)?;
        parse_format(&self.format)?;
        parse_output(&self.output)?;
        Ok(())
    }

    /// Log file location, defaulting into the data directory.
    pub fn file_path(&self, data_dir: &Path) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stdout,
    Stderr,
    File,
}

fn parse_level(level: &str) -> Result<&str, String> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(level),
        other => Err(format!(
            "Invalid log level: {} (must be trace, debug, info, warn, error or off)",
            other
        )),
    }
}

fn parse_format(format: &str) -> Result<LogFormat, String> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        )),
    }
}

fn parse_output(output: &str) -> Result<LogOutput, String> {
    match output {
        "stdout" => Ok(LogOutput::Stdout),
        "stderr" => Ok(LogOutput::Stderr),
        "file" => Ok(LogOutput::File),
        other => Err(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr' or 'file')",
            other
        )),
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (FLASHGEN_LOG, FLASHGEN_LOG_FORMAT, FLASHGEN_LOG_OUTPUT)
/// 2. CLI flags, already folded into `config` by the caller
/// 3. Configuration file
/// 4. Defaults
///
/// `data_dir` locates the default log file.
pub fn init_logging(config: &LoggingConfig, data_dir: &Path) -> Result<(), FlashgenError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let (writer, ansi) = match output {
        LogOutput::Stdout => (BoxMakeWriter::new(std::io::stdout), config.color),
        LogOutput::Stderr => (BoxMakeWriter::new(std::io::stderr), config.color),
        LogOutput::File => {
            let file = open_log_file(&config.file_path(data_dir))?;
            (BoxMakeWriter::new(std::sync::Mutex::new(file)), false)
        }
    };

    let registry = Registry::default().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
    };

    result.map_err(|e| FlashgenError::Config(format!("Failed to initialize logging: {}", e)))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, FlashgenError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            FlashgenError::Config(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            FlashgenError::Config(format!("Failed to open log file {}: {}", path.display(), e))
        })
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, FlashgenError> {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_FILTER) {
        return Ok(filter);
    }

    let level = parse_level(&config.level).map_err(FlashgenError::Config)?;
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);
    for (module, module_level) in &config.modules {
        filter = filter.add_directive(parse_directive(module, module_level)?);
    }

    if let Ok(modules) = std::env::var(ENV_MODULES) {
        for pair in modules.split(',') {
            if let Some((module, module_level)) = pair.split_once('=') {
                filter = filter.add_directive(parse_directive(module, module_level)?);
            }
        }
    }

    Ok(filter)
}

fn parse_directive(
    module: &str,
    level: &str,
) -> Result<tracing_subscriber::filter::Directive, FlashgenError> {
    format!("{}={}", module.trim(), level.trim())
        .parse()
        .map_err(|e| FlashgenError::Config(format!("Invalid log directive: {}", e)))
}

fn determine_format(config: &LoggingConfig) -> Result<LogFormat, FlashgenError> {
    if let Ok(format) = std::env::var(ENV_FORMAT) {
        if let Ok(format) = parse_format(&format) {
            return Ok(format);
        }
    }
    parse_format(&config.format).map_err(FlashgenError::Config)
}

fn determine_output(config: &LoggingConfig) -> Result<LogOutput, FlashgenError> {
    if let Ok(output) = std::env::var(ENV_OUTPUT) {
        return parse_output(&output).map_err(FlashgenError::Config);
    }
    parse_output(&config.output).map_err(FlashgenError::Config)
}
