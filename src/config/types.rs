//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    API_KEY_ENV, DEFAULT_API_HOST, DEFAULT_API_URL, DEFAULT_STORE_DIR, DEFAULT_TIMEOUT_SECS,
    STORAGE_KEY,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// Global flags configure the API client, storage, and logging; the optional
/// subcommand selects a one-shot action. Without a subcommand an interactive
/// shell session is started.
///
/// # Examples
///
/// ```bash
/// # Interactive session
/// ipscope
///
/// # One-shot lookup
/// ipscope lookup 8.8.8.8
///
/// # Filtered history
/// ipscope list --filter google
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "ipscope",
    about = "Looks up IP geolocation data and keeps a filterable history."
)]
pub struct Opt {
    /// Action to run (defaults to the interactive shell)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Directory holding the lookup history
    #[arg(long, global = true, default_value = DEFAULT_STORE_DIR)]
    pub store_dir: PathBuf,

    /// Keep the history in memory only (nothing is read or written)
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Geolocation API base URL
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Geolocation API host header value
    #[arg(long, global = true, default_value = DEFAULT_API_HOST)]
    pub api_host: String,

    /// RapidAPI key (falls back to the IPSCOPE_API_KEY environment variable)
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,
}

/// One-shot actions available from the command line.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up an IP address and add it to the history
    Lookup {
        /// IP address to look up
        ip: String,
    },
    /// Print the history table
    List {
        /// Only show records whose ip, country, city, ISP or timezone contains this text
        #[arg(long, short)]
        filter: Option<String>,
    },
    /// Select a record and show its location on the map
    Show {
        /// Record id
        id: u64,
    },
    /// Delete a record from the history
    Delete {
        /// Record id
        id: u64,
    },
    /// Start an interactive session (default)
    Shell,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through `clap`.
///
/// # Examples
///
/// ```no_run
/// use ipscope::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     store_dir: PathBuf::from("/tmp/ipscope"),
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Directory holding the storage slots
    pub store_dir: PathBuf,

    /// Storage slot name for the record list
    pub storage_key: String,

    /// Keep the history in memory only
    pub ephemeral: bool,

    /// Geolocation API base URL
    pub api_url: String,

    /// Value of the `x-rapidapi-host` header
    pub api_host: String,

    /// Value of the `x-rapidapi-key` header (omitted when `None`)
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            storage_key: STORAGE_KEY.to_string(),
            ephemeral: false,
            api_url: DEFAULT_API_URL.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Self {
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
            store_dir: opt.store_dir.clone(),
            storage_key: STORAGE_KEY.to_string(),
            ephemeral: opt.ephemeral,
            api_url: opt.api_url.clone(),
            api_host: opt.api_host.clone(),
            api_key: opt.api_key.clone(),
            timeout_seconds: opt.timeout_seconds,
        }
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is expected instead
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

impl Config {
    /// Checks that the configuration can drive a session.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found, with a message describing the
    /// expected value.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }

        match url::Url::parse(&self.api_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigValidationError {
                    field: "api_url",
                    message: format!(
                        "scheme must be http or https (got '{}')",
                        parsed.scheme()
                    ),
                });
            }
            Err(e) => {
                return Err(ConfigValidationError {
                    field: "api_url",
                    message: format!("'{}' is not a valid URL: {}", self.api_url, e),
                });
            }
        }

        if self.api_host.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "api_host",
                message: "must not be empty (e.g. ip-geo-location.p.rapidapi.com)".to_string(),
            });
        }

        if self.storage_key.trim().is_empty()
            || self
                .storage_key
                .contains(|c: char| c == '/' || c == '\\' || c == '.')
        {
            return Err(ConfigValidationError {
                field: "storage_key",
                message: "must be a non-empty name without path separators or dots".to_string(),
            });
        }

        Ok(())
    }

    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
