//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (API endpoint, storage slot, map defaults)
//! - CLI option types and parsing
//! - The library-level `Config` and its validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Command, Config, ConfigValidationError, LogFormat, LogLevel, Opt};
