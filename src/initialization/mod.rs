//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON)
//! - HTTP client for the geolocation API
//! - Storage backend for the history
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use log::info;

use crate::config::Config;
use crate::storage::{FileStorage, MemoryStorage, Storage};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes the storage backend for the history.
///
/// Ephemeral sessions get a `MemoryStorage`; otherwise slots are files under
/// `config.store_dir`.
pub fn init_storage(config: &Config) -> Box<dyn Storage> {
    if config.ephemeral {
        info!("Ephemeral session: history is kept in memory only");
        Box::new(MemoryStorage::default())
    } else {
        info!("History stored in {}", config.store_dir.display());
        Box::new(FileStorage::new(&config.store_dir))
    }
}
