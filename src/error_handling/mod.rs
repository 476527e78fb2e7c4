//! Error handling.
//!
//! Errors fall into three groups:
//! - **Initialization**: logger or HTTP client setup failed (fatal at startup)
//! - **Lookup**: one user action failed (empty input, API failure, network)
//! - **Storage**: the storage slot could not be read or written (never fatal;
//!   the session continues in memory)

mod types;

// Re-export public API
pub use types::{InitializationError, LookupError, LookupErrorKind, StorageError};
