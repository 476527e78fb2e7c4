//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A static header value (API key or host) is not a valid HTTP header value.
    #[error("Invalid header value for {0}")]
    HeaderValueError(&'static str),
}

/// Errors from a single IP lookup.
///
/// Every variant is terminal for that one user action: nothing is retried and
/// the history is left untouched.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The input was empty after trimming; no request was made.
    #[error("no IP address given")]
    EmptyInput,

    /// The API answered but reported a failure for this address.
    #[error("API reported no result for {ip} (status: {status})")]
    NotFound {
        /// Address that was looked up
        ip: String,
        /// The `status` field returned by the API
        status: String,
    },

    /// The API answered with a success status but a required field is missing.
    #[error("API response is missing {0}")]
    Malformed(&'static str),

    /// The API answered with a non-success HTTP status.
    #[error("API returned HTTP {0}")]
    Status(StatusCode),

    /// The request could not be sent or the response could not be read.
    #[error("API request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The response body was not valid JSON.
    #[error("API response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// User-facing categories of lookup failures.
///
/// Each category maps to one generic message shown inline; the technical
/// detail goes to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum LookupErrorKind {
    /// Nothing was entered
    EmptyInput,
    /// API-reported failure or malformed response
    InvalidOrNotFound,
    /// Network, HTTP status, or decoding failure
    ApiUnavailable,
}

impl LookupErrorKind {
    /// Message shown to the user for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupErrorKind::EmptyInput => "Please enter an IP address.",
            LookupErrorKind::InvalidOrNotFound => "Invalid or unknown IP address.",
            LookupErrorKind::ApiUnavailable => {
                "Could not query the geolocation API. Please try again."
            }
        }
    }
}

impl std::fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LookupError {
    /// Categorizes the error for display.
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            LookupError::EmptyInput => LookupErrorKind::EmptyInput,
            LookupError::NotFound { .. } | LookupError::Malformed(_) => {
                LookupErrorKind::InvalidOrNotFound
            }
            LookupError::Status(_) | LookupError::Request(_) | LookupError::Decode(_) => {
                LookupErrorKind::ApiUnavailable
            }
        }
    }

    /// Generic message shown to the user.
    pub fn user_message(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Error types for storage slot operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the slot file failed.
    #[error("Storage I/O error at {}: {source}", .path.display())]
    Io {
        /// Slot file or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The record list could not be serialized or parsed.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The in-memory store's lock was poisoned.
    #[error("Storage lock poisoned")]
    Poisoned,
}
