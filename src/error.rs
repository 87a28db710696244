// src/error.rs

//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::metadata::LookupError;

/// Errors surfaced by packdeps operations
///
/// Classification itself never fails; these cover loading configuration,
/// reading status input and direct store queries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pack status input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pack metadata lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

/// Result type for packdeps operations
pub type Result<T> = std::result::Result<T, Error>;
