//! Core error types for vidya-core.
//!
//! Scheduling input errors surface as [`ValidationError`]; storage and
//! configuration failures get their own hierarchies. Invalid timer
//! transitions are never errors -- they are silent no-ops by contract.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for vidya-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Scheduling input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Database-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors for malformed scheduling input.
///
/// Scheduling either produces a complete agenda or fails with one of
/// these -- no partial agenda is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No incomplete tasks were supplied to the scheduler.
    #[error("no tasks to schedule")]
    EmptyTaskList,

    /// The daily study budget is outside the schedulable range.
    #[error("daily study budget must fit at least one study block and at most {max} hours, got {got}")]
    InvalidDailyHours { got: f64, max: f64 },
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The data directory could not be created or accessed
    #[error("data directory unavailable: {0}")]
    DataDirUnavailable(#[from] std::io::Error),

    /// A stored row could not be decoded back into a core type
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
