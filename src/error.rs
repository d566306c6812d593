//! Error types for experiment configuration storage
//!
//! This module defines the error types used throughout the switchboard library.
//! Fallible internals return [`Result<T, Error>`]; the [`ConfigStore`](crate::ConfigStore)
//! facade converts these into safe defaults before they reach callers.

use std::path::PathBuf;

/// Errors that can occur while reading, writing or evaluating experiment configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON was well-formed but not shaped like an experiment configuration
    #[error("Invalid experiment configuration: {0}")]
    InvalidConfig(String),

    /// Namespace cannot be used as a file name
    #[error("Invalid namespace '{0}'")]
    InvalidNamespace(String),

    /// Store directory path exists but is not a directory
    #[error("Invalid store directory: {0}")]
    InvalidStoreDirectory(PathBuf),

    /// Invalid glob pattern in query
    #[error("Invalid glob pattern: {0}")]
    InvalidGlobPattern(String),

    /// Stored device UUID is not a UUID
    #[error("Invalid device UUID {0}")]
    InvalidDeviceUuid(String),

    /// No home directory could be derived from the environment
    #[error("{0} environment variable not set")]
    MissingHomeDirectory(&'static str),
}

/// Result type alias for convenience
///
/// # Example
///
/// ```rust
/// use switchboard::{ExperimentConfig, Result};
///
/// fn count_experiments(json: &str) -> Result<usize> {
///     let config = ExperimentConfig::parse(json)?;
///     Ok(config.len())
/// }
///
/// assert_eq!(count_experiments(r#"{"a":{"isActive":true}}"#).unwrap(), 1);
/// ```
pub type Result<T> = std::result::Result<T, Error>;
