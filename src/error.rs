//! Centralized error handling for hostfacts

use std::io;
use thiserror::Error;

/// Custom error type for hostfacts operations
#[derive(Error, Debug)]
pub enum HostfactsError {
    /// I/O errors (procfs/sysfs reads, writing the report)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parsing errors (invalid data format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// A collection routine failed while querying the OS
    #[error("routine '{routine}' failed: {message}")]
    Collection { routine: String, message: String },

    /// A worker terminated abnormally while running a routine
    #[error("worker running '{routine}' terminated abnormally: {message}")]
    Dispatch { routine: String, message: String },

    /// The worker pool could not be started
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl From<toml::de::Error> for HostfactsError {
    fn from(error: toml::de::Error) -> Self {
        HostfactsError::Config(error.to_string())
    }
}

/// Type alias for Results in hostfacts
pub type Result<T> = std::result::Result<T, HostfactsError>;
