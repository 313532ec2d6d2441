//! Error types for loading mission configuration.
//!
//! Gameplay rejections (firing with no ammo, firing during reload) are not
//! errors; they are reported through [`crate::enums::FireRejection`].

use thiserror::Error;

/// Errors that can occur while reading a mission config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read mission config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid JSON for a mission record.
    #[error("failed to parse mission config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config parsed but describes an impossible mission.
    #[error("invalid mission config: {0}")]
    Invalid(String),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
