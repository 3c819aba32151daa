//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A requested collector does not exist.
    #[error("Unknown collector '{name}': expected one of {known}")]
    UnknownCollector {
        /// The unknown name
        name: String,
        /// Comma-separated list of known collectors
        known: String,
    },

    /// No collector was selected.
    #[error("No collectors selected")]
    NoCollectors,

    /// The settings command is empty.
    #[error("Invalid settings command: {reason}")]
    InvalidCommand {
        /// Reason for invalidity
        reason: String,
    },
}
