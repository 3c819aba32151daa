//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Collector selection section
    #[serde(default)]
    pub collect: CollectSection,

    /// Kernel settings command section
    #[serde(default)]
    pub settings: SettingsSection,

    /// Output formatting section
    #[serde(default)]
    pub output: OutputSection,
}

/// Collector selection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectSection {
    /// Collectors to run, in order
    pub collectors: Option<Vec<String>>,
}

/// Kernel settings command section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsSection {
    /// Whether to run the settings command
    pub enabled: Option<bool>,

    /// Program to run
    pub command: Option<String>,

    /// Arguments for the program
    pub args: Option<Vec<String>>,
}

/// Output formatting section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Pretty-print JSON
    pub pretty: Option<bool>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# netfacts configuration file

[collect]
# Collectors to run, in order (default: all)
# Accepted values: "network", "top_level"
# Note: --collector CLI flags REPLACE this list entirely (not merged)
# collectors = ["network", "top_level"]

[settings]
# Run the kernel settings command as part of the network collector
# (default: true; --no-settings disables it)
# enabled = true

# Program and arguments producing "key: value" lines (default: sysctl -a net)
# command = "sysctl"
# args = ["-a", "net"]

[output]
# Pretty-print JSON output (default: true; --compact disables it)
# pretty = true
"#
    .to_string()
}
