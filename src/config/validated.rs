//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;

use crate::collector;

use super::cli::{AddressKind, Cli, Command};
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// The kernel settings command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsCommand {
    /// Program name or path
    pub program: String,
    /// Program arguments
    pub args: Vec<String>,
}

impl fmt::Display for SettingsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Address to print instead of running collectors (`address` subcommand)
    pub address: Option<AddressKind>,

    /// Collectors to run, in order
    pub collectors: Vec<String>,

    /// Settings command, `None` if disabled
    pub settings: Option<SettingsCommand>,

    /// Pretty-print JSON output
    pub pretty: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings_str = self
            .settings
            .as_ref()
            .map_or_else(|| "disabled".to_string(), ToString::to_string);

        write!(
            f,
            "Config {{ collectors: [{}], settings: {}, pretty: {} }}",
            self.collectors.join(", "),
            settings_str,
            self.pretty,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A collector name is unknown, or the selection is empty
    /// - The settings program is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let collectors = Self::resolve_collectors(cli, toml)?;
        let settings = Self::resolve_settings(cli, toml)?;

        // Priority: CLI flag > TOML > default
        let pretty = if cli.compact {
            false
        } else {
            toml.and_then(|t| t.output.pretty)
                .unwrap_or(defaults::PRETTY)
        };

        Ok(Self {
            address: match cli.command {
                Some(Command::Address { kind }) => Some(kind),
                _ => None,
            },
            collectors,
            settings,
            pretty,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. Otherwise
    /// the per-user config file is loaded when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::user_config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(ref path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_collectors(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<String>, ConfigError> {
        // CLI list replaces the TOML list entirely
        let collectors = if cli.collectors.is_empty() {
            toml.and_then(|t| t.collect.collectors.clone())
                .unwrap_or_else(defaults::collectors)
        } else {
            cli.collectors.clone()
        };

        if collectors.is_empty() {
            return Err(ConfigError::NoCollectors);
        }

        if let Some(name) = collectors
            .iter()
            .find(|name| !collector::ALL.contains(&name.as_str()))
        {
            return Err(ConfigError::UnknownCollector {
                name: name.clone(),
                known: collector::ALL.join(", "),
            });
        }

        let mut unique: Vec<String> = Vec::with_capacity(collectors.len());
        for name in collectors {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }

        Ok(unique)
    }

    fn resolve_settings(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<SettingsCommand>, ConfigError> {
        let section = toml.map(|t| &t.settings);

        let enabled = !cli.no_settings
            && section
                .and_then(|s| s.enabled)
                .unwrap_or(defaults::SETTINGS_ENABLED);
        if !enabled {
            return Ok(None);
        }

        let program = cli
            .settings_command
            .clone()
            .or_else(|| section.and_then(|s| s.command.clone()))
            .unwrap_or_else(|| defaults::SETTINGS_COMMAND.to_string());

        if program.trim().is_empty() {
            return Err(ConfigError::InvalidCommand {
                reason: "program must not be empty".to_string(),
            });
        }

        let args = if cli.settings_args.is_empty() {
            section
                .and_then(|s| s.args.clone())
                .unwrap_or_else(defaults::settings_args)
        } else {
            cli.settings_args.clone()
        };

        Ok(Some(SettingsCommand { program, args }))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

