//! Configuration layer for netfacts.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - `--config PATH`, or `<config dir>/netfacts/config.toml`
//!    when it exists
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! List options (`--collector`, `--settings-arg`) **replace** the TOML list
//! entirely (not merged).
//!
//! # Boolean Flag Semantics
//!
//! `--no-settings` and `--compact` only disable: they win over TOML, but a
//! missing flag defers to TOML and then to the default.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{AddressKind, Cli, Command};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{SettingsCommand, ValidatedConfig, write_default_config};
