//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

use std::path::PathBuf;

use crate::collector;

/// Default settings command.
pub const SETTINGS_COMMAND: &str = "sysctl";

/// Default settings command arguments.
pub const SETTINGS_ARGS: [&str; 2] = ["-a", "net"];

/// Whether kernel settings are collected by default.
pub const SETTINGS_ENABLED: bool = true;

/// Whether JSON output is pretty-printed by default.
pub const PRETTY: bool = true;

/// Config file name looked up under the user config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Application directory under the user config directory.
pub const APP_DIR: &str = "netfacts";

/// Default settings command arguments as owned strings.
#[must_use]
pub fn settings_args() -> Vec<String> {
    SETTINGS_ARGS.iter().map(ToString::to_string).collect()
}

/// Default collectors, in run order.
#[must_use]
pub fn collectors() -> Vec<String> {
    collector::ALL.iter().map(ToString::to_string).collect()
}

/// Per-user config file path (`<config dir>/netfacts/config.toml`), if the
/// platform has a config directory.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
