//! Application execution logic.
//!
//! This module builds the collector registry from the validated config and
//! runs the selected subcommand, writing results to stdout.

use std::io::{self, Write};

use serde_json::{Map, Value};
use thiserror::Error;

use netfacts::collector::{CollectError, NetworkCollector, Registry, TopLevelCollector};
use netfacts::config::{AddressKind, ValidatedConfig};
use netfacts::network::InterfaceSource;
use netfacts::network::platform::PlatformSource;
use netfacts::select::{self, SelectError};
use netfacts::settings::{SettingsReader, SystemCommand};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// A collector failed.
    #[error("Collection failed: {0}")]
    Collect(#[from] CollectError),

    /// A representative address query failed.
    #[error("Address lookup failed: {0}")]
    Select(#[from] SelectError),

    /// The result could not be rendered as JSON.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl RunError {
    /// Returns true when the failure is an address query finding no
    /// external interface.
    pub const fn is_not_connected(&self) -> bool {
        matches!(self, Self::Select(e) if e.is_not_connected())
    }
}

/// Prints one representative address, or runs the selected collectors.
///
/// `init` never reaches here; it runs before the config is loaded.
///
/// # Errors
///
/// Returns [`RunError`] if collection, lookup, or output fails.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it queries the live host.
#[cfg(not(tarpaulin_include))]
pub fn execute(config: &ValidatedConfig) -> Result<(), RunError> {
    let output = if let Some(kind) = config.address {
        address_line(&PlatformSource::new(), kind)?
    } else {
        let registry = build_registry(config);
        tracing::debug!(collectors = ?registry.names(), "Registry ready");
        let results = registry.collect_selected(&config.collectors)?;
        render(results, config.pretty)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").map_err(RunError::Output)
}

/// Builds the registry holding every known collector.
///
/// The network collector gets a settings reader unless settings are disabled.
pub fn build_registry(config: &ValidatedConfig) -> Registry {
    let mut network = NetworkCollector::new(PlatformSource::new());
    if let Some(settings) = &config.settings {
        network = network.with_settings(SettingsReader::new(
            SystemCommand,
            settings.program.clone(),
            settings.args.clone(),
        ));
    }

    Registry::new()
        .with(network)
        .with(TopLevelCollector::new(PlatformSource::new()))
}

/// Renders collector results as one JSON object.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(results: Map<String, Value>, pretty: bool) -> Result<String, serde_json::Error> {
    let value = Value::Object(results);
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}

/// Looks up one representative address and formats it for printing.
///
/// # Errors
///
/// Returns [`SelectError::NotConnected`] when no external interface
/// carries the requested address, or the listing error.
pub fn address_line<S: InterfaceSource + ?Sized>(
    source: &S,
    kind: AddressKind,
) -> Result<String, SelectError> {
    Ok(match kind {
        AddressKind::Ipv4 => select::external_ipv4(source)?.to_string(),
        AddressKind::Ipv6 => select::external_ipv6(source)?.to_string(),
        AddressKind::Mac => select::active_mac(source)?.to_string(),
    })
}

