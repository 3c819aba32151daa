//! Named collectors exposed to a host framework.
//!
//! A collector is a named, parameterless unit of work returning a JSON value.
//! The [`Registry`] holds an ordered set of them and runs them by name.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::network::{self, EnumerateError, InterfaceSource, Snapshot};
use crate::select::{self, SelectError};
use crate::settings::{CommandError, SettingsMap, SettingsReader};

/// Name of the network collector.
pub const NETWORK: &str = "network";

/// Name of the top-level collector.
pub const TOP_LEVEL: &str = "top_level";

/// All collector names, in default run order.
pub const ALL: [&str; 2] = [NETWORK, TOP_LEVEL];

/// Error type for collection.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Interface enumeration failed.
    #[error(transparent)]
    Enumerate(#[from] EnumerateError),

    /// A representative address query failed.
    #[error(transparent)]
    Select(#[from] SelectError),

    /// The settings command failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The result could not be converted to JSON.
    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No collector with the given name is registered.
    #[error("Unknown collector '{0}'")]
    Unknown(String),
}

/// A named, parameterless unit of work.
pub trait Collector: Send + Sync {
    /// Returns the constant collector name.
    fn name(&self) -> &'static str;

    /// Runs the collection.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError`] if any underlying query fails.
    fn collect(&self) -> Result<Value, CollectError>;
}

/// Result of the network collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkFacts {
    /// Per-interface snapshot.
    pub interfaces: Snapshot,
    /// Kernel network settings, when a settings reader is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsMap>,
}

/// Collects the interface snapshot and, optionally, kernel settings.
#[derive(Debug)]
pub struct NetworkCollector<S> {
    source: S,
    settings: Option<SettingsReader>,
}

impl<S: InterfaceSource> NetworkCollector<S> {
    /// Creates a collector without a settings reader.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            settings: None,
        }
    }

    /// Attaches a settings reader.
    #[must_use]
    pub fn with_settings(mut self, reader: SettingsReader) -> Self {
        self.settings = Some(reader);
        self
    }

    /// Runs the collection with a typed result.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError`] if enumeration or the settings command fails.
    pub fn facts(&self) -> Result<NetworkFacts, CollectError> {
        let interfaces = network::enumerate(&self.source)?;
        let settings = self
            .settings
            .as_ref()
            .map(SettingsReader::read)
            .transpose()?;

        Ok(NetworkFacts {
            interfaces,
            settings,
        })
    }
}

impl<S: InterfaceSource> Collector for NetworkCollector<S> {
    fn name(&self) -> &'static str {
        NETWORK
    }

    fn collect(&self) -> Result<Value, CollectError> {
        Ok(serde_json::to_value(self.facts()?)?)
    }
}

/// Result of the top-level collector.
///
/// A field is `None` when its query reported "not connected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopLevelFacts {
    /// External IPv4 address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipaddress: Option<String>,
    /// External IPv6 address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip6address: Option<String>,
    /// Hardware address of the interface holding the external IPv4 address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macaddress: Option<String>,
}

/// Collects the representative addresses of the host.
#[derive(Debug)]
pub struct TopLevelCollector<S> {
    source: S,
}

impl<S: InterfaceSource> TopLevelCollector<S> {
    /// Creates a top-level collector.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Runs the three queries with a typed result.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Select`] if listing fails. "Not connected"
    /// is not an error here; the field is left empty instead.
    pub fn facts(&self) -> Result<TopLevelFacts, CollectError> {
        Ok(TopLevelFacts {
            ipaddress: connected(select::external_ipv4(&self.source))?,
            ip6address: connected(select::external_ipv6(&self.source))?,
            macaddress: connected(select::active_mac(&self.source))?,
        })
    }
}

impl<S: InterfaceSource> Collector for TopLevelCollector<S> {
    fn name(&self) -> &'static str {
        TOP_LEVEL
    }

    fn collect(&self) -> Result<Value, CollectError> {
        Ok(serde_json::to_value(self.facts()?)?)
    }
}

fn connected<T: ToString>(result: Result<T, SelectError>) -> Result<Option<String>, SelectError> {
    match result {
        Ok(value) => Ok(Some(value.to_string())),
        Err(SelectError::NotConnected) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Ordered set of collectors.
#[derive(Default)]
pub struct Registry {
    collectors: Vec<Box<dyn Collector>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collector. A collector with the same name replaces the old one.
    #[must_use]
    pub fn with<C: Collector + 'static>(mut self, collector: C) -> Self {
        self.collectors.retain(|c| c.name() != collector.name());
        self.collectors.push(Box::new(collector));
        self
    }

    /// Returns the registered names in run order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.collectors.iter().map(|c| c.name()).collect()
    }

    /// Looks up a collector by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Collector> {
        self.collectors
            .iter()
            .find(|c| c.name() == name)
            .map(|c| &**c)
    }

    /// Runs every collector, keyed by name.
    ///
    /// # Errors
    ///
    /// Returns the first [`CollectError`]; no partial result.
    pub fn collect_all(&self) -> Result<Map<String, Value>, CollectError> {
        self.collectors
            .iter()
            .map(|c| -> Result<(String, Value), CollectError> {
                Ok((c.name().to_string(), c.collect()?))
            })
            .collect()
    }

    /// Runs the named collectors in the given order, keyed by name.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Unknown`] for an unregistered name, or the
    /// first collection failure.
    pub fn collect_selected<N: AsRef<str>>(
        &self,
        names: &[N],
    ) -> Result<Map<String, Value>, CollectError> {
        names
            .iter()
            .map(|name| -> Result<(String, Value), CollectError> {
                let name = name.as_ref();
                let collector = self
                    .get(name)
                    .ok_or_else(|| CollectError::Unknown(name.to_string()))?;
                tracing::debug!(collector = name, "Running collector");
                Ok((name.to_string(), collector.collect()?))
            })
            .collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("collectors", &self.names())
            .finish()
    }
}
