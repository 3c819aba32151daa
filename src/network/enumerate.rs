//! Interface enumeration: builds a [`Snapshot`] from an [`InterfaceSource`].

use std::collections::BTreeMap;

use thiserror::Error;

use super::classify::{ParseError, classify, network_of};
use super::{FetchError, InterfaceInfo, InterfaceSource, RawInterface, Snapshot};

/// Error type for enumeration.
///
/// Either failure aborts the whole enumeration; no partial snapshot is
/// returned.
#[derive(Debug, Error)]
pub enum EnumerateError {
    /// The platform interface listing failed.
    #[error("Failed to list interfaces: {0}")]
    Fetch(#[from] FetchError),

    /// A bound address could not be parsed.
    #[error("Failed to parse address on '{interface}': {source}")]
    Parse {
        /// Interface owning the address.
        interface: String,
        /// Underlying parse failure.
        #[source]
        source: ParseError,
    },
}

/// Lists all interfaces and classifies every bound address.
///
/// Addresses rendering to the same IP string overwrite each other, last one
/// wins.
///
/// # Errors
///
/// Returns [`EnumerateError::Fetch`] if listing fails and
/// [`EnumerateError::Parse`] if any single address is malformed.
pub fn enumerate<S: InterfaceSource + ?Sized>(source: &S) -> Result<Snapshot, EnumerateError> {
    let raw = source.interfaces()?;
    tracing::debug!(interfaces = raw.len(), "Enumerating network interfaces");

    let mut interfaces = BTreeMap::new();
    for iface in raw {
        let info = interface_info(&iface)?;
        interfaces.insert(iface.name, info);
    }

    Ok(Snapshot::new(interfaces))
}

fn interface_info(iface: &RawInterface) -> Result<InterfaceInfo, EnumerateError> {
    let mut addresses = BTreeMap::new();

    for raw in &iface.addresses {
        let network = network_of(raw).map_err(|source| EnumerateError::Parse {
            interface: iface.name.clone(),
            source,
        })?;
        let entry = classify(network);
        addresses.insert(entry.ip.to_string(), entry);
    }

    tracing::trace!(
        interface = %iface.name,
        addresses = addresses.len(),
        "Classified interface addresses"
    );

    Ok(InterfaceInfo {
        mtu: iface.mtu,
        flags: iface.flags,
        mac_addr: iface.hardware_addr,
        addresses,
    })
}
