//! Representative address selection.
//!
//! Each query walks the interface list from scratch and returns the first
//! eligible match in platform listing order.
//!
//! Eligibility:
//! - the interface must be up and not a loopback interface (otherwise none
//!   of its addresses are looked at)
//! - the address must not be a loopback address

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use thiserror::Error;

use crate::network::{
    FetchError, HardwareAddr, InterfaceSource, RawInterface, ipv4_projection, is_loopback,
};

/// Error type for representative address queries.
#[derive(Debug, Error)]
pub enum SelectError {
    /// No eligible interface carries a qualifying address.
    ///
    /// Expected on offline hosts; not a bug.
    #[error("not connected to the network")]
    NotConnected,

    /// The platform interface listing failed.
    #[error("Failed to list interfaces: {0}")]
    Fetch(#[from] FetchError),
}

impl SelectError {
    /// Returns true for [`SelectError::NotConnected`].
    #[must_use]
    pub const fn is_not_connected(&self) -> bool {
        matches!(self, Self::NotConnected)
    }
}

/// Returns the first qualifying IPv4 address.
///
/// # Errors
///
/// [`SelectError::NotConnected`] if there is none, [`SelectError::Fetch`]
/// if listing fails.
pub fn external_ipv4<S: InterfaceSource + ?Sized>(source: &S) -> Result<Ipv4Addr, SelectError> {
    first_match(source, |_, ip| ipv4_projection(ip))
}

/// Returns the first qualifying address without an IPv4 projection.
///
/// # Errors
///
/// [`SelectError::NotConnected`] if there is none, [`SelectError::Fetch`]
/// if listing fails.
pub fn external_ipv6<S: InterfaceSource + ?Sized>(source: &S) -> Result<Ipv6Addr, SelectError> {
    first_match(source, |_, ip| match ip {
        IpAddr::V6(v6) if ipv4_projection(ip).is_none() => Some(v6),
        _ => None,
    })
}

/// Returns the hardware address of the interface owning the first
/// qualifying IPv4 address.
///
/// The result may be empty if that interface has no hardware address
/// (tunnels, for example); that still counts as a match.
///
/// # Errors
///
/// [`SelectError::NotConnected`] if there is none, [`SelectError::Fetch`]
/// if listing fails.
pub fn active_mac<S: InterfaceSource + ?Sized>(source: &S) -> Result<HardwareAddr, SelectError> {
    first_match(source, |iface, ip| {
        ipv4_projection(ip).map(|_| iface.hardware_addr)
    })
}

fn first_match<S, T, F>(source: &S, mut pick: F) -> Result<T, SelectError>
where
    S: InterfaceSource + ?Sized,
    F: FnMut(&RawInterface, IpAddr) -> Option<T>,
{
    let interfaces = source.interfaces()?;

    interfaces
        .iter()
        .filter(|iface| iface.flags.is_external())
        .find_map(|iface| {
            iface
                .addresses
                .iter()
                .map(|address| address.ip)
                .filter(|&ip| !is_loopback(ip))
                .find_map(|ip| pick(iface, ip))
        })
        .ok_or(SelectError::NotConnected)
}
