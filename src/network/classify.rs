//! Address classification: family, netmask and broadcast derivation.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use ipnetwork::{IpNetwork, IpNetworkError, Ipv4Network, Ipv6Network};
use thiserror::Error;

use super::{AddressEntry, RawAddress};

/// A bound address could not be interpreted as an address/prefix pair.
#[derive(Debug, Error)]
#[error("Invalid CIDR '{input}': {source}")]
pub struct ParseError {
    /// The offending address in `ip/mask` or `ip/prefix` form.
    pub input: String,
    /// Underlying parse failure.
    #[source]
    pub source: IpNetworkError,
}

/// Returns the 4-byte IPv4 form of an address, if it has one.
///
/// IPv4 addresses project to themselves; IPv6 addresses project only when
/// they are IPv4-mapped (`::ffff:a.b.c.d`).
#[must_use]
pub const fn ipv4_projection(ip: IpAddr) -> Option<Ipv4Addr> {
    match ip {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    }
}

/// Loopback test that looks through IPv4-mapped IPv6 addresses.
#[must_use]
pub const fn is_loopback(ip: IpAddr) -> bool {
    match ipv4_projection(ip) {
        Some(v4) => v4.is_loopback(),
        None => ip.is_loopback(),
    }
}

/// Builds the address/prefix pair for a platform-reported address.
///
/// A missing netmask yields a host prefix (/32 or /128).
///
/// # Errors
///
/// Returns [`ParseError`] if the netmask is non-contiguous or of a
/// different family than the address.
pub fn network_of(address: &RawAddress) -> Result<IpNetwork, ParseError> {
    let Some(netmask) = address.netmask else {
        return Ok(IpNetwork::from(address.ip));
    };

    let network = match (address.ip, netmask) {
        (IpAddr::V4(ip), IpAddr::V4(mask)) => ipnetwork::ipv4_mask_to_prefix(mask)
            .and_then(|prefix| Ipv4Network::new(ip, prefix))
            .map(IpNetwork::V4),
        (IpAddr::V6(ip), IpAddr::V6(mask)) => ipnetwork::ipv6_mask_to_prefix(mask)
            .and_then(|prefix| Ipv6Network::new(ip, prefix))
            .map(IpNetwork::V6),
        _ => Err(IpNetworkError::InvalidCidrFormat(
            "netmask family does not match address".to_string(),
        )),
    };

    network.map_err(|source| ParseError {
        input: format!("{}/{netmask}", address.ip),
        source,
    })
}

/// Classifies a textual CIDR such as `192.168.1.10/24`.
///
/// # Errors
///
/// Returns [`ParseError`] if `cidr` is not valid CIDR notation.
pub fn classify_cidr(cidr: &str) -> Result<AddressEntry, ParseError> {
    let parsed = if cidr.contains('/') {
        IpNetwork::from_str(cidr)
    } else {
        Err(IpNetworkError::InvalidCidrFormat(format!(
            "missing prefix length in '{cidr}'"
        )))
    };

    parsed
        .map(classify)
        .map_err(|source| ParseError {
            input: cidr.to_string(),
            source,
        })
}

/// Classifies an address/prefix pair.
///
/// Addresses with an IPv4 projection are `inet` and get a netmask, plus a
/// broadcast address unless they are loopback. Everything else is `inet6`.
#[must_use]
pub fn classify(network: IpNetwork) -> AddressEntry {
    let Some(ip) = ipv4_projection(network.ip()) else {
        return AddressEntry::inet6(network.ip());
    };

    let prefix = match network {
        IpNetwork::V4(net) => net.prefix(),
        // Mapped addresses carry their IPv4 prefix in the low 32 bits.
        IpNetwork::V6(net) => net.prefix().saturating_sub(96),
    };
    let mask = prefix_mask(prefix);
    let broadcast = (!ip.is_loopback()).then(|| broadcast_of(ip, mask));

    AddressEntry::inet(ip, mask, broadcast)
}

/// Netmask for an IPv4 prefix length (clamped to 32).
#[must_use]
pub const fn prefix_mask(prefix: u8) -> Ipv4Addr {
    let bits = match prefix {
        0 => 0,
        p if p >= 32 => u32::MAX,
        p => u32::MAX << (32 - p),
    };
    Ipv4Addr::from_bits(bits)
}

/// `address OR (NOT mask)`, octet by octet.
#[must_use]
pub fn broadcast_of(ip: Ipv4Addr, mask: Ipv4Addr) -> Ipv4Addr {
    let ip = ip.octets();
    let mask = mask.octets();
    Ipv4Addr::new(
        ip[0] | !mask[0],
        ip[1] | !mask[1],
        ip[2] | !mask[2],
        ip[3] | !mask[3],
    )
}
