//! Core network types for the interface snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use serde::{Serialize, Serializer};

/// Address family tag of a classified address.
///
/// Every successfully classified address carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// IPv4, including IPv4-mapped IPv6 addresses.
    Inet,
    /// IPv6 without an IPv4 projection.
    Inet6,
}

impl Family {
    /// Returns the textual tag (`inet` or `inet6`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inet => "inet",
            Self::Inet6 => "inet6",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interface flag bits relevant to address selection and reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)] // mirrors the kernel flag word
pub struct LinkFlags {
    /// Administratively up.
    pub up: bool,
    /// Supports broadcast.
    pub broadcast: bool,
    /// Loopback interface.
    pub loopback: bool,
    /// Point-to-point link.
    pub point_to_point: bool,
    /// Supports multicast.
    pub multicast: bool,
    /// Resources allocated (operationally running).
    pub running: bool,
}

impl LinkFlags {
    /// Returns true if the interface is up and not a loopback interface.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        self.up && !self.loopback
    }

    fn names(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.up, "up"),
            (self.broadcast, "broadcast"),
            (self.loopback, "loopback"),
            (self.point_to_point, "pointtopoint"),
            (self.multicast, "multicast"),
            (self.running, "running"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
    }
}

impl fmt::Display for LinkFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.names().collect::<Vec<_>>().join("|");
        if rendered.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(&rendered)
        }
    }
}

impl Serialize for LinkFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A link-layer (MAC) address, possibly absent.
///
/// Renders as lowercase colon-separated hex, or an empty string when the
/// interface has no hardware address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HardwareAddr(Option<[u8; 6]>);

impl HardwareAddr {
    /// The empty hardware address.
    pub const EMPTY: Self = Self(None);

    /// Creates a hardware address from raw octets.
    ///
    /// All-zero octets are treated as "no hardware address".
    #[must_use]
    pub fn from_octets(octets: [u8; 6]) -> Self {
        if octets.iter().all(|&b| b == 0) {
            Self::EMPTY
        } else {
            Self(Some(octets))
        }
    }

    /// Returns the raw octets, if any.
    #[must_use]
    pub const fn octets(&self) -> Option<[u8; 6]> {
        self.0
    }

    /// Returns true if there is no hardware address.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for HardwareAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(octets) = self.0 else {
            return Ok(());
        };
        for (i, byte) in octets.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for HardwareAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A classified interface address.
///
/// `netmask` is present if and only if the family is [`Family::Inet`];
/// `broadcast` additionally requires a non-loopback address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressEntry {
    /// The address itself (the key in the owning interface's address map).
    #[serde(skip)]
    pub ip: IpAddr,
    /// Address family.
    pub family: Family,
    /// Dotted-decimal netmask (inet only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<Ipv4Addr>,
    /// Dotted-decimal broadcast address (inet, non-loopback only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<Ipv4Addr>,
}

impl AddressEntry {
    /// Creates an `inet` entry.
    #[must_use]
    pub const fn inet(ip: Ipv4Addr, netmask: Ipv4Addr, broadcast: Option<Ipv4Addr>) -> Self {
        Self {
            ip: IpAddr::V4(ip),
            family: Family::Inet,
            netmask: Some(netmask),
            broadcast,
        }
    }

    /// Creates an `inet6` entry (no netmask, no broadcast).
    #[must_use]
    pub const fn inet6(ip: IpAddr) -> Self {
        Self {
            ip,
            family: Family::Inet6,
            netmask: None,
            broadcast: None,
        }
    }
}

/// Metadata and addresses of a single interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    /// Maximum transmission unit.
    pub mtu: u32,
    /// Rendered flag set, e.g. `up|broadcast|multicast`.
    pub flags: LinkFlags,
    /// Hardware address (empty string when absent).
    pub mac_addr: HardwareAddr,
    /// Classified addresses keyed by their textual IP.
    pub addresses: BTreeMap<String, AddressEntry>,
}

impl InterfaceInfo {
    /// Returns the entry for the given textual IP, if bound to this interface.
    #[must_use]
    pub fn address(&self, ip: &str) -> Option<&AddressEntry> {
        self.addresses.get(ip)
    }
}

/// A point-in-time view of all host interfaces, keyed by interface name.
///
/// Rebuilt from scratch on every enumeration; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    interfaces: BTreeMap<String, InterfaceInfo>,
}

impl Snapshot {
    pub(crate) const fn new(interfaces: BTreeMap<String, InterfaceInfo>) -> Self {
        Self { interfaces }
    }

    /// Returns the interface with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InterfaceInfo> {
        self.interfaces.get(name)
    }

    /// Iterates over `(name, info)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InterfaceInfo)> {
        self.interfaces.iter().map(|(name, info)| (name.as_str(), info))
    }

    /// Returns the number of interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Returns true if no interfaces were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}
