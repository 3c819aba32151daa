//! Raw interface records, the interface source trait and its error type.

use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

use super::{HardwareAddr, LinkFlags};

/// Error type for interface listing operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// Callers decide whether to degrade or fail.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A system call used to list interfaces failed.
    #[cfg(unix)]
    #[error("{operation} failed: {source}")]
    Query {
        /// The failing operation (e.g. `getifaddrs`).
        operation: &'static str,
        /// Underlying errno.
        #[source]
        source: nix::Error,
    },

    /// Reading interface attributes from the filesystem failed.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// An address bound to an interface, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAddress {
    /// The bound address.
    pub ip: IpAddr,
    /// The subnet mask in address form. `None` means a host route
    /// (full-length prefix).
    pub netmask: Option<IpAddr>,
}

impl RawAddress {
    /// Creates a raw address.
    #[must_use]
    pub const fn new(ip: IpAddr, netmask: Option<IpAddr>) -> Self {
        Self { ip, netmask }
    }
}

/// A network interface as reported by the platform, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInterface {
    /// Interface name, unique per listing.
    pub name: String,
    /// Maximum transmission unit.
    pub mtu: u32,
    /// Flag bits.
    pub flags: LinkFlags,
    /// Hardware address, empty if the interface has none.
    pub hardware_addr: HardwareAddr,
    /// Bound addresses in listing order.
    pub addresses: Vec<RawAddress>,
}

impl RawInterface {
    /// Creates an interface with no MTU, hardware address or addresses yet.
    #[must_use]
    pub fn new(name: impl Into<String>, flags: LinkFlags) -> Self {
        Self {
            name: name.into(),
            mtu: 0,
            flags,
            hardware_addr: HardwareAddr::EMPTY,
            addresses: Vec::new(),
        }
    }

    /// Sets the MTU.
    #[must_use]
    pub const fn with_mtu(mut self, mtu: u32) -> Self {
        self.mtu = mtu;
        self
    }

    /// Sets the hardware address.
    #[must_use]
    pub const fn with_hardware_addr(mut self, hardware_addr: HardwareAddr) -> Self {
        self.hardware_addr = hardware_addr;
        self
    }

    /// Appends a bound address.
    #[must_use]
    pub fn with_address(mut self, ip: IpAddr, netmask: Option<IpAddr>) -> Self {
        self.addresses.push(RawAddress::new(ip, netmask));
        self
    }
}

/// Trait for listing the host's network interfaces.
///
/// # Design
///
/// - The platform backend implements this trait
/// - Enumeration and address selection are generic over it, so tests
///   inject synthetic interface lists
///
/// # Example
///
/// ```
/// use netfacts::network::{FetchError, InterfaceSource, LinkFlags, RawInterface};
///
/// struct Fixed(Vec<RawInterface>);
///
/// impl InterfaceSource for Fixed {
///     fn interfaces(&self) -> Result<Vec<RawInterface>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let source = Fixed(vec![RawInterface::new("eth0", LinkFlags::default())]);
/// assert_eq!(source.interfaces().unwrap().len(), 1);
/// ```
pub trait InterfaceSource: Send + Sync {
    /// Lists all interfaces with their flags, MTU, hardware address and
    /// bound addresses.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the platform query fails.
    ///
    /// # Implementation Notes
    ///
    /// - Implementations return ALL interfaces; filtering is done by the caller
    /// - Order is whatever the platform supplies; callers must not rely on it
    /// - Each call performs a fresh read; nothing is cached
    fn interfaces(&self) -> Result<Vec<RawInterface>, FetchError>;
}

impl<T: InterfaceSource + ?Sized> InterfaceSource for &T {
    fn interfaces(&self) -> Result<Vec<RawInterface>, FetchError> {
        (**self).interfaces()
    }
}
