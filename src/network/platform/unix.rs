//! Unix interface listing using `getifaddrs`.

use std::collections::HashMap;
use std::net::IpAddr;

use nix::ifaddrs::{InterfaceAddress, getifaddrs};
use nix::net::if_::InterfaceFlags;
use nix::sys::socket::{SockaddrLike, SockaddrStorage};

use crate::network::{
    FetchError, HardwareAddr, InterfaceSource, LinkFlags, RawAddress, RawInterface,
};

/// Unix implementation of [`InterfaceSource`] using `getifaddrs`.
///
/// `getifaddrs` returns one entry per (interface, address) pair; entries are
/// grouped by device name in first-seen order, with labelled aliases folded
/// into their device. Link-layer entries supply the hardware address.
///
/// # Example
///
/// ```no_run
/// use netfacts::network::{InterfaceSource, platform::UnixSource};
///
/// let source = UnixSource::new();
/// for iface in source.interfaces().expect("Failed to list interfaces") {
///     println!("{} mtu={} flags={}", iface.name, iface.mtu, iface.flags);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnixSource {
    _private: (),
}

impl UnixSource {
    /// Creates a new Unix interface source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceSource for UnixSource {
    fn interfaces(&self) -> Result<Vec<RawInterface>, FetchError> {
        list_interfaces()
    }
}

fn list_interfaces() -> Result<Vec<RawInterface>, FetchError> {
    let entries = getifaddrs().map_err(|source| FetchError::Query {
        operation: "getifaddrs",
        source,
    })?;

    let mut table = InterfaceTable::default();
    for entry in entries {
        let iface = table.slot(&entry.interface_name, map_flags(entry.flags));
        absorb(iface, &entry);
    }

    let mut interfaces = table.into_interfaces();
    for iface in &mut interfaces {
        iface.mtu = mtu::read(&iface.name)?;
    }

    Ok(interfaces)
}

/// Returns the device part of an entry name.
///
/// glibc reports a labelled IPv4 address (`ip addr add ... label eth0:1`)
/// under its label; the address still belongs to `eth0`.
fn device_name(name: &str) -> &str {
    name.split_once(':').map_or(name, |(device, _)| device)
}

/// Interfaces keyed by device name, in first-seen order.
#[derive(Debug, Default)]
struct InterfaceTable {
    interfaces: Vec<RawInterface>,
    positions: HashMap<String, usize>,
}

impl InterfaceTable {
    /// Returns the record for the entry's device, creating it on first sight.
    fn slot(&mut self, name: &str, flags: LinkFlags) -> &mut RawInterface {
        let device = device_name(name);
        let index = if let Some(&index) = self.positions.get(device) {
            index
        } else {
            self.interfaces.push(RawInterface::new(device, flags));
            let index = self.interfaces.len() - 1;
            self.positions.insert(device.to_string(), index);
            index
        };
        &mut self.interfaces[index]
    }

    fn into_interfaces(self) -> Vec<RawInterface> {
        self.interfaces
    }
}

/// Folds one `getifaddrs` entry into its interface record.
fn absorb(iface: &mut RawInterface, entry: &InterfaceAddress) {
    let Some(address) = entry.address.as_ref() else {
        return;
    };

    if let Some(ip) = socket_ip(address) {
        let netmask = entry.netmask.as_ref().and_then(socket_ip);
        iface.addresses.push(RawAddress::new(ip, netmask));
    } else if let Some(octets) = address.as_link_addr().and_then(|link| link.addr()) {
        iface.hardware_addr = HardwareAddr::from_octets(octets);
    } else {
        tracing::trace!(
            interface = %entry.interface_name,
            family = ?address.family(),
            "Skipping address of unsupported family"
        );
    }
}

fn socket_ip(address: &SockaddrStorage) -> Option<IpAddr> {
    address
        .as_sockaddr_in()
        .map(|sin| IpAddr::V4(sin.ip()))
        .or_else(|| address.as_sockaddr_in6().map(|sin6| IpAddr::V6(sin6.ip())))
}

fn map_flags(flags: InterfaceFlags) -> LinkFlags {
    LinkFlags {
        up: flags.contains(InterfaceFlags::IFF_UP),
        broadcast: flags.contains(InterfaceFlags::IFF_BROADCAST),
        loopback: flags.contains(InterfaceFlags::IFF_LOOPBACK),
        point_to_point: flags.contains(InterfaceFlags::IFF_POINTOPOINT),
        multicast: flags.contains(InterfaceFlags::IFF_MULTICAST),
        running: flags.contains(InterfaceFlags::IFF_RUNNING),
    }
}

mod mtu {
    use std::os::fd::AsRawFd;

    use nix::sys::socket::{AddressFamily, SockFlag, SockType, socket};

    use crate::network::FetchError;

    /// Reads the MTU with the `SIOCGIFMTU` ioctl on a throwaway datagram socket.
    ///
    /// The socket lives in the caller's network namespace, so the answer
    /// does too.
    pub(super) fn read(name: &str) -> Result<u32, FetchError> {
        let socket = socket(
            AddressFamily::Inet,
            SockType::Datagram,
            SockFlag::empty(),
            None,
        )
        .map_err(|source| FetchError::Query {
            operation: "socket",
            source,
        })?;

        let mut request = request_for(name)?;

        // SAFETY: the socket is open for the duration of the call and
        // `request` is a valid, NUL-terminated ifreq.
        let result = unsafe { libc::ioctl(socket.as_raw_fd(), libc::SIOCGIFMTU, &raw mut request) };
        if result < 0 {
            return Err(FetchError::Query {
                operation: "ioctl(SIOCGIFMTU)",
                source: nix::Error::last(),
            });
        }

        // SAFETY: SIOCGIFMTU fills the mtu member of the union.
        let mtu = unsafe { request.ifr_ifru.ifru_mtu };
        u32::try_from(mtu).map_err(|_| FetchError::Platform {
            message: format!("negative MTU {mtu} reported for '{name}'"),
        })
    }

    /// Builds a zeroed `ifreq` naming `name`.
    pub(super) fn request_for(name: &str) -> Result<libc::ifreq, FetchError> {
        // SAFETY: ifreq is a plain C struct; all-zero is a valid value.
        let mut request: libc::ifreq = unsafe { std::mem::zeroed() };
        let name_bytes = name.as_bytes();
        if name_bytes.len() >= request.ifr_name.len() {
            return Err(FetchError::Platform {
                message: format!("interface name '{name}' is too long"),
            });
        }
        for (dst, &src) in request.ifr_name.iter_mut().zip(name_bytes) {
            *dst = src as libc::c_char;
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_flags_translates_each_bit() {
        let flags = map_flags(
            InterfaceFlags::IFF_UP | InterfaceFlags::IFF_LOOPBACK | InterfaceFlags::IFF_RUNNING,
        );

        assert!(flags.up);
        assert!(flags.loopback);
        assert!(flags.running);
        assert!(!flags.broadcast);
        assert!(!flags.multicast);
        assert!(!flags.point_to_point);
    }

    #[test]
    fn map_flags_point_to_point() {
        let flags = map_flags(InterfaceFlags::IFF_POINTOPOINT);
        assert!(flags.point_to_point);
        assert_eq!(flags.to_string(), "pointtopoint");
    }

    #[test]
    fn device_name_strips_alias_label() {
        assert_eq!(device_name("eth0"), "eth0");
        assert_eq!(device_name("eth0:1"), "eth0");
        assert_eq!(device_name("lo:backup"), "lo");
    }

    #[test]
    fn table_folds_aliases_into_device() {
        let loopback = map_flags(InterfaceFlags::IFF_UP | InterfaceFlags::IFF_LOOPBACK);
        let mut table = InterfaceTable::default();

        table
            .slot("lo", loopback)
            .addresses
            .push(RawAddress::new("127.0.0.1".parse().unwrap(), None));
        table
            .slot("eth0", map_flags(InterfaceFlags::IFF_UP))
            .hardware_addr = HardwareAddr::from_octets([2, 0, 0, 0, 0, 1]);
        table
            .slot("lo:1", loopback)
            .addresses
            .push(RawAddress::new("10.9.9.9".parse().unwrap(), None));

        let interfaces = table.into_interfaces();
        let names: Vec<_> = interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["lo", "eth0"]);

        let lo = &interfaces[0];
        assert_eq!(lo.addresses.len(), 2);
        assert_eq!(lo.addresses[1].ip.to_string(), "10.9.9.9");
        assert!(lo.flags.loopback);
    }

    #[test]
    fn table_keeps_first_seen_flags() {
        let mut table = InterfaceTable::default();
        table.slot("eth0", map_flags(InterfaceFlags::IFF_UP));
        table.slot("eth0:1", map_flags(InterfaceFlags::empty()));

        let interfaces = table.into_interfaces();
        assert_eq!(interfaces.len(), 1);
        assert!(interfaces[0].flags.up);
    }

    #[test]
    fn mtu_request_rejects_long_name() {
        let result = mtu::request_for("an-interface-name-too-long");
        assert!(matches!(result, Err(FetchError::Platform { .. })));
    }

    #[test]
    fn mtu_of_missing_interface_is_query_error() {
        let result = mtu::read("netfacts-none0");
        assert!(matches!(
            result,
            Err(FetchError::Query {
                operation: "ioctl(SIOCGIFMTU)",
                ..
            })
        ));
    }

    #[test]
    fn unix_source_new_creates_instance() {
        let _source = UnixSource::new();
    }

    // Integration tests: these read the live interface table.

    #[test]
    fn lists_a_loopback_interface() {
        let interfaces = UnixSource::new().interfaces().expect("listing failed");

        assert!(
            interfaces.iter().any(|i| i.flags.loopback),
            "Expected a loopback interface, got: {interfaces:?}"
        );
    }

    #[test]
    fn interface_names_are_unique_and_non_empty() {
        let interfaces = UnixSource::new().interfaces().expect("listing failed");

        let mut names: Vec<_> = interfaces.iter().map(|i| i.name.as_str()).collect();
        assert!(names.iter().all(|n| !n.is_empty()));
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn listed_mtu_matches_kernel() {
        let interfaces = UnixSource::new().interfaces().expect("listing failed");

        for iface in &interfaces {
            assert!(iface.mtu > 0, "zero MTU for {}", iface.name);
            assert_eq!(iface.mtu, mtu::read(&iface.name).unwrap());
        }
    }

    /// Sets an interface MTU in the calling thread's network namespace.
    #[cfg(target_os = "linux")]
    fn set_mtu(name: &str, value: i32) -> std::io::Result<()> {
        use std::os::fd::AsRawFd;

        use nix::sys::socket::{AddressFamily, SockFlag, SockType, socket};

        let socket = socket(
            AddressFamily::Inet,
            SockType::Datagram,
            SockFlag::empty(),
            None,
        )?;
        let mut request = mtu::request_for(name).unwrap();
        request.ifr_ifru.ifru_mtu = value;

        let result = unsafe { libc::ioctl(socket.as_raw_fd(), libc::SIOCSIFMTU, &raw mut request) };
        if result < 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn mtu_follows_own_network_namespace() {
        // A network namespace is per thread; keep the test runner's intact.
        std::thread::spawn(|| {
            if unsafe { libc::unshare(libc::CLONE_NEWNET) } != 0 {
                eprintln!(
                    "skipping: cannot unshare network namespace: {}",
                    std::io::Error::last_os_error()
                );
                return;
            }
            set_mtu("lo", 1234).expect("failed to set lo MTU");

            let interfaces = UnixSource::new().interfaces().expect("listing failed");
            let lo = interfaces
                .iter()
                .find(|i| i.name == "lo")
                .expect("lo missing in fresh namespace");
            assert_eq!(lo.mtu, 1234);
        })
        .join()
        .unwrap();
    }
}
