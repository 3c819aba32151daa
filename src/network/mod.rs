//! Network layer: interface listing, address classification and snapshots.
//!
//! This module provides types and functions for:
//! - Representing interfaces and classified addresses ([`Snapshot`], [`AddressEntry`])
//! - Listing raw interfaces ([`InterfaceSource`])
//! - Classifying a single address ([`classify`], [`classify_cidr`])
//! - Building a full snapshot ([`enumerate`])
//! - Platform-specific implementations ([`platform`])

mod classify;
mod enumerate;
mod model;
pub mod platform;
mod source;

pub use classify::{
    ParseError, broadcast_of, classify, classify_cidr, ipv4_projection, is_loopback, network_of,
    prefix_mask,
};
pub use enumerate::{EnumerateError, enumerate};
pub use model::{AddressEntry, Family, HardwareAddr, InterfaceInfo, LinkFlags, Snapshot};
pub use source::{FetchError, InterfaceSource, RawAddress, RawInterface};

#[cfg(test)]
pub(crate) use source::testing;
