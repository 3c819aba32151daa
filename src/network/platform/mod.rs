//! Platform-specific interface source implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`InterfaceSource`](super::InterfaceSource) trait.
//!
//! # Platform Support
//!
//! - **Linux, macOS, BSD**: `getifaddrs` for addresses and flags,
//!   `SIOCGIFMTU` for the MTU.

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::UnixSource;

// Re-export platform-specific source as PlatformSource for convenience
#[cfg(unix)]
pub use unix::UnixSource as PlatformSource;
