//! netfacts: host network facts
//!
//! A library for enumerating network interfaces, classifying their
//! addresses, picking the host's representative addresses, and reading
//! kernel network settings. Results are exposed through named collectors
//! that produce JSON values.

#[cfg(not(unix))]
compile_error!("netfacts only supports unix targets");

pub mod collector;
pub mod config;
pub mod network;
pub mod select;
pub mod settings;
