//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// netfacts: host network facts
///
/// Prints a JSON snapshot of network interfaces, addresses and kernel
/// network settings.
#[derive(Debug, Parser)]
#[command(name = "netfacts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: collect)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Collector to run (can be specified multiple times; default: all)
    #[arg(long = "collector", value_name = "NAME", global = true)]
    pub collectors: Vec<String>,

    /// Do not run the kernel settings command
    #[arg(long = "no-settings", global = true)]
    pub no_settings: bool,

    /// Program used to read kernel network settings
    #[arg(long = "settings-command", value_name = "PROGRAM", global = true)]
    pub settings_command: Option<String>,

    /// Argument for the settings program (can be specified multiple times)
    #[arg(
        long = "settings-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        global = true
    )]
    pub settings_args: Vec<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    pub compact: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for netfacts
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run collectors and print their results as JSON
    Collect,

    /// Print one representative address of this host
    Address {
        /// Which address to print
        #[arg(value_enum)]
        kind: AddressKind,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "netfacts.toml")]
        output: PathBuf,
    },
}

/// Representative address kinds for the `address` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AddressKind {
    /// First external IPv4 address
    #[value(name = "ipv4")]
    Ipv4,
    /// First external IPv6 address
    #[value(name = "ipv6")]
    Ipv6,
    /// Hardware address of the interface holding the external IPv4 address
    #[value(name = "mac")]
    Mac,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
