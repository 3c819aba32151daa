//! Kernel network settings read from an external command.
//!
//! The command (by default `sysctl -a net`) prints `key: value` lines. The
//! output has no schema; it is returned as a flat string map.

use std::collections::BTreeMap;
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::config::defaults;

/// Flat mapping from setting key to trimmed value.
pub type SettingsMap = BTreeMap<String, String>;

/// Error type for running the settings command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    Exit {
        /// Program that failed.
        program: String,
        /// Exit status.
        status: ExitStatus,
        /// Captured standard error, lossily decoded and trimmed.
        stderr: String,
    },
}

/// Trait for running an external command to completion.
///
/// Blocks the calling thread until the process exits. No timeout is
/// enforced; callers needing one must wrap the call.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the process cannot start or exits
    /// unsuccessfully.
    fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>, CommandError>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommand;

impl CommandRunner for SystemCommand {
    fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>, CommandError> {
        tracing::debug!(program, ?args, "Running settings command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::Exit {
                program: program.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// Parses `key: value` lines into a [`SettingsMap`].
///
/// - lines without a colon are skipped
/// - the key is the text before the first colon, taken verbatim
/// - the value is the text between the first and second colon, trimmed;
///   anything after a second colon is dropped
/// - a repeated key overwrites the earlier value
#[must_use]
pub fn parse_settings(output: &[u8]) -> SettingsMap {
    let text = String::from_utf8_lossy(output);
    let mut settings = SettingsMap::new();

    for line in text.lines() {
        let mut fields = line.split(':');
        let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
            continue;
        };
        settings.insert(key.to_string(), value.trim().to_string());
    }

    settings
}

/// Runs the settings command and parses its output.
pub struct SettingsReader {
    runner: Box<dyn CommandRunner>,
    program: String,
    args: Vec<String>,
}

impl SettingsReader {
    /// Creates a reader running `program args...` through `runner`.
    #[must_use]
    pub fn new(
        runner: impl CommandRunner + 'static,
        program: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            runner: Box::new(runner),
            program: program.into(),
            args,
        }
    }

    /// Creates a reader for the default command using [`SystemCommand`].
    #[must_use]
    pub fn system() -> Self {
        Self::new(
            SystemCommand,
            defaults::SETTINGS_COMMAND,
            defaults::settings_args(),
        )
    }

    /// Returns the program this reader runs.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and parses its output.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the command fails.
    pub fn read(&self) -> Result<SettingsMap, CommandError> {
        let output = self.runner.run(&self.program, &self.args)?;
        let settings = parse_settings(&output);
        tracing::debug!(count = settings.len(), "Parsed network settings");
        Ok(settings)
    }
}

impl std::fmt::Debug for SettingsReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsReader")
            .field("program", &self.program)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
