//! stac-factory: a command-line interface for validating STAC Item JSON.
//!
//! The core library does no I/O; this crate reads files, renders validation
//! reports, and maps outcomes to exit codes.

#![deny(unused_crate_dependencies)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use stac_factory::{FromJson, Item};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::metadata::Level;
use tracing_subscriber::EnvFilter;

// Dev-dependencies used only by the integration tests in `tests/`. Referenced
// here so `deny(unused_crate_dependencies)` does not fire on the lib-test target.
#[cfg(test)]
use assert_cmd as _;
#[cfg(test)]
use rstest as _;

/// stac-factory: validate STAC Item JSON from the command line.
#[derive(Debug, Parser)]
pub struct StacFactory {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity.
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease log verbosity.
    #[arg(
        long,
        short = 'q',
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "verbose"
    )]
    quiet: u8,
}

/// A stac-factory subcommand.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validates a STAC Item JSON file.
    ///
    /// Prints `Success!` when the file holds a valid item, or `Failure:`
    /// followed by the validation report as indented JSON. The report is
    /// machine-addressable: each violation carries the wire path of the
    /// offending field.
    Validate {
        /// The input file.
        infile: PathBuf,
    },

    /// Prints the JSON Schema for the Item wire format.
    JsonSchema,
}

impl StacFactory {
    /// Initializes logging and runs the selected subcommand.
    pub fn run(self) -> Result<ExitCode> {
        if let Some(level) = self.log_level() {
            let filter = EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy();
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        match self.command {
            Command::Validate { infile } => {
                let contents = std::fs::read_to_string(&infile)?;
                match Item::from_json_str(&contents) {
                    Ok(item) => {
                        tracing::debug!(id = item.id(), "valid item");
                        println!("Success!");
                        Ok(ExitCode::SUCCESS)
                    }
                    Err(error) => {
                        println!("Failure:");
                        println!("{}", serde_json::to_string_pretty(&error.into_json())?);
                        Ok(ExitCode::FAILURE)
                    }
                }
            }
            Command::JsonSchema => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stac_factory::json_schema())?
                );
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn log_level(&self) -> Option<Level> {
        match i16::from(self.verbose) - i16::from(self.quiet) {
            i16::MIN..=-2 => None,
            -1 => Some(Level::ERROR),
            0 => Some(Level::WARN),
            1 => Some(Level::INFO),
            2 => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StacFactory;
    use clap::Parser;
    use tracing::metadata::Level;

    #[test]
    fn verbosity() {
        let cli = StacFactory::parse_from(["stac-factory", "json-schema"]);
        assert_eq!(cli.log_level(), Some(Level::WARN));
        let cli = StacFactory::parse_from(["stac-factory", "-v", "json-schema"]);
        assert_eq!(cli.log_level(), Some(Level::INFO));
        let cli = StacFactory::parse_from(["stac-factory", "-vvv", "json-schema"]);
        assert_eq!(cli.log_level(), Some(Level::TRACE));
        let cli = StacFactory::parse_from(["stac-factory", "-qq", "json-schema"]);
        assert_eq!(cli.log_level(), None);
    }
}
