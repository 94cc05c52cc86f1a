//! CLI error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the user by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    /// The work-order file could not be read.
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The work-order file is not valid JSON for the expected shape.
    #[error("{path} is not a valid work-order file: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// One or more device addresses are not IPv4/IPv6 literals.
    #[error("invalid device addresses in the work order: {}", .addresses.join(", "))]
    BadAddresses { addresses: Vec<String> },

    /// An interactive prompt failed.
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// A command in the work order is not allowed in the selected mode.
    #[error(transparent)]
    Classification(#[from] confpush::ClassificationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
