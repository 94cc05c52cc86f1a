//! Error types for confpush.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::classify::Mode;

/// Purpose of a fallible per-device operation.
///
/// Carried by [`OperationError`] and by the step errors recorded in a
/// device outcome, so callers can apply the per-step degradation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Opening the device session.
    Connect,
    /// Acquiring the exclusive configuration lock.
    Lock,
    /// Staging the candidate configuration.
    Load,
    /// Validating the candidate.
    Validate,
    /// Comparing the candidate against the running configuration.
    Diff,
    /// Committing the candidate.
    Commit,
    /// Reverting the candidate.
    Discard,
    /// Releasing the configuration lock.
    Unlock,
    /// Running one operational command.
    Command,
    /// Writing captured output to disk.
    Persist,
}

impl Step {
    /// Lowercase step name used in log and summary output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Connect => "connect",
            Step::Lock => "lock",
            Step::Load => "load",
            Step::Validate => "validate",
            Step::Diff => "diff",
            Step::Commit => "commit",
            Step::Discard => "discard",
            Step::Unlock => "unlock",
            Step::Command => "command",
            Step::Persist => "persist",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for confpush operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Device unreachable or authentication failure.
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// One remote operation failed.
    #[error("Operation error: {0}")]
    Operation(#[from] OperationError),

    /// A command violates the verb whitelist for the selected mode.
    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    /// Captured output could not be written.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Connection-level errors (TCP, SSH authentication, NETCONF hello).
///
/// Fatal for the affected device only: the fleet driver records the
/// failure in that device's outcome and moves on to the next device.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// SSH transport or protocol error.
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication was rejected.
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// The server refused to start the netconf subsystem.
    #[error("Could not start the netconf subsystem")]
    SubsystemFailed,

    /// The capability exchange did not complete.
    #[error("Hello exchange failed: {message}")]
    HelloFailed { message: String },

    /// The connection was closed unexpectedly.
    #[error("Connection disconnected")]
    Disconnected,

    /// Connect or reply read exceeded the configured timeout.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One remote operation failed.
///
/// Carries the operation's purpose so the workflow can decide whether
/// the failure is recoverable for that step.
#[derive(Error, Debug)]
pub enum OperationError {
    /// The session was already closed.
    #[error("{step}: session is closed")]
    Closed { step: Step },

    /// The transport failed mid-operation.
    #[error("{step}: transport failed: {source}")]
    Transport {
        step: Step,
        #[source]
        source: ConnectionError,
    },

    /// The device answered with an rpc-error of severity error.
    #[error("{step}: device reported an error: {message}")]
    Rpc { step: Step, message: String },
}

impl OperationError {
    /// The purpose of the operation that failed.
    pub fn step(&self) -> Step {
        match self {
            OperationError::Closed { step }
            | OperationError::Transport { step, .. }
            | OperationError::Rpc { step, .. } => *step,
        }
    }
}

/// A command in the work order violates the verb whitelist for the
/// selected mode.
///
/// Checked once for the whole work order; aborts the run before any
/// device is contacted. Lists every rejected command, not just the first.
#[derive(Error, Debug)]
#[error("{} command(s) rejected for {mode} mode: {}", .rejected.len(), .rejected.join(", "))]
pub struct ClassificationError {
    /// The mode the commands were checked against.
    pub mode: Mode,
    /// Every rejected command, in work-order order.
    pub rejected: Vec<String>,
}

/// A capture file or directory could not be created or written.
///
/// Degrades output capture only; the run continues.
#[derive(Error, Debug)]
#[error("Could not write {path}: {source}")]
pub struct PersistenceError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Result type alias using confpush's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
