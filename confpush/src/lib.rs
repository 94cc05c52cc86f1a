//! # Confpush
//!
//! Change-controlled configuration push and operational command runner
//! for fleets of Junos devices over NETCONF.
//!
//! For every device in a work order, confpush opens an authenticated
//! NETCONF-over-SSH session and walks a safe change workflow: lock the
//! configuration, stage the commands as a candidate, validate, fetch the
//! diff, ask for explicit confirmation, commit or discard, and unlock.
//! In operational mode it runs read-only `show` commands instead and can
//! capture their outputs to per-device files.
//!
//! Devices are processed strictly one at a time, in work-order order,
//! and a failing device never stops the fleet: every device gets an
//! outcome recording what happened to it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use confpush::{Credentials, Mode, Operator, RunOptions, WorkOrder, fleet};
//!
//! struct AlwaysCommit;
//!
//! impl Operator for AlwaysCommit {
//!     fn confirm_commit(&mut self, _device: &str, diff: &str) -> bool {
//!         println!("{diff}");
//!         true
//!     }
//!
//!     fn show_output(&mut self, _device: &str, _command: &str, output: &str) {
//!         println!("{output}");
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), confpush::Error> {
//!     let order = WorkOrder {
//!         description: "add a loopback description".to_string(),
//!         reference: "CHG-1042".to_string(),
//!         devices: vec!["192.0.2.1".to_string()],
//!         commands: vec!["set interfaces lo0 description mgmt".to_string()],
//!     };
//!
//!     let credentials = Credentials::new("admin", "secret");
//!     let outcomes = fleet::run(
//!         &order,
//!         Mode::Configuration,
//!         &credentials,
//!         &RunOptions::default(),
//!         &mut AlwaysCommit,
//!     )
//!     .await?;
//!
//!     for outcome in &outcomes {
//!         println!("{}: committed={}", outcome.device, outcome.committed);
//!     }
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod classify;
pub mod error;
pub mod fleet;
pub mod order;
pub mod session;
pub mod transport;
pub mod workflow;

// Re-export main types for convenience
pub use capture::OutputCapture;
pub use classify::Mode;
pub use error::{
    ClassificationError, ConnectionError, Error, OperationError, PersistenceError, Result, Step,
};
pub use fleet::RunOptions;
pub use order::WorkOrder;
pub use session::{NetconfSession, RpcOp, RpcReply, Session};
pub use transport::{Credentials, DEFAULT_PORT, TransportConfig};
pub use workflow::{DeviceOutcome, Operator, StepError};
