//! Per-device workflows.
//!
//! The configuration workflow drives the lock → load → validate → diff →
//! confirm → commit/discard → unlock sequence; the operational workflow
//! runs read-only commands and optionally captures their outputs. Both
//! take an already-open session and always return a [`DeviceOutcome`].

mod configuration;
mod operational;
mod outcome;

pub use configuration::run_configuration;
pub use operational::run_operational;
pub use outcome::{DeviceOutcome, StepError};

/// Human-interaction seam for the decision points a workflow needs.
///
/// The CLI implements this over the console; tests use scripted
/// operators. Mode selection and the run-level continue/abort gate stay
/// outside the core.
pub trait Operator {
    /// Present the pending diff and ask whether to commit.
    ///
    /// Returning `true` commits the staged change, `false` discards it.
    /// This is the only blocking decision point: the device connection
    /// stays open and idle while waiting.
    fn confirm_commit(&mut self, device: &str, diff: &str) -> bool;

    /// Display one operational command's output.
    fn show_output(&mut self, device: &str, command: &str, output: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted session and operator fakes shared by workflow and fleet
    //! tests.

    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::Operator;
    use crate::error::{ConnectionError, OperationError, Step};
    use crate::session::{RpcOp, RpcReply, Session};

    /// A session whose replies and failures are scripted per step.
    pub(crate) struct ScriptedSession {
        /// Steps whose execute call fails.
        pub fail: Vec<Step>,
        /// Record of executed operations, by step.
        pub executed: Vec<Step>,
        /// Reply bodies handed out for successive `Command` operations.
        pub command_replies: VecDeque<String>,
        /// Reply body for the `Compare` operation.
        pub compare_reply: Option<String>,
        pub open: bool,
        /// Shared close counter, for asserting release discipline.
        pub closes: Option<Arc<AtomicUsize>>,
    }

    impl ScriptedSession {
        pub fn ok() -> Self {
            Self {
                fail: Vec::new(),
                executed: Vec::new(),
                command_replies: VecDeque::new(),
                compare_reply: None,
                open: true,
                closes: None,
            }
        }

        pub fn failing(steps: &[Step]) -> Self {
            Self {
                fail: steps.to_vec(),
                ..Self::ok()
            }
        }

        pub fn with_command_replies(mut self, replies: &[&str]) -> Self {
            self.command_replies = replies.iter().map(|r| r.to_string()).collect();
            self
        }

        pub fn with_compare_reply(mut self, reply: &str) -> Self {
            self.compare_reply = Some(reply.to_string());
            self
        }

        pub fn with_close_counter(mut self, closes: Arc<AtomicUsize>) -> Self {
            self.closes = Some(closes);
            self
        }
    }

    impl Session for ScriptedSession {
        async fn execute(&mut self, op: RpcOp) -> Result<RpcReply, OperationError> {
            let step = op.step();
            self.executed.push(step);

            if self.fail.contains(&step) {
                return Err(OperationError::Rpc {
                    step,
                    message: "scripted failure".to_string(),
                });
            }

            let body = match step {
                Step::Command => self
                    .command_replies
                    .pop_front()
                    .unwrap_or_else(|| "<output>\nok\n</output>".to_string()),
                Step::Diff => self.compare_reply.clone().unwrap_or_else(|| {
                    "<configuration-information><configuration-output>\n[edit]\n+ change\n\
                     </configuration-output></configuration-information>"
                        .to_string()
                }),
                _ => "<ok/>".to_string(),
            };

            Ok(RpcReply::parse(&format!("<rpc-reply>{body}</rpc-reply>")))
        }

        async fn close(&mut self) -> Result<(), ConnectionError> {
            self.open = false;
            if let Some(closes) = &self.closes {
                closes.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }

        fn is_open(&self) -> bool {
            self.open
        }
    }

    /// An operator with a fixed commit answer that records what it was
    /// shown.
    pub(crate) struct ScriptedOperator {
        pub approve: bool,
        pub confirmed_devices: Vec<String>,
        pub diffs: Vec<String>,
        pub outputs: Vec<(String, String)>,
    }

    impl ScriptedOperator {
        pub fn approving() -> Self {
            Self {
                approve: true,
                confirmed_devices: Vec::new(),
                diffs: Vec::new(),
                outputs: Vec::new(),
            }
        }

        pub fn declining() -> Self {
            Self {
                approve: false,
                ..Self::approving()
            }
        }
    }

    impl Operator for ScriptedOperator {
        fn confirm_commit(&mut self, device: &str, diff: &str) -> bool {
            self.confirmed_devices.push(device.to_string());
            self.diffs.push(diff.to_string());
            self.approve
        }

        fn show_output(&mut self, _device: &str, command: &str, output: &str) {
            self.outputs.push((command.to_string(), output.to_string()));
        }
    }
}
