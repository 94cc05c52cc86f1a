//! Operational-command workflow for one device.

use log::warn;

use super::Operator;
use super::outcome::DeviceOutcome;
use crate::capture::OutputCapture;
use crate::classify::Mode;
use crate::error::Step;
use crate::order::WorkOrder;
use crate::session::{RpcOp, Session};

/// Run every work-order command read-only against one open session.
///
/// A failed command is recorded and the remaining commands still run;
/// the same goes for a capture write failure, which skips persistence
/// for that command only.
pub async fn run_operational<S: Session>(
    session: &mut S,
    device: &str,
    order: &WorkOrder,
    operator: &mut dyn Operator,
    capture: Option<&OutputCapture>,
) -> DeviceOutcome {
    let mut outcome = DeviceOutcome::new(device, Mode::Operational);

    for command in &order.commands {
        let reply = match session
            .execute(RpcOp::Command {
                command: command.clone(),
            })
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!("{device}: command failed, check the syntax of '{command}': {e}");
                outcome.record(Step::Command, format!("'{command}': {e}"));
                continue;
            }
        };

        let output = reply.command_output();
        operator.show_output(device, command, &output);

        if let Some(capture) = capture {
            if let Err(e) = capture.append(device, command, &output) {
                warn!("{device}: could not save the output of '{command}': {e}");
                outcome.record(Step::Persist, e.to_string());
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::workflow::testing::{ScriptedOperator, ScriptedSession};

    fn order(commands: &[&str]) -> WorkOrder {
        WorkOrder {
            description: "gather state".to_string(),
            reference: "run-42".to_string(),
            devices: vec!["10.0.0.1".to_string()],
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_outputs_are_stripped_and_shown_in_order() {
        let mut session = ScriptedSession::ok().with_command_replies(&[
            "<output>\nHostname: router\n</output>",
            "<output>\nge-0/0/0 up\n</output>",
        ]);
        let mut operator = ScriptedOperator::approving();

        let outcome = run_operational(
            &mut session,
            "10.0.0.1",
            &order(&["show version", "show interfaces"]),
            &mut operator,
            None,
        )
        .await;

        assert!(outcome.is_clean());
        assert!(!outcome.committed);
        assert_eq!(
            operator.outputs,
            vec![
                ("show version".to_string(), "\nHostname: router\n".to_string()),
                ("show interfaces".to_string(), "\nge-0/0/0 up\n".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_command_failure_continues_with_next_command() {
        let mut session = ScriptedSession::failing(&[Step::Command]);
        let mut operator = ScriptedOperator::approving();

        let outcome = run_operational(
            &mut session,
            "10.0.0.1",
            &order(&["show version", "show interfaces"]),
            &mut operator,
            None,
        )
        .await;

        // Both commands were attempted, both failures recorded.
        assert_eq!(session.executed, vec![Step::Command, Step::Command]);
        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.errors.iter().all(|e| e.step == Step::Command));
        assert!(outcome.errors[0].message.contains("show version"));
    }

    #[tokio::test]
    async fn test_capture_writes_both_commands_to_the_device_file() {
        let root = tempfile::tempdir().unwrap();
        let capture = OutputCapture::create(root.path(), "run-42").unwrap();

        let mut session = ScriptedSession::ok().with_command_replies(&[
            "<output>\nHostname: router\n</output>",
            "<output>\nge-0/0/0 up\n</output>",
        ]);
        let mut operator = ScriptedOperator::approving();

        let outcome = run_operational(
            &mut session,
            "10.0.0.1",
            &order(&["show version", "show interfaces"]),
            &mut operator,
            Some(&capture),
        )
        .await;

        assert!(outcome.is_clean());
        let contents =
            fs::read_to_string(root.path().join("run-42").join("10_0_0_1.txt")).unwrap();
        let version_at = contents.find("show version").unwrap();
        let interfaces_at = contents.find("show interfaces").unwrap();
        assert!(version_at < interfaces_at);
        assert!(contents.contains("Hostname: router"));
        assert!(contents.contains("ge-0/0/0 up"));
    }

    #[tokio::test]
    async fn test_persist_failure_is_recorded_and_the_run_continues() {
        let root = tempfile::tempdir().unwrap();
        let capture = OutputCapture::create(root.path(), "run-42").unwrap();
        // Occupy the device file path with a directory so appends fail.
        fs::create_dir(capture.device_file("10.0.0.1")).unwrap();

        let mut session = ScriptedSession::ok();
        let mut operator = ScriptedOperator::approving();

        let outcome = run_operational(
            &mut session,
            "10.0.0.1",
            &order(&["show version", "show interfaces"]),
            &mut operator,
            Some(&capture),
        )
        .await;

        assert_eq!(outcome.errors.len(), 2);
        assert!(outcome.errors.iter().all(|e| e.step == Step::Persist));
        // The outputs were still shown.
        assert_eq!(operator.outputs.len(), 2);
    }
}
