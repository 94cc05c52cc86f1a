//! Configuration-change workflow for one device.
//!
//! Each step has its own degradation policy: a failed lock or validate
//! is a warning and the workflow continues, a failed load abandons the
//! device, and a failed commit or discard leaves the candidate for
//! manual intervention. The lock, when held, is released on every path
//! that reaches it.

use log::{info, warn};

use super::Operator;
use super::outcome::DeviceOutcome;
use crate::classify::Mode;
use crate::error::Step;
use crate::order::WorkOrder;
use crate::session::{RpcOp, Session};

/// Run the configuration workflow against one open session.
///
/// Always returns an outcome; the caller closes the session.
pub async fn run_configuration<S: Session>(
    session: &mut S,
    device: &str,
    order: &WorkOrder,
    operator: &mut dyn Operator,
) -> DeviceOutcome {
    let mut outcome = DeviceOutcome::new(device, Mode::Configuration);

    // Locking is best-effort: editing proceeds without the lock, and
    // unlocking is skipped later if it was never held.
    let locked = match session.execute(RpcOp::Lock).await {
        Ok(_) => true,
        Err(e) => {
            warn!("{device}: could not lock the configuration, continuing unlocked: {e}");
            outcome.record(Step::Lock, e.to_string());
            false
        }
    };

    // A load failure abandons the device; nothing was staged, so only
    // the lock still needs releasing.
    if let Err(e) = session
        .execute(RpcOp::Load {
            commands: order.commands.clone(),
        })
        .await
    {
        warn!("{device}: loading the candidate configuration failed: {e}");
        outcome.record(Step::Load, e.to_string());
        unlock_if_held(session, device, locked, &mut outcome).await;
        return outcome;
    }

    if let Err(e) = session.execute(RpcOp::Validate).await {
        warn!("{device}: candidate validation failed, the commit may be rejected: {e}");
        outcome.record(Step::Validate, e.to_string());
    }

    // The diff is presented even when validation failed; a failed
    // compare yields an empty diff and the confirmation still happens.
    let diff = match session.execute(RpcOp::Compare).await {
        Ok(reply) => match reply.configuration_output() {
            Some(text) => text,
            None => {
                warn!("{device}: compare reply carried no diff text");
                outcome.record(Step::Diff, "compare reply carried no diff text");
                String::new()
            }
        },
        Err(e) => {
            warn!("{device}: configuration changes could not be compared: {e}");
            outcome.record(Step::Diff, e.to_string());
            String::new()
        }
    };

    if operator.confirm_commit(device, &diff) {
        match session
            .execute(RpcOp::Commit {
                comment: order.reference.clone(),
            })
            .await
        {
            Ok(_) => {
                info!("{device}: configuration changes committed");
                outcome.committed = true;
            }
            Err(e) => {
                // The candidate stays staged on the device.
                warn!("{device}: commit failed, check the device and roll back manually: {e}");
                outcome.record(Step::Commit, e.to_string());
            }
        }
    } else {
        match session.execute(RpcOp::Discard).await {
            Ok(_) => info!("{device}: configuration changes reverted"),
            Err(e) => {
                warn!("{device}: discard failed, check the device and roll back manually: {e}");
                outcome.record(Step::Discard, e.to_string());
            }
        }
    }

    unlock_if_held(session, device, locked, &mut outcome).await;
    outcome
}

/// Release the configuration lock when it was acquired. A failure is a
/// warning and does not change the commit/discard outcome.
async fn unlock_if_held<S: Session>(
    session: &mut S,
    device: &str,
    locked: bool,
    outcome: &mut DeviceOutcome,
) {
    if !locked {
        return;
    }
    if let Err(e) = session.execute(RpcOp::Unlock).await {
        warn!("{device}: could not release the configuration lock: {e}");
        outcome.record(Step::Unlock, e.to_string());
    }
}
