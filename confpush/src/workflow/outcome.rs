//! Per-device results.

use crate::classify::Mode;
use crate::error::Step;

/// One recorded failure, tagged with the step it occurred in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepError {
    /// The step that failed.
    pub step: Step,
    /// Readable failure message, as it was surfaced when it occurred.
    pub message: String,
}

/// The result of processing one device.
///
/// Finalized and returned regardless of which steps failed, so a run
/// always produces exactly one outcome per device.
#[derive(Debug, Clone)]
pub struct DeviceOutcome {
    /// Device address, as given in the work order.
    pub device: String,

    /// Mode the device was processed in.
    pub mode: Mode,

    /// Whether a configuration change was committed. Always false in
    /// operational mode.
    pub committed: bool,

    /// Every failure recorded while processing this device, in order.
    pub errors: Vec<StepError>,
}

impl DeviceOutcome {
    pub(crate) fn new(device: &str, mode: Mode) -> Self {
        Self {
            device: device.to_string(),
            mode,
            committed: false,
            errors: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, step: Step, message: impl Into<String>) {
        self.errors.push(StepError {
            step,
            message: message.into(),
        });
    }

    /// True when no step failed for this device.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
