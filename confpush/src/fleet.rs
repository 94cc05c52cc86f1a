//! Fleet driver: sequential per-device dispatch and outcome aggregation.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};

use crate::capture::OutputCapture;
use crate::classify::{self, Mode};
use crate::error::{ClassificationError, ConnectionError, Step};
use crate::order::WorkOrder;
use crate::session::{NetconfSession, Session};
use crate::transport::{Credentials, DEFAULT_PORT, TransportConfig};
use crate::workflow::{self, DeviceOutcome, Operator};

/// Settings for one fleet run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// NETCONF port on every device.
    pub port: u16,

    /// Connect and reply timeout.
    pub timeout: Duration,

    /// When set, operational command outputs are captured under
    /// `<root>/<reference>/`.
    pub capture_root: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(30),
            capture_root: None,
        }
    }
}

/// Process every device in the work order, in order, and return one
/// outcome per device.
///
/// The whole command list is classified for `mode` first: a single
/// rejected command aborts the run before any device is contacted.
/// After that, no failure stops the fleet: a device that cannot be
/// reached or processed records its errors and the run moves on, so the
/// returned outcomes always match the device list one to one.
pub async fn run(
    order: &WorkOrder,
    mode: Mode,
    credentials: &Credentials,
    options: &RunOptions,
    operator: &mut dyn Operator,
) -> Result<Vec<DeviceOutcome>, ClassificationError> {
    run_with_connector(order, mode, options, operator, |device: String| {
        let config = TransportConfig::new(device, credentials.clone())
            .port(options.port)
            .timeout(options.timeout);
        async move { NetconfSession::open(&config).await }
    })
    .await
}

/// Same as [`run`], generic over how sessions are opened.
async fn run_with_connector<S, C, F>(
    order: &WorkOrder,
    mode: Mode,
    options: &RunOptions,
    operator: &mut dyn Operator,
    connect: C,
) -> Result<Vec<DeviceOutcome>, ClassificationError>
where
    S: Session,
    C: Fn(String) -> F,
    F: Future<Output = Result<S, ConnectionError>>,
{
    let rejected = classify::rejected_commands(&order.commands, mode);
    if !rejected.is_empty() {
        return Err(ClassificationError { mode, rejected });
    }

    // The capture directory is created once, before any device is
    // processed. If that fails, capture is disabled for the whole run.
    let capture = match (&options.capture_root, mode) {
        (Some(root), Mode::Operational) => {
            match OutputCapture::create(root, &order.reference) {
                Ok(capture) => Some(capture),
                Err(e) => {
                    warn!("output capture disabled: {e}");
                    None
                }
            }
        }
        _ => None,
    };

    let mut outcomes = Vec::with_capacity(order.devices.len());
    for device in &order.devices {
        info!("connecting to {device}");

        let mut session = match connect(device.clone()).await {
            Ok(session) => session,
            Err(e) => {
                warn!("{device}: connection failed, moving to the next device: {e}");
                let mut outcome = DeviceOutcome::new(device, mode);
                outcome.record(Step::Connect, e.to_string());
                outcomes.push(outcome);
                continue;
            }
        };

        let outcome = match mode {
            Mode::Configuration => {
                workflow::run_configuration(&mut session, device, order, operator).await
            }
            Mode::Operational => {
                workflow::run_operational(&mut session, device, order, operator, capture.as_ref())
                    .await
            }
        };

        // Release this device's connection before moving to the next.
        if let Err(e) = session.close().await {
            warn!("{device}: session close failed: {e}");
        }

        outcomes.push(outcome);
    }

    Ok(outcomes)
}
