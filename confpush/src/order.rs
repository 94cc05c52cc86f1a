//! Work-order input record.

use serde::Deserialize;

/// A validated change-control work order: what to send, to which devices.
///
/// Produced by a loader from a JSON file whose field names are kept for
/// compatibility with existing work-order files. Address syntax is the
/// loader's concern; the verb whitelist is checked by
/// [`classify`](crate::classify) before any device is contacted. Immutable
/// once handed to the fleet driver.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkOrder {
    /// Free-form description shown to the operator before the run.
    pub description: String,

    /// Change-control reference. Recorded as the commit audit comment and
    /// used as the capture directory name.
    #[serde(rename = "refID")]
    pub reference: String,

    /// Target device addresses, processed in order. Each is an IPv4 or
    /// IPv6 literal.
    #[serde(rename = "deviceIPs")]
    pub devices: Vec<String>,

    /// Commands to send, in order.
    #[serde(rename = "cmdList")]
    pub commands: Vec<String>,
}
