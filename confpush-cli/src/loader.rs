//! Work-order file loading and address validation.

use std::fs;
use std::net::IpAddr;
use std::path::Path;

use confpush::WorkOrder;

use crate::error::CliError;

/// Read and parse a JSON work-order file, then validate every device
/// address as an IPv4/IPv6 literal.
///
/// Every bad address is reported, not just the first; only a fully valid
/// work order reaches the core.
pub fn load_work_order(path: &Path) -> Result<WorkOrder, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let order: WorkOrder = serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let bad: Vec<String> = order
        .devices
        .iter()
        .filter(|device| device.parse::<IpAddr>().is_err())
        .cloned()
        .collect();

    if !bad.is_empty() {
        return Err(CliError::BadAddresses { addresses: bad });
    }

    Ok(order)
}
