//! Saving operational command outputs to per-device files.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::PersistenceError;

/// Separator line written between a command and its output.
const SEPARATOR: &str = "==============================================";

/// Appends command outputs under a directory named after the work
/// order's reference.
///
/// The directory is created once, before any device is processed. Files
/// are appended to, never truncated, so repeated runs under the same
/// reference accumulate.
#[derive(Debug)]
pub struct OutputCapture {
    dir: PathBuf,
}

impl OutputCapture {
    /// Create the capture directory under `root` if it does not already
    /// exist.
    pub fn create(root: &Path, reference: &str) -> Result<Self, PersistenceError> {
        let dir = root.join(reference);
        fs::create_dir_all(&dir).map_err(|source| PersistenceError {
            path: dir.clone(),
            source,
        })?;
        debug!("capturing command outputs under {}", dir.display());

        Ok(Self { dir })
    }

    /// The file a device's outputs are appended to: the address with
    /// every `.` replaced by `_`, plus a `.txt` extension.
    pub fn device_file(&self, device: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", device.replace('.', "_")))
    }

    /// Append one command/separator/output block to the device's file,
    /// creating the file on first use.
    pub fn append(&self, device: &str, command: &str, output: &str) -> Result<(), PersistenceError> {
        let path = self.device_file(device);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| PersistenceError {
                path: path.clone(),
                source,
            })?;

        writeln!(file, "{command}\n{SEPARATOR}\n{output}")
            .map_err(|source| PersistenceError { path, source })?;
        Ok(())
    }
}
