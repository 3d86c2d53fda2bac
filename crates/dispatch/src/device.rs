//! Raw device-file destination.
//!
//! For printers that appear as a writable path on the local filesystem:
//! a USB/serial character device (`/dev/usb/lp0`) or a UNIX socket file.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::{DispatchError, DispatchOutcome, PrintTarget, encode_payload};

/// A printer reachable as a writable path on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileDestination {
    path: PathBuf,
}

impl FileDestination {
    /// Create a destination bound to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The device path this destination writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Transmit, surfacing failures as typed errors instead of a bare
    /// outcome code.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Unencodable`] or [`DispatchError::DeviceWrite`].
    pub fn try_transmit(&self, payload: &str) -> Result<DispatchOutcome, DispatchError> {
        let bytes = encode_payload(payload)?;
        debug!(path = %self.path.display(), len = bytes.len(), "writing raw payload to device");
        self.write_bytes(&bytes)
            .map_err(|source| DispatchError::DeviceWrite {
                path: self.path.clone(),
                source,
            })?;
        Ok(DispatchOutcome::ACCEPTED)
    }

    /// Open, write, close. The handle is dropped — and with it closed —
    /// on every exit path, including failures mid-write.
    fn write_bytes(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(&self.path)?;
        file.write_all(bytes)?;
        file.flush()
    }
}

impl PrintTarget for FileDestination {
    fn status(&self) -> String {
        // Existence only; no permission or readiness probing.
        if self.path.exists() {
            format!("Device {} exists", self.path.display())
        } else {
            format!("Device {} not found", self.path.display())
        }
    }

    fn transmit(&self, payload: &str) -> DispatchOutcome {
        self.try_transmit(payload).unwrap_or_else(|err| {
            error!(error = %err, path = %self.path.display(), "device dispatch failed");
            DispatchOutcome::REJECTED
        })
    }
}
