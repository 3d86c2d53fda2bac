//! Network print-spooler destination (CUPS `lpstat` / `lp`).
//!
//! Talks to a CUPS-compatible spooler through its command-line clients:
//! `lpstat` for queue status, `lp` for raw submission. Both are invoked
//! with explicit argument vectors — no shell ever interprets the host,
//! queue name, or staged file path.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, error, warn};

use crate::{DispatchError, DispatchOutcome, PrintTarget, encode_payload};

/// Sentinel status text returned when the spooler cannot be queried or
/// reports nothing about the configured queue. Classifies as an error.
pub const STATUS_QUERY_FAILED: &str = "failed to get status";

/// Extension for staged payload files. A control-language extension keeps
/// the spooler's type detection from running the payload through a text
/// filter before the `-o raw` submission takes effect.
const STAGED_SUFFIX: &str = ".epl";

/// A print queue on a CUPS-compatible spooler, addressed by host and
/// queue name.
///
/// Both fields come from trusted process-start configuration and are
/// passed to the spooler clients verbatim.
#[derive(Debug, Clone)]
pub struct SpoolDestination {
    host: String,
    queue: String,
}

impl SpoolDestination {
    /// Create a destination for `queue` on the spooler at `host`
    /// (`host` or `host:port`).
    pub fn new(host: impl Into<String>, queue: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            queue: queue.into(),
        }
    }

    /// The spooler host this destination submits to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The queue name on the spooler.
    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Transmit, surfacing encoding and transport failures as typed
    /// errors instead of a bare outcome code.
    ///
    /// The staged temp file is left in place after `lp` returns: the
    /// spooler may still be reading it asynchronously, so cleanup here
    /// could truncate an in-flight job.
    ///
    /// # Errors
    ///
    /// [`DispatchError::Unencodable`], [`DispatchError::Stage`], or
    /// [`DispatchError::Spawn`]. An `lp` that runs but exits nonzero is
    /// not an error — it is a rejected [`DispatchOutcome`].
    pub fn try_transmit(&self, payload: &str) -> Result<DispatchOutcome, DispatchError> {
        let bytes = encode_payload(payload)?;
        let staged = stage_payload(&bytes).map_err(DispatchError::Stage)?;

        debug!(
            host = %self.host,
            queue = %self.queue,
            staged = %staged.display(),
            "submitting raw payload via lp"
        );

        let status = Command::new("lp")
            .args(["-h", &self.host, "-d", &self.queue, "-o", "raw"])
            .arg(&staged)
            .status()
            .map_err(|source| DispatchError::Spawn {
                command: "lp",
                source,
            })?;

        // A signal-terminated lp has no exit code; report a plain failure.
        let code = status.code().unwrap_or(1);
        if code != 0 {
            warn!(code, queue = %self.queue, "lp rejected the payload");
        }
        Ok(DispatchOutcome::from_code(code))
    }
}

impl PrintTarget for SpoolDestination {
    fn status(&self) -> String {
        let output = match Command::new("lpstat")
            .args(["-h", &self.host, "-p", &self.queue])
            .output()
        {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, host = %self.host, "lpstat could not be started");
                return STATUS_QUERY_FAILED.to_string();
            }
        };

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .find(|line| line.contains(&self.queue))
            .map(|line| line.trim().to_string())
            .unwrap_or_else(|| STATUS_QUERY_FAILED.to_string())
    }

    fn transmit(&self, payload: &str) -> DispatchOutcome {
        self.try_transmit(payload).unwrap_or_else(|err| {
            error!(error = %err, queue = %self.queue, "spool dispatch failed");
            DispatchOutcome::REJECTED
        })
    }
}

/// Write `bytes` to a fresh, uniquely named `.epl` file and persist it.
///
/// `tempfile` allocates the name atomically (`O_EXCL`), so concurrent
/// transmits can never collide on a path.
fn stage_payload(bytes: &[u8]) -> std::io::Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("label-")
        .suffix(STAGED_SUFFIX)
        .tempfile()?;
    file.write_all(bytes)?;
    let (file, path) = file.keep().map_err(|persist| persist.error)?;
    drop(file);
    Ok(path)
}
