//! Status classification: free-text backend reports → operational states.
//!
//! Every backend reports its status as an opaque line of text — `lpstat`
//! output, a device existence message, or a fixed sentinel. Callers never
//! parse that text; [`classify`] folds it into the three-valued
//! [`OperationalState`] vocabulary the web layer renders.

use tracing::debug;

/// Operational state of a print destination, derived from its raw status
/// text on every query (never stored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OperationalState {
    /// Ready to accept a payload.
    Idle,
    /// Currently printing.
    Printing,
    /// Faulted, unreachable, or reporting something unrecognized.
    Error,
}

impl OperationalState {
    /// The lowercase name used in status displays and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationalState::Idle => "idle",
            OperationalState::Printing => "printing",
            OperationalState::Error => "error",
        }
    }
}

impl std::fmt::Display for OperationalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substrings that indicate a fault. Checked first: an error marker wins
/// over anything else on the same line.
const ERROR_MARKERS: [&str; 3] = ["error", "not found", "failed"];

/// Substrings that indicate the destination can take a payload.
const IDLE_MARKERS: [&str; 3] = ["idle", "exists", "ready"];

/// Classify a raw backend status line into an [`OperationalState`].
///
/// Matching is case-insensitive substring search, evaluated in fixed
/// priority order: error markers, then `"printing"`, then idle markers.
/// The first rule that matches wins — the ordering is part of the
/// contract, not an implementation detail. Anything unmatched (including
/// the empty string) is `Error`: an unknown report must never present a
/// printer as usable.
pub fn classify(status: &str) -> OperationalState {
    let status = status.to_lowercase();
    if ERROR_MARKERS.iter().any(|marker| status.contains(marker)) {
        return OperationalState::Error;
    }
    if status.contains("printing") {
        return OperationalState::Printing;
    }
    if IDLE_MARKERS.iter().any(|marker| status.contains(marker)) {
        return OperationalState::Idle;
    }
    debug!(%status, "status text matched no classification rule, treating as error");
    OperationalState::Error
}
