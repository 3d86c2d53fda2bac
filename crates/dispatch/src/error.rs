//! Typed error types for the dispatch core.

use std::io;
use std::path::PathBuf;

/// Failures that can occur while encoding or transporting a payload.
///
/// These never cross the [`PrintTarget`](crate::PrintTarget) boundary as
/// errors: the trait methods absorb them into a failure outcome or a
/// sentinel status text. They are exposed for callers that use the
/// `try_transmit` variants directly.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The payload contains a character outside the ISO-8859-1 repertoire.
    #[error("payload not representable in ISO-8859-1: {ch:?} at byte {index}")]
    Unencodable {
        /// The first character with no single-byte encoding.
        ch: char,
        /// Byte offset of that character in the payload.
        index: usize,
    },

    /// A spooler client executable could not be started.
    #[error("failed to run `{command}`")]
    Spawn {
        /// The executable that failed to start (`lpstat` or `lp`).
        command: &'static str,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Staging the payload into a spool temp file failed.
    #[error("failed to stage payload for the spooler")]
    Stage(#[source] io::Error),

    /// Writing the payload to the raw device path failed.
    #[error("failed to write to device {}", path.display())]
    DeviceWrite {
        /// The configured device path.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
}

/// Fatal configuration problems detected while building a
/// [`Destination`](crate::Destination).
///
/// Unlike [`DispatchError`], these are not absorbed: backend selection
/// happens once at process start, and a broken configuration should stop
/// the process rather than misroute every label printed afterwards.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The configured printer type is not `dummy`, `device`, or `cups`.
    #[error("unknown printer type: {0:?}")]
    UnknownKind(String),

    /// Printer type `device` was selected without a device path.
    #[error("printer type \"device\" requires a device path")]
    MissingDevicePath,
}
