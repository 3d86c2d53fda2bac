//! Print destination abstraction for raw label-printer payloads.
//!
//! A label application produces finished control-language payloads (EPL
//! and friends); this crate gets them onto a printer and reports the
//! printer's state. Three backends share one capability set:
//!
//! - [`SpoolDestination`] — a queue on a CUPS-compatible spooler, driven
//!   through `lpstat`/`lp`
//! - [`FileDestination`] — a raw device path (`/dev/usb/lp0`, a serial
//!   character device, or a socket file)
//! - [`NullDestination`] — accepts and discards everything; for
//!   development without hardware
//!
//! The active backend is selected once at process start from
//! [`DispatchConfig`] and shared by every request handler. Calls are
//! blocking and self-contained (no cross-call state), so a shared
//! reference is all concurrent callers need. Per-call failures never
//! escape the [`PrintTarget`] boundary: `status` degrades to a sentinel
//! text that classifies as an error, `transmit` reports a nonzero
//! [`DispatchOutcome`].
//!
//! ```
//! use label_relay_dispatch::{Destination, DispatchConfig, OperationalState, PrinterKind,
//!                            PrintTarget};
//!
//! let mut config = DispatchConfig::default();
//! config.kind = Some(PrinterKind::Dummy);
//!
//! let destination = Destination::from_config(&config)?;
//! assert_eq!(destination.state(), OperationalState::Idle);
//!
//! let outcome = destination.transmit("N\nA50,50,0,1,1,1,N,\"hello\"\nP1\n");
//! assert!(outcome.is_accepted());
//! # Ok::<(), label_relay_dispatch::ConfigError>(())
//! ```

mod config;
mod device;
mod encoding;
mod error;
mod null;
mod spool;
mod status;

pub use config::{DEFAULT_HOST, DEFAULT_QUEUE, DispatchConfig, PrinterKind};
pub use device::FileDestination;
pub use encoding::{PAYLOAD_TERMINATOR, encode_payload};
pub use error::{ConfigError, DispatchError};
pub use null::NullDestination;
pub use spool::{STATUS_QUERY_FAILED, SpoolDestination};
pub use status::{OperationalState, classify};

// ── Outcome ─────────────────────────────────────────────────────────────

/// Result code of a transmit attempt: `0` is accepted-for-transmission,
/// anything else is a rejection or delivery failure.
///
/// This is a transmission acknowledgment only — a spooler or device
/// accepting the bytes does not guarantee a label came out of the
/// printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DispatchOutcome(i32);

impl DispatchOutcome {
    /// The payload was accepted for transmission (code 0).
    pub const ACCEPTED: DispatchOutcome = DispatchOutcome(0);

    /// Generic rejection (code 1), used when a failure has no backend
    /// exit code of its own.
    pub const REJECTED: DispatchOutcome = DispatchOutcome(1);

    /// Wrap a backend result code.
    pub fn from_code(code: i32) -> Self {
        Self(code)
    }

    /// The raw result code.
    pub fn code(self) -> i32 {
        self.0
    }

    /// Whether the payload was accepted for transmission.
    pub fn is_accepted(self) -> bool {
        self.0 == 0
    }
}

// ── Trait ───────────────────────────────────────────────────────────────

/// The capability set every print destination offers: query status,
/// transmit a payload.
///
/// Both operations absorb their own failures, so callers never handle
/// transport errors during request handling — they render the returned
/// values. Backends that can say more expose an inherent `try_transmit`
/// returning typed [`DispatchError`]s.
pub trait PrintTarget {
    /// Query the backend and return its status report verbatim.
    ///
    /// The text is opaque: feed it to [`classify`] (or call
    /// [`state`](PrintTarget::state)) rather than parsing it.
    fn status(&self) -> String;

    /// Encode `payload` and hand it to the backend.
    fn transmit(&self, payload: &str) -> DispatchOutcome;

    /// Query and classify in one step.
    fn state(&self) -> OperationalState {
        classify(&self.status())
    }
}

// ── Destination ─────────────────────────────────────────────────────────

/// The active print destination: a closed set of backends behind the
/// common [`PrintTarget`] capability set.
///
/// Built once at startup with [`Destination::from_config`] and handed to
/// request handlers by reference; it holds no per-call mutable state.
#[derive(Debug, Clone)]
pub enum Destination {
    /// CUPS spooler backend.
    Spool(SpoolDestination),
    /// Raw device-file backend.
    Device(FileDestination),
    /// Inert test double.
    Null(NullDestination),
}

impl Destination {
    /// Select and construct the destination `config` describes.
    ///
    /// Policy, evaluated in order:
    ///
    /// 1. kind `dummy` → [`NullDestination`]
    /// 2. kind `device`, **or** a device path present even without an
    ///    explicit kind → [`FileDestination`] (the path-presence rule is
    ///    a deliberate convenience default)
    /// 3. otherwise → [`SpoolDestination`] with configured-or-default
    ///    host and queue
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingDevicePath`] if kind `device` is selected
    /// without a path. Unrecognized kind strings fail earlier, when the
    /// kind itself is parsed.
    pub fn from_config(config: &DispatchConfig) -> Result<Self, ConfigError> {
        if config.kind == Some(PrinterKind::Dummy) {
            return Ok(Destination::Null(NullDestination::new()));
        }
        if config.kind == Some(PrinterKind::Device) || config.device.is_some() {
            let path = config
                .device
                .clone()
                .ok_or(ConfigError::MissingDevicePath)?;
            return Ok(Destination::Device(FileDestination::new(path)));
        }
        let host = config
            .host
            .clone()
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let queue = config
            .queue
            .clone()
            .unwrap_or_else(|| DEFAULT_QUEUE.to_string());
        Ok(Destination::Spool(SpoolDestination::new(host, queue)))
    }

    /// The kind of backend this destination dispatches to.
    pub fn kind(&self) -> PrinterKind {
        match self {
            Destination::Spool(_) => PrinterKind::Cups,
            Destination::Device(_) => PrinterKind::Device,
            Destination::Null(_) => PrinterKind::Dummy,
        }
    }
}

impl PrintTarget for Destination {
    fn status(&self) -> String {
        match self {
            Destination::Spool(spool) => spool.status(),
            Destination::Device(device) => device.status(),
            Destination::Null(null) => null.status(),
        }
    }

    fn transmit(&self, payload: &str) -> DispatchOutcome {
        match self {
            Destination::Spool(spool) => spool.transmit(payload),
            Destination::Device(device) => device.transmit(payload),
            Destination::Null(null) => null.transmit(payload),
        }
    }
}
