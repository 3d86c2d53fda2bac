//! Process-start-time configuration for selecting a print destination.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

/// Default spooler host when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Default spooler queue name when none is configured.
pub const DEFAULT_QUEUE: &str = "Zebra_LP2824";

/// The closed set of backend kinds a deployment can select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PrinterKind {
    /// Inert test double ([`NullDestination`](crate::NullDestination)).
    Dummy,
    /// Raw device file ([`FileDestination`](crate::FileDestination)).
    Device,
    /// CUPS spooler ([`SpoolDestination`](crate::SpoolDestination)).
    #[default]
    Cups,
}

impl FromStr for PrinterKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dummy" => Ok(PrinterKind::Dummy),
            "device" => Ok(PrinterKind::Device),
            "cups" => Ok(PrinterKind::Cups),
            other => Err(ConfigError::UnknownKind(other.to_string())),
        }
    }
}

/// Destination selection settings, bound once at process start and
/// immutable for the process lifetime.
///
/// Every field is optional;
/// [`Destination::from_config`](crate::Destination::from_config) applies
/// the defaults and the selection policy. The serde field names match
/// the deployment surface (`printer_type`, `printer_host`,
/// `printer_name`, `printer_device`).
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchConfig {
    /// Backend kind (`printer_type`). Defaults to the spooler.
    #[cfg_attr(feature = "serde", serde(rename = "printer_type"))]
    pub kind: Option<PrinterKind>,

    /// Spooler host, `host` or `host:port` (`printer_host`).
    #[cfg_attr(feature = "serde", serde(rename = "printer_host"))]
    pub host: Option<String>,

    /// Spooler queue name (`printer_name`).
    #[cfg_attr(feature = "serde", serde(rename = "printer_name"))]
    pub queue: Option<String>,

    /// Raw device path (`printer_device`). Presence alone selects the
    /// device backend.
    #[cfg_attr(feature = "serde", serde(rename = "printer_device"))]
    pub device: Option<PathBuf>,
}

impl DispatchConfig {
    /// Read configuration from `PRINTER_TYPE`, `PRINTER_HOST`,
    /// `PRINTER_NAME`, and `PRINTER_DEVICE`. Unset or empty variables
    /// stay `None`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownKind`] if `PRINTER_TYPE` is set to anything
    /// other than `dummy`, `device`, or `cups`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let kind = match env::var("PRINTER_TYPE") {
            Ok(raw) if raw.is_empty() => None,
            Ok(raw) => Some(raw.parse()?),
            Err(_) => None,
        };
        Ok(Self {
            kind,
            host: env::var("PRINTER_HOST").ok().filter(|s| !s.is_empty()),
            queue: env::var("PRINTER_NAME").ok().filter(|s| !s.is_empty()),
            device: env::var("PRINTER_DEVICE")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        })
    }
}
