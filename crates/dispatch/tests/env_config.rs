//! Environment-variable configuration, isolated in its own test binary
//! so the process environment is touched by exactly one test.

use label_relay_dispatch::{ConfigError, Destination, DispatchConfig, PrinterKind};

#[test]
fn env_round_trip_and_rejection() {
    // No other thread exists yet in this test binary.
    unsafe {
        std::env::set_var("PRINTER_TYPE", "device");
        std::env::set_var("PRINTER_HOST", "spool.local");
        std::env::set_var("PRINTER_NAME", "labels");
        std::env::set_var("PRINTER_DEVICE", "/dev/usb/lp0");
    }

    let config = DispatchConfig::from_env().unwrap();
    assert_eq!(config.kind, Some(PrinterKind::Device));
    assert_eq!(config.host.as_deref(), Some("spool.local"));
    assert_eq!(config.queue.as_deref(), Some("labels"));
    assert_eq!(
        config.device.as_deref(),
        Some(std::path::Path::new("/dev/usb/lp0"))
    );
    assert_eq!(
        Destination::from_config(&config).unwrap().kind(),
        PrinterKind::Device
    );

    // Empty values behave like unset ones.
    unsafe {
        std::env::set_var("PRINTER_HOST", "");
        std::env::set_var("PRINTER_DEVICE", "");
    }
    let config = DispatchConfig::from_env().unwrap();
    assert_eq!(config.host, None);
    assert_eq!(config.device, None);

    // An unrecognized kind is fatal at load time, never a silent default.
    unsafe { std::env::set_var("PRINTER_TYPE", "laser") };
    assert_eq!(
        DispatchConfig::from_env().unwrap_err(),
        ConfigError::UnknownKind("laser".to_string())
    );
}
