use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use label_relay_dispatch::{
    Destination, DispatchConfig, DispatchOutcome, PAYLOAD_TERMINATOR, PrintTarget, classify,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "label-relay",
    version,
    about = "Dispatch raw label-printer payloads to a CUPS queue, a device file, or a dummy printer"
)]
struct Cli {
    /// Output mode: "pretty" for terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Printer backend: "dummy", "device", or "cups". Overrides PRINTER_TYPE.
    #[arg(long, global = true, value_name = "KIND")]
    printer_type: Option<String>,

    /// Spooler host, "host" or "host:port". Overrides PRINTER_HOST.
    #[arg(long, global = true)]
    host: Option<String>,

    /// Spooler queue name. Overrides PRINTER_NAME.
    #[arg(long, global = true)]
    queue: Option<String>,

    /// Raw device path (e.g. /dev/usb/lp0). Overrides PRINTER_DEVICE.
    #[arg(long, global = true)]
    device: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Query the printer and report its status text and classified state.
    Status,

    /// Send a payload file to the printer ("-" reads from stdin).
    Send { file: String },
}

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Human-readable terminal output.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Resolve an explicit `--output` value, or detect from whether
    /// stdout is a TTY.
    fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());
    let destination = build_destination(&cli)?;
    debug!(kind = ?destination.kind(), "selected print destination");

    match cli.cmd {
        Cmd::Status => cmd_status(&destination, format)?,
        Cmd::Send { ref file } => cmd_send(file, &destination, format)?,
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for command output. `RUST_LOG`
/// overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("label_relay_cli=info,label_relay_dispatch=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Merge the environment configuration with command-line overrides and
/// select the destination. Any configuration problem is fatal here,
/// before a payload is touched.
fn build_destination(cli: &Cli) -> Result<Destination> {
    let mut config =
        DispatchConfig::from_env().context("invalid printer configuration in environment")?;

    if let Some(kind) = cli.printer_type.as_deref() {
        config.kind = Some(kind.parse().context("invalid --printer-type")?);
    }
    if let Some(host) = &cli.host {
        config.host = Some(host.clone());
    }
    if let Some(queue) = &cli.queue {
        config.queue = Some(queue.clone());
    }
    if let Some(device) = &cli.device {
        config.device = Some(device.clone());
    }

    Destination::from_config(&config).context("could not select a print destination")
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_status(destination: &Destination, format: Format) -> Result<()> {
    let status = destination.status();
    let state = classify(&status);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "status": status,
                "state": state.as_str(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            println!("{status}");
            println!("state: {state}");
        }
    }

    Ok(())
}

fn cmd_send(file: &str, destination: &Destination, format: Format) -> Result<()> {
    let payload = read_payload(file)?;
    let outcome = destination.transmit(&payload);

    // Accepted payloads encode to one byte per char, plus the terminator.
    let sent_bytes = if outcome.is_accepted() {
        payload.chars().count() + PAYLOAD_TERMINATOR.len()
    } else {
        0
    };

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "accepted": outcome.is_accepted(),
                "code": outcome.code(),
                "sent_bytes": sent_bytes,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if outcome.is_accepted() {
                println!("sent {sent_bytes} bytes to printer");
            } else {
                eprintln!("printer rejected payload (code {})", outcome.code());
            }
        }
    }

    if !outcome.is_accepted() {
        process::exit(exit_code(outcome));
    }
    Ok(())
}

fn read_payload(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read payload from {file}"))
    }
}

/// Map an outcome to a process exit code. Backend codes outside the
/// 0..=255 range a shell can observe collapse to a plain failure.
fn exit_code(outcome: DispatchOutcome) -> i32 {
    match u8::try_from(outcome.code()) {
        Ok(code) => i32::from(code),
        Err(_) => 1,
    }
}
