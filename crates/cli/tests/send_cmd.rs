//! CLI tests for the `label-relay send` subcommand.

use std::fs;
use std::process::{Command, Stdio};

use assert_cmd::cargo;

const SAMPLE_EPL: &str = "N\nA50,50,0,1,1,1,N,\"Hello\"\nP1\n";

fn relay_cmd() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("label-relay"));
    for var in ["PRINTER_TYPE", "PRINTER_HOST", "PRINTER_NAME", "PRINTER_DEVICE"] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_temp_payload(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("label.epl");
    fs::write(&path, content).unwrap();
    (dir, path.to_string_lossy().to_string())
}

#[test]
fn send_to_dummy_reports_byte_count() {
    let (_dir, path) = write_temp_payload(SAMPLE_EPL);

    let output = relay_cmd()
        .args(["--printer-type", "dummy", "--output", "json", "send", &path])
        .output()
        .expect("failed to run");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["accepted"], true);
    assert_eq!(json["code"], 0);
    // One byte per char plus the two-byte terminator.
    assert_eq!(json["sent_bytes"], (SAMPLE_EPL.len() + 2) as u64);
}

#[test]
fn send_to_dummy_pretty_message() {
    let (_dir, path) = write_temp_payload(SAMPLE_EPL);

    let output = relay_cmd()
        .args(["--printer-type", "dummy", "--output", "pretty", "send", &path])
        .output()
        .expect("failed to run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sent "), "got: {stdout}");
    assert!(stdout.contains("bytes to printer"), "got: {stdout}");
}

#[test]
fn send_to_device_writes_encoded_bytes() {
    let (_dir, path) = write_temp_payload(SAMPLE_EPL);
    let out_dir = tempfile::tempdir().unwrap();
    let device = out_dir.path().join("lp0");

    let output = relay_cmd()
        .args(["--output", "json"])
        .arg("--device")
        .arg(&device)
        .args(["send", &path])
        .output()
        .expect("failed to run");

    assert!(output.status.success());
    let mut expected = SAMPLE_EPL.as_bytes().to_vec();
    expected.extend_from_slice(b"\n\n");
    assert_eq!(fs::read(&device).unwrap(), expected);
}

#[test]
fn send_reads_stdin_for_dash() {
    use std::io::Write;

    let mut child = relay_cmd()
        .args(["--printer-type", "dummy", "--output", "json", "send", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(SAMPLE_EPL.as_bytes())
        .unwrap();
    let output = child.wait_with_output().expect("failed to wait");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["accepted"], true);
    assert_eq!(json["sent_bytes"], (SAMPLE_EPL.len() + 2) as u64);
}

#[test]
fn rejected_payload_exits_nonzero() {
    // Unencodable content: the euro sign has no ISO-8859-1 byte.
    let (_dir, path) = write_temp_payload("price: 10€\n");
    let out_dir = tempfile::tempdir().unwrap();
    let device = out_dir.path().join("lp0");

    let output = relay_cmd()
        .args(["--output", "json"])
        .arg("--device")
        .arg(&device)
        .args(["send", &path])
        .output()
        .expect("failed to run");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["accepted"], false);
    assert_eq!(json["code"], 1);
    assert_eq!(json["sent_bytes"], 0);
    assert!(!device.exists(), "nothing may reach the device");
}

#[test]
fn missing_payload_file_is_fatal() {
    let output = relay_cmd()
        .args(["--printer-type", "dummy", "send", "/no/such/payload.epl"])
        .output()
        .expect("failed to run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/no/such/payload.epl"), "got: {stderr}");
}
