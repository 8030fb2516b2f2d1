//! Integration tests for `shabbat serve` over stdio.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn shabbat_binary() -> std::path::PathBuf {
    assert_cmd::cargo::cargo_bin!("shabbat").into()
}

fn spawn_serve(config_dir: &TempDir) -> std::process::Child {
    Command::new(shabbat_binary())
        .arg("serve")
        .env("SHABBAT_CONFIG_DIR", config_dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn shabbat serve")
}

/// Send a JSON-RPC message as newline-delimited JSON.
fn send_jsonrpc(stdin: &mut impl Write, msg: &serde_json::Value) {
    let line = serde_json::to_string(msg).unwrap();
    writeln!(stdin, "{line}").unwrap();
    stdin.flush().unwrap();
}

fn mcp_handshake(child: &mut std::process::Child) {
    let stdin = child.stdin.as_mut().expect("stdin pipe");

    let init_req = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "test", "version": "0.1.0" }
        }
    });
    send_jsonrpc(stdin, &init_req);
    std::thread::sleep(Duration::from_millis(300));

    let initialized = serde_json::json!({
        "jsonrpc": "2.0",
        "method": "notifications/initialized"
    });
    send_jsonrpc(stdin, &initialized);
    std::thread::sleep(Duration::from_millis(200));
}

#[test]
fn serve_exits_on_early_stdin_eof() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_serve(&dir);
    std::thread::sleep(Duration::from_millis(200));

    drop(child.stdin.take());

    let start = Instant::now();
    let output = child.wait_with_output().expect("wait");
    assert!(
        output.status.success(),
        "early stdin EOF should exit 0, got {}",
        output.status
    );
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn serve_answers_window_call() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_serve(&dir);
    mcp_handshake(&mut child);

    let stdin = child.stdin.as_mut().expect("stdin pipe");
    let call = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/call",
        "params": {
            "name": "shabbat_window",
            "arguments": { "at": "2024-06-19T09:00:00Z" }
        }
    });
    send_jsonrpc(stdin, &call);
    std::thread::sleep(Duration::from_millis(500));

    drop(child.stdin.take());
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success(), "serve should exit 0, got {}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serverInfo"), "missing initialize response: {stdout}");
    assert!(stdout.contains("candle_lighting"), "missing tool result: {stdout}");
}

#[test]
fn serve_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[location]\ntimezone = \"Not/AZone\"\n",
    )
    .unwrap();

    let output = spawn_serve(&dir).wait_with_output().expect("wait");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Not/AZone"));
}
