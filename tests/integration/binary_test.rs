//! Tests that drive the `cmdprompt` binary through stdin.

use std::io::Write;
use std::process::{Command, Stdio};

/// Runs the binary with `args`, feeding `stdin`, and returns (exit code, stdout, stderr).
fn run_cmdprompt(args: &[&str], stdin: &str) -> (i32, String, String) {
    let config_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_cmdprompt"))
        .args(args)
        .arg("--log-stderr")
        .env("CMD_PROMPT_CONFIG", config_dir.path().join("config.toml"))
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for command");
    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

#[test]
fn test_direct_script_from_stdin() {
    let (code, stdout, _) = run_cmdprompt(
        &["--script", "-"],
        "echo hello world\nmissing\nquit\necho never\n",
    );

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "hello world\nCommand \"missing\" is not registered!\n"
    );
}

#[test]
fn test_queue_script_from_stdin() {
    let (code, stdout, _) = run_cmdprompt(
        &["--mode", "queue", "--script", "-"],
        "echo one\necho two\nq\necho never\n",
    );

    assert_eq!(code, 0);
    assert_eq!(stdout, "one\ntwo\n");
}

#[test]
fn test_interactive_prompt_text() {
    let (code, stdout, _) = run_cmdprompt(&["--prompt", "> "], "echo hi\nquit\n");

    assert_eq!(code, 0);
    assert_eq!(stdout, "> hi\n> ");
}

#[test]
fn test_ignore_empty_flag() {
    let (code, stdout, _) = run_cmdprompt(&["--script", "-", "--ignore-empty"], "\n  \nq\n");

    assert_eq!(code, 0);
    assert_eq!(stdout, "");
}

#[test]
fn test_missing_script_file_fails() {
    let (code, _, stderr) = run_cmdprompt(&["--script", "/nonexistent/cmds.txt"], "");

    assert_eq!(code, 1);
    assert!(stderr.contains("Cannot open script"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[prompt\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cmdprompt"))
        .args(["--script", "-", "--log-stderr"])
        .env("CMD_PROMPT_CONFIG", &path)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration error"));
}
