//! Integration tests for the CLI surface: exit-status conventions and
//! session-store behavior that do not need a browser or a window manager.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Path to the built `earthcall` binary.
fn agent_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // test binary name
    path.pop(); // deps
    path.push("earthcall");
    path
}

/// Runs the agent with an isolated state directory.
fn run_agent(state_dir: &Path, args: &[&str]) -> (Option<i32>, String, String) {
    let output = Command::new(agent_binary())
        .env("EARTHCALL_STATE_DIR", state_dir)
        .args(args)
        .output()
        .expect("failed to execute earthcall");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code(), stdout, stderr)
}

#[test]
fn unknown_command_exits_2_with_usage() {
    let state = TempDir::new().unwrap();
    let (code, _stdout, stderr) = run_agent(state.path(), &["frob-widget", "x"]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("Usage") || stderr.contains("usage"), "stderr: {stderr}");
}

#[test]
fn missing_argument_exits_2() {
    let state = TempDir::new().unwrap();
    for args in [&["click-text"][..], &["focus-window"][..], &["open-url"][..], &["type"][..]] {
        let (code, _stdout, _stderr) = run_agent(state.path(), args);
        assert_eq!(code, Some(2), "args: {args:?}");
    }
}

#[test]
fn help_lists_every_command() {
    let state = TempDir::new().unwrap();
    let (code, stdout, _stderr) = run_agent(state.path(), &["--help"]);
    assert_eq!(code, Some(0));
    for name in ["focus-window", "open-url", "click-text", "type", "session"] {
        assert!(stdout.contains(name), "help missing {name}: {stdout}");
    }
}

#[test]
fn malformed_url_is_a_usage_error_and_never_touches_the_store() {
    let state = TempDir::new().unwrap();
    let (code, _stdout, _stderr) = run_agent(state.path(), &["open-url", "not a url"]);
    assert_eq!(code, Some(2));
    assert!(!state.path().join("session.json").exists());
}

#[test]
fn focus_window_miss_exits_1_and_leaves_the_store_unmodified() {
    let state = TempDir::new().unwrap();
    // Fails as NotFound where a window provider exists and as a provider
    // failure where none does; both are well-formed failures.
    let (code, _stdout, _stderr) = run_agent(state.path(), &["focus-window", "zzz-no-such-window"]);
    assert_eq!(code, Some(1));
    assert!(!state.path().join("session.json").exists());
}

#[test]
fn session_status_on_empty_store() {
    let state = TempDir::new().unwrap();
    let (code, stdout, _stderr) = run_agent(state.path(), &["session", "status"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("No session recorded"), "stdout: {stdout}");
}

#[test]
fn session_clear_on_empty_store() {
    let state = TempDir::new().unwrap();
    let (code, stdout, _stderr) = run_agent(state.path(), &["session", "clear"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("No session record to remove"), "stdout: {stdout}");
}

#[test]
fn session_stop_without_a_session_is_a_no_op() {
    let state = TempDir::new().unwrap();
    let (code, stdout, _stderr) = run_agent(state.path(), &["session", "stop"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("No live session to stop"), "stdout: {stdout}");
}

#[test]
fn corrupt_record_is_reported_and_clearable() {
    let state = TempDir::new().unwrap();
    std::fs::write(state.path().join("session.json"), "not json {").unwrap();

    let (code, stdout, _stderr) = run_agent(state.path(), &["session", "status"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("unreadable"), "stdout: {stdout}");

    let (code, stdout, _stderr) = run_agent(state.path(), &["session", "clear"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("Removed session record"), "stdout: {stdout}");
    assert!(!state.path().join("session.json").exists());
}

#[test]
fn version_flag_works() {
    let state = TempDir::new().unwrap();
    let (code, stdout, _stderr) = run_agent(state.path(), &["--version"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("earthcall"), "stdout: {stdout}");
}
