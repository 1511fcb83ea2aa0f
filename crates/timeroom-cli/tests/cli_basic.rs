//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with stdin closed and a throwaway config
//! directory, and verify outputs.

use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_timeroom-cli"))
        .args(args)
        .env("TIMEROOM_CONFIG_DIR", config_dir)
        .env_remove("TIMEROOM_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn lines(stdout: &str) -> Vec<&str> {
    stdout.lines().collect()
}

#[test]
fn test_countdown_runs_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["--tick-ms", "10", "timer", "countdown", "--seconds", "2"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(lines(&stdout), ["2s", "1s", "0s", "Time's up!"]);
}

#[test]
fn test_hiit_labels_rounds() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &[
            "--tick-ms", "5", "timer", "hiit", "--work", "1", "--rest", "1", "--rounds", "2",
        ],
    );
    assert_eq!(code, 0);
    assert_eq!(
        lines(&stdout),
        [
            "Round 1 - Work: 1s",
            "Round 1 - Work: 0s",
            "Round 1 - Rest: 1s",
            "Round 1 - Rest: 0s",
            "Round 2 - Work: 1s",
            "Round 2 - Work: 0s",
            "Round 2 - Rest: 1s",
            "Round 2 - Rest: 0s",
            "HIIT complete!",
        ]
    );
}

#[test]
fn test_invalid_input_exits_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["timer", "countdown", "--seconds", "abc"],
    );
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(
        stderr.contains("error: Please enter a valid number of seconds."),
        "stderr: {stderr}"
    );

    let (_, stderr, code) = run_cli(dir.path(), &["timer", "custom", "--pattern", "10,x"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Enter a comma-separated list of seconds."));

    let (_, stderr, code) = run_cli(
        dir.path(),
        &["timer", "soundloop", "--interval", "0", "--repeats", "2"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Enter valid values."), "stderr: {stderr}");
}

#[test]
fn test_plan_rejects_runs_too_long_to_count() {
    let dir = tempfile::tempdir().unwrap();
    let max = u64::MAX.to_string();
    let (stdout, stderr, code) = run_cli(dir.path(), &["plan", "countdown", "--seconds", &max]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error: Please enter a valid number of seconds."));

    let (_, stderr, code) = run_cli(dir.path(), &["plan", "presentation", "--minutes", &max]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Enter total minutes."));

    let (_, stderr, code) = run_cli(
        dir.path(),
        &["plan", "tabata", "--work", "1", "--rest", "1", "--rounds", "4000000000"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Please enter valid values."));
}

#[test]
fn test_past_event_finishes_on_first_tick() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["--tick-ms", "5", "timer", "event", "--at", "2000-01-01T00:00:00Z"],
    );
    assert_eq!(code, 0);
    assert_eq!(lines(&stdout), ["Event started!"]);
}

#[test]
fn test_sound_loop_counts_plays() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "output.bell", "false"]);
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["--tick-ms", "5", "timer", "soundloop", "--interval", "1", "--repeats", "2"],
    );
    assert_eq!(code, 0);
    assert_eq!(
        lines(&stdout),
        ["Play sound! (1/2)", "Play sound! (2/2)", "Sound loop complete!"]
    );
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["--json", "--tick-ms", "5", "timer", "countdown", "--seconds", "1"],
    );
    assert_eq!(code, 0);
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();
    assert_eq!(events.first().unwrap()["type"], "snapshot");
    assert_eq!(events[1]["type"], "timer_started");
    let last = events.last().unwrap();
    assert_eq!(last["type"], "timer_completed");
    assert_eq!(last["message"], "Time's up!");
}

#[test]
fn test_config_defaults_feed_timer() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "set", "defaults.countdown_seconds", "1"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "defaults.countdown_seconds"]);
    assert_eq!(stdout.trim(), "1");

    let (stdout, _, code) = run_cli(dir.path(), &["--tick-ms", "5", "timer", "countdown"]);
    assert_eq!(code, 0);
    assert_eq!(lines(&stdout), ["1s", "0s", "Time's up!"]);
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "theme"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("theme"));

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "tick_period_ms", "fast"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_path_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));

    run_cli(dir.path(), &["config", "set", "defaults.chess_minutes", "3"]);
    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "defaults.chess_minutes"]);
    assert_eq!(stdout.trim(), "5");
}

#[test]
fn test_plan_prints_phases() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        dir.path(),
        &["plan", "tabata", "--work", "2", "--rest", "1", "--rounds", "2"],
    );
    assert_eq!(code, 0);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["kind"], "tabata");
    assert_eq!(plan["total_secs"], 6);
    assert_eq!(plan["total_ticks"], 10);
    assert_eq!(plan["plan"]["sequence"].as_array().unwrap().len(), 4);
    assert_eq!(plan["plan"]["completion_message"], "Tabata complete!");

    let (stdout, _, code) = run_cli(dir.path(), &["plan", "chess", "--minutes", "2"]);
    assert_eq!(code, 0);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["request"]["seconds_per_player"], 120);
    assert!(plan.get("plan").is_none());
}

#[test]
fn test_kinds_lists_every_identifier() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["kinds"]);
    assert_eq!(code, 0);
    for id in [
        "countdown",
        "stopwatch",
        "hiit",
        "pomodoro",
        "tabata",
        "chess",
        "event",
        "custom",
        "presentation",
        "breathing",
        "soundloop",
    ] {
        assert!(stdout.contains(id), "missing {id}");
    }
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("timeroom-cli"));
}
