//! Process-level tests for the g600-controller binary
//!
//! These run the built executable and check exit codes and output. A startup
//! that reaches the device loop would block forever, so tests that need startup
//! to fail are skipped when a G600 is actually present.

use std::process::{Command, Output};

fn controller(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_g600-controller"))
        .args(args)
        .output()
        .expect("failed to run g600-controller")
}

fn combined(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

fn g600_present() -> bool {
    g600_controller::device::find_g600().is_ok()
}

/// Unknown flags are a startup error
#[test]
fn test_unknown_flag_exits_with_failure() {
    let output = controller(&["--loud"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("--loud"));
}

/// Help is not part of the flag surface
#[test]
fn test_help_flag_is_rejected() {
    let output = controller(&["--help"]);
    assert_eq!(output.status.code(), Some(1));
}

/// Positional arguments are rejected too
#[test]
fn test_positional_argument_is_rejected() {
    let output = controller(&["extra"]);
    assert_eq!(output.status.code(), Some(1));
}

/// Without a G600 the locator failure and its hints are reported
#[test]
fn test_missing_device_reports_error_and_suggestions() {
    if g600_present() {
        return;
    }

    let output = controller(&[]);
    assert_eq!(output.status.code(), Some(1));

    let text = combined(&output);
    assert!(
        text.contains("couldn't open device directory")
            || text.contains("couldn't find G600 input device"),
        "unexpected output: {text}"
    );
    assert!(text.contains("Suggestion:"));
    assert!(text.contains("Starting G600 Linux controller."));
}

/// `--quiet` still reports the failure
#[test]
fn test_quiet_still_reports_errors() {
    if g600_present() {
        return;
    }

    let output = controller(&["--quiet"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Error: "));
}

/// `--silent` prints nothing but keeps the exit code
#[test]
fn test_silent_prints_nothing() {
    if g600_present() {
        return;
    }

    let output = controller(&["--silent"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

/// `--silent` wins over `--quiet`, and repeated flags are accepted
#[test]
fn test_silent_overrides_quiet() {
    if g600_present() {
        return;
    }

    let output = controller(&["--quiet", "--silent", "--silent"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).is_empty());
}
