//! Action execution
//!
//! Table entries are opaque shell invocations. The dispatcher hands them to an
//! [`ActionExecutor`] and never looks at the resulting status.

use anyhow::{Context, Result};
use std::process::{Command, ExitStatus};

/// Runs one resolved command to completion.
pub trait ActionExecutor {
    fn execute(&mut self, command: &str) -> Result<ExitStatus>;
}

/// Runs commands through `sh -c`, blocking until they exit.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self {
            shell: "/bin/sh".to_string(),
        }
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for ShellExecutor {
    fn execute(&mut self, command: &str) -> Result<ExitStatus> {
        Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .status()
            .with_context(|| format!("Failed to spawn {} for {:?}", self.shell, command))
    }
}

/// Records commands instead of running them. Used by tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingExecutor {
    pub executed: Vec<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.executed)
    }
}

impl ActionExecutor for RecordingExecutor {
    fn execute(&mut self, command: &str) -> Result<ExitStatus> {
        use std::os::unix::process::ExitStatusExt;

        self.executed.push(command.to_string());
        Ok(ExitStatus::from_raw(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_executor_runs_command() {
        let mut exec = ShellExecutor::new();
        let status = exec.execute("exit 3").unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn test_shell_executor_empty_command_succeeds() {
        let mut exec = ShellExecutor::new();
        assert!(exec.execute("").unwrap().success());
    }

    #[test]
    fn test_missing_shell_is_an_error() {
        let mut exec = ShellExecutor::with_shell("/nonexistent/shell");
        assert!(exec.execute("true").is_err());
    }

    #[test]
    fn test_recording_executor_keeps_order() {
        let mut exec = RecordingExecutor::new();
        exec.execute("a").unwrap();
        exec.execute("b").unwrap();
        assert_eq!(exec.take(), vec!["a", "b"]);
        assert!(exec.executed.is_empty());
    }
}
