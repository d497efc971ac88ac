//! # External Command Runner
//!
//! Thin wrapper around process invocation for the transfer-tool backends.
//! A spawn failure is an error; a non-zero exit is reported back in the
//! output record for the caller to judge.

use std::process::Command;

use super::errors::{FileOpError, FileOpResult};

/// Captured output of one external tool invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

impl CommandOutput {
    /// True when the tool exited with status zero.
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Converts a failed invocation into an error, passing through success.
    pub fn require_success(self, tool: &str) -> FileOpResult<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(FileOpError::CommandFailed {
                tool: tool.to_string(),
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs an external tool to completion, capturing stdout and stderr.
pub fn run_command(program: &str, args: &[&str]) -> FileOpResult<CommandOutput> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| FileOpError::Spawn {
            tool: program.to_string(),
            reason: e.to_string(),
        })?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        code: output.status.code().unwrap_or(-1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_and_status() {
        let out = run_command("echo", &["hello"]).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let out = run_command("false", &[]).unwrap();
        assert!(!out.success());
        assert!(out.require_success("false").is_err());
    }

    #[test]
    fn test_missing_tool_is_spawn_error() {
        let err = run_command("definitely-not-a-real-tool", &[]).unwrap_err();
        assert!(matches!(err, FileOpError::Spawn { .. }));
    }
}
