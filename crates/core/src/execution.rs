use std::process::{Command, Stdio};

use log::info;

use crate::error::Result;

/// How a command run through the shell ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stderr: String,
}

impl ExecutionReport {
    /// What is reported upstream: the error output when there is any,
    /// otherwise the exit code.
    #[must_use]
    pub fn exit_condition(&self) -> String {
        if !self.stderr.is_empty() {
            return self.stderr.clone();
        }

        match self.exit_code {
            Some(code) => code.to_string(),
            None => "terminated by signal".to_string(),
        }
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs `command` with `shell -c`, inheriting stdin and stdout.
///
/// Standard error is captured so it can be reported; the caller echoes it.
///
/// # Errors
///
/// Returns an error if the shell cannot be spawned.
pub fn execute_command(shell: &str, command: &str) -> Result<ExecutionReport> {
    info!("Executing `{command}` with {shell}");

    let output = Command::new(shell)
        .arg("-c")
        .arg(command)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()?;

    Ok(ExecutionReport {
        exit_code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_condition_prefers_stderr() {
        let report = ExecutionReport {
            exit_code: Some(1),
            stderr: "ls: cannot access 'x'\n".to_string(),
        };
        assert_eq!(report.exit_condition(), "ls: cannot access 'x'\n");
        assert!(!report.success());
    }

    #[test]
    fn test_exit_condition_falls_back_to_code() {
        let report = ExecutionReport {
            exit_code: Some(0),
            stderr: String::new(),
        };
        assert_eq!(report.exit_condition(), "0");
        assert!(report.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_captures_stderr_and_code() {
        let report = execute_command("/bin/sh", "echo oops >&2; exit 3").unwrap();
        assert_eq!(report.exit_code, Some(3));
        assert_eq!(report.stderr, "oops\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_success() {
        let report = execute_command("/bin/sh", "true").unwrap();
        assert_eq!(report.exit_condition(), "0");
    }

    #[test]
    fn test_missing_shell_is_an_error() {
        assert!(execute_command("/definitely/not/a/shell", "true").is_err());
    }
}
