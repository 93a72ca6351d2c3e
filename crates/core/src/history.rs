//! The history of commands run through gorilla, and the shell's own history.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

use log::debug;

use crate::config::HISTORY_LENGTH;
use crate::error::{Error, Result};

const FILE_DESCRIPTION: &str = "command history";
const SHELL_FILE_DESCRIPTION: &str = "shell history";

/// Commands are stored one per line, always newline terminated.
#[must_use]
pub fn format_command(command: &str) -> String {
    if command.ends_with('\n') {
        command.to_string()
    } else {
        format!("{command}\n")
    }
}

/// Commands starting with `:` are not recorded.
#[must_use]
pub fn should_record(command: &str) -> bool {
    !command.starts_with(':')
}

fn read_lines(path: &str, file_description: &str) -> Result<Option<Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents.lines().map(str::to_string).collect())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io_error(file_description, path, e)),
    }
}

fn append(path: &str, file_description: &str, text: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io_error(file_description, path, e))?;

    file.write_all(text.as_bytes())
        .map_err(|e| Error::io_error(file_description, path, e))
}

/// The most recent `limit` commands, oldest first.
///
/// Returns `None` when there is no history file yet.
///
/// # Errors
///
/// Returns an error if the history file exists but cannot be read.
pub fn recent_commands(history_path: &str, limit: usize) -> Result<Option<Vec<String>>> {
    let Some(lines) = read_lines(history_path, FILE_DESCRIPTION)? else {
        return Ok(None);
    };

    let start = lines.len().saturating_sub(limit);
    Ok(Some(lines[start..].to_vec()))
}

/// Appends `command` unless it is one of the last [`HISTORY_LENGTH`] entries.
///
/// Returns whether the command was written.
///
/// # Errors
///
/// Returns an error if the history file cannot be read or written.
pub fn record_command(history_path: &str, command: &str) -> Result<bool> {
    let command = format_command(command);
    let entry = command.trim_end_matches('\n');

    let recent = recent_commands(history_path, HISTORY_LENGTH)?.unwrap_or_default();
    if recent.iter().any(|line| line == entry) {
        debug!("Not recording recently used command: {entry}");
        return Ok(false);
    }

    append(history_path, FILE_DESCRIPTION, &command)?;
    Ok(true)
}

/// Appends `command` to the shell's history file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn append_to_shell_history(shell_history_path: &str, command: &str) -> Result<()> {
    append(
        shell_history_path,
        SHELL_FILE_DESCRIPTION,
        &format_command(command),
    )
}

/// Every line of the shell history file; empty when there is none.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_shell_history(shell_history_path: &str) -> Result<Vec<String>> {
    Ok(read_lines(shell_history_path, SHELL_FILE_DESCRIPTION)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_history() -> (tempfile::TempDir, String) {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("history").to_str().unwrap().to_string();
        (temp_dir, path)
    }

    #[test]
    fn test_format_command() {
        assert_eq!(format_command("ls"), "ls\n");
        assert_eq!(format_command("ls\n"), "ls\n");
    }

    #[test]
    fn test_should_record() {
        assert!(should_record("ls -la"));
        assert!(!should_record(":noop"));
    }

    #[test]
    fn test_missing_history_is_none() {
        let (_temp_dir, path) = temp_history();
        assert_eq!(recent_commands(&path, 10).unwrap(), None);
    }

    #[test]
    fn test_record_creates_file_and_skips_recent_duplicates() {
        let (_temp_dir, path) = temp_history();

        assert!(record_command(&path, "ls").unwrap());
        assert!(record_command(&path, "pwd").unwrap());
        assert!(!record_command(&path, "ls").unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "ls\npwd\n");
    }

    #[test]
    fn test_duplicates_older_than_window_are_recorded_again() {
        let (_temp_dir, path) = temp_history();
        record_command(&path, "echo first").unwrap();
        for i in 0..HISTORY_LENGTH {
            record_command(&path, &format!("echo {i}")).unwrap();
        }

        assert!(record_command(&path, "echo first").unwrap());
    }

    #[test]
    fn test_recent_commands_returns_last_entries() {
        let (_temp_dir, path) = temp_history();
        for i in 0..15 {
            record_command(&path, &format!("echo {i}")).unwrap();
        }

        let recent = recent_commands(&path, HISTORY_LENGTH).unwrap().unwrap();
        assert_eq!(recent.len(), HISTORY_LENGTH);
        assert_eq!(recent.first().unwrap(), "echo 5");
        assert_eq!(recent.last().unwrap(), "echo 14");
    }

    #[test]
    fn test_shell_history_append_and_read() {
        let (_temp_dir, path) = temp_history();
        assert!(read_shell_history(&path).unwrap().is_empty());

        append_to_shell_history(&path, "git status").unwrap();
        append_to_shell_history(&path, "git status").unwrap();
        assert_eq!(read_shell_history(&path).unwrap(), vec!["git status", "git status"]);
    }
}
