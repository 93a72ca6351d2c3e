//! Choosing one of the suggested commands, running it and recording it.

use std::io::Write;

use gorilla_core::config::HISTORY_LENGTH;
use gorilla_core::error::Error as CoreError;
use gorilla_core::execution::{execute_command, ExecutionReport};
use gorilla_core::history::{append_to_shell_history, recent_commands, record_command, should_record};
use gorilla_core::personalization::{personalize, OpenAiSummarizer, PatternAnonymizer};
use gorilla_core::settings::Settings;
use gorilla_prompt::{Answer, Error as PromptError, Outcome, Question, SelectConfig};
use log::{debug, info, warn};

use crate::console::Asker;
use crate::error::Result;

pub const SELECT_INSTRUCTION: &str = "Welcome to Gorilla. Use arrow keys to select. Ctrl-C to Exit";

/// What became of the list of suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(String),
    Cancelled,
    /// No terminal to select on; the suggestions were only printed.
    Printed,
}

/// The recent commands run through gorilla, for `--history`.
///
/// # Errors
///
/// Returns an error if the history file cannot be read.
pub fn tool_history(history_path: &str, out: &mut dyn Write) -> Result<Vec<String>> {
    let commands = recent_commands(history_path, HISTORY_LENGTH)?.unwrap_or_default();
    if commands.is_empty() {
        writeln!(out, "No command history.")?;
    }
    Ok(commands)
}

/// A summary of the shell history when personalization is on.
///
/// Failures are logged and mean no summary.
#[must_use]
pub fn personalized_history(
    settings: &Settings,
    query: &str,
    tool_history: &[String],
    shell_history_path: &str,
) -> Option<String> {
    let api_key = settings.personalization_key()?;

    let summary = OpenAiSummarizer::new(api_key).and_then(|summarizer| {
        personalize(
            query,
            tool_history,
            shell_history_path,
            &PatternAnonymizer,
            &summarizer,
        )
    });

    match summary {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!("Continuing without personalization: {e}");
            None
        }
    }
}

/// Numbered list of suggestions, for when they cannot be selected interactively.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn print_suggestions(commands: &[String], out: &mut dyn Write) -> Result<()> {
    for (index, command) in commands.iter().enumerate() {
        writeln!(out, "{}. {command}", index + 1)?;
    }
    Ok(())
}

/// Lets the user pick one of `commands`.
///
/// # Errors
///
/// Returns prompt errors other than a missing terminal, and write errors.
pub fn select_command(
    asker: &mut dyn Asker,
    commands: &[String],
    out: &mut dyn Write,
) -> Result<Selection> {
    let config = SelectConfig::new(commands.iter().cloned()).with_instruction(SELECT_INSTRUCTION);
    let question = Question::new("command", "", config);

    match asker.ask(&question) {
        Ok(Outcome::Answered(Answer::Text(command))) => Ok(Selection::Chosen(command)),
        Ok(Outcome::Answered(answer)) => {
            debug!("Unexpected answer to the command selection: {answer:?}");
            Ok(Selection::Cancelled)
        }
        Ok(Outcome::Cancelled) => Ok(Selection::Cancelled),
        Err(PromptError::NotATerminal) => {
            print_suggestions(commands, out)?;
            Ok(Selection::Printed)
        }
        Err(e) => Err(e.into()),
    }
}

/// Runs `command`, echoes its error output and records it in the histories.
///
/// `shell_history_path` is only given where the shell history should be
/// extended too. History write failures are logged, not returned.
///
/// # Errors
///
/// Returns an error if the shell cannot be started.
pub fn run_command(
    shell: &str,
    command: &str,
    history_path: &str,
    shell_history_path: Option<&str>,
    err: &mut dyn Write,
) -> Result<ExecutionReport> {
    let report = execute_command(shell, command)?;
    if !report.stderr.is_empty() {
        writeln!(err, "{}", report.stderr)?;
    }

    if should_record(command) {
        match record_command(history_path, command) {
            Ok(true) => debug!("Recorded `{command}`"),
            Ok(false) => {}
            Err(e) => warn!("{e}"),
        }
    }

    if let Some(shell_history_path) = shell_history_path {
        if let Err(e) = append_to_shell_history(shell_history_path, command) {
            warn!("{e}");
        }
    }

    info!("Command exited with {}", report.exit_condition());
    Ok(report)
}

/// What to tell the user about a failed execution report.
#[must_use]
pub fn report_failure_message(error: &CoreError) -> String {
    match error {
        CoreError::Http { original, .. } if original.is_timeout() => {
            "Failed to send command execution result to the server: Timeout.".to_string()
        }
        _ => "Failed to send command execution result to the server.".to_string(),
    }
}
