//! Optional enrichment of a query with a summary of the user's shell history.
//!
//! The history is read locally, stripped of personal data by an
//! [`Anonymizer`] and only then handed to a [`Summarizer`].

mod anonymize;
mod prompts;
mod summarize;

use itertools::Itertools;
use log::{debug, info};

pub use anonymize::{Anonymizer, PatternAnonymizer};
pub use prompts::{render_user_prompt, SYSTEM_PROMPT, USER_PROMPT_TEMPLATE};
pub use summarize::{
    validate_api_key, validate_api_key_at, OpenAiSummarizer, Summarizer, OPENAI_API_BASE,
    SUMMARY_MODEL,
};

use crate::error::Result;
use crate::history::read_shell_history;

/// How many of the most recent shell history lines are considered.
pub const SHELL_HISTORY_LENGTH: usize = 10;

/// The most recent `limit` lines, de-duplicated keeping first occurrences,
/// joined with newlines.
#[must_use]
pub fn condense_history(lines: &[String], limit: usize) -> String {
    let start = lines.len().saturating_sub(limit);
    lines[start..]
        .iter()
        .map(|line| line.trim_end())
        .filter(|line| !line.is_empty())
        .unique()
        .join("\n")
}

/// Summarizes the shell history at `shell_history_path` with `query` and
/// the tool's own recent commands in mind.
///
/// # Errors
///
/// Returns an error if the history cannot be read, the prompt cannot be
/// rendered or the summarizer fails.
pub fn personalize(
    query: &str,
    tool_history: &[String],
    shell_history_path: &str,
    anonymizer: &dyn Anonymizer,
    summarizer: &dyn Summarizer,
) -> Result<String> {
    let lines = read_shell_history(shell_history_path)?;
    debug!("Read {} shell history lines", lines.len());

    let history = anonymizer.anonymize(&condense_history(&lines, SHELL_HISTORY_LENGTH));
    let user_prompt = render_user_prompt(&history, &tool_history.join("\n"), query)?;

    let summary = summarizer.summarize(SYSTEM_PROMPT, &user_prompt)?;
    info!("Personalized the request with a {} character summary", summary.len());
    Ok(summary)
}
