//! Asking questions and styling prompts.
//!
//! Every question is asked through an [`Asker`] so that the flows in this
//! crate can be driven by scripted keys in tests. On a real terminal each
//! question opens its own raw-mode session, which keeps plain `println!`
//! output between questions readable.

use gorilla_core::settings::ThemeSettings;
use gorilla_prompt::render::Screen;
use gorilla_prompt::{
    parse_color, supports_emoji, Answer, ConfirmConfig, Error as PromptError, KeySource, Outcome,
    PasswordConfig, Question, Result as PromptResult, Session, Theme,
};
use log::{debug, warn};

pub const GORILLA_EMOJI: &str = "🦍 ";

/// Something that can put a question to the user.
pub trait Asker {
    fn ask(&mut self, question: &Question) -> PromptResult<Outcome<Answer>>;
}

impl<K: KeySource, W: Screen> Asker for Session<K, W> {
    fn ask(&mut self, question: &Question) -> PromptResult<Outcome<Answer>> {
        Session::ask(self, question)
    }
}

/// Asks on the controlling terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalAsker {
    theme: Theme,
}

impl TerminalAsker {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Asker for TerminalAsker {
    fn ask(&mut self, question: &Question) -> PromptResult<Outcome<Answer>> {
        gorilla_prompt::ask(question, &self.theme)
    }
}

/// Asks a yes/no question.
///
/// Without a terminal the default answer is taken.
///
/// # Errors
///
/// Returns prompt errors other than [`PromptError::NotATerminal`].
pub fn confirm(
    asker: &mut dyn Asker,
    name: &str,
    message: &str,
    default: bool,
) -> PromptResult<Outcome<bool>> {
    let question = Question::new(name, message, ConfirmConfig::new().with_default(default));

    match asker.ask(&question) {
        Ok(outcome) => Ok(outcome.map(|answer| answer.as_bool().unwrap_or(default))),
        Err(PromptError::NotATerminal) => {
            debug!("No terminal for `{name}`, answering {default}");
            Ok(Outcome::Answered(default))
        }
        Err(e) => Err(e),
    }
}

/// Asks for a secret, trimmed of surrounding whitespace.
///
/// # Errors
///
/// Returns any prompt error, including [`PromptError::NotATerminal`].
pub fn secret(asker: &mut dyn Asker, name: &str, message: &str) -> PromptResult<Outcome<String>> {
    let question = Question::new(name, message, PasswordConfig::new());
    Ok(asker.ask(&question)?.map(|answer| {
        answer
            .as_text()
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }))
}

/// The emoji prefix, or nothing when the terminal cannot show it.
#[must_use]
pub fn gorilla_emoji() -> &'static str {
    if supports_emoji() {
        GORILLA_EMOJI
    } else {
        ""
    }
}

/// Builds the prompt theme from the configured colour names.
///
/// Unknown colour names are logged and ignored.
#[must_use]
pub fn build_theme(settings: Option<&ThemeSettings>, unicode: bool) -> Theme {
    let theme = if unicode {
        Theme::default()
    } else {
        Theme::default().ascii()
    };

    let Some(settings) = settings else {
        return theme;
    };

    let color = |name: &Option<String>| {
        name.as_deref().and_then(|name| match parse_color(name) {
            Ok(color) => Some(color),
            Err(e) => {
                warn!("Ignoring theme colour: {e}");
                None
            }
        })
    };

    let mut theme = theme;
    if let Some(accent) = color(&settings.accent) {
        theme = theme.with_accent(accent);
    }
    if let Some(answer) = color(&settings.answer) {
        theme = theme.with_answer_color(answer);
    }
    if let Some(disabled) = color(&settings.disabled) {
        theme = theme.with_disabled_color(disabled);
    }
    if let Some(error) = color(&settings.error) {
        theme = theme.with_error_color(error);
    }
    theme
}
