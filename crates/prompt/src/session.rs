//! Runs prompts against a key source and a screen.

use crate::answer::{Answer, AnswerSet, Outcome};
use crate::error::{Error, Result};
use crate::key::KeySource;
use crate::prompts::{
    AutocompleteState, CheckboxState, ConfirmState, PromptState, SelectState, Step, TextState,
};
use crate::question::{PromptKind, Question};
use crate::render::{answered_frame, Frame, Renderer, Screen};
use crate::terminal::{Terminal, TerminalKeys, TerminalScreen};
use crate::theme::Theme;

/// Drives one prompt state until it submits or cancels.
///
/// Every consumed key triggers exactly one redraw. On cancel the prompt's rows
/// are cleared; on submit they are left for the caller to replace.
///
/// # Errors
///
/// Returns an error when the key source is closed or the screen fails to write.
pub fn drive<S, K, W>(
    mut state: S,
    keys: &mut K,
    screen: &mut W,
    renderer: &mut Renderer,
    theme: &Theme,
) -> Result<Outcome<Answer>>
where
    S: PromptState,
    K: KeySource + ?Sized,
    W: Screen + ?Sized,
{
    renderer.draw(screen, &state.render(theme))?;

    loop {
        let key = keys.read_key()?;
        match state.handle_key(key) {
            Step::Continue(next) => {
                state = next;
                renderer.draw(screen, &state.render(theme))?;
            }
            Step::Submit(answer) => return Ok(Outcome::Answered(answer)),
            Step::Cancel => {
                renderer.draw(screen, &Frame::default())?;
                renderer.finish(screen)?;
                return Ok(Outcome::Cancelled);
            }
        }
    }
}

/// Runs a single prompt, leaving a one-line summary of the answer on screen.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfig`] for unusable choice lists, and
/// terminal errors from the key source or screen.
pub fn run_prompt<K, W>(
    name: &str,
    message: &str,
    kind: &PromptKind,
    keys: &mut K,
    screen: &mut W,
    theme: &Theme,
) -> Result<Outcome<Answer>>
where
    K: KeySource + ?Sized,
    W: Screen + ?Sized,
{
    let mut renderer = Renderer::new();
    let outcome = match kind {
        PromptKind::Select(config) => {
            let state = SelectState::select(name, message, config)?;
            drive(state, keys, screen, &mut renderer, theme)?
        }
        PromptKind::RawSelect(config) => {
            let state = SelectState::raw(name, message, config)?;
            drive(state, keys, screen, &mut renderer, theme)?
        }
        PromptKind::Checkbox(config) => {
            let state = CheckboxState::new(name, message, config)?;
            drive(state, keys, screen, &mut renderer, theme)?
        }
        PromptKind::Text(config) => {
            drive(TextState::text(message, config), keys, screen, &mut renderer, theme)?
        }
        PromptKind::Password(config) => {
            drive(TextState::password(message, config), keys, screen, &mut renderer, theme)?
        }
        PromptKind::Path(config) => {
            drive(TextState::path(message, config), keys, screen, &mut renderer, theme)?
        }
        PromptKind::Autocomplete(config) => drive(
            AutocompleteState::new(message, config),
            keys,
            screen,
            &mut renderer,
            theme,
        )?,
        PromptKind::Confirm(config) => {
            drive(ConfirmState::new(message, config), keys, screen, &mut renderer, theme)?
        }
    };

    if let Outcome::Answered(answer) = &outcome {
        renderer.draw(screen, &answered_frame(theme, message, &kind.summary(answer)))?;
        renderer.finish(screen)?;
    }
    Ok(outcome)
}

fn missing_configuration(question: &Question) -> Error {
    Error::invalid_config(question.name(), "question has no prompt configuration")
}

/// Asks `questions` in order, skipping those whose `when` predicate fails.
///
/// A cancelled prompt ends the form and discards every answer collected so far.
///
/// # Errors
///
/// Same conditions as [`run_prompt`].
pub fn run_form<K, W>(
    questions: &[Question],
    keys: &mut K,
    screen: &mut W,
    theme: &Theme,
) -> Result<Outcome<AnswerSet>>
where
    K: KeySource + ?Sized,
    W: Screen + ?Sized,
{
    let mut answers = AnswerSet::new();

    for question in questions {
        if !question.should_ask(&answers) {
            continue;
        }

        let built = question.build(&answers);
        let Some(kind) = question.kind().or(built.as_ref()) else {
            return Err(missing_configuration(question));
        };

        match run_prompt(question.name(), question.message(), kind, keys, screen, theme)? {
            Outcome::Answered(answer) => answers.insert(question.name(), answer),
            Outcome::Cancelled => return Ok(Outcome::Cancelled),
        }
    }

    Ok(Outcome::Answered(answers))
}

/// A key source, a screen and the theme used to draw on it.
pub struct Session<K, W> {
    keys: K,
    screen: W,
    theme: Theme,
}

impl<K: KeySource, W: Screen> Session<K, W> {
    pub fn new(keys: K, screen: W) -> Self {
        Self {
            keys,
            screen,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Asks a single question. Its `when` predicate is not consulted and a
    /// deferred configuration is built from an empty answer set.
    ///
    /// # Errors
    ///
    /// Same conditions as [`run_prompt`], and [`Error::InvalidConfig`] when the
    /// question yields no configuration.
    pub fn ask(&mut self, question: &Question) -> Result<Outcome<Answer>> {
        let built = question.build(&AnswerSet::new());
        let Some(kind) = question.kind().or(built.as_ref()) else {
            return Err(missing_configuration(question));
        };
        run_prompt(
            question.name(),
            question.message(),
            kind,
            &mut self.keys,
            &mut self.screen,
            &self.theme,
        )
    }

    /// # Errors
    ///
    /// Same conditions as [`run_form`].
    pub fn ask_form(&mut self, questions: &[Question]) -> Result<Outcome<AnswerSet>> {
        run_form(questions, &mut self.keys, &mut self.screen, &self.theme)
    }

    pub fn into_parts(self) -> (K, W) {
        (self.keys, self.screen)
    }
}

impl Session<TerminalKeys, TerminalScreen> {
    /// Opens the controlling terminal in raw mode for the lifetime of the session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotATerminal`] when stdin or stdout is not a terminal.
    pub fn terminal() -> Result<Self> {
        let Terminal { keys, screen } = Terminal::open()?;
        Ok(Self::new(keys, screen))
    }
}

/// Asks one question on the terminal.
///
/// # Errors
///
/// Returns [`crate::Error::NotATerminal`] when no terminal is attached, plus
/// the conditions of [`run_prompt`].
pub fn ask(question: &Question, theme: &Theme) -> Result<Outcome<Answer>> {
    Session::terminal()?.with_theme(theme.clone()).ask(question)
}

/// Asks a form on the terminal.
///
/// # Errors
///
/// Same conditions as [`ask`].
pub fn ask_form(questions: &[Question], theme: &Theme) -> Result<Outcome<AnswerSet>> {
    Session::terminal()?.with_theme(theme.clone()).ask_form(questions)
}

