//! Yes/no question.

use crate::answer::Answer;
use crate::key::Key;
use crate::render::{question_line, Frame};
use crate::theme::Theme;

use super::{PromptState, Step};

#[derive(Debug, Clone)]
pub struct ConfirmConfig {
    pub(crate) default: bool,
    pub(crate) auto_enter: bool,
    pub(crate) instruction: Option<String>,
}

impl ConfirmConfig {
    /// Defaults to "yes", submitting as soon as y or n is typed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default: true,
            auto_enter: true,
            instruction: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    /// When disabled, y and n only change the pending value and Enter submits.
    #[must_use]
    pub fn with_auto_enter(mut self, auto_enter: bool) -> Self {
        self.auto_enter = auto_enter;
        self
    }

    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmState<'a> {
    message: &'a str,
    config: &'a ConfirmConfig,
    value: bool,
    typed: Option<char>,
}

impl<'a> ConfirmState<'a> {
    #[must_use]
    pub fn new(message: &'a str, config: &'a ConfirmConfig) -> Self {
        Self {
            message,
            config,
            value: config.default,
            typed: None,
        }
    }

    /// The answer Enter would submit.
    #[must_use]
    pub fn value(&self) -> bool {
        self.value
    }
}

impl PromptState for ConfirmState<'_> {
    fn handle_key(mut self, key: Key) -> Step<Self> {
        match key {
            Key::CtrlC => Step::Cancel,
            Key::Enter => Step::Submit(Answer::Bool(self.value)),
            Key::Char(c @ ('y' | 'Y' | 'n' | 'N')) => {
                self.value = c.eq_ignore_ascii_case(&'y');
                if self.config.auto_enter {
                    return Step::Submit(Answer::Bool(self.value));
                }
                self.typed = Some(c);
                Step::Continue(self)
            }
            Key::Backspace => {
                self.typed = None;
                self.value = self.config.default;
                Step::Continue(self)
            }
            _ => Step::Continue(self),
        }
    }

    fn render(&self, theme: &Theme) -> Frame {
        let hint = if self.config.default { "(Y/n)" } else { "(y/N)" };
        let instruction = self.config.instruction.as_deref().unwrap_or(hint);

        let mut line = question_line(theme, self.message)
            .push(format!("{instruction} "), theme.instruction_style);
        if let Some(typed) = self.typed {
            line = line.push(typed.to_string(), theme.plain_style);
        }
        Frame::new(vec![line])
    }
}
