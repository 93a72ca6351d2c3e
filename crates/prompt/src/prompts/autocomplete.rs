//! Free text with a filtered list of suggestions.

use std::fmt::{Debug, Formatter};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::answer::Answer;
use crate::choice::Choice;
use crate::key::Key;
use crate::render::{page_window, push_error, push_window, question_line, Frame, Line};
use crate::theme::Theme;
use crate::validation::{self, Validation, Validator};

use super::buffer::LineBuffer;
use super::{PromptState, Step};

const NO_MATCHES: &str = "no matches";

/// How typed text is matched against choice titles.
#[derive(Default)]
pub enum Matcher {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Skim-style fuzzy subsequence match.
    Fuzzy,
    /// `(input, title) -> matches`.
    Custom(Box<dyn Fn(&str, &str) -> bool>),
}

impl Matcher {
    pub fn custom(matches: impl Fn(&str, &str) -> bool + 'static) -> Self {
        Matcher::Custom(Box::new(matches))
    }

    /// Indexes of the enabled `choices` matching `input`, in choice order.
    ///
    /// An empty input matches every enabled choice.
    #[must_use]
    pub fn filter(&self, input: &str, choices: &[Choice]) -> Vec<usize> {
        let enabled = choices
            .iter()
            .enumerate()
            .filter(|(_, choice)| !choice.is_disabled());

        if input.is_empty() {
            return enabled.map(|(index, _)| index).collect();
        }

        match self {
            Matcher::Substring => {
                let needle = input.to_lowercase();
                enabled
                    .filter(|(_, choice)| choice.title.to_lowercase().contains(&needle))
                    .map(|(index, _)| index)
                    .collect()
            }
            Matcher::Fuzzy => {
                let matcher = SkimMatcherV2::default();
                enabled
                    .filter_map(|(index, choice)| {
                        matcher.fuzzy_match(&choice.title, input).map(|_| index)
                    })
                    .collect()
            }
            Matcher::Custom(matches) => enabled
                .filter(|(_, choice)| matches(input, &choice.title))
                .map(|(index, _)| index)
                .collect(),
        }
    }
}

impl Debug for Matcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Matcher::Substring => f.write_str("Substring"),
            Matcher::Fuzzy => f.write_str("Fuzzy"),
            Matcher::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug)]
pub struct AutocompleteConfig {
    pub(crate) choices: Vec<Choice>,
    pub(crate) default: Option<String>,
    pub(crate) matcher: Matcher,
    pub(crate) free_text: bool,
    pub(crate) page_size: Option<usize>,
    pub(crate) validate: Option<Validator<str>>,
    pub(crate) instruction: Option<String>,
}

impl AutocompleteConfig {
    pub fn new<I, T>(choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Choice>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            default: None,
            matcher: Matcher::default(),
            free_text: false,
            page_size: None,
            validate: None,
            instruction: None,
        }
    }

    /// Initial buffer content.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Allows submitting text that matches no choice.
    #[must_use]
    pub fn with_free_text(mut self, free_text: bool) -> Self {
        self.free_text = free_text;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator<str>) -> Self {
        self.validate = Some(validator);
        self
    }

    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }
}

/// Buffer plus the suggestions currently matching it.
#[derive(Debug, Clone)]
pub struct AutocompleteState<'a> {
    message: &'a str,
    config: &'a AutocompleteConfig,
    buffer: LineBuffer,
    matches: Vec<usize>,
    highlighted: usize,
    error: Option<String>,
}

impl<'a> AutocompleteState<'a> {
    #[must_use]
    pub fn new(message: &'a str, config: &'a AutocompleteConfig) -> Self {
        let buffer = config
            .default
            .as_deref()
            .map(LineBuffer::from_text)
            .unwrap_or_default();

        let mut state = Self {
            message,
            config,
            buffer,
            matches: Vec::new(),
            highlighted: 0,
            error: None,
        };
        state.refilter();
        state
    }

    #[must_use]
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Choice indexes matching the buffer, in display order.
    #[must_use]
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Choice index of the highlighted suggestion.
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.matches.get(self.highlighted).copied()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn refilter(&mut self) {
        self.matches = self
            .config
            .matcher
            .filter(&self.buffer.text(), &self.config.choices);
        self.highlighted = 0;
    }

    fn move_highlight(&mut self, forward: bool) {
        let count = self.matches.len();
        if count == 0 {
            return;
        }
        self.highlighted = if forward {
            (self.highlighted + 1) % count
        } else {
            (self.highlighted + count - 1) % count
        };
    }

    fn submit(mut self) -> Step<Self> {
        let value = match self.highlighted() {
            Some(index) => self.config.choices[index].value.clone(),
            None if self.config.free_text && !self.buffer.is_empty() => self.buffer.text(),
            None => {
                self.error = Some(NO_MATCHES.to_string());
                return Step::Continue(self);
            }
        };

        match validation::run(self.config.validate.as_ref(), value.as_str()) {
            Validation::Valid => Step::Submit(Answer::Text(value)),
            Validation::Invalid(message) => {
                self.error = Some(message);
                Step::Continue(self)
            }
        }
    }

    fn row(&self, theme: &Theme, position: usize) -> Line {
        let choice = &self.config.choices[self.matches[position]];
        if position == self.highlighted {
            Line::new()
                .push(format!("{} ", theme.pointer), theme.pointer_style)
                .push(choice.title.clone(), theme.selected_style)
        } else {
            let indent = " ".repeat(theme.pointer.chars().count() + 1);
            Line::styled(format!("{indent}{}", choice.title), theme.plain_style)
        }
    }
}

impl PromptState for AutocompleteState<'_> {
    fn handle_key(mut self, key: Key) -> Step<Self> {
        match key {
            Key::CtrlC => return Step::Cancel,
            Key::Enter | Key::Tab => return self.submit(),
            Key::Up => self.move_highlight(false),
            Key::Down => self.move_highlight(true),
            key => {
                if self.buffer.apply(key) == Some(true) {
                    self.error = None;
                    self.refilter();
                }
            }
        }
        Step::Continue(self)
    }

    fn render(&self, theme: &Theme) -> Frame {
        let mut header = question_line(theme, self.message);
        if let Some(instruction) = &self.config.instruction {
            header = header.push(format!("{instruction} "), theme.instruction_style);
        }
        let cursor_column = header.width() + self.buffer.before_cursor().chars().count();
        let header = header.push(self.buffer.text(), theme.plain_style);

        let total = self.matches.len();
        let mut lines = vec![header];
        let window = page_window(total, self.highlighted, self.config.page_size);
        push_window(&mut lines, theme, total, &window, |position| self.row(theme, position));
        push_error(&mut lines, theme, self.error.as_deref());

        Frame::new(lines).with_cursor(0, cursor_column)
    }
}
