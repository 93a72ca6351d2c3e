//! Single choice from a list: `select` (arrow keys and shortcuts) and
//! `rawselect` (numbered entries chosen by typing the number).

use crate::answer::Answer;
use crate::choice::{assign_shortcuts, first_selectable, next_selectable, CycleDirection, Item};
use crate::error::{Error, Result};
use crate::key::Key;
use crate::render::{page_window, push_window, question_line, Frame, Line};
use crate::theme::Theme;

use super::{PromptState, Step};

const DEFAULT_INSTRUCTION: &str = "(Use arrow keys)";

/// Configuration of a select or rawselect prompt.
#[derive(Debug, Clone)]
pub struct SelectConfig {
    pub(crate) choices: Vec<Item>,
    pub(crate) default: Option<String>,
    pub(crate) page_size: Option<usize>,
    pub(crate) instruction: Option<String>,
    pub(crate) use_shortcuts: bool,
    pub(crate) use_jk_keys: bool,
}

impl SelectConfig {
    pub fn new<I, T>(choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            default: None,
            page_size: None,
            instruction: None,
            use_shortcuts: false,
            use_jk_keys: true,
        }
    }

    /// Value (or title) of the choice the cursor starts on.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Hands out `1`-`9`, `0`, then letters to choices without a shortcut.
    #[must_use]
    pub fn with_shortcuts(mut self, use_shortcuts: bool) -> Self {
        self.use_shortcuts = use_shortcuts;
        self
    }

    #[must_use]
    pub fn with_jk_keys(mut self, use_jk_keys: bool) -> Self {
        self.use_jk_keys = use_jk_keys;
        self
    }

    #[must_use]
    pub fn choices(&self) -> &[Item] {
        &self.choices
    }

    /// Title of the choice holding `value`, falling back to the value itself.
    #[must_use]
    pub fn title_for<'a>(&'a self, value: &'a str) -> &'a str {
        title_for(&self.choices, value)
    }
}

pub(crate) fn title_for<'a>(items: &'a [Item], value: &'a str) -> &'a str {
    items
        .iter()
        .filter_map(Item::as_choice)
        .find(|choice| choice.value == value)
        .map_or(value, |choice| choice.title.as_str())
}

/// Index of the item the cursor should start on.
///
/// A default naming an unknown choice is a configuration error; one naming
/// a disabled choice falls back to the first selectable choice.
pub(crate) fn initial_cursor(name: &str, items: &[Item], default: Option<&str>) -> Result<usize> {
    let first = first_selectable(items)
        .ok_or_else(|| Error::invalid_config(name, "there are no selectable choices"))?;

    let Some(default) = default else {
        return Ok(first);
    };

    let position = items.iter().position(|item| {
        item.as_choice()
            .is_some_and(|choice| choice.value == default || choice.title == default)
    });

    match position {
        Some(index) if items[index].is_selectable() => Ok(index),
        Some(_) => Ok(first),
        None => Err(Error::invalid_config(
            name,
            format!("default `{default}` is not one of the choices"),
        )),
    }
}

/// Cursor state of a select or rawselect prompt.
#[derive(Debug, Clone)]
pub struct SelectState<'a> {
    message: &'a str,
    config: &'a SelectConfig,
    items: Vec<Item>,
    cursor: usize,
    raw: bool,
    typed: String,
}

impl<'a> SelectState<'a> {
    /// Starts an arrow-key select prompt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when no choice is selectable or the
    /// default is not one of the choices.
    pub fn select(name: &str, message: &'a str, config: &'a SelectConfig) -> Result<Self> {
        let mut items = config.choices.clone();
        if config.use_shortcuts {
            assign_shortcuts(&mut items);
        }
        Self::start(name, message, config, items, false)
    }

    /// Starts a numbered rawselect prompt.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SelectState::select`].
    pub fn raw(name: &str, message: &'a str, config: &'a SelectConfig) -> Result<Self> {
        Self::start(name, message, config, config.choices.clone(), true)
    }

    fn start(
        name: &str,
        message: &'a str,
        config: &'a SelectConfig,
        items: Vec<Item>,
        raw: bool,
    ) -> Result<Self> {
        let cursor = initial_cursor(name, &items, config.default.as_deref())?;
        Ok(Self {
            message,
            config,
            items,
            cursor,
            raw,
            typed: String::new(),
        })
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    fn move_cursor(&mut self, direction: CycleDirection) {
        if let Some(next) = next_selectable(&self.items, self.cursor, direction) {
            self.cursor = next;
        }
    }

    /// Item index of the `number`-th (1-based) selectable choice.
    fn nth_selectable(&self, number: usize) -> Option<usize> {
        number.checked_sub(1).and_then(|n| {
            self.items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.is_selectable())
                .map(|(index, _)| index)
                .nth(n)
        })
    }

    fn jump_to_typed(&mut self) -> bool {
        let target = self
            .typed
            .parse::<usize>()
            .ok()
            .and_then(|number| self.nth_selectable(number));

        if let Some(index) = target {
            self.cursor = index;
            return true;
        }
        false
    }

    fn type_digit(&mut self, digit: char) {
        self.typed.push(digit);
        if !self.jump_to_typed() {
            self.typed = digit.to_string();
            self.jump_to_typed();
        }
    }

    fn jump_to_shortcut(&mut self, c: char) -> bool {
        let target = self.items.iter().position(|item| {
            item.is_selectable() && item.as_choice().and_then(|choice| choice.shortcut) == Some(c)
        });

        if let Some(index) = target {
            self.cursor = index;
            return true;
        }
        false
    }

    fn submit(self) -> Step<Self> {
        let value = self
            .items
            .get(self.cursor)
            .filter(|item| item.is_selectable())
            .and_then(Item::as_choice)
            .map(|choice| choice.value.clone());

        match value {
            Some(value) => Step::Submit(Answer::Text(value)),
            None => Step::Continue(self),
        }
    }

    fn row(&self, theme: &Theme, index: usize, number: Option<usize>) -> Line {
        let pointer_width = theme.pointer.chars().count();
        let is_cursor = index == self.cursor;

        match &self.items[index] {
            Item::Separator(separator) => Line::new()
                .push(" ".repeat(pointer_width + 1), theme.plain_style)
                .push(separator.line.clone(), theme.separator_style),
            Item::Choice(choice) => {
                let prefix = if self.raw {
                    number.map(|n| format!("{n}) ")).unwrap_or_default()
                } else {
                    choice
                        .shortcut
                        .filter(|_| self.config.use_shortcuts)
                        .map(|c| format!("{c}) "))
                        .unwrap_or_default()
                };

                let line = if is_cursor {
                    Line::new().push(format!("{} ", theme.pointer), theme.pointer_style)
                } else {
                    Line::new().push(" ".repeat(pointer_width + 1), theme.plain_style)
                };

                match &choice.disabled {
                    Some(reason) => line.push(
                        format!("- {}{} ({reason})", prefix, choice.title),
                        theme.disabled_style,
                    ),
                    None if is_cursor => line.push(
                        format!("{prefix}{}", choice.title),
                        theme.pointer_style,
                    ),
                    None => line.push(format!("{prefix}{}", choice.title), theme.plain_style),
                }
            }
        }
    }
}

impl PromptState for SelectState<'_> {
    fn handle_key(mut self, key: Key) -> Step<Self> {
        match key {
            Key::CtrlC => return Step::Cancel,
            Key::Enter => return self.submit(),
            Key::Up => self.move_cursor(CycleDirection::Up),
            Key::Down => self.move_cursor(CycleDirection::Down),
            Key::Backspace if self.raw => {
                self.typed.pop();
                self.jump_to_typed();
            }
            Key::Char(c) if self.raw => {
                if c.is_ascii_digit() {
                    self.type_digit(c);
                } else {
                    self.jump_to_shortcut(c);
                }
            }
            Key::Char(c) => {
                if !self.jump_to_shortcut(c) && self.config.use_jk_keys {
                    match c {
                        'j' => self.move_cursor(CycleDirection::Down),
                        'k' => self.move_cursor(CycleDirection::Up),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
        Step::Continue(self)
    }

    fn render(&self, theme: &Theme) -> Frame {
        let mut header = question_line(theme, self.message);
        let instruction = self
            .config
            .instruction
            .as_deref()
            .or(if self.raw { None } else { Some(DEFAULT_INSTRUCTION) });
        if let Some(instruction) = instruction {
            header = header.push(instruction.to_string(), theme.instruction_style);
        }

        // Rawselect numbers selectable choices only
        let mut numbers = Vec::with_capacity(self.items.len());
        let mut count = 0;
        for item in &self.items {
            if item.is_selectable() {
                count += 1;
                numbers.push(Some(count));
            } else {
                numbers.push(None);
            }
        }

        let mut lines = vec![header];
        let window = page_window(self.items.len(), self.cursor, self.config.page_size);
        push_window(&mut lines, theme, self.items.len(), &window, |index| {
            self.row(theme, index, numbers[index])
        });

        if self.raw {
            lines.push(Line::new().push(format!("  Answer: {}", self.typed), theme.plain_style));
        }

        Frame::new(lines)
    }
}
