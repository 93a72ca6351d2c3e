//! Multiple choice with toggles.

use std::collections::BTreeSet;

use crate::answer::Answer;
use crate::choice::{next_selectable, CycleDirection, Item};
use crate::error::Result;
use crate::key::Key;
use crate::render::{page_window, push_error, push_window, question_line, Frame, Line};
use crate::theme::Theme;
use crate::validation::{self, Validation, Validator};

use super::select::initial_cursor;
use super::{PromptState, Step};

const DEFAULT_INSTRUCTION: &str =
    "(Use arrow keys to move, <space> to select, <a> to toggle, <i> to invert)";

#[derive(Debug)]
pub struct CheckboxConfig {
    pub(crate) choices: Vec<Item>,
    pub(crate) default: Option<String>,
    pub(crate) page_size: Option<usize>,
    pub(crate) instruction: Option<String>,
    pub(crate) validate: Option<Validator<[String]>>,
}

impl CheckboxConfig {
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
            validate: None,
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

    #[must_use]
    pub fn with_validator(mut self, validator: Validator<[String]>) -> Self {
        self.validate = Some(validator);
        self
    }

    #[must_use]
    pub fn choices(&self) -> &[Item] {
        &self.choices
    }
}

#[derive(Debug, Clone)]
pub struct CheckboxState<'a> {
    message: &'a str,
    config: &'a CheckboxConfig,
    cursor: usize,
    selected: BTreeSet<usize>,
    error: Option<String>,
}

impl<'a> CheckboxState<'a> {
    /// Starts a checkbox prompt with pre-checked choices already selected.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] when no choice is selectable or
    /// the default is not one of the choices.
    pub fn new(name: &str, message: &'a str, config: &'a CheckboxConfig) -> Result<Self> {
        let cursor = initial_cursor(name, &config.choices, config.default.as_deref())?;
        let selected = config
            .choices
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                item.as_choice()
                    .is_some_and(|choice| choice.checked && !choice.is_disabled())
            })
            .map(|(index, _)| index)
            .collect();

        Ok(Self {
            message,
            config,
            cursor,
            selected,
            error: None,
        })
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn selectable_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.config
            .choices
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_selectable())
            .map(|(index, _)| index)
    }

    fn toggle(&mut self, index: usize) {
        if !self.config.choices[index].is_selectable() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        self.error = None;
    }

    fn toggle_all(&mut self) {
        let selectable: Vec<usize> = self.selectable_indexes().collect();
        let all_selected = selectable.iter().all(|index| self.selected.contains(index));
        for index in selectable {
            if all_selected {
                self.selected.remove(&index);
            } else {
                self.selected.insert(index);
            }
        }
        self.error = None;
    }

    fn invert(&mut self) {
        let selectable: Vec<usize> = self.selectable_indexes().collect();
        for index in selectable {
            self.toggle(index);
        }
    }

    fn selected_values(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|&index| self.config.choices[index].as_choice())
            .map(|choice| choice.value.clone())
            .collect()
    }

    fn submit(mut self) -> Step<Self> {
        let values = self.selected_values();
        match validation::run(self.config.validate.as_ref(), values.as_slice()) {
            Validation::Valid => Step::Submit(Answer::List(values)),
            Validation::Invalid(message) => {
                self.error = Some(message);
                Step::Continue(self)
            }
        }
    }

    fn row(&self, theme: &Theme, index: usize) -> Line {
        let pointer_width = theme.pointer.chars().count();
        let is_cursor = index == self.cursor;

        let line = if is_cursor {
            Line::new().push(format!("{} ", theme.pointer), theme.pointer_style)
        } else {
            Line::new().push(" ".repeat(pointer_width + 1), theme.plain_style)
        };

        match &self.config.choices[index] {
            Item::Separator(separator) => line.push(separator.line.clone(), theme.separator_style),
            Item::Choice(choice) => {
                let checked = self.selected.contains(&index);
                let indicator = if checked { &theme.checked } else { &theme.unchecked };
                let line = line.push(
                    format!("{indicator} "),
                    if checked { theme.selected_style } else { theme.plain_style },
                );

                match &choice.disabled {
                    Some(reason) => line.push(
                        format!("{} ({reason})", choice.title),
                        theme.disabled_style,
                    ),
                    None if checked => line.push(choice.title.clone(), theme.selected_style),
                    None => line.push(choice.title.clone(), theme.plain_style),
                }
            }
        }
    }
}

impl PromptState for CheckboxState<'_> {
    fn handle_key(mut self, key: Key) -> Step<Self> {
        match key {
            Key::CtrlC => return Step::Cancel,
            Key::Enter => return self.submit(),
            Key::Up => {
                if let Some(next) = next_selectable(&self.config.choices, self.cursor, CycleDirection::Up) {
                    self.cursor = next;
                }
            }
            Key::Down => {
                if let Some(next) = next_selectable(&self.config.choices, self.cursor, CycleDirection::Down) {
                    self.cursor = next;
                }
            }
            Key::Char(' ') | Key::Tab => self.toggle(self.cursor),
            Key::Char('a') => self.toggle_all(),
            Key::Char('i') => self.invert(),
            _ => {}
        }
        Step::Continue(self)
    }

    fn render(&self, theme: &Theme) -> Frame {
        let instruction = self
            .config
            .instruction
            .as_deref()
            .unwrap_or(DEFAULT_INSTRUCTION);
        let header = question_line(theme, self.message)
            .push(instruction.to_string(), theme.instruction_style);

        let total = self.config.choices.len();
        let mut lines = vec![header];
        let window = page_window(total, self.cursor, self.config.page_size);
        push_window(&mut lines, theme, total, &window, |index| self.row(theme, index));
        push_error(&mut lines, theme, self.error.as_deref());

        Frame::new(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{Choice, Separator};
    use crate::validation::min_selected;

    fn fruit() -> CheckboxConfig {
        CheckboxConfig::new(["apple", "banana", "cherry"])
    }

    fn submitted<S>(step: Step<S>) -> Answer {
        match step {
            Step::Submit(answer) => answer,
            Step::Continue(_) => panic!("prompt is still active"),
            Step::Cancel => panic!("prompt was cancelled"),
        }
    }

    #[test]
    fn test_space_down_space_enter() {
        let config = fruit();
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();
        let answer = submitted(state.feed([Key::Char(' '), Key::Down, Key::Char(' '), Key::Enter]));
        assert_eq!(
            answer,
            Answer::List(vec!["apple".to_string(), "banana".to_string()])
        );
    }

    #[test]
    fn test_submission_is_in_choice_order() {
        let config = fruit();
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();
        let answer = submitted(state.feed([
            Key::Up,
            Key::Tab,
            Key::Up,
            Key::Up,
            Key::Tab,
            Key::Enter,
        ]));
        assert_eq!(
            answer,
            Answer::List(vec!["apple".to_string(), "cherry".to_string()])
        );
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let config = CheckboxConfig::new(vec![Choice::new("apple").checked(), Choice::new("banana")]);
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();
        let before = state.selected().clone();

        let state = state.feed([Key::Down, Key::Char(' '), Key::Char(' ')]).into_state().unwrap();
        assert_eq!(state.selected(), &before);
    }

    #[test]
    fn test_checked_choices_start_selected() {
        let config = CheckboxConfig::new(vec![Choice::new("apple"), Choice::new("banana").checked()]);
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();
        assert_eq!(
            submitted(state.handle_key(Key::Enter)),
            Answer::List(vec!["banana".to_string()])
        );
    }

    #[test]
    fn test_checked_disabled_choice_is_not_submitted() {
        let config = CheckboxConfig::new(vec![
            Choice::new("apple"),
            Choice::new("locked").checked().disabled("n/a"),
        ]);
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();
        assert!(state.selected().is_empty());
        assert_eq!(submitted(state.handle_key(Key::Enter)), Answer::List(vec![]));
    }

    #[test]
    fn test_empty_selection_is_allowed_without_validator() {
        let config = fruit();
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();
        assert_eq!(submitted(state.handle_key(Key::Enter)), Answer::List(vec![]));
    }

    #[test]
    fn test_min_selection_validator_blocks_submit() {
        let config = fruit().with_validator(min_selected(1));
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();

        let state = state.handle_key(Key::Enter).into_state().unwrap();
        assert_eq!(state.error(), Some("select at least one choice"));
        assert!(state.selected().is_empty());

        let state = state.handle_key(Key::Char(' ')).into_state().unwrap();
        assert_eq!(state.error(), None);
        assert_eq!(
            submitted(state.handle_key(Key::Enter)),
            Answer::List(vec!["apple".to_string()])
        );
    }

    #[test]
    fn test_disabled_choice_cannot_be_toggled() {
        let config = CheckboxConfig::new(vec![
            Item::from(Choice::new("apple").disabled("bruised")),
            Item::from("banana"),
        ]);
        let mut state = CheckboxState::new("fruit", "Pick", &config).unwrap();
        state.toggle(0);
        assert!(state.selected().is_empty());
    }

    #[test]
    fn test_toggle_all_and_invert() {
        let config = CheckboxConfig::new(vec![
            Item::from("apple"),
            Item::from(Separator::default()),
            Item::from(Choice::new("banana").disabled("gone")),
            Item::from("cherry"),
        ]);
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();

        let state = state.handle_key(Key::Char('a')).into_state().unwrap();
        assert_eq!(state.selected().iter().copied().collect::<Vec<_>>(), vec![0, 3]);

        let state = state.handle_key(Key::Char('a')).into_state().unwrap();
        assert!(state.selected().is_empty());

        let state = state.feed([Key::Char(' '), Key::Char('i')]).into_state().unwrap();
        assert_eq!(state.selected().iter().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_render_indicators() {
        let config = CheckboxConfig::new(vec![Choice::new("apple").checked(), Choice::new("banana")])
            .with_instruction("");
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();
        let texts = state.render(&Theme::default()).texts();
        assert_eq!(texts, vec!["? Pick ", "» ● apple", "  ○ banana"]);
    }

    #[test]
    fn test_render_shows_error_line() {
        let config = fruit().with_validator(min_selected(1)).with_instruction("");
        let state = CheckboxState::new("fruit", "Pick", &config).unwrap();
        let state = state.handle_key(Key::Enter).into_state().unwrap();
        let texts = state.render(&Theme::default()).texts();
        assert_eq!(texts.last().unwrap(), "✗ select at least one choice");
    }
}
