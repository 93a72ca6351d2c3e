//! Choices and separators shown by the choice-based prompts.

use std::fmt::{Display, Formatter};

/// Default text of a separator line.
pub const DEFAULT_SEPARATOR: &str = "---------------";

/// One selectable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub title: String,
    pub value: String,
    pub checked: bool,
    pub disabled: Option<String>,
    pub shortcut: Option<char>,
}

impl Choice {
    /// Creates an enabled choice whose value is its title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            value: title.clone(),
            title,
            checked: false,
            disabled: None,
            shortcut: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Starts the choice in the selected set of a checkbox prompt.
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Makes the choice unselectable; the reason is shown next to it.
    #[must_use]
    pub fn disabled(mut self, reason: impl Into<String>) -> Self {
        self.disabled = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_shortcut(mut self, shortcut: char) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.is_some()
    }
}

impl From<&str> for Choice {
    fn from(title: &str) -> Self {
        Choice::new(title)
    }
}

impl From<String> for Choice {
    fn from(title: String) -> Self {
        Choice::new(title)
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// A display-only line between choices; the cursor never lands on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    pub line: String,
}

impl Separator {
    #[must_use]
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

/// An entry of a choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Choice(Choice),
    Separator(Separator),
}

impl Item {
    #[must_use]
    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            Item::Choice(choice) => Some(choice),
            Item::Separator(_) => None,
        }
    }

    /// Whether the cursor may rest on this item.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.as_choice().is_some_and(|choice| !choice.is_disabled())
    }
}

impl From<Choice> for Item {
    fn from(choice: Choice) -> Self {
        Item::Choice(choice)
    }
}

impl From<Separator> for Item {
    fn from(separator: Separator) -> Self {
        Item::Separator(separator)
    }
}

impl From<&str> for Item {
    fn from(title: &str) -> Self {
        Item::Choice(Choice::new(title))
    }
}

impl From<String> for Item {
    fn from(title: String) -> Self {
        Item::Choice(Choice::new(title))
    }
}

/// Direction to cycle through choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// Finds the next selectable index from `from`, wrapping around the ends.
///
/// Returns `None` when nothing in `items` is selectable.
#[must_use]
pub fn next_selectable(items: &[Item], from: usize, direction: CycleDirection) -> Option<usize> {
    let len = items.len();
    if len == 0 {
        return None;
    }

    (1..=len)
        .map(|step| match direction {
            CycleDirection::Down => (from + step) % len,
            CycleDirection::Up => (from + len - (step % len)) % len,
        })
        .find(|&index| items[index].is_selectable())
}

/// Index of the first selectable item.
#[must_use]
pub fn first_selectable(items: &[Item]) -> Option<usize> {
    items.iter().position(Item::is_selectable)
}

/// Shortcut keys handed out to choices without an explicit one.
const AUTO_SHORTCUTS: &str = "1234567890abcdefghijklmnopqrstuvwxyz";

/// Assigns shortcuts to selectable choices lacking one, skipping keys already claimed.
pub fn assign_shortcuts(items: &mut [Item]) {
    let claimed: Vec<char> = items
        .iter()
        .filter_map(|item| item.as_choice().and_then(|choice| choice.shortcut))
        .collect();

    let mut available = AUTO_SHORTCUTS.chars().filter(|c| !claimed.contains(c));

    for item in items.iter_mut() {
        if let Item::Choice(choice) = item {
            if choice.shortcut.is_none() && !choice.is_disabled() {
                choice.shortcut = available.next();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![
            Separator::new("-- fruit --").into(),
            "apple".into(),
            Choice::new("banana").disabled("out of stock").into(),
            Separator::default().into(),
            "cherry".into(),
        ]
    }

    #[test]
    fn test_choice_value_defaults_to_title() {
        let choice = Choice::new("apple");
        assert_eq!(choice.value, "apple");

        let choice = Choice::new("Apple").with_value("apple");
        assert_eq!(choice.title, "Apple");
        assert_eq!(choice.value, "apple");
    }

    #[test]
    fn test_selectable_skips_separators_and_disabled() {
        let items = items();
        assert_eq!(first_selectable(&items), Some(1));
        assert_eq!(next_selectable(&items, 1, CycleDirection::Down), Some(4));
        assert_eq!(next_selectable(&items, 4, CycleDirection::Down), Some(1));
        assert_eq!(next_selectable(&items, 1, CycleDirection::Up), Some(4));
        assert_eq!(next_selectable(&items, 4, CycleDirection::Up), Some(1));
    }

    #[test]
    fn test_next_selectable_with_nothing_selectable() {
        let items: Vec<Item> = vec![Separator::default().into()];
        assert_eq!(next_selectable(&items, 0, CycleDirection::Down), None);
        assert_eq!(next_selectable(&[], 0, CycleDirection::Up), None);
    }

    #[test]
    fn test_single_selectable_cycles_to_itself() {
        let items: Vec<Item> = vec!["only".into()];
        assert_eq!(next_selectable(&items, 0, CycleDirection::Down), Some(0));
        assert_eq!(next_selectable(&items, 0, CycleDirection::Up), Some(0));
    }

    #[test]
    fn test_assign_shortcuts_respects_claimed_keys() {
        let mut items: Vec<Item> = vec![
            "first".into(),
            Choice::new("second").with_shortcut('1').into(),
            "third".into(),
            Choice::new("fourth").disabled("nope").into(),
        ];
        assign_shortcuts(&mut items);

        let shortcuts: Vec<Option<char>> = items
            .iter()
            .map(|item| item.as_choice().and_then(|c| c.shortcut))
            .collect();
        assert_eq!(shortcuts, vec![Some('2'), Some('1'), Some('3'), None]);
    }
}
