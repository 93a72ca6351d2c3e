//! Editable line buffer shared by the text-like prompts.

use crate::key::Key;

/// Characters plus a cursor offset that always stays within `0..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text` with the cursor at the end.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Text before the cursor.
    #[must_use]
    pub fn before_cursor(&self) -> String {
        self.chars[..self.cursor].iter().collect()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Replaces the whole content, leaving the cursor at the end.
    pub fn replace(&mut self, text: &str) {
        *self = Self::from_text(text);
    }

    /// Applies an editing key. Returns `Some(true)` when the text changed,
    /// `Some(false)` when only the cursor moved and `None` for keys that are
    /// not editing keys.
    pub fn apply(&mut self, key: Key) -> Option<bool> {
        match key {
            Key::Char(c) => {
                self.insert(c);
                Some(true)
            }
            Key::Backspace => Some(self.backspace()),
            Key::Delete => Some(self.delete()),
            Key::Left => {
                self.left();
                Some(false)
            }
            Key::Right => {
                self.right();
                Some(false)
            }
            Key::Home => {
                self.home();
                Some(false)
            }
            Key::End => {
                self.end();
                Some(false)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_cursor() {
        let mut buffer = LineBuffer::from_text("ac");
        buffer.left();
        buffer.insert('b');
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut buffer = LineBuffer::from_text("abc");
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "ab");
        assert!(!buffer.delete());

        buffer.home();
        assert!(!buffer.backspace());
        assert!(buffer.delete());
        assert_eq!(buffer.text(), "b");
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut buffer = LineBuffer::from_text("ab");
        buffer.right();
        buffer.right();
        assert_eq!(buffer.cursor(), 2);
        buffer.home();
        buffer.left();
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut buffer = LineBuffer::from_text("héllo");
        buffer.left();
        buffer.left();
        buffer.left();
        assert_eq!(buffer.before_cursor(), "hé");
        buffer.backspace();
        assert_eq!(buffer.text(), "hllo");
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.apply(Key::Char('x')), Some(true));
        assert_eq!(buffer.apply(Key::Left), Some(false));
        assert_eq!(buffer.apply(Key::Backspace), Some(false));
        assert_eq!(buffer.apply(Key::Enter), None);
    }
}
