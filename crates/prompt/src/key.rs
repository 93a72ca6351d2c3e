//! Symbolic key events and their decoding from crossterm events.

use std::collections::VecDeque;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::{Error, Result};

/// One decoded key press.
///
/// Space arrives as `Char(' ')`; prompts that toggle on space match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Escape,
    CtrlC,
    Backspace,
    Delete,
    Tab,
    Char(char),
}

impl Key {
    /// Decodes a crossterm event, returning `None` for anything a prompt ignores
    /// (releases, mouse, resize, unsupported control chords).
    #[must_use]
    pub fn decode(event: &Event) -> Option<Key> {
        match event {
            Event::Key(key_event) => Self::decode_key(key_event),
            _ => None,
        }
    }

    fn decode_key(key_event: &KeyEvent) -> Option<Key> {
        if key_event.kind == KeyEventKind::Release {
            return None;
        }

        let control = key_event.modifiers.contains(KeyModifiers::CONTROL);

        match key_event.code {
            KeyCode::Char('c') | KeyCode::Char('C') if control => Some(Key::CtrlC),
            KeyCode::Char(_) if control => None,
            KeyCode::Char(c) => Some(Key::Char(c)),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Home => Some(Key::Home),
            KeyCode::End => Some(Key::End),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Escape),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Delete => Some(Key::Delete),
            KeyCode::Tab => Some(Key::Tab),
            _ => None,
        }
    }
}

/// Source of key events consumed by a prompt session.
pub trait KeySource {
    /// Blocks until the next key is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input fails or is exhausted.
    fn read_key(&mut self) -> Result<Key>;
}

/// A key source replaying a fixed sequence, for tests and scripted input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
}

impl ScriptedKeys {
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Builds a sequence typing every character of `text`.
    #[must_use]
    pub fn typed(text: &str) -> Vec<Key> {
        text.chars().map(Key::Char).collect()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<Key> {
        self.keys.pop_front().ok_or(Error::InputClosed)
    }
}
