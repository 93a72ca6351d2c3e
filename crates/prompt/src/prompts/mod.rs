//! Prompt state machines.
//!
//! Every prompt kind is a value that consumes one [`Key`] at a time through
//! [`PromptState::handle_key`] and either continues with a new state, submits
//! an [`Answer`], or cancels. Rendering is a pure function of the state, so
//! the machines are tested by feeding synthetic key sequences.

pub mod autocomplete;
pub mod buffer;
pub mod checkbox;
pub mod confirm;
pub mod path;
pub mod select;
pub mod text;

pub use autocomplete::{AutocompleteConfig, AutocompleteState, Matcher};
pub use checkbox::{CheckboxConfig, CheckboxState};
pub use confirm::{ConfirmConfig, ConfirmState};
pub use path::{EntryLister, FsEntries, PathConfig};
pub use select::{SelectConfig, SelectState};
pub use text::{PasswordConfig, TextConfig, TextState};

use crate::answer::Answer;
use crate::key::Key;
use crate::render::Frame;
use crate::theme::Theme;

/// Result of feeding one key to a prompt.
#[derive(Debug)]
pub enum Step<S> {
    Continue(S),
    Submit(Answer),
    Cancel,
}

impl<S> Step<S> {
    /// The continued state, if the prompt is still active.
    pub fn into_state(self) -> Option<S> {
        match self {
            Step::Continue(state) => Some(state),
            Step::Submit(_) | Step::Cancel => None,
        }
    }
}

/// A prompt's transition and render functions.
pub trait PromptState: Sized {
    /// Consumes one key.
    fn handle_key(self, key: Key) -> Step<Self>;

    /// Draws the current state.
    fn render(&self, theme: &Theme) -> Frame;

    /// Feeds `keys` in order, stopping at the first submit or cancel.
    fn feed(self, keys: impl IntoIterator<Item = Key>) -> Step<Self> {
        let mut state = self;
        for key in keys {
            match state.handle_key(key) {
                Step::Continue(next) => state = next,
                finished => return finished,
            }
        }
        Step::Continue(state)
    }
}
