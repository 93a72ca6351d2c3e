//! Gorilla Prompt Library
//!
//! Interactive terminal prompts for the gorilla command-line assistant:
//! select, rawselect, checkbox, text, password, path, autocomplete and
//! confirm, plus forms that chain them.
//!
//! # Architecture
//!
//! - [`prompts`]: one state machine per prompt kind. Each consumes a [`Key`]
//!   and returns a [`prompts::Step`]; rendering is a pure function of state.
//! - [`render`]: styled lines and the erase-and-redraw [`render::Renderer`].
//! - [`session`]: drives state machines from a [`KeySource`] onto a
//!   [`render::Screen`], collecting answers into an [`AnswerSet`].
//! - [`terminal`]: the crossterm implementation of both ends, with raw mode
//!   held for as long as the screen lives.
//!
//! Cancelling with Ctrl-C is an [`Outcome::Cancelled`], never an error.
//!
//! # Examples
//!
//! ```no_run
//! use gorilla_prompt::{ask, Outcome, Question, SelectConfig, Theme};
//!
//! let question = Question::new(
//!     "command",
//!     "Which command do you want to run?",
//!     SelectConfig::new(["ls -la", "du -sh .", "Exit"]),
//! );
//! match ask(&question, &Theme::default())? {
//!     Outcome::Answered(answer) => println!("{answer}"),
//!     Outcome::Cancelled => println!("Cancelled"),
//! }
//! # Ok::<(), gorilla_prompt::Error>(())
//! ```

pub mod answer;
pub mod choice;
pub mod error;
pub mod key;
pub mod prompts;
pub mod question;
pub mod render;
pub mod session;
pub mod terminal;
pub mod theme;
pub mod validation;

pub use answer::{Answer, AnswerSet, Outcome};
pub use choice::{Choice, Item, Separator};
pub use error::{Error, Result};
pub use key::{Key, KeySource, ScriptedKeys};
pub use prompts::{
    AutocompleteConfig, CheckboxConfig, ConfirmConfig, EntryLister, Matcher, PasswordConfig,
    PathConfig, SelectConfig, TextConfig,
};
pub use question::{PromptKind, Question};
pub use session::{ask, ask_form, run_form, run_prompt, Session};
pub use theme::{parse_color, supports_emoji, Theme};
pub use validation::{min_selected, required, Validation, Validator};
