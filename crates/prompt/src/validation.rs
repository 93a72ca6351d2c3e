//! Validators run when a prompt is submitted.

use std::fmt::{Debug, Formatter};

/// Result of checking a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(String),
}

/// A check over the value being submitted: `Validator<str>` for text buffers,
/// `Validator<[String]>` for checkbox selections.
pub struct Validator<T: ?Sized> {
    check: Box<dyn Fn(&T) -> Validation>,
}

impl<T: ?Sized> Validator<T> {
    pub fn new(check: impl Fn(&T) -> Validation + 'static) -> Self {
        Self {
            check: Box::new(check),
        }
    }

    /// Wraps a predicate, reporting `message` when it returns false.
    pub fn from_predicate(message: impl Into<String>, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        let message = message.into();
        Self::new(move |value| {
            if predicate(value) {
                Validation::Valid
            } else {
                Validation::Invalid(message.clone())
            }
        })
    }

    #[must_use]
    pub fn check(&self, value: &T) -> Validation {
        (self.check)(value)
    }
}

impl<T: ?Sized> Debug for Validator<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Validator")
    }
}

/// Rejects empty (or whitespace-only) text.
#[must_use]
pub fn required() -> Validator<str> {
    Validator::from_predicate("required", |value: &str| !value.trim().is_empty())
}

/// Requires at least `count` selected choices.
#[must_use]
pub fn min_selected(count: usize) -> Validator<[String]> {
    let message = if count == 1 {
        "select at least one choice".to_string()
    } else {
        format!("select at least {count} choices")
    };
    Validator::from_predicate(message, move |selection: &[String]| selection.len() >= count)
}

/// Runs an optional validator, treating its absence as valid.
pub(crate) fn run<T: ?Sized>(validator: Option<&Validator<T>>, value: &T) -> Validation {
    validator.map_or(Validation::Valid, |validator| validator.check(value))
}
