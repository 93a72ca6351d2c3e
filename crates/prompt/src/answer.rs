//! Values produced by prompts and the ordered set collected by a form.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

/// The value a prompt submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

impl Answer {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Answer::List(values) => Some(values),
            _ => None,
        }
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Text(text) => f.write_str(text),
            Answer::Bool(true) => f.write_str("Yes"),
            Answer::Bool(false) => f.write_str("No"),
            Answer::List(values) => f.write_str(&values.join(", ")),
        }
    }
}

/// How an interactive session ended.
///
/// Cancellation is a normal outcome, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Answered(T),
    Cancelled,
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Answered(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Answered(value) => Outcome::Answered(f(value)),
            Outcome::Cancelled => Outcome::Cancelled,
        }
    }
}

/// Answers keyed by question name, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: IndexMap<String, Answer>,
}

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, answer: Answer) {
        self.answers.insert(name.into(), answer);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.answers.get(name)
    }

    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Answer::as_text)
    }

    #[must_use]
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Answer::as_bool)
    }

    #[must_use]
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Answer::as_list)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.answers.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.answers.iter().map(|(name, answer)| (name.as_str(), answer))
    }

    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Answer> {
        self.answers
    }
}
