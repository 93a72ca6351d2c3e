//! Questions: a named prompt plus the conditions under which it is asked.

use std::fmt::{Debug, Formatter};

use itertools::Itertools;

use crate::answer::{Answer, AnswerSet};
use crate::prompts::select::title_for;
use crate::prompts::{
    AutocompleteConfig, CheckboxConfig, ConfirmConfig, PasswordConfig, PathConfig, SelectConfig,
    TextConfig,
};

/// Configuration of one prompt, one variant per prompt kind.
#[derive(Debug)]
pub enum PromptKind {
    Select(SelectConfig),
    RawSelect(SelectConfig),
    Checkbox(CheckboxConfig),
    Text(TextConfig),
    Password(PasswordConfig),
    Path(PathConfig),
    Autocomplete(AutocompleteConfig),
    Confirm(ConfirmConfig),
}

impl PromptKind {
    /// Text shown after the message once the prompt has been answered.
    #[must_use]
    pub fn summary(&self, answer: &Answer) -> String {
        match (self, answer) {
            (PromptKind::Select(config) | PromptKind::RawSelect(config), Answer::Text(value)) => {
                title_for(&config.choices, value).to_string()
            }
            (PromptKind::Checkbox(config), Answer::List(values)) => values
                .iter()
                .map(|value| title_for(&config.choices, value))
                .join(", "),
            (PromptKind::Autocomplete(config), Answer::Text(value)) => config
                .choices
                .iter()
                .find(|choice| choice.value == *value)
                .map_or_else(|| value.clone(), |choice| choice.title.clone()),
            (PromptKind::Password(config), Answer::Text(value)) => {
                config.mask.to_string().repeat(value.chars().count())
            }
            (_, answer) => answer.to_string().replace('\n', " "),
        }
    }
}

impl From<SelectConfig> for PromptKind {
    fn from(config: SelectConfig) -> Self {
        PromptKind::Select(config)
    }
}

impl From<CheckboxConfig> for PromptKind {
    fn from(config: CheckboxConfig) -> Self {
        PromptKind::Checkbox(config)
    }
}

impl From<TextConfig> for PromptKind {
    fn from(config: TextConfig) -> Self {
        PromptKind::Text(config)
    }
}

impl From<PasswordConfig> for PromptKind {
    fn from(config: PasswordConfig) -> Self {
        PromptKind::Password(config)
    }
}

impl From<PathConfig> for PromptKind {
    fn from(config: PathConfig) -> Self {
        PromptKind::Path(config)
    }
}

impl From<AutocompleteConfig> for PromptKind {
    fn from(config: AutocompleteConfig) -> Self {
        PromptKind::Autocomplete(config)
    }
}

impl From<ConfirmConfig> for PromptKind {
    fn from(config: ConfirmConfig) -> Self {
        PromptKind::Confirm(config)
    }
}

type Predicate = Box<dyn Fn(&AnswerSet) -> bool>;
type Builder = Box<dyn Fn(&AnswerSet) -> PromptKind>;

enum Body {
    Fixed(PromptKind),
    Deferred(Builder),
}

/// A prompt with a name under which its answer is recorded.
pub struct Question {
    name: String,
    message: String,
    body: Body,
    when: Option<Predicate>,
}

impl Question {
    pub fn new(name: impl Into<String>, message: impl Into<String>, kind: impl Into<PromptKind>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            body: Body::Fixed(kind.into()),
            when: None,
        }
    }

    /// A question whose configuration is built from the answers given so far.
    pub fn deferred(
        name: impl Into<String>,
        message: impl Into<String>,
        build: impl Fn(&AnswerSet) -> PromptKind + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            body: Body::Deferred(Box::new(build)),
            when: None,
        }
    }

    /// Only ask when `predicate` holds for the answers given so far.
    #[must_use]
    pub fn when(mut self, predicate: impl Fn(&AnswerSet) -> bool + 'static) -> Self {
        self.when = Some(Box::new(predicate));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn should_ask(&self, answers: &AnswerSet) -> bool {
        self.when.as_ref().map_or(true, |predicate| predicate(answers))
    }

    /// The fixed configuration, if it does not depend on earlier answers.
    #[must_use]
    pub fn kind(&self) -> Option<&PromptKind> {
        match &self.body {
            Body::Fixed(kind) => Some(kind),
            Body::Deferred(_) => None,
        }
    }

    /// Builds a deferred configuration; `None` for fixed ones.
    #[must_use]
    pub fn build(&self, answers: &AnswerSet) -> Option<PromptKind> {
        match &self.body {
            Body::Fixed(_) => None,
            Body::Deferred(build) => Some(build(answers)),
        }
    }
}

impl Debug for Question {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Question")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("kind", &self.kind())
            .field("conditional", &self.when.is_some())
            .finish()
    }
}
