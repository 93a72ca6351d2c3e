use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Interactive prompts need a terminal, but stdin or stdout is not attached to one.")]
    NotATerminal,

    #[error("Terminal error: {}", .0)]
    Terminal(#[from] std::io::Error),

    #[error("The key source was closed before the prompt was answered.")]
    InputClosed,

    #[error("Invalid prompt configuration for `{}`: {}", .name, .reason)]
    InvalidConfig { name: String, reason: String },

    #[error("Unknown color name: \"{}\"", _0)]
    UnknownColorName(String),
}

impl Error {
    pub fn invalid_config(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
