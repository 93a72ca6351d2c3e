use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] gorilla_core::error::Error),

    #[error(transparent)]
    Prompt(#[from] gorilla_prompt::Error),

    #[error("Error writing output: {}", _0)]
    Output(#[from] std::io::Error),
}
