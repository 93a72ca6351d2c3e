use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Json {
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("HTTP error while trying to {}: {}", .action, .original)]
    Http {
        action: String,
        original: reqwest::Error,
    },

    #[error("The server answered with status {} while trying to {}.", .status, .action)]
    ServerStatus { action: String, status: u16 },

    #[error("Unexpected response while trying to {}: {}", .action, .reason)]
    UnexpectedResponse { action: String, reason: String },

    #[error("Error parsing prompt template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering prompt template: {}", .0)]
    Render(#[from] RenderError),

    #[error("Invalid version `{}`: {}", .version, .original)]
    Version {
        version: String,
        original: semver::Error,
    },
}

impl Error {
    pub fn json_error(
        action: &str,
        file_description: &str,
        path: &str,
        original: serde_json::Error,
    ) -> Self {
        Self::Json {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn io_error(file_description: &str, path: &str, original: std::io::Error) -> Self {
        Self::Io {
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn http_error(action: &str, original: reqwest::Error) -> Self {
        Self::Http {
            action: action.to_string(),
            original,
        }
    }

    pub fn server_status(action: &str, status: u16) -> Self {
        Self::ServerStatus {
            action: action.to_string(),
            status,
        }
    }

    pub fn unexpected_response(action: &str, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            action: action.to_string(),
            reason: reason.into(),
        }
    }

    pub fn version_error(version: &str, original: semver::Error) -> Self {
        Self::Version {
            version: version.to_string(),
            original,
        }
    }
}
