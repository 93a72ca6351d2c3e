//! The user id sent with every request.

use std::fs;
use std::io::ErrorKind;
use std::process::Command;

use log::debug;
use uuid::Uuid;

use crate::config::ISSUE_URL;
use crate::error::{Error, Result};

const FILE_DESCRIPTION: &str = "user id";

/// A fresh random user id.
#[must_use]
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

/// Reads the persisted user id.
///
/// Returns `None` when the file does not exist yet. An empty file yields a
/// fresh random id, which is not persisted.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_user_id(user_id_path: &str) -> Result<Option<String>> {
    match fs::read_to_string(user_id_path) {
        Ok(contents) => {
            let user_id = contents.trim();
            if user_id.is_empty() {
                Ok(Some(generate_user_id()))
            } else {
                Ok(Some(user_id.to_string()))
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io_error(FILE_DESCRIPTION, user_id_path, e)),
    }
}

/// Persists the user id.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_user_id(user_id_path: &str, user_id: &str) -> Result<()> {
    fs::write(user_id_path, user_id).map_err(|e| Error::io_error(FILE_DESCRIPTION, user_id_path, e))
}

/// The globally configured git e-mail address, if git is installed and set up.
#[must_use]
pub fn git_email() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--global", "user.email"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("git config exited with {}", output.status);
        return None;
    }

    let email = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!email.is_empty()).then_some(email)
}

/// A link that opens a pre-filled issue.
#[must_use]
pub fn issue_link(title: &str, body: &str) -> String {
    match reqwest::Url::parse_with_params(ISSUE_URL, &[("title", title), ("body", body)]) {
        Ok(url) => url.to_string(),
        Err(_) => ISSUE_URL.to_string(),
    }
}
