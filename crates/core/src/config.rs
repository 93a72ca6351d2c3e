//! Configuration paths and constants for gorilla.
//!
//! This module resolves the locations of the files gorilla keeps in the
//! user's home directory, expanding shell variables like `~`.

/// Default path for the settings file
const DEFAULT_CONFIG_PATH: &str = "~/.gorilla-cli-config.json";
/// Default path for the persisted user id
const DEFAULT_USER_ID_PATH: &str = "~/.gorilla-cli-userid";
/// Default path for the commands gorilla has executed
const DEFAULT_HISTORY_PATH: &str = "~/.gorilla_cli_history";
/// Default path for the date of the last update check
const DEFAULT_UPDATE_CHECK_PATH: &str = "~/.gorilla-cli-last-update-check";
/// The user's shell history, read for personalization
const DEFAULT_SHELL_HISTORY_PATH: &str = "~/.bash_history";

/// Suggestion service used when no other is given
pub const DEFAULT_SERVER_URL: &str = "https://cli.gorilla-llm.com";

/// Where users are asked to report problems
pub const ISSUE_URL: &str = "https://github.com/gorilla-llm/gorilla-cli/issues/new";

/// Number of history entries sent with a request and checked for duplicates
pub const HISTORY_LENGTH: usize = 10;

/// Timeout for every request to the suggestion service, in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shell used for command execution when `$SHELL` is not set
pub const DEFAULT_SHELL: &str = "/bin/sh";

fn resolve(path_arg: &Option<String>, default: &str) -> String {
    let path = match path_arg {
        Some(path) => path,
        None => default,
    };

    shellexpand::tilde(path).to_string()
}

/// Resolves the settings file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// settings path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use gorilla_core::config::get_config_path;
///
/// // Use default path
/// let default_path = get_config_path(&None);
///
/// // Use custom path
/// let custom_path = get_config_path(&Some("/path/to/config.json".to_string()));
/// assert_eq!(custom_path, "/path/to/config.json");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    resolve(config_path_arg, DEFAULT_CONFIG_PATH)
}

/// Resolves the user id file path.
pub fn get_user_id_path(user_id_path_arg: &Option<String>) -> String {
    resolve(user_id_path_arg, DEFAULT_USER_ID_PATH)
}

/// Resolves the executed command history path.
pub fn get_history_path(history_path_arg: &Option<String>) -> String {
    resolve(history_path_arg, DEFAULT_HISTORY_PATH)
}

/// Resolves the update check stamp path.
pub fn get_update_check_path() -> String {
    resolve(&None, DEFAULT_UPDATE_CHECK_PATH)
}

/// Resolves the shell history path.
pub fn get_shell_history_path() -> String {
    resolve(&None, DEFAULT_SHELL_HISTORY_PATH)
}

/// The shell commands are run with: `$SHELL`, falling back to [`DEFAULT_SHELL`].
pub fn get_shell() -> String {
    std::env::var("SHELL")
        .ok()
        .filter(|shell| !shell.is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_path_with_custom_path() {
        let custom_path = Some("/custom/path/config.json".to_string());
        let result = get_config_path(&custom_path);
        assert_eq!(result, "/custom/path/config.json");
    }

    #[test]
    fn test_get_config_path_with_none() {
        let result = get_config_path(&None);
        // Should expand the tilde in the default path
        assert!(result.ends_with(".gorilla-cli-config.json"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_user_id_path_with_tilde() {
        let tilde_path = Some("~/my-user-id".to_string());
        let result = get_user_id_path(&tilde_path);
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-user-id"));
    }

    #[test]
    fn test_get_history_path_defaults() {
        let result = get_history_path(&None);
        assert!(result.ends_with(".gorilla_cli_history"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_fixed_paths_are_expanded() {
        assert!(get_update_check_path().ends_with(".gorilla-cli-last-update-check"));
        assert!(get_shell_history_path().ends_with(".bash_history"));
        assert!(!get_shell_history_path().starts_with('~'));
    }

    #[test]
    fn test_shell_is_never_empty() {
        assert!(!get_shell().is_empty());
    }
}
