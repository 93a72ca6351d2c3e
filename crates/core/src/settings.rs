//! The JSON settings file and personalization choices stored in it.

use std::fs;
use std::io::ErrorKind;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const FILE_DESCRIPTION: &str = "settings";

/// Whether the user's shell history may be summarized, and with which key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personalization {
    #[serde(default)]
    pub permission: bool,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Personalization {
    #[must_use]
    pub fn enabled(api_key: impl Into<String>) -> Self {
        Self {
            permission: true,
            api_key: Some(api_key.into()),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// The API key, when personalization is switched on.
    #[must_use]
    pub fn active_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| self.permission && !key.is_empty())
    }
}

/// Colour names for the prompt theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub accent: Option<String>,
    pub answer: Option<String>,
    pub disabled: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personalization: Option<Personalization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeSettings>,
}

impl Settings {
    /// The personalization key to use for this run, if any.
    #[must_use]
    pub fn personalization_key(&self) -> Option<&str> {
        self.personalization
            .as_ref()
            .and_then(Personalization::active_key)
    }
}

/// Reads the settings file.
///
/// A missing file yields default settings. A file that is not valid JSON is
/// logged and treated as empty, so that the user is asked again.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_settings(config_path: &str) -> Result<Settings> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No settings file at {config_path}");
            return Ok(Settings::default());
        }
        Err(e) => return Err(Error::io_error(FILE_DESCRIPTION, config_path, e)),
    };

    match serde_json::from_str(&contents) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            warn!("Ignoring unreadable settings file at {config_path}: {e}");
            Ok(Settings::default())
        }
    }
}

/// Writes the settings file, replacing its previous contents.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_settings(config_path: &str, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| Error::json_error("writing", FILE_DESCRIPTION, config_path, e))?;

    fs::write(config_path, json).map_err(|e| Error::io_error(FILE_DESCRIPTION, config_path, e))
}

/// What to do after the user answered whether to personalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonalizationPlan {
    /// Ask for a new API key.
    RequestKey,
    /// Personalization is on already; offer to replace `current_key`.
    OfferKeyChange { current_key: String },
    /// Nothing changes.
    AlreadyDisabled,
    /// Switch personalization off and forget the key.
    Disable,
    /// Record that the user declined.
    StoreDeclined,
}

/// Decides how to handle a personalization answer given the stored settings.
#[must_use]
pub fn plan_personalization(
    current: Option<&Personalization>,
    wants_personalization: bool,
) -> PersonalizationPlan {
    match (current, wants_personalization) {
        (Some(current), true) if current.permission => PersonalizationPlan::OfferKeyChange {
            current_key: current.api_key.clone().unwrap_or_default(),
        },
        (_, true) => PersonalizationPlan::RequestKey,
        (Some(current), false) if current.permission => PersonalizationPlan::Disable,
        (Some(_), false) => PersonalizationPlan::AlreadyDisabled,
        (None, false) => PersonalizationPlan::StoreDeclined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.json");
        let settings = load_settings(path.to_str().unwrap()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.personalization_key(), None);
    }

    #[test]
    fn test_invalid_json_is_treated_as_empty() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{ not json").unwrap();
        let settings = load_settings(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_reads_legacy_personalization_section() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"personalization": {{"permission": true, "api_key": "sk-test"}}}}"#
        )
        .unwrap();
        let settings = load_settings(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.personalization_key(), Some("sk-test"));
        assert!(settings.theme.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let path = path.to_str().unwrap();

        let settings = Settings {
            personalization: Some(Personalization::disabled()),
            theme: Some(ThemeSettings {
                accent: Some("magenta".to_string()),
                ..ThemeSettings::default()
            }),
        };
        write_settings(path, &settings).unwrap();
        assert_eq!(load_settings(path).unwrap(), settings);

        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains(r#""api_key": null"#));
    }

    #[test]
    fn test_disabled_key_is_not_active() {
        let personalization = Personalization {
            permission: false,
            api_key: Some("sk-test".to_string()),
        };
        assert_eq!(personalization.active_key(), None);
    }

    #[test]
    fn test_plan_personalization_transitions() {
        let enabled = Personalization::enabled("sk-old");
        let disabled = Personalization::disabled();

        assert_eq!(plan_personalization(None, true), PersonalizationPlan::RequestKey);
        assert_eq!(
            plan_personalization(Some(&disabled), true),
            PersonalizationPlan::RequestKey
        );
        assert_eq!(
            plan_personalization(Some(&enabled), true),
            PersonalizationPlan::OfferKeyChange {
                current_key: "sk-old".to_string()
            }
        );
        assert_eq!(
            plan_personalization(Some(&disabled), false),
            PersonalizationPlan::AlreadyDisabled
        );
        assert_eq!(
            plan_personalization(Some(&enabled), false),
            PersonalizationPlan::Disable
        );
        assert_eq!(
            plan_personalization(None, false),
            PersonalizationPlan::StoreDeclined
        );
    }
}
