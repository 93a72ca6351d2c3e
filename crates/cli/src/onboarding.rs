//! First-run setup: the user id and the personalization settings.

use std::io::Write;

use gorilla_core::settings::{
    plan_personalization, write_settings, Personalization, PersonalizationPlan, Settings,
};
use gorilla_core::user::{generate_user_id, issue_link, read_user_id, write_user_id};
use gorilla_prompt::Outcome;
use log::{info, warn};

use crate::console::{confirm, secret, Asker};
use crate::error::Result;

const PERSONALIZE_QUESTION: &str = "Do you want to personalize your bash history?";
const KEY_QUESTION: &str = "Enter your OpenAI API key:";
const RETRY_QUESTION: &str = "The API key you entered is invalid. Do you want to try again?";
const INVALID_KEY_MESSAGE: &str =
    "You didn't provide a valid API key, so we didn't update your settings.";

/// Printed once, when no user id has been stored yet.
#[must_use]
pub fn welcome_text(emoji: &str) -> String {
    format!(
        "===***===
{emoji}Welcome to Gorilla-CLI! Enhance your Command Line with the power of LLMs!

Simply use `gorilla <your desired operation>` and Gorilla will do the rest. For instance:
    gorilla generate 100 random characters into a file called test.txt
    gorilla get the image ids of all pods running in all namespaces in kubernetes
    gorilla list all my GCP instances

A research prototype from UC Berkeley, Gorilla-CLI ensures user control and privacy:
 - Commands are executed only with explicit user approval.
 - While queries and error (stderr) logs are used to refine our model, we NEVER gather output (stdout) data.

Visit github.com/gorilla-llm/gorilla-cli for examples and to learn more!
===***==="
    )
}

/// Reads the stored user id or, on first run, picks one and stores it.
///
/// The git e-mail address is offered as the id when there is one.
/// A failure to store the id is reported and the id is used for this run.
///
/// # Errors
///
/// Returns an error if the id file cannot be read or the question fails.
pub fn resolve_user_id(
    user_id_path: &str,
    git_email: Option<String>,
    emoji: &str,
    asker: &mut dyn Asker,
    out: &mut dyn Write,
) -> Result<Outcome<String>> {
    if let Some(user_id) = read_user_id(user_id_path)? {
        return Ok(Outcome::Answered(user_id));
    }

    let user_id = match git_email {
        Some(email) => {
            writeln!(out, "{}", welcome_text(emoji))?;
            let question = format!("Use your Github handle ({email}) as user id?");
            match confirm(asker, "use_git_email", &question, true)? {
                Outcome::Answered(true) => email,
                Outcome::Answered(false) => generate_user_id(),
                Outcome::Cancelled => return Ok(Outcome::Cancelled),
            }
        }
        None => {
            writeln!(
                out,
                "Unable to import userid from Git. Git not installed or git user.email not configured."
            )?;
            writeln!(out, "Will use a random user-id. \n")?;
            writeln!(out, "{}", welcome_text(emoji))?;
            generate_user_id()
        }
    };

    if let Err(e) = write_user_id(user_id_path, &user_id) {
        writeln!(out, "Unable to write userid to file: {e}")?;
        let link = issue_link("Problem with userid file", &format!("Unable to write userid file: {e}"));
        writeln!(out, "If the problem persists, please raise an issue: {link}")?;
        writeln!(out, "Using a temporary UID {user_id} for now.")?;
    } else {
        info!("Stored user id in {user_id_path}");
    }

    Ok(Outcome::Answered(user_id))
}

/// Shows enough of a key to recognise it.
#[must_use]
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Asks for API keys until one passes `check_key` or the user gives up.
fn request_key(
    asker: &mut dyn Asker,
    check_key: &dyn Fn(&str) -> bool,
) -> Result<Outcome<Option<String>>> {
    loop {
        let key = match secret(asker, "api_key", KEY_QUESTION)? {
            Outcome::Answered(key) => key,
            Outcome::Cancelled => return Ok(Outcome::Cancelled),
        };

        if check_key(&key) {
            return Ok(Outcome::Answered(Some(key)));
        }

        match confirm(asker, "retry_api_key", RETRY_QUESTION, true)? {
            Outcome::Answered(true) => {}
            Outcome::Answered(false) => return Ok(Outcome::Answered(None)),
            Outcome::Cancelled => return Ok(Outcome::Cancelled),
        }
    }
}

/// Asks whether to personalize requests, updates `settings` accordingly and
/// writes them to `config_path`.
///
/// `check_key` decides whether an entered API key is usable. Cancelling
/// leaves the settings file untouched.
///
/// # Errors
///
/// Returns an error if a question fails or the settings cannot be written.
pub fn configure_personalization(
    config_path: &str,
    settings: Settings,
    asker: &mut dyn Asker,
    out: &mut dyn Write,
    check_key: &dyn Fn(&str) -> bool,
) -> Result<Outcome<Settings>> {
    let wants_personalization = match confirm(asker, "personalize", PERSONALIZE_QUESTION, true)? {
        Outcome::Answered(answer) => answer,
        Outcome::Cancelled => return Ok(Outcome::Cancelled),
    };

    if wants_personalization {
        writeln!(
            out,
            "We're going to be using your bash history to personalize your queries. This feature will require OpenAI API access, so enter your API key when prompted below. You can always turn this feature off in the future!"
        )?;
    } else {
        writeln!(
            out,
            "We won't use your bash history to personalize your queries. You can always turn this feature on in the future!"
        )?;
    }

    let current = settings.personalization.clone();
    let personalization = match plan_personalization(current.as_ref(), wants_personalization) {
        PersonalizationPlan::RequestKey => match request_key(asker, check_key)? {
            Outcome::Cancelled => return Ok(Outcome::Cancelled),
            Outcome::Answered(Some(key)) => {
                writeln!(out, "We successfully added your API key.")?;
                Personalization::enabled(key)
            }
            Outcome::Answered(None) => {
                writeln!(out, "{INVALID_KEY_MESSAGE}")?;
                Personalization::disabled()
            }
        },
        PersonalizationPlan::OfferKeyChange { current_key } => {
            writeln!(
                out,
                "You are already using the following API key:\n\n{}\n",
                mask_key(&current_key)
            )?;
            match confirm(asker, "change_api_key", "Do you want to change it?", false)? {
                Outcome::Cancelled => return Ok(Outcome::Cancelled),
                Outcome::Answered(false) => {
                    writeln!(out, "You're all set.")?;
                    return Ok(Outcome::Answered(settings));
                }
                Outcome::Answered(true) => match request_key(asker, check_key)? {
                    Outcome::Cancelled => return Ok(Outcome::Cancelled),
                    Outcome::Answered(Some(key)) => {
                        writeln!(out, "We successfully updated your API key.")?;
                        Personalization::enabled(key)
                    }
                    Outcome::Answered(None) => {
                        writeln!(out, "{INVALID_KEY_MESSAGE}")?;
                        return Ok(Outcome::Answered(settings));
                    }
                },
            }
        }
        PersonalizationPlan::AlreadyDisabled => {
            writeln!(out, "You already have personalization disabled. You're good to go!")?;
            return Ok(Outcome::Answered(settings));
        }
        PersonalizationPlan::Disable | PersonalizationPlan::StoreDeclined => {
            writeln!(out, "We turned off personalization for you.")?;
            Personalization::disabled()
        }
    };

    let settings = Settings {
        personalization: Some(personalization),
        ..settings
    };
    write_settings(config_path, &settings)?;
    Ok(Outcome::Answered(settings))
}

/// Checks a key against the summarizer API; an unreachable API counts as invalid.
#[must_use]
pub fn check_api_key(key: &str) -> bool {
    match gorilla_core::personalization::validate_api_key(key) {
        Ok(valid) => valid,
        Err(e) => {
            warn!("Could not validate the API key: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use gorilla_core::settings::load_settings;
    use gorilla_prompt::terminal::AnsiScreen;
    use gorilla_prompt::{Key, ScriptedKeys, Session};

    use super::*;

    fn session(keys: Vec<Key>) -> Session<ScriptedKeys, AnsiScreen<Vec<u8>>> {
        Session::new(ScriptedKeys::new(keys), AnsiScreen::new(Vec::new(), 120))
    }

    fn typed_line(text: &str) -> Vec<Key> {
        let mut keys = ScriptedKeys::typed(text);
        keys.push(Key::Enter);
        keys
    }

    fn accept_good_keys(key: &str) -> bool {
        key.starts_with("sk-good")
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdefghijkl"), "sk-...ijkl");
        assert_eq!(mask_key("short"), "*****");
    }

    #[test]
    fn test_stored_user_id_is_returned_without_questions() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("userid");
        fs::write(&path, "ada@example.com\n").unwrap();

        let mut asker = session(vec![]);
        let mut out = Vec::new();
        let outcome = resolve_user_id(
            path.to_str().unwrap(),
            Some("other@example.com".to_string()),
            "",
            &mut asker,
            &mut out,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Answered("ada@example.com".to_string()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_git_email_accepted_and_stored() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("userid");
        let path = path.to_str().unwrap();

        let mut asker = session(vec![Key::Char('y')]);
        let mut out = Vec::new();
        let outcome =
            resolve_user_id(path, Some("ada@example.com".to_string()), "", &mut asker, &mut out)
                .unwrap();

        assert_eq!(outcome, Outcome::Answered("ada@example.com".to_string()));
        assert_eq!(fs::read_to_string(path).unwrap(), "ada@example.com");
        assert!(String::from_utf8(out).unwrap().contains("Welcome to Gorilla-CLI!"));
    }

    #[test]
    fn test_git_email_declined_uses_random_id() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("userid");
        let path = path.to_str().unwrap();

        let mut asker = session(vec![Key::Char('n')]);
        let mut out = Vec::new();
        let Outcome::Answered(user_id) =
            resolve_user_id(path, Some("ada@example.com".to_string()), "", &mut asker, &mut out)
                .unwrap()
        else {
            panic!("expected an id");
        };

        assert_ne!(user_id, "ada@example.com");
        assert_eq!(fs::read_to_string(path).unwrap(), user_id);
    }

    #[test]
    fn test_without_git_email_a_random_id_is_stored() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("userid");
        let path = path.to_str().unwrap();

        let mut asker = session(vec![]);
        let mut out = Vec::new();
        let outcome = resolve_user_id(path, None, "", &mut asker, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Unable to import userid from Git."));
        assert_eq!(outcome, Outcome::Answered(fs::read_to_string(path).unwrap()));
    }

    #[test]
    fn test_unwritable_user_id_is_used_temporarily() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing-dir").join("userid");

        let mut asker = session(vec![]);
        let mut out = Vec::new();
        let outcome = resolve_user_id(path.to_str().unwrap(), None, "", &mut asker, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Unable to write userid to file"));
        assert!(printed.contains("issues/new?title=Problem+with+userid+file"));
        assert!(matches!(outcome, Outcome::Answered(id) if printed.contains(&format!("temporary UID {id}"))));
    }

    #[test]
    fn test_first_opt_in_stores_valid_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let path = path.to_str().unwrap();

        let mut keys = vec![Key::Char('y')];
        keys.extend(typed_line("sk-bad"));
        keys.push(Key::Char('y'));
        keys.extend(typed_line("sk-good-key"));
        let mut asker = session(keys);
        let mut out = Vec::new();

        let outcome = configure_personalization(
            path,
            Settings::default(),
            &mut asker,
            &mut out,
            &accept_good_keys,
        )
        .unwrap();

        let Outcome::Answered(settings) = outcome else {
            panic!("expected settings");
        };
        assert_eq!(settings.personalization_key(), Some("sk-good-key"));
        assert_eq!(load_settings(path).unwrap(), settings);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("We successfully added your API key."));
    }

    #[test]
    fn test_giving_up_on_key_disables() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let path = path.to_str().unwrap();

        let mut keys = vec![Key::Char('y')];
        keys.extend(typed_line("sk-bad"));
        keys.push(Key::Char('n'));
        let mut asker = session(keys);
        let mut out = Vec::new();

        let outcome =
            configure_personalization(path, Settings::default(), &mut asker, &mut out, &accept_good_keys)
                .unwrap();

        assert_eq!(
            outcome.into_option().unwrap().personalization,
            Some(Personalization::disabled())
        );
        assert!(String::from_utf8(out).unwrap().contains(INVALID_KEY_MESSAGE));
    }

    #[test]
    fn test_declining_when_enabled_turns_off() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let path = path.to_str().unwrap();
        let settings = Settings {
            personalization: Some(Personalization::enabled("sk-good-old")),
            ..Settings::default()
        };

        let mut asker = session(vec![Key::Char('n')]);
        let mut out = Vec::new();
        let settings =
            configure_personalization(path, settings, &mut asker, &mut out, &accept_good_keys)
                .unwrap()
                .into_option()
                .unwrap();

        assert_eq!(settings.personalization_key(), None);
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("We turned off personalization for you."));
    }

    #[test]
    fn test_keeping_the_current_key_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let settings = Settings {
            personalization: Some(Personalization::enabled("sk-good-old-key")),
            ..Settings::default()
        };

        let mut asker = session(vec![Key::Char('y'), Key::Char('n')]);
        let mut out = Vec::new();
        let kept = configure_personalization(
            path.to_str().unwrap(),
            settings.clone(),
            &mut asker,
            &mut out,
            &accept_good_keys,
        )
        .unwrap();

        assert_eq!(kept, Outcome::Answered(settings));
        assert!(!path.exists());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("sk-...-key"));
        assert!(printed.contains("You're all set."));
    }

    #[test]
    fn test_already_disabled() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let settings = Settings {
            personalization: Some(Personalization::disabled()),
            ..Settings::default()
        };

        let mut asker = session(vec![Key::Char('n')]);
        let mut out = Vec::new();
        configure_personalization(
            path.to_str().unwrap(),
            settings,
            &mut asker,
            &mut out,
            &accept_good_keys,
        )
        .unwrap();

        assert!(String::from_utf8(out)
            .unwrap()
            .contains("You already have personalization disabled."));
    }

    #[test]
    fn test_cancel_leaves_settings_alone() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let mut asker = session(vec![Key::CtrlC]);
        let mut out = Vec::new();
        let outcome = configure_personalization(
            path.to_str().unwrap(),
            Settings::default(),
            &mut asker,
            &mut out,
            &accept_good_keys,
        )
        .unwrap();

        assert!(outcome.is_cancelled());
        assert!(!path.exists());
    }
}
