//! Integration tests for gorilla-core
//!
//! These tests exercise the public API the way the command-line assistant
//! strings it together: settings, history and personalization.

use std::cell::RefCell;
use std::fs;

use gorilla_core::config::{get_config_path, get_history_path, HISTORY_LENGTH};
use gorilla_core::error::Result;
use gorilla_core::history::{append_to_shell_history, recent_commands, record_command, should_record};
use gorilla_core::personalization::{personalize, PatternAnonymizer, Summarizer};
use gorilla_core::settings::{
    load_settings, plan_personalization, write_settings, Personalization, PersonalizationPlan,
    Settings,
};
use gorilla_core::user::{read_user_id, write_user_id};

struct EchoSummarizer {
    seen: RefCell<Option<String>>,
}

impl Summarizer for EchoSummarizer {
    fn summarize(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.seen.replace(Some(user_prompt.to_string()));
        Ok("The user works on a Kubernetes cluster.".to_string())
    }
}

/// Test the full personalization consent lifecycle on disk
#[test]
fn test_personalization_settings_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = get_config_path(&Some(
        temp_dir.path().join("config.json").to_str().unwrap().to_string(),
    ));

    // First run: nothing stored, the user opts in
    let settings = load_settings(&path).unwrap();
    assert_eq!(
        plan_personalization(settings.personalization.as_ref(), true),
        PersonalizationPlan::RequestKey
    );
    write_settings(
        &path,
        &Settings {
            personalization: Some(Personalization::enabled("sk-first")),
            ..settings
        },
    )
    .unwrap();

    // Second run: enabled, the user asks again
    let settings = load_settings(&path).unwrap();
    assert_eq!(settings.personalization_key(), Some("sk-first"));
    assert_eq!(
        plan_personalization(settings.personalization.as_ref(), true),
        PersonalizationPlan::OfferKeyChange {
            current_key: "sk-first".to_string()
        }
    );

    // Third run: the user opts out
    assert_eq!(
        plan_personalization(settings.personalization.as_ref(), false),
        PersonalizationPlan::Disable
    );
    write_settings(
        &path,
        &Settings {
            personalization: Some(Personalization::disabled()),
            ..settings
        },
    )
    .unwrap();

    let settings = load_settings(&path).unwrap();
    assert_eq!(settings.personalization_key(), None);
    assert_eq!(
        plan_personalization(settings.personalization.as_ref(), false),
        PersonalizationPlan::AlreadyDisabled
    );
}

/// Test that executed commands feed both histories and the summary prompt
#[test]
fn test_history_feeds_personalization() {
    let temp_dir = tempfile::tempdir().unwrap();
    let history_path = get_history_path(&Some(
        temp_dir.path().join("history").to_str().unwrap().to_string(),
    ));
    let shell_history_path = temp_dir.path().join(".bash_history");
    let shell_history_path = shell_history_path.to_str().unwrap();

    for command in ["kubectl get pods", ":skip me", "kubectl get pods", "curl http://10.1.2.3/health"] {
        if should_record(command) {
            record_command(&history_path, command).unwrap();
        }
        append_to_shell_history(shell_history_path, command).unwrap();
    }

    let recent = recent_commands(&history_path, HISTORY_LENGTH).unwrap().unwrap();
    assert_eq!(recent, vec!["kubectl get pods", "curl http://10.1.2.3/health"]);

    let summarizer = EchoSummarizer {
        seen: RefCell::new(None),
    };
    let summary = personalize(
        "restart the api deployment",
        &recent,
        shell_history_path,
        &PatternAnonymizer,
        &summarizer,
    )
    .unwrap();
    assert_eq!(summary, "The user works on a Kubernetes cluster.");

    let prompt = summarizer.seen.take().unwrap();
    let (shell_part, rest) = prompt
        .split_once("The user's previous operations")
        .unwrap();
    // The shell history is de-duplicated and anonymized
    assert_eq!(shell_part.matches("kubectl get pods").count(), 1);
    assert!(shell_part.contains("curl <URL>"));
    assert!(shell_part.contains(":skip me"));
    // The tool history is passed as is
    assert!(rest.contains("curl http://10.1.2.3/health"));
    assert!(rest.contains("restart the api deployment"));
}

/// Test that the user id survives a round through the file system
#[test]
fn test_user_id_is_persisted() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("userid");
    let path = path.to_str().unwrap();

    assert_eq!(read_user_id(path).unwrap(), None);
    write_user_id(path, "ada@example.com").unwrap();
    assert_eq!(read_user_id(path).unwrap().as_deref(), Some("ada@example.com"));
    assert_eq!(fs::read_to_string(path).unwrap(), "ada@example.com");
}
