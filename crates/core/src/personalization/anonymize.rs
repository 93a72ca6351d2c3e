//! Removal of personal data from shell history before it leaves the machine.

use std::sync::LazyLock;

use regex::Regex;

/// Replaces personal information in free text.
pub trait Anonymizer {
    fn anonymize(&self, text: &str) -> String;
}

impl<F> Anonymizer for F
where
    F: Fn(&str) -> String,
{
    fn anonymize(&self, text: &str) -> String {
        self(text)
    }
}

// URLs go first so that hosts and credentials inside them are not tagged twice
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b(?:https?|ftp|ssh|git)://[^\s'"]+"#).unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}").unwrap()
});

static IP_ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(?:25[0-5]|2[0-4]\d|1?\d?\d)\.){3}(?:25[0-5]|2[0-4]\d|1?\d?\d)\b").unwrap()
});

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?:sk-[A-Za-z0-9_-]{16,}|gh[pousr]_[A-Za-z0-9]{20,}",
        r"|AKIA[0-9A-Z]{16}|xox[abpr]-[A-Za-z0-9-]{10,})\b"
    ))
    .unwrap()
});

static ASSIGNED_SECRET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b((?:password|passwd|token|secret|api[_-]?key)\s*[=:]\s*)\S+").unwrap()
});

static HOME_DIRECTORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(/home/|/Users/)[^/\s]+").unwrap());

/// Tags e-mail addresses, IP addresses, URLs, API-key-like secrets and the
/// user names in home directory paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternAnonymizer;

impl Anonymizer for PatternAnonymizer {
    fn anonymize(&self, text: &str) -> String {
        let text = URL_RE.replace_all(text, "<URL>");
        let text = EMAIL_RE.replace_all(&text, "<EMAIL_ADDRESS>");
        let text = IP_ADDRESS_RE.replace_all(&text, "<IP_ADDRESS>");
        let text = TOKEN_RE.replace_all(&text, "<SECRET>");
        let text = ASSIGNED_SECRET_RE.replace_all(&text, "${1}<SECRET>");
        HOME_DIRECTORY_RE.replace_all(&text, "${1}<PERSON>").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymize(text: &str) -> String {
        PatternAnonymizer.anonymize(text)
    }

    #[test]
    fn test_email_addresses() {
        assert_eq!(
            anonymize("git config user.email ada@example.co.uk"),
            "git config user.email <EMAIL_ADDRESS>"
        );
    }

    #[test]
    fn test_ip_addresses() {
        assert_eq!(anonymize("ssh root@10.0.0.12"), "ssh root@<IP_ADDRESS>");
        // Version numbers are not addresses
        assert_eq!(anonymize("pip install foo==1.2.3"), "pip install foo==1.2.3");
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            anonymize("curl https://user:pw@api.example.com/v1?q=1"),
            "curl <URL>"
        );
    }

    #[test]
    fn test_secrets() {
        assert_eq!(
            anonymize("export OPENAI_KEY=sk-abcdefghijklmnopqrstuvwx"),
            "export OPENAI_KEY=<SECRET>"
        );
        assert_eq!(
            anonymize("mysql --password=hunter2 -u app"),
            "mysql --password=<SECRET> -u app"
        );
    }

    #[test]
    fn test_home_directories() {
        assert_eq!(
            anonymize("cd /home/ada/projects && ls /Users/bob"),
            "cd /home/<PERSON>/projects && ls /Users/<PERSON>"
        );
    }

    #[test]
    fn test_plain_commands_are_untouched() {
        let command = "kubectl get pods --all-namespaces";
        assert_eq!(anonymize(command), command);
    }

    #[test]
    fn test_closure_anonymizer() {
        let upper = |text: &str| text.to_uppercase();
        assert_eq!(upper.anonymize("ls"), "LS");
    }
}
