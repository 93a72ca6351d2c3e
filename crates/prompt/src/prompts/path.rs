//! Filesystem completion for the path prompt.

use std::fmt::{Debug, Formatter};
use std::fs;

use crate::validation::Validator;

/// Lists completion candidates for a partially typed path.
pub trait EntryLister {
    /// Entries that start with `prefix`, in display order.
    fn list_entries(&self, prefix: &str, only_directories: bool) -> Vec<String>;
}

impl<F> EntryLister for F
where
    F: Fn(&str, bool) -> Vec<String>,
{
    fn list_entries(&self, prefix: &str, only_directories: bool) -> Vec<String> {
        self(prefix, only_directories)
    }
}

/// Reads candidates from the local filesystem.
///
/// Directories are returned with a trailing `/`; hidden entries only appear
/// when the typed name itself starts with a dot. `~` is expanded for reading
/// but kept in the returned candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEntries;

impl EntryLister for FsEntries {
    fn list_entries(&self, prefix: &str, only_directories: bool) -> Vec<String> {
        let (directory, partial) = match prefix.rfind('/') {
            Some(index) => prefix.split_at(index + 1),
            None => ("", prefix),
        };

        let read_from = if directory.is_empty() {
            ".".to_string()
        } else {
            shellexpand::tilde(directory).to_string()
        };

        let Ok(entries) = fs::read_dir(&read_from) else {
            return Vec::new();
        };

        let mut candidates: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                if !name.starts_with(partial) || (name.starts_with('.') && !partial.starts_with('.')) {
                    return None;
                }

                let is_directory = entry.path().is_dir();
                if only_directories && !is_directory {
                    return None;
                }

                let suffix = if is_directory { "/" } else { "" };
                Some(format!("{directory}{name}{suffix}"))
            })
            .collect();

        candidates.sort();
        candidates
    }
}

/// Longest prefix shared by all `candidates`.
#[must_use]
pub fn common_prefix(candidates: &[String]) -> String {
    let Some(first) = candidates.first() else {
        return String::new();
    };

    let mut prefix: Vec<char> = first.chars().collect();
    for candidate in &candidates[1..] {
        let shared = prefix
            .iter()
            .zip(candidate.chars())
            .take_while(|(a, b)| **a == *b)
            .count();
        prefix.truncate(shared);
    }
    prefix.into_iter().collect()
}

pub struct PathConfig {
    pub(crate) default: Option<String>,
    pub(crate) validate: Option<Validator<str>>,
    pub(crate) only_directories: bool,
    pub(crate) instruction: Option<String>,
    pub(crate) lister: Box<dyn EntryLister>,
}

impl PathConfig {
    /// A path prompt completing from the local filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default: None,
            validate: None,
            only_directories: false,
            instruction: None,
            lister: Box::new(FsEntries),
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator<str>) -> Self {
        self.validate = Some(validator);
        self
    }

    #[must_use]
    pub fn only_directories(mut self) -> Self {
        self.only_directories = true;
        self
    }

    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    /// Replaces the filesystem with another source of candidates.
    #[must_use]
    pub fn with_lister(mut self, lister: impl EntryLister + 'static) -> Self {
        self.lister = Box::new(lister);
        self
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for PathConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathConfig")
            .field("default", &self.default)
            .field("only_directories", &self.only_directories)
            .field("instruction", &self.instruction)
            .finish_non_exhaustive()
    }
}
