//! Gorilla Core Library
//!
//! This crate provides the local state and service plumbing behind the
//! `gorilla` command-line assistant, which turns a plain English request into
//! shell command suggestions.
//!
//! # Key Features
//!
//! - **Configuration**: Locations of the settings, user id and history files
//! - **Settings**: JSON settings with personalization consent and theme colours
//! - **History**: The commands run through gorilla and the user's shell history
//! - **Suggestion Service**: Requesting commands and reporting how they ran
//! - **Personalization**: Anonymized, summarized shell history as extra context
//! - **Update Check**: Daily lookup of the newest published release
//!
//! # Examples
//!
//! Loading the settings and recent history:
//!
//! ```no_run
//! use gorilla_core::config::{get_config_path, get_history_path, HISTORY_LENGTH};
//! use gorilla_core::history::recent_commands;
//! use gorilla_core::settings::load_settings;
//!
//! let settings = load_settings(&get_config_path(&None))?;
//! let recent = recent_commands(&get_history_path(&None), HISTORY_LENGTH)?;
//! println!("{:?} {:?}", settings.personalization, recent);
//! # Ok::<(), gorilla_core::error::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod history;
pub mod personalization;
pub mod service;
pub mod settings;
pub mod update;
pub mod user;
