//! Gorilla CLI Library
//!
//! This crate provides the command-line interface for gorilla, an assistant
//! that turns a plain English request into shell command suggestions, lets
//! the user pick one and runs it.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`console`]: Asking questions through the prompt engine, and the theme
//! - [`onboarding`]: First-run user id and personalization settings
//! - [`suggestions`]: Selecting, running and recording a suggested command
//!
//! # Examples
//!
//! ```bash
//! # Ask for suggestions
//! gorilla list all my GCP instances
//!
//! # Send your recent gorilla commands along with the request
//! gorilla -p undo what I just did
//!
//! # Change the personalization settings
//! gorilla --personalize
//! ```

pub mod cli_args;
pub mod console;
pub mod error;
pub mod onboarding;
pub mod suggestions;
