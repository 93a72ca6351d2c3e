//! Command-line argument parsing.
//!
//! This module defines the command-line interface of the `gorilla` binary
//! using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the gorilla CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use gorilla_cli::cli_args::Args;
///
/// let args = Args::parse_from(["gorilla", "list", "all", "pods"]);
/// assert_eq!(args.query(), "list all pods");
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(name = "gorilla", about = "Gorilla CLI Help Doc", term_width = 0)]
pub struct Args {
    /// Send the last commands run through gorilla along with the request.
    #[arg(long = "history", short = 'p', action)]
    pub history: bool,

    /// Change whether your shell history is used to personalize requests.
    #[arg(long, action)]
    pub personalize: bool,

    /// Path to the settings file.
    ///
    /// If not provided, defaults to `~/.gorilla-cli-config.json`.
    #[arg(long)]
    pub config_path: Option<String>,

    /// Path to the history of commands run through gorilla.
    ///
    /// If not provided, defaults to `~/.gorilla_cli_history`.
    #[arg(long)]
    pub history_path: Option<String>,

    /// Path to the file that stores your user id.
    ///
    /// If not provided, defaults to `~/.gorilla-cli-userid`.
    #[arg(long)]
    pub user_id_path: Option<String>,

    /// Base URL of the command suggestion service.
    #[arg(long)]
    pub server_url: Option<String>,

    /// The operation you want to perform, in plain English.
    #[arg(trailing_var_arg = true)]
    pub query: Vec<String>,
}

impl Args {
    /// The query words joined with single spaces.
    #[must_use]
    pub fn query(&self) -> String {
        self.query.join(" ")
    }
}
