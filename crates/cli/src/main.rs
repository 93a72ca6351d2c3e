use std::io::{stdin, stdout, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use gorilla_core::config::{self, DEFAULT_SERVER_URL};
use gorilla_core::error::Error as CoreError;
use gorilla_core::service::{
    new_interaction_id, system_info, CommandRequest, ExecutionResult, SuggestionClient,
};
use gorilla_core::settings::{load_settings, Settings};
use gorilla_core::update::{check_for_updates, UpdateCheck};
use gorilla_core::user::git_email;
use gorilla_prompt::{supports_emoji, Outcome};
use log::{debug, info};

use gorilla_cli::cli_args::Args;
use gorilla_cli::console::{build_theme, gorilla_emoji, TerminalAsker};
use gorilla_cli::error::Result;
use gorilla_cli::onboarding::{check_api_key, configure_personalization, resolve_user_id};
use gorilla_cli::suggestions::{
    personalized_history, report_failure_message, run_command, select_command, tool_history,
    Selection,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn has_terminal() -> bool {
    stdin().is_terminal() && stdout().is_terminal()
}

/// Asks the personalization questions when they were never answered or
/// when the user asked to change them.
fn settle_settings(
    args: &Args,
    config_path: &str,
    settings: Settings,
    asker: &mut TerminalAsker,
) -> Result<Option<Settings>> {
    if settings.personalization.is_some() && !args.personalize {
        return Ok(Some(settings));
    }

    if !has_terminal() {
        debug!("No terminal, skipping the personalization questions");
        return Ok(Some(settings));
    }

    match configure_personalization(config_path, settings, asker, &mut stdout(), &check_api_key)? {
        Outcome::Answered(settings) => Ok(Some(settings)),
        Outcome::Cancelled => Ok(None),
    }
}

fn print_update_notice() {
    match check_for_updates(&config::get_update_check_path(), VERSION) {
        Ok(UpdateCheck::Available { latest }) => println!(
            "A new version is available: {latest}. Update with `cargo install gorilla-cli`"
        ),
        Ok(UpdateCheck::UpToDate | UpdateCheck::Skipped) => {}
        Err(e) => println!("Unable to check for updates: {e}"),
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let emoji = gorilla_emoji();

    let config_path = config::get_config_path(&args.config_path);
    let history_path = config::get_history_path(&args.history_path);
    let user_id_path = config::get_user_id_path(&args.user_id_path);
    debug!("Config path: `{config_path}`");

    let settings = load_settings(&config_path)?;
    let mut asker = TerminalAsker::new(build_theme(settings.theme.as_ref(), supports_emoji()));

    let Outcome::Answered(user_id) =
        resolve_user_id(&user_id_path, git_email(), emoji, &mut asker, &mut stdout())?
    else {
        return Ok(());
    };

    let Some(settings) = settle_settings(&args, &config_path, settings, &mut asker)? else {
        return Ok(());
    };

    let query = args.query();
    if query.trim().is_empty() {
        println!("Simply use `gorilla <your desired operation>` and Gorilla will do the rest.");
        return Ok(());
    }

    let history = if args.history {
        tool_history(&history_path, &mut stdout())?
    } else {
        Vec::new()
    };

    let synthesized_history =
        personalized_history(&settings, &query, &history, &config::get_shell_history_path());

    let server_url = args.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL);
    let client = SuggestionClient::new(server_url, VERSION)?;
    let interaction_id = new_interaction_id();
    let system_info = system_info();

    println!("{emoji}Loading...");
    let request = CommandRequest {
        user_id: user_id.clone(),
        user_input: query,
        interaction_id: interaction_id.clone(),
        system_info: system_info.clone(),
        synthesized_history,
    };
    let commands = match client.fetch_commands(&request) {
        Ok(commands) => commands,
        Err(CoreError::Http { original, .. }) => {
            debug!("{original}");
            println!("Server is unreachable.");
            println!("Try updating Gorilla-CLI with 'cargo install gorilla-cli'");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print_update_notice();

    if commands.is_empty() {
        info!("The server had no suggestions");
        return Ok(());
    }

    let command = match select_command(&mut asker, &commands, &mut stdout())? {
        Selection::Chosen(command) => command,
        Selection::Cancelled | Selection::Printed => return Ok(()),
    };

    let shell_history_path = config::get_shell_history_path();
    let shell_history = (system_info == "Linux").then_some(shell_history_path.as_str());
    let report = run_command(
        &config::get_shell(),
        &command,
        &history_path,
        shell_history,
        &mut std::io::stderr(),
    )?;

    let result = ExecutionResult {
        user_id,
        command,
        exit_condition: report.exit_condition(),
        interaction_id,
    };
    if let Err(e) = client.report_execution(&result) {
        debug!("{e}");
        println!("{}", report_failure_message(&e));
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
