//! Client for the command suggestion service.

use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::REQUEST_TIMEOUT_SECS;
use crate::error::{Error, Result};

const COMMANDS_ENDPOINT: &str = "commands_v2";
const EXECUTION_RESULT_ENDPOINT: &str = "command-execution-result";

/// A request for command suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRequest {
    pub user_id: String,
    pub user_input: String,
    pub interaction_id: String,
    pub system_info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesized_history: Option<String>,
}

/// The outcome of running a suggested command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub user_id: String,
    pub command: String,
    pub exit_condition: String,
    pub interaction_id: String,
}

/// A fresh id tying a suggestion request to its execution report.
#[must_use]
pub fn new_interaction_id() -> String {
    Uuid::new_v4().to_string()
}

/// The operating system name the service expects: `Linux`, `Darwin` or `Windows`.
#[must_use]
pub fn system_info() -> String {
    match std::env::consts::OS {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        other => other.to_string(),
    }
}

/// Blocking client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    client: Client,
    server_url: String,
}

impl SuggestionClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(server_url: &str, version: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("gorilla-cli/{version}"))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::http_error("create HTTP client", e))?;

        Ok(Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.server_url)
    }

    /// Asks the service for candidate commands.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, answers with a
    /// non-success status or sends something other than a list of strings.
    pub fn fetch_commands(&self, request: &CommandRequest) -> Result<Vec<String>> {
        let action = "fetch command suggestions";
        debug!("Requesting suggestions for interaction {}", request.interaction_id);

        let response = self
            .client
            .post(self.endpoint(COMMANDS_ENDPOINT))
            .json(request)
            .send()
            .map_err(|e| Error::http_error(action, e))?;

        if !response.status().is_success() {
            return Err(Error::server_status(action, response.status().as_u16()));
        }

        let commands: Vec<String> = response.json().map_err(|e| Error::http_error(action, e))?;
        info!("Received {} suggestions", commands.len());
        Ok(commands)
    }

    /// Reports how a chosen command ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not 200.
    pub fn report_execution(&self, result: &ExecutionResult) -> Result<()> {
        let action = "send the command execution result";

        let response = self
            .client
            .post(self.endpoint(EXECUTION_RESULT_ENDPOINT))
            .json(result)
            .send()
            .map_err(|e| Error::http_error(action, e))?;

        if response.status() != StatusCode::OK {
            return Err(Error::server_status(action, response.status().as_u16()));
        }
        Ok(())
    }
}
