use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::REQUEST_TIMEOUT_SECS;
use crate::error::{Error, Result};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const SUMMARY_MODEL: &str = "gpt-4";

/// Produces a short context paragraph from a system and a user prompt.
pub trait Summarizer {
    fn summarize(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

fn build_client(api_key: &str) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| Error::unexpected_response("use the API key", "key is not a valid header value"))?;
    headers.insert(AUTHORIZATION, bearer);

    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::http_error("create HTTP client", e))
}

/// Summarizer backed by an OpenAI compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiSummarizer {
    client: Client,
    api_base: String,
    model: String,
}

impl OpenAiSummarizer {
    /// # Errors
    ///
    /// Returns an error if the key cannot be sent as a header or the client
    /// cannot be built.
    pub fn new(api_key: &str) -> Result<Self> {
        Ok(Self {
            client: build_client(api_key)?,
            api_base: OPENAI_API_BASE.to_string(),
            model: SUMMARY_MODEL.to_string(),
        })
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl Summarizer for OpenAiSummarizer {
    fn summarize(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let action = "summarize the shell history";
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        debug!("Requesting summary from {}", self.api_base);
        let response = self
            .client
            .post(self.chat_completions_url())
            .json(&request)
            .send()
            .map_err(|e| Error::http_error(action, e))?;

        if !response.status().is_success() {
            return Err(Error::server_status(action, response.status().as_u16()));
        }

        let response: ChatResponse = response.json().map_err(|e| Error::http_error(action, e))?;
        response
            .into_content()
            .ok_or_else(|| Error::unexpected_response(action, "the reply has no message content"))
    }
}

/// Whether the API accepts `api_key`, judged by listing the available models.
///
/// # Errors
///
/// Returns an error if the API cannot be reached at all.
pub fn validate_api_key(api_key: &str) -> Result<bool> {
    validate_api_key_at(OPENAI_API_BASE, api_key)
}

/// [`validate_api_key`] against another API base.
///
/// # Errors
///
/// Returns an error if the API cannot be reached at all.
pub fn validate_api_key_at(api_base: &str, api_key: &str) -> Result<bool> {
    if api_key.trim().is_empty() {
        return Ok(false);
    }

    let client = match build_client(api_key.trim()) {
        Ok(client) => client,
        Err(Error::UnexpectedResponse { .. }) => return Ok(false),
        Err(e) => return Err(e),
    };

    let response = client
        .get(format!("{}/models", api_base.trim_end_matches('/')))
        .send()
        .map_err(|e| Error::http_error("validate the API key", e))?;

    Ok(response.status().is_success())
}
