use super::{Commentator, prompts};
use crate::config::Config;
use crate::error::{ConfigError, ServiceError};

use log::debug;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chat-completions client for OpenAI-compatible endpoints.
///
/// Built once from a [`Config`] and passed to the annotation loop; one
/// blocking request per move, no retries.
#[derive(Debug, Clone)]
pub struct OpenAiCommentator {
    client: Client,
    api_base: String,
    model: String,
}

impl OpenAiCommentator {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_builder(config, Client::builder())
    }

    fn with_builder(config: &Config, builder: ClientBuilder) -> Result<Self, ConfigError> {
        let client = builder
            .default_headers(build_headers(&config.api_key)?)
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    fn build_api_request(&self, fen: &str, san: &str) -> ApiRequest<'_> {
        ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: prompts::SYSTEM_PROMPT.to_string(),
                },
                ApiMessage {
                    role: "user",
                    content: prompts::move_prompt(fen, san),
                },
            ],
        }
    }
}

impl Commentator for OpenAiCommentator {
    fn comment(&self, fen: &str, san: &str) -> Result<String, ServiceError> {
        let endpoint = self.endpoint();
        debug!("requesting commentary for {san} from {endpoint}");

        let response = self
            .client
            .post(&endpoint)
            .json(&self.build_api_request(fen, san))
            .send()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response
            .text()
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        debug!("received {} bytes (status {status})", body.len());

        parse_completion(&body)
    }
}

fn build_headers(api_key: &str) -> Result<HeaderMap, ConfigError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|e| ConfigError::InvalidApiKey(e.to_string()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

/// Extracts the first choice's message content from a response body.
fn parse_completion(body: &str) -> Result<String, ServiceError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::MalformedResponse("response has no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| {
            ServiceError::MalformedResponse("first choice has no message content".to_string())
        })?;

    if content.trim().is_empty() {
        return Err(ServiceError::EmptyCompletion);
    }
    Ok(content)
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    content: Option<String>,
}
