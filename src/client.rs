//! Ollama Client Implementation
//!
//! One method per operation, one HTTP request per call. The `try_*` methods
//! return a [`ClientError`] describing what went wrong; the plain methods keep
//! the forgiving contract a CLI wants: `false`, an empty list, or `None` after
//! logging the failure.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::OllamaConfig;
use crate::defaults;
use crate::error::{ClientError, Result};
use crate::prompt::{TaskKind, build_prompt};
use crate::types::*;

const TAGS_PATH: &str = "api/tags";
const GENERATE_PATH: &str = "api/generate";
const CHAT_PATH: &str = "api/chat";

/// Ollama Client
#[derive(Clone)]
pub struct OllamaClient {
    /// Immutable configuration
    config: OllamaConfig,
    /// HTTP client for making requests
    http_client: reqwest::Client,
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("base_url", &self.config.base_url())
            .field("model", &self.config.model())
            .field("request_timeout", &self.config.request_timeout())
            .finish()
    }
}

impl OllamaClient {
    /// Creates a new client, building an HTTP client from the configuration
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(defaults::http::USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            ClientError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Creates a new client with a caller-provided HTTP client
    pub const fn with_http_client(config: OllamaConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Get the configuration
    pub const fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        self.config.model()
    }

    // === Connectivity and models ===

    /// Check whether the Ollama server is reachable
    ///
    /// Uses the short connectivity timeout. Any failure, including a
    /// non-success status, yields `false`.
    pub async fn is_connected(&self) -> bool {
        let url = self.config.endpoint(TAGS_PATH);
        tracing::debug!(%url, "checking Ollama connectivity");
        match self
            .http_client
            .get(&url)
            .timeout(self.config.connect_check_timeout())
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Ollama is not reachable");
                false
            }
        }
    }

    /// List the names of locally available models, in server order
    pub async fn try_list_models(&self) -> Result<Vec<String>> {
        let tags: TagsResponse = self.get_json(TAGS_PATH).await?;
        Ok(tags.models.into_iter().map(|model| model.name).collect())
    }

    /// List model names, or an empty list if they could not be fetched
    pub async fn list_models(&self) -> Vec<String> {
        self.try_list_models().await.unwrap_or_else(|e| {
            tracing::debug!(error = %e, "model listing failed");
            Vec::new()
        })
    }

    // === Generation ===

    /// Send `prompt` to `/api/generate` and return the generated text
    ///
    /// `options` defaults to [`SamplingOptions::default`]. A response without a
    /// `response` field yields an empty string.
    pub async fn try_generate(
        &self,
        prompt: &str,
        options: Option<&SamplingOptions>,
    ) -> Result<String> {
        let body = GenerateRequest {
            model: self.config.model().to_string(),
            prompt: prompt.to_string(),
            stream: false,
            options: options.cloned().unwrap_or_default(),
        };
        let response: GenerateResponse = self.post_json(GENERATE_PATH, &body).await?;
        Ok(response.response)
    }

    /// Generate code from a prompt, logging and returning `None` on failure
    pub async fn generate_code(
        &self,
        prompt: &str,
        options: Option<&SamplingOptions>,
    ) -> Option<String> {
        report("generate", self.try_generate(prompt, options).await)
    }

    /// Run a prompt-building task through the generation endpoint
    pub async fn run_task(&self, kind: &TaskKind, input: &str) -> Option<String> {
        self.generate_code(&build_prompt(kind, input), None).await
    }

    /// Explain code; `language` may be empty
    pub async fn explain_code(&self, code: &str, language: &str) -> Option<String> {
        self.run_task(&TaskKind::explain(language), code).await
    }

    /// Review code and suggest improvements; `language` may be empty
    pub async fn review_code(&self, code: &str, language: &str) -> Option<String> {
        self.run_task(&TaskKind::review(language), code).await
    }

    /// Generate unit tests for a function; an empty `framework` means pytest
    pub async fn generate_tests(&self, function_code: &str, framework: &str) -> Option<String> {
        self.run_task(&TaskKind::test(framework), function_code).await
    }

    /// Find and fix bugs; `error_msg` may be empty
    pub async fn debug_code(&self, code: &str, error_msg: &str) -> Option<String> {
        self.run_task(&TaskKind::debug(error_msg), code).await
    }

    /// Refactor code towards `goals`; empty goals mean readability and performance
    pub async fn refactor_code(&self, code: &str, goals: &str) -> Option<String> {
        self.run_task(&TaskKind::refactor(goals), code).await
    }

    /// Inline completion: stops at a blank line or a line comment
    pub async fn complete_code(&self, prompt: &str) -> Option<String> {
        self.generate_code(prompt, Some(&SamplingOptions::completion())).await
    }

    // === Chat ===

    /// Build the message list sent to `/api/chat`
    pub fn chat_messages(message: &str, context: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(context.len() + 2);
        messages.push(ChatMessage::system(defaults::prompt::SYSTEM_PERSONA));
        messages.extend_from_slice(context);
        messages.push(ChatMessage::user(message));
        messages
    }

    /// Send a chat turn with prior `context` and return the assistant reply
    pub async fn try_chat(&self, message: &str, context: &[ChatMessage]) -> Result<String> {
        let body = ChatRequest {
            model: self.config.model().to_string(),
            messages: Self::chat_messages(message, context),
            stream: false,
        };
        let response: ChatResponse = self.post_json(CHAT_PATH, &body).await?;
        Ok(response.message.content)
    }

    /// Chat, logging and returning `None` on failure
    pub async fn chat(&self, message: &str, context: &[ChatMessage]) -> Option<String> {
        report("chat", self.try_chat(message, context).await)
    }

    // === HTTP plumbing ===

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "GET");
        let response = self.http_client.get(&url).send().await?;
        parse_response(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, model = %self.config.model(), "POST");
        let response = self.http_client.post(&url).json(body).send().await?;
        parse_response(response).await
    }
}

/// Turn a response into `T`, mapping non-success statuses to `ApiError`
async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<OllamaErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text.clone()
                }
            });
        return Err(ClientError::api_error(status.as_u16(), message));
    }

    serde_json::from_str(&text).map_err(|e| {
        ClientError::ParseError(format!("Failed to parse Ollama response: {e}"))
    })
}

fn report(operation: &str, result: Result<String>) -> Option<String> {
    match result {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!(operation, error = %e, "Ollama request failed");
            None
        }
    }
}
