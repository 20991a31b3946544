//! Ollama wire types
//!
//! Request and response bodies for `/api/generate`, `/api/chat` and `/api/tags`.
//! Only the fields this crate reads are modelled; everything else the server
//! sends is ignored.

use serde::{Deserialize, Serialize};

use crate::defaults::sampling;

/// Sampling options sent under `options` in a generate request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
    /// Sequences that end generation
    pub stop: Vec<String>,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: sampling::TEMPERATURE,
            top_p: sampling::TOP_P,
            stop: sampling::STOP.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SamplingOptions {
    /// Options tuned for inline code completion
    pub fn completion() -> Self {
        Self::default().with_stop(sampling::COMPLETION_STOP.iter().copied())
    }

    /// Set temperature
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set top-p
    pub const fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Replace the stop sequences
    pub fn with_stop<I, S>(mut self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop = stop.into_iter().map(Into::into).collect();
        self
    }
}

/// Ollama generate request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name
    pub model: String,
    /// Prompt text
    pub prompt: String,
    /// Always `false`; responses are read in one piece
    pub stream: bool,
    /// Sampling options
    pub options: SamplingOptions,
}

/// Ollama generate response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    /// Generated text
    #[serde(default)]
    pub response: String,
}

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a message with the given role
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Ollama chat request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,
    /// Always `false`
    pub stream: bool,
}

/// Message object inside a chat response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: String,
}

/// Ollama chat response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply
    #[serde(default)]
    pub message: ChatResponseMessage,
}

/// Ollama model entry from `/api/tags`
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaModel {
    /// Model name (e.g. `llama3.2:latest`)
    pub name: String,
}

/// Ollama `/api/tags` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<OllamaModel>,
}

/// Error body returned by Ollama on failure
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_request_shape() {
        let request = GenerateRequest {
            model: "deepseek-coder:6.7b".to_string(),
            prompt: "hi".to_string(),
            stream: false,
            options: SamplingOptions::default(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "deepseek-coder:6.7b");
        assert_eq!(value["stream"], false);
        assert_eq!(value["options"]["stop"], json!(["\n\n"]));
        assert!((value["options"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert!((value["options"]["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_chat_message_roles_serialize_lowercase() {
        let value = serde_json::to_value(ChatMessage::system("be nice")).unwrap();
        assert_eq!(value, json!({"role": "system", "content": "be nice"}));
        let value = serde_json::to_value(ChatMessage::assistant("ok")).unwrap();
        assert_eq!(value["role"], "assistant");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let generate: GenerateResponse = serde_json::from_value(json!({"done": true})).unwrap();
        assert_eq!(generate.response, "");

        let chat: ChatResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(chat.message.content, "");

        let tags: TagsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(tags.models.is_empty());
    }

    #[test]
    fn test_tags_response_ignores_extra_fields() {
        let tags: TagsResponse = serde_json::from_value(json!({
            "models": [
                {"name": "llama3.2:latest", "size": 1000, "details": {"family": "llama"}},
                {"name": "deepseek-coder:6.7b"}
            ]
        }))
        .unwrap();
        let names: Vec<_> = tags.models.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["llama3.2:latest", "deepseek-coder:6.7b"]);
    }

    #[test]
    fn test_completion_options() {
        let options = SamplingOptions::completion().with_temperature(0.5);
        assert_eq!(options.stop, vec!["\n\n", "//"]);
        assert_eq!(options.temperature, 0.5);
        assert_eq!(options.top_p, 0.9);
    }
}
