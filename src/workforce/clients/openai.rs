//! [`OpenAiClient`] implements [`ModelClient`] against OpenAI's Chat
//! Completions API, capturing token usage (input vs output) for each
//! request so callers can track spend per worker.
//!
//! # Example
//!
//! ```rust,no_run
//! use workforce::clients::openai::OpenAiClient;
//! use workforce::model_client::{Message, ModelClient, Role};
//!
//! #[tokio::main]
//! async fn main() {
//!     let secret_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");
//!     let client = OpenAiClient::new(secret_key, "gpt-4o-mini");
//!
//!     let reply = client
//!         .complete(&[
//!             Message::new(Role::System, "You are an assistant."),
//!             Message::new(Role::User, "Hello!"),
//!         ])
//!         .await
//!         .unwrap();
//!     println!("Assistant: {}", reply.content);
//!
//!     if let Some(usage) = client.last_usage() {
//!         println!(
//!             "Tokens: input {}, output {}, total {}",
//!             usage.input_tokens, usage.output_tokens, usage.total_tokens
//!         );
//!     }
//! }
//! ```
//!
//! The client also works against OpenAI-compatible deployments; point it
//! at one with [`OpenAiClient::new_with_base_url`].

use crate::workforce::model_client::{Message, ModelClient, ModelClientError, Role, TokenUsage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client for OpenAI's Chat Completions API.
///
/// Holds the model identifier plus an internal [`TokenUsage`] slot updated
/// after every successful request.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    /// Model name injected into each request.
    model: String,
    base_url: String,
    /// Usage reported by the most recent request.
    token_usage: Mutex<Option<TokenUsage>>,
}

impl OpenAiClient {
    /// Construct a client for the given API key and model name.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new_with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Construct a client targeting a custom OpenAI-compatible base URL
    /// (e.g. a self-hosted deployment).
    pub fn new_with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            token_usage: Mutex::new(None),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
    #[serde(default)]
    total_tokens: usize,
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn complete(&self, messages: &[Message]) -> Result<Message, ModelClientError> {
        let request = ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|msg| WireMessage {
                    role: role_str(msg.role),
                    content: msg.content.clone(),
                })
                .collect(),
        };

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| ModelClientError::Request(err.to_string()))?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!("API key rejected with status {}", status)
            } else {
                body
            };
            return Err(ModelClientError::Authentication(message));
        }
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            if log::log_enabled!(log::Level::Error) {
                log::error!(
                    "OpenAiClient::complete(...): API error status {}: {}",
                    status,
                    body
                );
            }
            return Err(ModelClientError::Api {
                status,
                message: body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| ModelClientError::Request(format!("invalid response body: {}", err)))?;

        if let Some(usage) = &parsed.usage {
            if let Ok(mut slot) = self.token_usage.lock() {
                *slot = Some(TokenUsage {
                    input_tokens: usage.prompt_tokens,
                    output_tokens: usage.completion_tokens,
                    total_tokens: usage.total_tokens,
                });
            }
        }

        let choice = match parsed.choices.into_iter().next() {
            Some(choice) => choice,
            None => {
                return Err(ModelClientError::Request(
                    "response contained no choices".to_string(),
                ))
            }
        };
        Ok(Message::new(
            Role::Assistant,
            choice.message.content.unwrap_or_default(),
        ))
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn last_usage(&self) -> Option<TokenUsage> {
        self.token_usage.lock().ok().and_then(|slot| slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_defaults() {
        let client = OpenAiClient::new("sk-test", "gpt-4o-mini");
        assert_eq!(client.model_name(), "gpt-4o-mini");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert!(client.last_usage().is_none());
    }

    #[test]
    fn test_request_serialization_uses_wire_roles() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                WireMessage {
                    role: role_str(Role::System),
                    content: "You are terse.".to_string(),
                },
                WireMessage {
                    role: role_str(Role::User),
                    content: "Hi".to_string(),
                },
            ],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Hello there"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.total_tokens, 15);
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Hello there")
        );
    }

    #[test]
    fn test_response_parsing_tolerates_missing_usage() {
        let body = r#"{"choices": [{"message": {"content": "ok"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.usage.is_none());
    }
}
