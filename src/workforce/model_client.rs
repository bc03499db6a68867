//! The model-client seam between workers and inference backends.
//!
//! A [`ModelClient`] wraps one remote (or fake) model endpoint behind a
//! minimal chat contract: hand it an ordered message slice, get one
//! assistant message back. It carries no conversation state of its own;
//! each [`Worker`](crate::workforce::worker::Worker) owns its bounded
//! memory and builds the message slice per call.
//!
//! # Example
//!
//! ```rust,no_run
//! use workforce::model_client::{Message, ModelClient, Role};
//! use workforce::clients::openai::OpenAiClient;
//!
//! # async {
//! let client = OpenAiClient::new("api-key", "gpt-4o-mini");
//! let reply = client
//!     .complete(&[
//!         Message::new(Role::System, "You are terse."),
//!         Message::new(Role::User, "One word for 'large'?"),
//!     ])
//!     .await?;
//! println!("{}", reply.content);
//! # Ok::<(), workforce::model_client::ModelClientError>(())
//! # };
//! ```

use async_trait::async_trait;
use std::error::Error;
use std::fmt;

/// Conversation role attached to every [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Steering directive set by the application, never by the model.
    System,
    /// Input from the caller, including tool results fed back as context.
    User,
    /// Content generated by the model.
    Assistant,
}

/// A single message exchanged with a model backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Build a message from any string-like content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// How many tokens were spent on prompt vs. completion in one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

/// Failure modes of a model backend call.
///
/// [`ModelClientError::Authentication`] is kept distinct so callers can map
/// a rejected credential to the right worker-level failure instead of a
/// generic invocation error.
#[derive(Debug, Clone)]
pub enum ModelClientError {
    /// The backend rejected the supplied credential (HTTP 401/403), or no
    /// credential was supplied at all.
    Authentication(String),
    /// The request never produced a usable response (connect failure,
    /// timeout, malformed response body).
    Request(String),
    /// The backend answered with a non-success status outside the
    /// authentication range.
    Api { status: u16, message: String },
}

impl fmt::Display for ModelClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelClientError::Authentication(msg) => {
                write!(f, "Model authentication failed: {}", msg)
            }
            ModelClientError::Request(msg) => write!(f, "Model request failed: {}", msg),
            ModelClientError::Api { status, message } => {
                write!(f, "Model API error (status {}): {}", status, message)
            }
        }
    }
}

impl Error for ModelClientError {}

/// Trait implemented by every inference backend a worker can bind to.
///
/// Implementations must be shareable across tokio tasks (`Send + Sync`);
/// they are held as `Arc<dyn ModelClient>` and may serve several workers
/// concurrently.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send the full message slice and return the assistant's reply.
    ///
    /// The slice is complete per call — system directive first, then the
    /// conversation window. Implementations must not assume any state
    /// carried over from previous calls.
    async fn complete(&self, messages: &[Message]) -> Result<Message, ModelClientError>;

    /// Identifier of the underlying model (e.g. `"gpt-4o-mini"`).
    fn model_name(&self) -> &str;

    /// Token usage reported for the most recent [`complete`](ModelClient::complete)
    /// call. Default returns `None`; backends that track usage override this.
    fn last_usage(&self) -> Option<TokenUsage> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructor() {
        let msg = Message::new(Role::User, "hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
    }

    #[test]
    fn test_error_display() {
        let err = ModelClientError::Authentication("invalid key".into());
        assert_eq!(err.to_string(), "Model authentication failed: invalid key");

        let err = ModelClientError::Api {
            status: 500,
            message: "internal".into(),
        };
        assert_eq!(err.to_string(), "Model API error (status 500): internal");
    }
}
