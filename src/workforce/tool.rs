//! Tool contract: metadata, payloads, errors, and the backend trait.
//!
//! A tool is described by [`ToolMetadata`] (name, description, typed
//! parameters) and executed through a [`ToolBackend`]. Workers never talk
//! to a backend directly; they go through
//! [`ToolInvoker`](crate::workforce::invocation::ToolInvoker), which adds
//! timeout and retry handling and folds the outcome into a [`ToolResult`].
//!
//! Payloads are deliberately small: a tool either produced text or it
//! produced a media artifact addressed by location. Anything richer is
//! encoded in the text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Type tag for a declared tool parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolParameterType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub param_type: ToolParameterType,
    pub description: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, param_type: ToolParameterType) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: String::new(),
            required: false,
            default: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Describes a tool to both the router and the model prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    /// Unique name the model uses to call the tool.
    pub name: String,
    /// Human-readable description included in the tool prompt.
    pub description: String,
    /// Declared parameters, in prompt order.
    pub parameters: Vec<ToolParameter>,
}

impl ToolMetadata {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// What a successful tool invocation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolPayload {
    /// Free-form text, fed back to the model verbatim.
    Text { text: String },
    /// A media artifact addressed by URL or filesystem path.
    Media { location: String },
}

impl ToolPayload {
    /// Render the payload as the text fed back into the conversation.
    pub fn as_feedback(&self) -> String {
        match self {
            ToolPayload::Text { text } => text.clone(),
            ToolPayload::Media { location } => location.clone(),
        }
    }
}

/// Why a tool invocation failed.
///
/// The transient variants (`Timeout`, `Network`, `RateLimited`) are eligible
/// for retry; the rest fail the invocation on the first attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolError {
    /// The backend did not answer within the invocation timeout.
    Timeout,
    /// The backend was unreachable or the connection dropped mid-call.
    Network(String),
    /// The backend shed load (HTTP 429 or equivalent).
    RateLimited,
    /// The backend answered but could not serve the request.
    Unavailable(String),
    /// The supplied arguments did not match the tool's declared parameters.
    InvalidArguments(String),
    /// The backend rejected the credential. Never retried, and escalated
    /// by the worker rather than fed back to the model.
    Authentication(String),
}

impl ToolError {
    /// Whether a retry could plausibly change the outcome.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ToolError::Timeout | ToolError::Network(_) | ToolError::RateLimited
        )
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Timeout => write!(f, "Tool invocation timed out"),
            ToolError::Network(msg) => write!(f, "Tool network error: {}", msg),
            ToolError::RateLimited => write!(f, "Tool rate limited"),
            ToolError::Unavailable(msg) => write!(f, "Tool unavailable: {}", msg),
            ToolError::InvalidArguments(msg) => write!(f, "Invalid tool arguments: {}", msg),
            ToolError::Authentication(msg) => write!(f, "Tool authentication failed: {}", msg),
        }
    }
}

impl Error for ToolError {}

/// Outcome of a tool invocation after retries are exhausted or a payload
/// was produced.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Whether the invocation ultimately succeeded.
    pub ok: bool,
    /// Payload on success, `None` on failure.
    pub payload: Option<ToolPayload>,
    /// Final error on failure, `None` on success.
    pub error: Option<ToolError>,
    /// How many attempts were made, counting the first.
    pub attempts: u32,
}

impl ToolResult {
    pub fn success(payload: ToolPayload) -> Self {
        Self {
            ok: true,
            payload: Some(payload),
            error: None,
            attempts: 1,
        }
    }

    pub fn failure(error: ToolError) -> Self {
        Self {
            ok: false,
            payload: None,
            error: Some(error),
            attempts: 1,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }
}

/// Trait implemented by every concrete tool.
///
/// Backends receive the raw JSON arguments parsed from the model's tool
/// call and either produce a payload or classify their failure. They must
/// be `Send + Sync`; a single backend instance may be shared by several
/// workers running in parallel.
#[async_trait]
pub trait ToolBackend: Send + Sync {
    async fn invoke(&self, arguments: Value) -> Result<ToolPayload, ToolError>;
}

/// A registered tool: metadata plus a shared handle to its backend.
#[derive(Clone)]
pub struct ToolRef {
    metadata: ToolMetadata,
    backend: Arc<dyn ToolBackend>,
}

impl ToolRef {
    pub fn new(metadata: ToolMetadata, backend: Arc<dyn ToolBackend>) -> Self {
        Self { metadata, backend }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &ToolMetadata {
        &self.metadata
    }

    pub fn backend(&self) -> &Arc<dyn ToolBackend> {
        &self.backend
    }
}

impl fmt::Debug for ToolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRef")
            .field("name", &self.metadata.name)
            .finish()
    }
}
