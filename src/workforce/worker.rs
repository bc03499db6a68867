//! Worker System
//!
//! This module provides the core [`Worker`] struct: a model-backed
//! specialist with identity, declared capabilities, optional tool access,
//! bounded conversation memory, and real-time event observability.
//!
//! Workers are the building blocks of a
//! [`Workforce`](crate::workforce::orchestrator::Workforce) and can be used:
//! - Standalone, by calling [`execute`](Worker::execute) directly
//! - Registered in a workforce, where the scheduler routes subtasks to them
//!   by capability
//!
//! # Core Components
//!
//! - **Worker**: identity, capability set, persona, and bounded memory
//! - **Tool Access**: tools attached as [`ToolRef`]s and invoked through a
//!   [`ToolInvoker`] with timeout and retry handling
//! - **Memory**: a FIFO window of the most recent conversation messages;
//!   the oldest message is evicted once the window is full
//! - **EventHandler**: optional callback for observing model calls and
//!   tool usage as they happen
//!
//! # Example
//!
//! ```rust,no_run
//! use workforce::capability::CapabilityTag;
//! use workforce::clients::openai::OpenAiClient;
//! use workforce::worker::Worker;
//! use std::sync::Arc;
//!
//! let worker = Worker::new(
//!     "writer",
//!     "Content Writer",
//!     Arc::new(OpenAiClient::new("key", "gpt-4o-mini")),
//! )
//! .with_capability(CapabilityTag::TextSynthesis)
//! .with_persona("You write vivid, concise marketing copy.");
//! ```

use crate::workforce::capability::CapabilityTag;
use crate::workforce::event::{EventHandler, WorkerEvent};
use crate::workforce::invocation::{InvocationPolicy, ToolCallRecord, ToolInvoker};
use crate::workforce::model_client::{Message, ModelClient, ModelClientError, Role, TokenUsage};
use crate::workforce::tool::{ToolError, ToolRef};
use chrono::{DateTime, Utc};
use std::collections::{HashSet, VecDeque};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Default conversation window: a worker keeps this many recent messages.
pub const DEFAULT_MEMORY_WINDOW: usize = 10;

/// Cap on tool round-trips within a single `execute()` call.
pub(crate) const MAX_TOOL_ITERATIONS: usize = 5;

const PREVIEW_CHARS: usize = 120;

/// Internal representation of a parsed tool call extracted from a model
/// response.
///
/// `parse_tool_call()` scans model output for a JSON fragment matching
/// `{"tool_call": {"name": "...", "arguments": {...}}}` and returns this
/// struct. Only the first tool call in a response is extracted.
#[derive(Debug, Clone)]
struct ParsedToolCall {
    name: String,
    arguments: serde_json::Value,
}

/// What a worker produced for one subtask.
#[derive(Debug, Clone)]
pub struct Contribution {
    /// Id of the worker that produced this contribution.
    pub worker_id: String,
    /// Id of the subtask it answers.
    pub subtask_id: String,
    /// Final text produced across tool iterations.
    pub text: String,
    /// Audit trail of every tool call made during execution, in order.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Token usage aggregated across all model calls, if reported.
    pub tokens_used: Option<TokenUsage>,
    /// When the contribution was finalized.
    pub created_at: DateTime<Utc>,
}

/// Failure modes of [`Worker::execute`].
///
/// These are the failures a worker cannot recover from on its own. Tool
/// failures that survive retry are fed back to the model as text rather
/// than surfacing here, with two exceptions: a tool the worker does not
/// hold, and a rejected credential.
#[derive(Debug, Clone)]
pub enum WorkerError {
    /// The model backend failed and no contribution was produced.
    ModelInvocation(String),
    /// The model requested a tool that is not attached to this worker.
    ToolUnavailable(String),
    /// A credential was rejected by the model backend or a tool backend.
    Authentication(String),
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::ModelInvocation(msg) => write!(f, "Model invocation failed: {}", msg),
            WorkerError::ToolUnavailable(name) => write!(f, "Tool not found: {}", name),
            WorkerError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
        }
    }
}

impl Error for WorkerError {}

/// Immutable routing snapshot of a worker, taken at registration time.
///
/// The scheduler routes against profiles so it never has to lock a live
/// worker just to inspect its capability set.
#[derive(Debug, Clone)]
pub struct WorkerProfile {
    /// Stable identifier.
    pub id: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Capabilities this worker covers.
    pub capabilities: HashSet<CapabilityTag>,
    /// Names of the tools attached to this worker.
    pub tool_names: Vec<String>,
}

impl WorkerProfile {
    /// Whether this worker covers every tag in `required`.
    pub fn covers(&self, required: &[CapabilityTag]) -> bool {
        required.iter().all(|tag| self.capabilities.contains(tag))
    }
}

/// Bounded FIFO conversation window.
///
/// Holds user and assistant messages only; the persona directive is
/// assembled fresh on every model call and never counts against the window.
#[derive(Debug, Clone)]
struct WorkerMemory {
    window: usize,
    messages: VecDeque<Message>,
}

impl WorkerMemory {
    fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            messages: VecDeque::new(),
        }
    }

    fn push(&mut self, message: Message) {
        self.messages.push_back(message);
        while self.messages.len() > self.window {
            self.messages.pop_front();
        }
    }

    fn len(&self) -> usize {
        self.messages.len()
    }

    fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Pop trailing user messages so the window ends at the last
    /// assistant reply (or is empty).
    fn truncate_unanswered(&mut self) {
        while self.messages.back().map_or(false, |m| m.role == Role::User) {
            self.messages.pop_back();
        }
    }
}

/// A model-backed specialist with capabilities, tools, persona, and
/// bounded memory.
pub struct Worker {
    /// Stable identifier referenced by the registry and in events.
    pub id: String,
    /// Human-readable display name for logging and events.
    pub display_name: String,

    capabilities: HashSet<CapabilityTag>,
    tools: Vec<ToolRef>,
    persona: Option<String>,
    memory: WorkerMemory,
    model: Arc<dyn ModelClient>,
    invoker: ToolInvoker,

    /// Optional event handler for real-time observability. When set, the
    /// worker emits [`WorkerEvent`]s during `execute()`.
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl Worker {
    /// Create a worker with the mandatory identity information.
    ///
    /// Starts with no capabilities, no tools, no persona, the default
    /// memory window, and the default [`InvocationPolicy`].
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        model: Arc<dyn ModelClient>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            capabilities: HashSet::new(),
            tools: Vec::new(),
            persona: None,
            memory: WorkerMemory::new(DEFAULT_MEMORY_WINDOW),
            model,
            invoker: ToolInvoker::default(),
            event_handler: None,
        }
    }

    /// Declare a capability this worker covers.
    pub fn with_capability(mut self, tag: CapabilityTag) -> Self {
        self.capabilities.insert(tag);
        self
    }

    /// Attach a tool the model may call during execution.
    pub fn with_tool(mut self, tool: ToolRef) -> Self {
        self.tools.push(tool);
        self
    }

    /// Attach a persona directive, sent as the system message on every
    /// model call.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Override the default conversation window.
    ///
    /// Resets the memory; the worker starts with an empty window of the
    /// new size. A window of zero is treated as one.
    pub fn with_memory_window(mut self, window: usize) -> Self {
        self.memory = WorkerMemory::new(window);
        self
    }

    /// Override the default tool invocation policy.
    pub fn with_invocation_policy(mut self, policy: InvocationPolicy) -> Self {
        self.invoker = ToolInvoker::new(policy);
        self
    }

    /// Attach an [`EventHandler`] that will receive [`WorkerEvent`]s
    /// (builder pattern).
    ///
    /// When this worker is added to a
    /// [`Workforce`](crate::workforce::orchestrator::Workforce) via
    /// `add_worker()`, the workforce's handler (if any) will override this one.
    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Set or replace the event handler at runtime.
    ///
    /// Unlike [`with_event_handler`](Worker::with_event_handler) (which
    /// consumes `self` in the builder chain), this takes `&mut self` so the
    /// handler can be attached to a live worker. Used internally by
    /// [`Workforce::add_worker`](crate::workforce::orchestrator::Workforce::add_worker)
    /// to propagate the workforce's handler to each worker.
    pub fn set_event_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.event_handler = Some(handler);
    }

    /// Capabilities this worker covers.
    pub fn capabilities(&self) -> &HashSet<CapabilityTag> {
        &self.capabilities
    }

    /// Names of the tools attached to this worker.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Snapshot this worker's identity and capability set for routing.
    pub fn profile(&self) -> WorkerProfile {
        WorkerProfile {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            capabilities: self.capabilities.clone(),
            tool_names: self.tool_names(),
        }
    }

    /// Number of messages currently held in the conversation window.
    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    /// Size of the conversation window.
    pub fn memory_window(&self) -> usize {
        self.memory.window
    }

    /// Drop trailing user messages that never received an assistant reply.
    ///
    /// An `execute` abandoned mid-flight (its future dropped by a subtask
    /// timeout) can leave the prompt it pushed, or a tool result, as the
    /// last entry in memory. The scheduler calls this after a timeout so
    /// the next subtask routed to this worker starts from the last
    /// completed exchange. Callers driving [`execute`](Worker::execute)
    /// under their own timeout should do the same.
    pub fn discard_unanswered_prompts(&mut self) {
        self.memory.truncate_unanswered();
    }

    /// Emit a [`WorkerEvent`] to the registered handler.
    ///
    /// If no handler is registered, this is a no-op.
    async fn emit(&self, event: WorkerEvent) {
        if let Some(handler) = &self.event_handler {
            handler.on_worker_event(&event).await;
        }
    }

    /// Execute one subtask and return the worker's contribution.
    ///
    /// # Tool Loop
    ///
    /// After the initial model call, the method checks whether the response
    /// contains a tool call (`{"tool_call": {"name": "...", "arguments": {...}}}`).
    /// If so, the tool is invoked through the worker's [`ToolInvoker`] (with
    /// its own timeout and bounded retry), the outcome is fed back into the
    /// conversation as a follow-up message, and the model is called again.
    /// This loop runs for up to 5 iterations.
    ///
    /// A failed tool invocation is not an execution failure: the error text
    /// is fed back so the model can adapt. The exceptions are a tool the
    /// worker does not hold ([`WorkerError::ToolUnavailable`]) and a
    /// rejected credential ([`WorkerError::Authentication`]), both of which
    /// escalate immediately.
    ///
    /// # Events Emitted
    ///
    /// The following [`WorkerEvent`]s are emitted during `execute()` (in order):
    /// 1. [`ExecuteStarted`](WorkerEvent::ExecuteStarted) — at entry
    /// 2. [`ModelCallStarted`](WorkerEvent::ModelCallStarted) — before each model call
    /// 3. [`ModelCallCompleted`](WorkerEvent::ModelCallCompleted) — after each model call
    /// 4. [`ToolCallDetected`](WorkerEvent::ToolCallDetected) — when a tool call is parsed
    /// 5. [`ToolInvocationCompleted`](WorkerEvent::ToolInvocationCompleted) — after tool invocation
    /// 6. [`ToolLoopLimitReached`](WorkerEvent::ToolLoopLimitReached) — if the loop cap is hit
    /// 7. [`ExecuteCompleted`](WorkerEvent::ExecuteCompleted) — at exit
    pub async fn execute(
        &mut self,
        subtask_id: &str,
        content: &str,
    ) -> Result<Contribution, WorkerError> {
        self.emit(WorkerEvent::ExecuteStarted {
            worker_id: self.id.clone(),
            worker_name: self.display_name.clone(),
            subtask_id: subtask_id.to_string(),
            content_preview: preview(content),
        })
        .await;

        // Append tool descriptions to the subtask content so the model
        // knows what it can call and how.
        let mut content_with_tools = content.to_string();
        if !self.tools.is_empty() {
            content_with_tools.push_str("\n\nYou have access to the following tools:\n");
            for tool in &self.tools {
                let metadata = tool.metadata();
                content_with_tools
                    .push_str(&format!("- {}: {}\n", metadata.name, metadata.description));
                if !metadata.parameters.is_empty() {
                    content_with_tools.push_str("  Parameters:\n");
                    for param in &metadata.parameters {
                        let description = if param.description.is_empty() {
                            "No description"
                        } else {
                            param.description.as_str()
                        };
                        content_with_tools.push_str(&format!(
                            "    - {} ({:?}): {}\n",
                            param.name, param.param_type, description
                        ));
                    }
                }
            }
            content_with_tools.push_str(
                "\nTo use a tool, respond with a JSON object in the following format:\n\
                 {\"tool_call\": {\"name\": \"tool_name\", \"arguments\": {...}}}\n\
                 After tool execution, I'll provide the result and you can continue.\n",
            );
        }

        self.memory.push(Message::new(Role::User, content_with_tools));

        let mut tool_calls: Vec<ToolCallRecord> = Vec::new();
        let mut tool_iteration = 0usize;
        let mut model_calls = 0usize;
        let mut total_input_tokens = 0usize;
        let mut total_output_tokens = 0usize;
        let mut total_tokens = 0usize;

        let final_text = loop {
            model_calls += 1;
            self.emit(WorkerEvent::ModelCallStarted {
                worker_id: self.id.clone(),
                worker_name: self.display_name.clone(),
                subtask_id: subtask_id.to_string(),
                iteration: model_calls,
            })
            .await;

            let messages = self.assemble_messages();
            let reply = self.model.complete(&messages).await.map_err(|e| match e {
                ModelClientError::Authentication(msg) => WorkerError::Authentication(msg),
                other => WorkerError::ModelInvocation(other.to_string()),
            })?;

            if let Some(usage) = self.model.last_usage() {
                total_input_tokens += usage.input_tokens;
                total_output_tokens += usage.output_tokens;
                total_tokens += usage.total_tokens;
            }

            let current_response = reply.content.clone();
            self.memory.push(Message::new(Role::Assistant, reply.content));

            self.emit(WorkerEvent::ModelCallCompleted {
                worker_id: self.id.clone(),
                worker_name: self.display_name.clone(),
                subtask_id: subtask_id.to_string(),
                iteration: model_calls,
                tokens_used: usage_snapshot(total_input_tokens, total_output_tokens, total_tokens),
                response_length: current_response.len(),
            })
            .await;

            let tool_call = match parse_tool_call(&current_response) {
                Some(call) => call,
                None => break current_response,
            };

            if tool_iteration >= MAX_TOOL_ITERATIONS {
                self.emit(WorkerEvent::ToolLoopLimitReached {
                    worker_id: self.id.clone(),
                    worker_name: self.display_name.clone(),
                    subtask_id: subtask_id.to_string(),
                })
                .await;
                break format!(
                    "{}\n\n[Warning: Maximum tool iterations reached]",
                    current_response
                );
            }
            tool_iteration += 1;

            self.emit(WorkerEvent::ToolCallDetected {
                worker_id: self.id.clone(),
                worker_name: self.display_name.clone(),
                subtask_id: subtask_id.to_string(),
                tool_name: tool_call.name.clone(),
                arguments: tool_call.arguments.clone(),
                iteration: tool_iteration,
            })
            .await;

            let tool = match self.tools.iter().find(|t| t.name() == tool_call.name) {
                Some(tool) => tool.clone(),
                None => return Err(WorkerError::ToolUnavailable(tool_call.name)),
            };

            let result = self.invoker.invoke(&tool, tool_call.arguments.clone()).await;

            // A rejected credential will not improve on re-prompting.
            if let Some(ToolError::Authentication(msg)) = &result.error {
                return Err(WorkerError::Authentication(msg.clone()));
            }

            let feedback = match (&result.payload, &result.error) {
                (Some(payload), _) => format!(
                    "Tool '{}' executed successfully. Result: {}",
                    tool_call.name,
                    payload.as_feedback()
                ),
                (None, Some(error)) => {
                    format!("Tool '{}' failed. Error: {}", tool_call.name, error)
                }
                (None, None) => format!("Tool '{}' returned nothing.", tool_call.name),
            };

            tool_calls.push(ToolCallRecord {
                tool_name: tool_call.name.clone(),
                arguments: tool_call.arguments.clone(),
                ok: result.ok,
                summary: match (&result.payload, &result.error) {
                    (Some(payload), _) => preview(&payload.as_feedback()),
                    (None, Some(error)) => error.to_string(),
                    (None, None) => String::new(),
                },
            });

            self.emit(WorkerEvent::ToolInvocationCompleted {
                worker_id: self.id.clone(),
                worker_name: self.display_name.clone(),
                subtask_id: subtask_id.to_string(),
                tool_name: tool_call.name.clone(),
                ok: result.ok,
                attempts: result.attempts,
                error: result.error.as_ref().map(|e| e.to_string()),
                iteration: tool_iteration,
            })
            .await;

            self.memory.push(Message::new(Role::User, feedback));
        };

        self.emit(WorkerEvent::ExecuteCompleted {
            worker_id: self.id.clone(),
            worker_name: self.display_name.clone(),
            subtask_id: subtask_id.to_string(),
            tokens_used: usage_snapshot(total_input_tokens, total_output_tokens, total_tokens),
            tool_calls_made: tool_iteration,
            response_length: final_text.len(),
        })
        .await;

        Ok(Contribution {
            worker_id: self.id.clone(),
            subtask_id: subtask_id.to_string(),
            text: final_text,
            tool_calls,
            tokens_used: usage_snapshot(total_input_tokens, total_output_tokens, total_tokens),
            created_at: Utc::now(),
        })
    }

    /// Build the message slice for one model call: persona directive first
    /// (when set), then the conversation window.
    fn assemble_messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.memory.len() + 1);
        if let Some(persona) = &self.persona {
            messages.push(Message::new(
                Role::System,
                format!("You are {}.\n{}", self.display_name, persona),
            ));
        }
        messages.extend(self.memory.iter().cloned());
        messages
    }
}

/// First ~120 characters of `text`, on a char boundary.
fn preview(text: &str) -> String {
    let end = text
        .char_indices()
        .nth(PREVIEW_CHARS)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].to_string()
}

fn usage_snapshot(input: usize, output: usize, total: usize) -> Option<TokenUsage> {
    if total > 0 {
        Some(TokenUsage {
            input_tokens: input,
            output_tokens: output,
            total_tokens: total,
        })
    } else {
        None
    }
}

/// Parse a tool call from a model response.
///
/// Scans the response text for a JSON fragment matching the pattern:
/// ```json
/// {"tool_call": {"name": "tool_name", "arguments": {...}}}
/// ```
///
/// Uses brace-counting to find the matching closing `}` rather than parsing
/// the entire response as JSON. This handles the common case where the
/// model wraps the tool call in surrounding prose. Only the *first* tool
/// call in the response is extracted.
fn parse_tool_call(response: &str) -> Option<ParsedToolCall> {
    let start_idx = response.find("{\"tool_call\"")?;

    let mut brace_count = 0i32;
    let mut end_idx = start_idx;
    for (i, ch) in response[start_idx..].char_indices() {
        if ch == '{' {
            brace_count += 1;
        } else if ch == '}' {
            brace_count -= 1;
            if brace_count == 0 {
                end_idx = start_idx + i + ch.len_utf8();
                break;
            }
        }
    }

    if end_idx <= start_idx {
        return None;
    }

    let parsed: serde_json::Value = serde_json::from_str(&response[start_idx..end_idx]).ok()?;
    let call = parsed.get("tool_call")?;
    let name = call.get("name")?.as_str()?;
    let arguments = call.get("arguments")?.clone();
    Some(ParsedToolCall {
        name: name.to_string(),
        arguments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NullClient;

    #[async_trait]
    impl ModelClient for NullClient {
        async fn complete(&self, _messages: &[Message]) -> Result<Message, ModelClientError> {
            Ok(Message::new(Role::Assistant, "ok"))
        }

        fn model_name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_worker_creation() {
        let worker = Worker::new("writer", "Content Writer", Arc::new(NullClient));
        assert_eq!(worker.id, "writer");
        assert_eq!(worker.display_name, "Content Writer");
        assert!(worker.capabilities().is_empty());
        assert_eq!(worker.memory_window(), DEFAULT_MEMORY_WINDOW);
    }

    #[test]
    fn test_worker_builder_pattern() {
        let worker = Worker::new("writer", "Content Writer", Arc::new(NullClient))
            .with_capability(CapabilityTag::TextSynthesis)
            .with_capability(CapabilityTag::NameGeneration)
            .with_persona("You write vivid copy.")
            .with_memory_window(4);

        assert!(worker.capabilities().contains(&CapabilityTag::TextSynthesis));
        assert!(worker.capabilities().contains(&CapabilityTag::NameGeneration));
        assert_eq!(worker.memory_window(), 4);

        let profile = worker.profile();
        assert!(profile.covers(&[CapabilityTag::TextSynthesis]));
        assert!(!profile.covers(&[CapabilityTag::WebLookup]));
    }

    #[test]
    fn test_memory_evicts_oldest_first() {
        let mut memory = WorkerMemory::new(3);
        for i in 0..5 {
            memory.push(Message::new(Role::User, format!("m{}", i)));
        }
        assert_eq!(memory.len(), 3);
        let contents: Vec<&str> = memory.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_memory_truncate_unanswered_drops_user_tail() {
        let mut memory = WorkerMemory::new(5);
        memory.push(Message::new(Role::User, "q1"));
        memory.push(Message::new(Role::Assistant, "a1"));
        memory.push(Message::new(Role::User, "dangling"));

        memory.truncate_unanswered();
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.iter().last().map(|m| m.role), Some(Role::Assistant));

        // No-op on a window that already ends with a reply.
        memory.truncate_unanswered();
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_parse_tool_call_surrounded_by_prose() {
        let response = r#"Let me look that up.
{"tool_call": {"name": "web_search", "arguments": {"query": "rust"}}}
I'll wait for the result."#;
        let call = parse_tool_call(response).unwrap();
        assert_eq!(call.name, "web_search");
        assert_eq!(call.arguments["query"], "rust");
    }

    #[test]
    fn test_parse_tool_call_requires_arguments() {
        let response = r#"{"tool_call": {"name": "web_search"}}"#;
        assert!(parse_tool_call(response).is_none());
    }

    #[test]
    fn test_parse_tool_call_nested_braces() {
        let response =
            r#"{"tool_call": {"name": "t", "arguments": {"a": {"b": 1}, "c": "x"}}} trailing"#;
        let call = parse_tool_call(response).unwrap();
        assert_eq!(call.arguments["a"]["b"], 1);
    }

    #[test]
    fn test_parse_tool_call_first_only() {
        let response = r#"{"tool_call": {"name": "one", "arguments": {}}}
{"tool_call": {"name": "two", "arguments": {}}}"#;
        let call = parse_tool_call(response).unwrap();
        assert_eq!(call.name, "one");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let short = preview("hello");
        assert_eq!(short, "hello");

        let long: String = "é".repeat(200);
        let cut = preview(&long);
        assert_eq!(cut.chars().count(), PREVIEW_CHARS);
    }
}
