use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;

use workforce::event::{EventHandler, WorkerEvent};
use workforce::model_client::{Message, ModelClient, ModelClientError, Role, TokenUsage};
use workforce::tool::{
    ToolBackend, ToolError, ToolMetadata, ToolParameter, ToolParameterType, ToolPayload, ToolRef,
};
use workforce::worker::{Worker, WorkerError};

struct EchoClient {
    response: String,
}

impl EchoClient {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl ModelClient for EchoClient {
    async fn complete(&self, _messages: &[Message]) -> Result<Message, ModelClientError> {
        Ok(Message::new(Role::Assistant, self.response.clone()))
    }

    fn model_name(&self) -> &str {
        "echo-mock"
    }
}

/// Looks up nothing: echoes the query back with a recognizable prefix so
/// tests can assert the feedback that reaches the model.
struct LookupBackend;

#[async_trait]
impl ToolBackend for LookupBackend {
    async fn invoke(&self, arguments: Value) -> Result<ToolPayload, ToolError> {
        let query = arguments
            .get("query")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        Ok(ToolPayload::Text {
            text: format!("FACTS: {}", query),
        })
    }
}

fn lookup_tool() -> ToolRef {
    ToolRef::new(
        ToolMetadata::new("lookup", "Look up facts about a topic.").with_parameter(
            ToolParameter::new("query", ToolParameterType::String)
                .with_description("Topic to look up")
                .required(),
        ),
        Arc::new(LookupBackend),
    )
}

#[tokio::test]
async fn test_execute_without_tools_returns_model_text() {
    let mut worker = Worker::new("writer", "Writer", Arc::new(EchoClient::new("plain answer")));
    let contribution = worker.execute("sub-1", "Write something").await.unwrap();

    assert_eq!(contribution.text, "plain answer");
    assert_eq!(contribution.worker_id, "writer");
    assert_eq!(contribution.subtask_id, "sub-1");
    assert!(contribution.tool_calls.is_empty());
    assert!(contribution.tokens_used.is_none());
    // One user message plus one assistant reply.
    assert_eq!(worker.memory_len(), 2);
}

#[tokio::test]
async fn test_tool_descriptions_appended_to_prompt() {
    struct PromptCheckingClient;

    #[async_trait]
    impl ModelClient for PromptCheckingClient {
        async fn complete(&self, messages: &[Message]) -> Result<Message, ModelClientError> {
            let prompt = &messages.last().unwrap().content;
            if !prompt.contains("You have access to the following tools:") {
                panic!("prompt missing tool preamble: {}", prompt);
            }
            if !prompt.contains("- lookup: Look up facts about a topic.") {
                panic!("prompt missing tool description: {}", prompt);
            }
            if !prompt.contains("query (String): Topic to look up") {
                panic!("prompt missing parameter description: {}", prompt);
            }
            if !prompt.contains("{\"tool_call\": {\"name\": \"tool_name\", \"arguments\": {...}}}")
            {
                panic!("prompt missing tool call format: {}", prompt);
            }
            Ok(Message::new(Role::Assistant, "no tool needed"))
        }

        fn model_name(&self) -> &str {
            "prompt-checker"
        }
    }

    let mut worker =
        Worker::new("writer", "Writer", Arc::new(PromptCheckingClient)).with_tool(lookup_tool());
    let contribution = worker.execute("sub-1", "Write something").await.unwrap();
    assert_eq!(contribution.text, "no tool needed");
}

#[tokio::test]
async fn test_persona_sent_as_system_message() {
    struct PersonaCheckingClient;

    #[async_trait]
    impl ModelClient for PersonaCheckingClient {
        async fn complete(&self, messages: &[Message]) -> Result<Message, ModelClientError> {
            let first = messages.first().unwrap();
            assert!(matches!(first.role, Role::System));
            if first.content != "You are Naming Specialist.\nYou invent short, evocative names." {
                panic!("unexpected system message: {}", first.content);
            }
            Ok(Message::new(Role::Assistant, "The Curd Quarter"))
        }

        fn model_name(&self) -> &str {
            "persona-checker"
        }
    }

    let mut worker = Worker::new("namer", "Naming Specialist", Arc::new(PersonaCheckingClient))
        .with_persona("You invent short, evocative names.");
    let contribution = worker.execute("sub-1", "Name the district").await.unwrap();
    assert_eq!(contribution.text, "The Curd Quarter");
}

#[tokio::test]
async fn test_tool_loop_invokes_and_feeds_result_back() {
    struct ScriptedClient {
        call_count: Arc<TokioMutex<usize>>,
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn complete(&self, messages: &[Message]) -> Result<Message, ModelClientError> {
            let mut count = self.call_count.lock().await;
            *count += 1;
            match *count {
                1 => Ok(Message::new(
                    Role::Assistant,
                    r#"I'll check. {"tool_call": {"name": "lookup", "arguments": {"query": "cheese markets"}}}"#,
                )),
                2 => {
                    let feedback = &messages.last().unwrap().content;
                    if !feedback
                        .contains("Tool 'lookup' executed successfully. Result: FACTS: cheese markets")
                    {
                        panic!("unexpected tool feedback: {}", feedback);
                    }
                    Ok(Message::new(Role::Assistant, "Cheese markets are thriving."))
                }
                n => panic!("unexpected model call #{}", n),
            }
        }

        fn model_name(&self) -> &str {
            "scripted-mock"
        }
    }

    let mut worker = Worker::new(
        "researcher",
        "Researcher",
        Arc::new(ScriptedClient {
            call_count: Arc::new(TokioMutex::new(0)),
        }),
    )
    .with_tool(lookup_tool());

    let contribution = worker.execute("sub-1", "Research cheese markets").await.unwrap();

    assert_eq!(contribution.text, "Cheese markets are thriving.");
    assert_eq!(contribution.tool_calls.len(), 1);
    let record = &contribution.tool_calls[0];
    assert_eq!(record.tool_name, "lookup");
    assert!(record.ok);
    assert_eq!(record.arguments["query"], "cheese markets");
    assert!(record.summary.contains("FACTS: cheese markets"));
    // Prompt, tool call, tool feedback, final answer.
    assert_eq!(worker.memory_len(), 4);
}

#[tokio::test]
async fn test_failed_tool_feeds_error_back_instead_of_escalating() {
    struct BrokenBackend;

    #[async_trait]
    impl ToolBackend for BrokenBackend {
        async fn invoke(&self, _arguments: Value) -> Result<ToolPayload, ToolError> {
            Err(ToolError::Unavailable("backend offline".to_string()))
        }
    }

    struct RecoveringClient {
        call_count: Arc<TokioMutex<usize>>,
    }

    #[async_trait]
    impl ModelClient for RecoveringClient {
        async fn complete(&self, messages: &[Message]) -> Result<Message, ModelClientError> {
            let mut count = self.call_count.lock().await;
            *count += 1;
            match *count {
                1 => Ok(Message::new(
                    Role::Assistant,
                    r#"{"tool_call": {"name": "lookup", "arguments": {"query": "x"}}}"#,
                )),
                2 => {
                    let feedback = &messages.last().unwrap().content;
                    if !feedback.contains("Tool 'lookup' failed. Error: Tool unavailable: backend offline") {
                        panic!("unexpected failure feedback: {}", feedback);
                    }
                    Ok(Message::new(
                        Role::Assistant,
                        "Proceeding without the lookup.",
                    ))
                }
                n => panic!("unexpected model call #{}", n),
            }
        }

        fn model_name(&self) -> &str {
            "recovering-mock"
        }
    }

    let tool = ToolRef::new(
        ToolMetadata::new("lookup", "Look up facts."),
        Arc::new(BrokenBackend),
    );
    let mut worker = Worker::new(
        "researcher",
        "Researcher",
        Arc::new(RecoveringClient {
            call_count: Arc::new(TokioMutex::new(0)),
        }),
    )
    .with_tool(tool);

    let contribution = worker.execute("sub-1", "Research").await.unwrap();
    assert_eq!(contribution.text, "Proceeding without the lookup.");
    assert_eq!(contribution.tool_calls.len(), 1);
    assert!(!contribution.tool_calls[0].ok);
}

#[tokio::test]
async fn test_unknown_tool_escalates() {
    let mut worker = Worker::new(
        "writer",
        "Writer",
        Arc::new(EchoClient::new(
            r#"{"tool_call": {"name": "missing_tool", "arguments": {}}}"#,
        )),
    );

    let err = worker.execute("sub-1", "Do something").await.unwrap_err();
    match err {
        WorkerError::ToolUnavailable(name) => assert_eq!(name, "missing_tool"),
        other => panic!("expected ToolUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_tool_authentication_escalates() {
    struct RejectedBackend;

    #[async_trait]
    impl ToolBackend for RejectedBackend {
        async fn invoke(&self, _arguments: Value) -> Result<ToolPayload, ToolError> {
            Err(ToolError::Authentication("key revoked".to_string()))
        }
    }

    let tool = ToolRef::new(
        ToolMetadata::new("lookup", "Look up facts."),
        Arc::new(RejectedBackend),
    );
    let mut worker = Worker::new(
        "researcher",
        "Researcher",
        Arc::new(EchoClient::new(
            r#"{"tool_call": {"name": "lookup", "arguments": {"query": "x"}}}"#,
        )),
    )
    .with_tool(tool);

    let err = worker.execute("sub-1", "Research").await.unwrap_err();
    match err {
        WorkerError::Authentication(msg) => assert!(msg.contains("key revoked")),
        other => panic!("expected Authentication, got {:?}", other),
    }
}

#[tokio::test]
async fn test_model_authentication_escalates() {
    struct BadKeyClient;

    #[async_trait]
    impl ModelClient for BadKeyClient {
        async fn complete(&self, _messages: &[Message]) -> Result<Message, ModelClientError> {
            Err(ModelClientError::Authentication("invalid key".to_string()))
        }

        fn model_name(&self) -> &str {
            "bad-key-mock"
        }
    }

    let mut worker = Worker::new("writer", "Writer", Arc::new(BadKeyClient));
    let err = worker.execute("sub-1", "Write").await.unwrap_err();
    match err {
        WorkerError::Authentication(msg) => assert_eq!(msg, "invalid key"),
        other => panic!("expected Authentication, got {:?}", other),
    }
}

#[tokio::test]
async fn test_model_request_failure_escalates() {
    struct OfflineClient;

    #[async_trait]
    impl ModelClient for OfflineClient {
        async fn complete(&self, _messages: &[Message]) -> Result<Message, ModelClientError> {
            Err(ModelClientError::Request("connection reset".to_string()))
        }

        fn model_name(&self) -> &str {
            "offline-mock"
        }
    }

    let mut worker = Worker::new("writer", "Writer", Arc::new(OfflineClient));
    let err = worker.execute("sub-1", "Write").await.unwrap_err();
    match err {
        WorkerError::ModelInvocation(msg) => assert!(msg.contains("connection reset")),
        other => panic!("expected ModelInvocation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_tool_loop_stops_at_iteration_cap() {
    // Always answers with another tool call; the loop must stop on its own.
    let mut worker = Worker::new(
        "researcher",
        "Researcher",
        Arc::new(EchoClient::new(
            r#"{"tool_call": {"name": "lookup", "arguments": {"query": "again"}}}"#,
        )),
    )
    .with_tool(lookup_tool())
    .with_memory_window(50);

    let contribution = worker.execute("sub-1", "Research").await.unwrap();
    assert!(
        contribution
            .text
            .ends_with("[Warning: Maximum tool iterations reached]"),
        "unexpected final text: {}",
        contribution.text
    );
    assert_eq!(contribution.tool_calls.len(), 5);
}

#[tokio::test]
async fn test_memory_window_evicts_across_executions() {
    let mut worker =
        Worker::new("writer", "Writer", Arc::new(EchoClient::new("ok"))).with_memory_window(3);

    worker.execute("sub-1", "first").await.unwrap();
    worker.execute("sub-2", "second").await.unwrap();

    // Four messages were pushed; the window keeps the three newest.
    assert_eq!(worker.memory_len(), 3);
}

#[tokio::test]
async fn test_token_usage_aggregated_across_model_calls() {
    struct UsageClient {
        call_count: Arc<TokioMutex<usize>>,
    }

    #[async_trait]
    impl ModelClient for UsageClient {
        async fn complete(&self, _messages: &[Message]) -> Result<Message, ModelClientError> {
            let mut count = self.call_count.lock().await;
            *count += 1;
            match *count {
                1 => Ok(Message::new(
                    Role::Assistant,
                    r#"{"tool_call": {"name": "lookup", "arguments": {"query": "x"}}}"#,
                )),
                _ => Ok(Message::new(Role::Assistant, "final")),
            }
        }

        fn model_name(&self) -> &str {
            "usage-mock"
        }

        fn last_usage(&self) -> Option<TokenUsage> {
            Some(TokenUsage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            })
        }
    }

    let mut worker = Worker::new(
        "researcher",
        "Researcher",
        Arc::new(UsageClient {
            call_count: Arc::new(TokioMutex::new(0)),
        }),
    )
    .with_tool(lookup_tool());

    let contribution = worker.execute("sub-1", "Research").await.unwrap();
    assert_eq!(
        contribution.tokens_used,
        Some(TokenUsage {
            input_tokens: 20,
            output_tokens: 10,
            total_tokens: 30,
        })
    );
}

#[tokio::test]
async fn test_events_emitted_in_order_during_tool_loop() {
    struct EventLog {
        labels: TokioMutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl EventHandler for EventLog {
        async fn on_worker_event(&self, event: &WorkerEvent) {
            let label = match event {
                WorkerEvent::ExecuteStarted { .. } => "execute-started",
                WorkerEvent::ModelCallStarted { .. } => "model-started",
                WorkerEvent::ModelCallCompleted { .. } => "model-completed",
                WorkerEvent::ToolCallDetected { .. } => "tool-detected",
                WorkerEvent::ToolInvocationCompleted { .. } => "tool-completed",
                WorkerEvent::ToolLoopLimitReached { .. } => "loop-limit",
                WorkerEvent::ExecuteCompleted { .. } => "execute-completed",
            };
            self.labels.lock().await.push(label);
        }
    }

    struct ScriptedClient {
        call_count: Arc<TokioMutex<usize>>,
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn complete(&self, _messages: &[Message]) -> Result<Message, ModelClientError> {
            let mut count = self.call_count.lock().await;
            *count += 1;
            if *count == 1 {
                Ok(Message::new(
                    Role::Assistant,
                    r#"{"tool_call": {"name": "lookup", "arguments": {"query": "x"}}}"#,
                ))
            } else {
                Ok(Message::new(Role::Assistant, "done"))
            }
        }

        fn model_name(&self) -> &str {
            "scripted-mock"
        }
    }

    let log = Arc::new(EventLog {
        labels: TokioMutex::new(Vec::new()),
    });
    let mut worker = Worker::new(
        "researcher",
        "Researcher",
        Arc::new(ScriptedClient {
            call_count: Arc::new(TokioMutex::new(0)),
        }),
    )
    .with_tool(lookup_tool())
    .with_event_handler(log.clone());

    worker.execute("sub-1", "Research").await.unwrap();

    let labels = log.labels.lock().await.clone();
    assert_eq!(
        labels,
        vec![
            "execute-started",
            "model-started",
            "model-completed",
            "tool-detected",
            "tool-completed",
            "model-started",
            "model-completed",
            "execute-completed",
        ]
    );
}
