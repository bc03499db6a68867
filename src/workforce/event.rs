//! Worker and Workforce event system.
//!
//! Provides a callback-based observability layer for workers and task runs.
//! Implement [`EventHandler`] to receive real-time notifications about:
//!
//! - **Model round-trips**: When each worker sends to and receives from its model
//! - **Tool operations**: Tool call detection, invocation outcomes (with attempt
//!   counts), iteration limits
//! - **Worker lifecycle**: Per-subtask execution start and completion
//! - **Task lifecycle**: Run start/end, subtask dispatch, completion, failure,
//!   omission, cancellation
//!
//! # Architecture
//!
//! Events flow through a single [`EventHandler`] trait with two methods:
//! - [`on_worker_event`](EventHandler::on_worker_event) — receives [`WorkerEvent`]s from individual workers
//! - [`on_workforce_event`](EventHandler::on_workforce_event) — receives [`WorkforceEvent`]s from the scheduler
//!
//! Both methods have default no-op implementations, so you only override what
//! you care about. The handler is wrapped in `Arc<dyn EventHandler>` and shared
//! across workers — when registered on a [`Workforce`](crate::workforce::orchestrator::Workforce)
//! via [`with_event_handler`](crate::workforce::orchestrator::Workforce::with_event_handler),
//! it is automatically propagated to every worker added via
//! [`add_worker`](crate::workforce::orchestrator::Workforce::add_worker).
//!
//! # Example
//!
//! ```rust,no_run
//! use workforce::event::{EventHandler, WorkerEvent, WorkforceEvent};
//! use async_trait::async_trait;
//!
//! struct MyHandler;
//!
//! #[async_trait]
//! impl EventHandler for MyHandler {
//!     async fn on_worker_event(&self, event: &WorkerEvent) {
//!         match event {
//!             WorkerEvent::ModelCallStarted { worker_name, iteration, .. } => {
//!                 println!("{} calling model (round {})...", worker_name, iteration);
//!             }
//!             WorkerEvent::ToolInvocationCompleted { tool_name, ok, attempts, .. } => {
//!                 println!("tool {} -> ok={} after {} attempt(s)", tool_name, ok, attempts);
//!             }
//!             _ => {}
//!         }
//!     }
//!     async fn on_workforce_event(&self, event: &WorkforceEvent) {
//!         println!("Workforce: {:?}", event);
//!     }
//! }
//! ```

use crate::workforce::model_client::TokenUsage;
use crate::workforce::task::FailureKind;
use async_trait::async_trait;

/// Events emitted by a [`Worker`](crate::workforce::worker::Worker) while
/// executing one subtask.
///
/// Every variant carries `worker_id` and `worker_name` so handlers can
/// identify the source worker without external state, plus the `subtask_id`
/// being worked on so parallel runs can be demultiplexed.
///
/// # Event Flow (during a typical `execute()` call)
///
/// ```text
/// ExecuteStarted
///   └─ ModelCallStarted { iteration: 1 }
///   └─ ModelCallCompleted { iteration: 1 }
///   └─ (if tool call detected in response)
///       ├─ ToolCallDetected { iteration: 1 }
///       ├─ ToolInvocationCompleted { iteration: 1 }
///       ├─ ModelCallStarted { iteration: 2 }
///       └─ ModelCallCompleted { iteration: 2 }
///   └─ (loop continues until no tool call or max iterations)
/// ExecuteCompleted
/// ```
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    // ── Execution lifecycle ──────────────────────────────────────────────

    /// Fired at the start of [`Worker::execute`](crate::workforce::worker::Worker::execute).
    ExecuteStarted {
        /// Stable identifier of the worker (e.g. `"writer"`).
        worker_id: String,
        /// Human-readable display name (e.g. `"Content Writer"`).
        worker_name: String,
        /// Id of the subtask being executed.
        subtask_id: String,
        /// First ~120 characters of the subtask content, useful for logging.
        content_preview: String,
    },

    /// Fired when `execute()` returns successfully.
    ///
    /// This is the bookend to [`ExecuteStarted`](WorkerEvent::ExecuteStarted).
    /// The `tool_calls_made` field tells you how many tool iterations
    /// occurred within this execution.
    ExecuteCompleted {
        /// Stable identifier of the worker.
        worker_id: String,
        /// Human-readable display name.
        worker_name: String,
        /// Id of the subtask that was executed.
        subtask_id: String,
        /// Token usage summed across every model call in this execution,
        /// or `None` if the backend did not report usage.
        tokens_used: Option<TokenUsage>,
        /// Number of tool calls executed during this execution. Zero means
        /// the model responded without requesting any tools.
        tool_calls_made: usize,
        /// Character length of the final contribution text.
        response_length: usize,
    },

    /// Fired **before** each model round-trip inside the tool loop.
    ///
    /// Iteration 1 is the initial model call. Subsequent iterations are
    /// follow-up calls after tool results have been injected.
    ModelCallStarted {
        /// Stable identifier of the worker.
        worker_id: String,
        /// Human-readable display name.
        worker_name: String,
        /// Id of the subtask being executed.
        subtask_id: String,
        /// 1-based iteration counter (1 = initial call, 2+ = tool follow-ups).
        iteration: usize,
    },

    /// Fired **after** each model round-trip completes.
    ModelCallCompleted {
        /// Stable identifier of the worker.
        worker_id: String,
        /// Human-readable display name.
        worker_name: String,
        /// Id of the subtask being executed.
        subtask_id: String,
        /// 1-based iteration counter matching the corresponding `ModelCallStarted`.
        iteration: usize,
        /// Token usage reported for this call, if the backend tracks it.
        tokens_used: Option<TokenUsage>,
        /// Character length of this specific model response.
        response_length: usize,
    },

    // ── Tool operations ──────────────────────────────────────────────────

    /// A tool call was parsed from the model response.
    ///
    /// Emitted after the worker extracts a
    /// `{"tool_call": {"name": "...", "arguments": {...}}}` JSON fragment
    /// from the model output.
    ToolCallDetected {
        /// Stable identifier of the worker.
        worker_id: String,
        /// Human-readable display name.
        worker_name: String,
        /// Id of the subtask being executed.
        subtask_id: String,
        /// Name of the tool being invoked (e.g. `"web_search"`).
        tool_name: String,
        /// Raw JSON arguments extracted from the model's tool call request.
        arguments: serde_json::Value,
        /// 1-based tool iteration (1 = first tool call in this execution).
        iteration: usize,
    },

    /// A tool invocation finished (success or failure), retries included.
    ///
    /// Emitted after the invoker returns. `attempts` counts every attempt
    /// made, so a transient failure that succeeded on retry reports
    /// `ok: true, attempts: 2`.
    ToolInvocationCompleted {
        /// Stable identifier of the worker.
        worker_id: String,
        /// Human-readable display name.
        worker_name: String,
        /// Id of the subtask being executed.
        subtask_id: String,
        /// Name of the tool that was invoked.
        tool_name: String,
        /// `true` if the invocation ultimately produced a payload.
        ok: bool,
        /// Attempts made, counting the first.
        attempts: u32,
        /// Final error message if the invocation failed, `None` on success.
        error: Option<String>,
        /// 1-based tool iteration matching the corresponding `ToolCallDetected`.
        iteration: usize,
    },

    /// The tool loop hit its iteration cap (currently 5).
    ///
    /// The contribution will include a
    /// `"[Warning: Maximum tool iterations reached]"` suffix. This typically
    /// indicates a model that keeps requesting tool calls in a loop.
    ToolLoopLimitReached {
        /// Stable identifier of the worker.
        worker_id: String,
        /// Human-readable display name.
        worker_name: String,
        /// Id of the subtask being executed.
        subtask_id: String,
    },
}

/// Events emitted by a [`Workforce`](crate::workforce::orchestrator::Workforce)
/// during a [`submit`](crate::workforce::orchestrator::Workforce::submit) call.
///
/// Every variant carries the root `task_id` so concurrent runs against the
/// same workforce can be told apart. These events give coarse-grained
/// progress over the subtask graph, while [`WorkerEvent`]s give fine-grained
/// visibility into each worker's model calls and tool usage.
///
/// # Event Flow (three subtasks, `b` depends on `a`)
///
/// ```text
/// TaskStarted { subtask_count: 3 }
///   ├─ SubtaskDispatched { subtask_id: "a", worker_id: "writer" }
///   ├─ SubtaskDispatched { subtask_id: "c", worker_id: "researcher" }
///   ├─ SubtaskCompleted { subtask_id: "a" }
///   ├─ SubtaskDispatched { subtask_id: "b", worker_id: "writer" }
///   ├─ SubtaskCompleted { subtask_id: "c" }
///   └─ SubtaskCompleted { subtask_id: "b" }
/// TaskCompleted { result_length: 2048 }
/// ```
#[derive(Debug, Clone)]
pub enum WorkforceEvent {
    // ── Run lifecycle ────────────────────────────────────────────────────

    /// The task run has started.
    ///
    /// Emitted once per `submit()` call, before any worker is dispatched.
    TaskStarted {
        /// Id of the root task.
        task_id: String,
        /// Number of declared subtasks (zero for a single-worker task).
        subtask_count: usize,
    },

    /// The task run finished with a merged result.
    TaskCompleted {
        /// Id of the root task.
        task_id: String,
        /// Character length of the merged result.
        result_length: usize,
    },

    /// The task run finished without a usable result.
    TaskFailed {
        /// Id of the root task.
        task_id: String,
        /// Id of the subtask whose failure decided the run, `None` when
        /// the failure belongs to the root itself (e.g. a malformed graph).
        subtask_id: Option<String>,
        /// Coarse failure classification.
        kind: FailureKind,
        /// Human-readable failure message.
        message: String,
    },

    /// The run was cancelled via a
    /// [`CancelHandle`](crate::workforce::orchestrator::CancelHandle).
    TaskCancelled {
        /// Id of the root task.
        task_id: String,
    },

    // ── Subtask lifecycle ────────────────────────────────────────────────

    /// A subtask's dependencies were satisfied and a worker was chosen.
    ///
    /// Routing happens at dispatch time: the first-registered worker whose
    /// capabilities cover the subtask's requirements wins.
    SubtaskDispatched {
        /// Id of the root task.
        task_id: String,
        /// Id of the dispatched subtask.
        subtask_id: String,
        /// Stable identifier of the chosen worker.
        worker_id: String,
        /// Human-readable display name of the chosen worker.
        worker_name: String,
    },

    /// A subtask finished successfully.
    SubtaskCompleted {
        /// Id of the root task.
        task_id: String,
        /// Id of the completed subtask.
        subtask_id: String,
        /// Stable identifier of the worker that produced the contribution.
        worker_id: String,
        /// Character length of the contribution text.
        response_length: usize,
    },

    /// A subtask failed after its worker's own retries were exhausted.
    SubtaskFailed {
        /// Id of the root task.
        task_id: String,
        /// Id of the failed subtask.
        subtask_id: String,
        /// The error message from the worker or router.
        error: String,
    },

    /// A subtask was skipped because something it depends on failed.
    ///
    /// Only emitted under
    /// [`FailurePolicy::ContinueWithOmission`](crate::workforce::config::FailurePolicy::ContinueWithOmission);
    /// under `AbortAll` the run stops instead.
    SubtaskOmitted {
        /// Id of the root task.
        task_id: String,
        /// Id of the omitted subtask.
        subtask_id: String,
        /// Id of the failed subtask it (transitively) depends on.
        failed_dependency: String,
    },
}

/// Trait for receiving worker and workforce events.
///
/// Both methods have **default no-op implementations**, so you only need to
/// override the events you care about. For example, if you only want
/// run-level progress, implement only `on_workforce_event`.
///
/// # Thread Safety
///
/// The `Send + Sync` bound allows the handler to be shared across workers
/// and tokio tasks via `Arc<dyn EventHandler>`. Make sure any internal state
/// uses appropriate synchronization (e.g., `AtomicUsize`, `Mutex`).
///
/// # Registration
///
/// - **On a Worker**: [`Worker::with_event_handler`](crate::workforce::worker::Worker::with_event_handler)
///   (builder) or [`Worker::set_event_handler`](crate::workforce::worker::Worker::set_event_handler) (runtime).
/// - **On a Workforce**: [`Workforce::with_event_handler`](crate::workforce::orchestrator::Workforce::with_event_handler).
///   The handler is **automatically propagated** to every worker added via
///   [`add_worker`](crate::workforce::orchestrator::Workforce::add_worker), giving you
///   a unified stream of both worker-level and run-level events.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Called when a worker emits an event.
    ///
    /// The default implementation is a no-op. Override this to observe
    /// model calls, tool usage, and per-subtask execution.
    async fn on_worker_event(&self, _event: &WorkerEvent) {}

    /// Called when the scheduler emits an event.
    ///
    /// The default implementation is a no-op. Override this to observe
    /// dispatch decisions, subtask outcomes, and run boundaries.
    async fn on_workforce_event(&self, _event: &WorkforceEvent) {}
}
