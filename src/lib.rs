//! # Workforce
//!
//! Workforce is a Rust engine for orchestrating teams of model-backed
//! workers over structured tasks. You describe *what* needs doing as a
//! task with optional dependent subtasks; the engine decides *who* does
//! each piece by matching required capabilities against worker profiles,
//! runs independent pieces in parallel, and merges the contributions
//! back into one result in the order you declared.
//!
//! The crate provides layered abstractions for:
//!
//! * **Workers with Tools**: [`Worker`]s wrap a [`ModelClient`], carry a
//!   persona and a bounded conversation memory, and can call registered
//!   tools mid-task through a detect/invoke/feed-back loop
//! * **Capability Routing**: [`CapabilityTag`]s on subtasks are matched
//!   against worker profiles at dispatch time; no manual assignment
//! * **Dependency Scheduling**: subtask graphs are validated up front
//!   (unknown ids, cycles) and executed respecting `depends_on` edges,
//!   bounded by a configurable parallelism limit
//! * **Failure Policies**: [`FailurePolicy::AbortAll`] stops everything on
//!   the first failure; [`FailurePolicy::ContinueWithOmission`] drops the
//!   failed branch and keeps the rest of the result
//! * **Observability**: [`EventHandler`] receives scheduler-level
//!   [`WorkforceEvent`]s and worker-level [`WorkerEvent`]s for every
//!   dispatch, model call, and tool invocation
//! * **Artifacts**: [`Composer`] splits merged Markdown into ordered
//!   text and media blocks and resolves local image paths so results can
//!   be rendered or published directly
//!
//! ## Core Concepts
//!
//! ### Workers
//!
//! A [`Worker`] is one model-backed specialist. It owns its rolling
//! memory window, so a worker that handled an earlier subtask still
//! remembers it when a later one arrives:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workforce::capability::CapabilityTag;
//! use workforce::clients::openai::OpenAiClient;
//! use workforce::worker::Worker;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(OpenAiClient::new(
//!     std::env::var("OPENAI_API_KEY")?,
//!     "gpt-4o-mini",
//! ));
//!
//! let writer = Worker::new("writer", "Content Writer", client)
//!     .with_capability(CapabilityTag::TextSynthesis)
//!     .with_persona("You write vivid, well-structured marketing copy.")
//!     .with_memory_window(10);
//! # Ok(())
//! # }
//! ```
//!
//! ### Tasks and Scheduling
//!
//! A [`Task`] without subtasks is routed to a single worker. A task with
//! subtasks becomes a dependency graph. Subtasks whose dependencies have
//! all completed are dispatched in declared order, independent subtasks
//! run concurrently, and the merged result preserves declared order no
//! matter which finished first:
//!
//! ```rust,no_run
//! use workforce::capability::CapabilityTag;
//! use workforce::task::Task;
//!
//! let task = Task::new("Produce a launch brochure")
//!     .with_subtask(
//!         Task::new("Research the product's market")
//!             .with_id("research")
//!             .with_required_capability(CapabilityTag::WebLookup),
//!     )
//!     .with_subtask(
//!         Task::new("Name the product line")
//!             .with_id("naming")
//!             .with_required_capability(CapabilityTag::NameGeneration),
//!     )
//!     .with_subtask(
//!         Task::new("Write the brochure from the research and name")
//!             .with_id("copy")
//!             .with_required_capability(CapabilityTag::TextSynthesis)
//!             .with_dependency("research")
//!             .with_dependency("naming"),
//!     );
//! ```
//!
//! Here `research` and `naming` run in parallel; `copy` waits for both.
//!
//! ### Getting Started
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workforce::blueprints::document_team;
//! use workforce::clients::openai::OpenAiClient;
//! use workforce::config::{FailurePolicy, WorkforceConfig};
//! use workforce::task::Task;
//! use workforce::Workforce;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     workforce::init_logger();
//!
//!     let client = Arc::new(OpenAiClient::new(
//!         std::env::var("OPENAI_API_KEY")?,
//!         "gpt-4o-mini",
//!     ));
//!
//!     let mut team = Workforce::new(
//!         "doc-team",
//!         "Document Team",
//!         WorkforceConfig::new(FailurePolicy::ContinueWithOmission)
//!             .with_max_parallelism(4)
//!             .with_media_root("media"),
//!     );
//!     for blueprint in document_team() {
//!         team.hire(blueprint, client.clone())?;
//!     }
//!
//!     let task = Task::new("Write a one-page brochure for the city of Oakdale");
//!     let finished = team.submit(task).await;
//!
//!     let artifact = team.compose_artifact(&finished);
//!     println!("{}", artifact.to_markdown());
//!     Ok(())
//! }
//! ```
//!
//! Continue with the modules re-exported from the crate root for richer
//! control: per-subtask events, custom tools, and invocation policies.

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// Applications embedding the engine get `RUST_LOG` driven diagnostics
/// without committing to a logging backend; calling this more than once
/// is harmless.
///
/// ```rust
/// workforce::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}

// Import the top-level `workforce` module.
pub mod workforce;

// Re-exporting key items for easier external access.
pub use crate::workforce::blueprints;
pub use crate::workforce::blueprints::{document_team, WorkerBlueprint};
pub use crate::workforce::capability;
pub use crate::workforce::capability::CapabilityTag;
pub use crate::workforce::clients;
pub use crate::workforce::composer;
pub use crate::workforce::composer::{Artifact, Block, Composer};
pub use crate::workforce::config;
pub use crate::workforce::config::{FailurePolicy, WorkforceConfig};
pub use crate::workforce::event;
pub use crate::workforce::event::{EventHandler, WorkerEvent, WorkforceEvent};
pub use crate::workforce::invocation;
pub use crate::workforce::invocation::{InvocationPolicy, ToolCallRecord, ToolInvoker};
pub use crate::workforce::model_client;
pub use crate::workforce::model_client::{
    Message, ModelClient, ModelClientError, Role, TokenUsage,
};
pub use crate::workforce::orchestrator;
pub use crate::workforce::orchestrator::{CancelHandle, Workforce};
pub use crate::workforce::registry;
pub use crate::workforce::registry::{RegistryError, WorkerHandle, WorkerRegistry};
pub use crate::workforce::task;
pub use crate::workforce::task::{FailureKind, Task, TaskFailure, TaskStatus};
pub use crate::workforce::tool;
pub use crate::workforce::tool::{
    ToolBackend, ToolError, ToolMetadata, ToolParameter, ToolParameterType, ToolPayload,
    ToolRef, ToolResult,
};
pub use crate::workforce::tools;
pub use crate::workforce::worker;
pub use crate::workforce::worker::{Contribution, Worker, WorkerError, WorkerProfile};
