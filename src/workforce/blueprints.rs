//! Reusable worker definitions.
//!
//! A [`WorkerBlueprint`] captures everything about a worker except the
//! model client that powers it, so the same team shape can be built
//! against different backends. [`Workforce::hire`] fills in
//! workforce-level defaults (memory window, invocation policy) for
//! whatever the blueprint leaves unset.
//!
//! [`Workforce::hire`]: crate::workforce::orchestrator::Workforce::hire

use crate::workforce::capability::CapabilityTag;
use crate::workforce::model_client::ModelClient;
use crate::workforce::worker::Worker;
use std::sync::Arc;

/// A model-agnostic worker definition.
#[derive(Debug, Clone)]
pub struct WorkerBlueprint {
    /// Unique id the worker will register under.
    pub id: String,
    /// Human-readable name, used in the worker's system prompt.
    pub display_name: String,
    /// Persona appended to the system prompt.
    pub persona: String,
    /// Capabilities the worker advertises for routing.
    pub capabilities: Vec<CapabilityTag>,
    /// Memory window override; `None` defers to the workforce default.
    pub memory_window: Option<usize>,
}

impl WorkerBlueprint {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            persona: persona.into(),
            capabilities: Vec::new(),
            memory_window: None,
        }
    }

    /// Advertise a capability (builder pattern).
    pub fn with_capability(mut self, capability: CapabilityTag) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Pin the memory window instead of inheriting the workforce default.
    pub fn with_memory_window(mut self, window: usize) -> Self {
        self.memory_window = Some(window);
        self
    }

    /// Build a [`Worker`] powered by `model`.
    ///
    /// Tools are not part of a blueprint; attach them to the built worker
    /// with [`Worker::with_tool`] before registering it.
    pub fn build(self, model: Arc<dyn ModelClient>) -> Worker {
        let mut worker =
            Worker::new(self.id, self.display_name, model).with_persona(self.persona);
        for capability in self.capabilities {
            worker = worker.with_capability(capability);
        }
        if let Some(window) = self.memory_window {
            worker = worker.with_memory_window(window);
        }
        worker
    }
}

/// Blueprints for a four-worker document production team: a writer, a
/// namer, a researcher, and an illustrator.
///
/// Give the researcher a web search tool and the illustrator an image
/// generation tool after building, e.g.:
///
/// ```rust,no_run
/// use workforce::blueprints::document_team;
/// use workforce::clients::openai::OpenAiClient;
/// use workforce::tools::web_search::WebSearchTool;
/// use workforce::tool::ToolRef;
/// use std::sync::Arc;
///
/// let client = Arc::new(OpenAiClient::new("key", "gpt-4o-mini"));
/// for blueprint in document_team() {
///     let mut worker = blueprint.build(client.clone());
///     if worker.id == "researcher" {
///         worker = worker.with_tool(ToolRef::new(
///             WebSearchTool::metadata(),
///             Arc::new(WebSearchTool::new()),
///         ));
///     }
///     // register with a Workforce...
/// }
/// ```
pub fn document_team() -> Vec<WorkerBlueprint> {
    vec![
        WorkerBlueprint::new(
            "writer",
            "Content Writer",
            "You write clear, engaging prose for publications. You turn \
             research notes and outlines into polished sections, keep a \
             consistent voice across a document, and never invent facts \
             that were not provided to you.",
        )
        .with_capability(CapabilityTag::TextSynthesis),
        WorkerBlueprint::new(
            "namer",
            "Naming Specialist",
            "You coin short, memorable names, titles, and slogans. You \
             reply with your best candidate first, followed by two or \
             three alternatives, each on its own line.",
        )
        .with_capability(CapabilityTag::NameGeneration),
        WorkerBlueprint::new(
            "researcher",
            "Researcher",
            "You gather current, verifiable information on a topic. When \
             a search tool is available, use it rather than relying on \
             memory, and summarize what you found as concise bullet \
             points with the source mentioned inline.",
        )
        .with_capability(CapabilityTag::WebLookup),
        WorkerBlueprint::new(
            "illustrator",
            "Illustrator",
            "You produce images that complement a document. When an image \
             generation tool is available, use it and reference the \
             resulting image in Markdown, e.g. ![description](path), so \
             it can be placed in the final document.",
        )
        .with_capability(CapabilityTag::MediaSynthesis),
    ]
}
