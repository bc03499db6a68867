//! Workforce configuration: failure policy, parallelism, and timeouts.

use crate::workforce::invocation::InvocationPolicy;
use crate::workforce::worker::DEFAULT_MEMORY_WINDOW;
use std::path::PathBuf;
use std::time::Duration;

/// What the scheduler does when a subtask fails.
///
/// No `Default` is provided; a policy must be chosen when constructing a
/// [`WorkforceConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop dispatching on the first failure and fail the whole task.
    /// In-flight subtasks are allowed to finish but their results are
    /// discarded.
    AbortAll,
    /// Keep going. The failed subtask and everything that (transitively)
    /// depends on it are omitted from the merged result, with an
    /// annotation at each omitted subtask's declared position.
    ContinueWithOmission,
}

/// Tunables for a [`Workforce`](crate::workforce::orchestrator::Workforce).
#[derive(Debug, Clone)]
pub struct WorkforceConfig {
    /// How subtask failures are handled.
    pub failure_policy: FailurePolicy,
    /// Maximum number of subtasks executing at once.
    pub max_parallelism: usize,
    /// Wall-clock budget per subtask, covering the worker's whole tool
    /// loop. Overruns fail the subtask as a model-invocation failure.
    pub subtask_timeout: Duration,
    /// Tool invocation policy handed to workers hired through
    /// [`Workforce::hire`](crate::workforce::orchestrator::Workforce::hire).
    pub invocation: InvocationPolicy,
    /// Conversation window for workers hired through `hire` whose
    /// blueprint does not set its own.
    pub memory_window: usize,
    /// Directory for resolving local media locations when composing
    /// artifacts. `None` disables resolution.
    pub media_root: Option<PathBuf>,
}

impl WorkforceConfig {
    pub fn new(failure_policy: FailurePolicy) -> Self {
        Self {
            failure_policy,
            max_parallelism: 4,
            subtask_timeout: Duration::from_secs(300),
            invocation: InvocationPolicy::default(),
            memory_window: DEFAULT_MEMORY_WINDOW,
            media_root: None,
        }
    }

    /// Override the parallelism bound. Zero is treated as one.
    pub fn with_max_parallelism(mut self, max_parallelism: usize) -> Self {
        self.max_parallelism = max_parallelism.max(1);
        self
    }

    pub fn with_subtask_timeout(mut self, subtask_timeout: Duration) -> Self {
        self.subtask_timeout = subtask_timeout;
        self
    }

    pub fn with_invocation_policy(mut self, invocation: InvocationPolicy) -> Self {
        self.invocation = invocation;
        self
    }

    pub fn with_memory_window(mut self, memory_window: usize) -> Self {
        self.memory_window = memory_window.max(1);
        self
    }

    pub fn with_media_root(mut self, media_root: impl Into<PathBuf>) -> Self {
        self.media_root = Some(media_root.into());
        self
    }
}
