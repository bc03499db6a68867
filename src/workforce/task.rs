//! Tasks, subtasks, and failure taxonomy.
//!
//! A [`Task`] is the unit of work handed to a
//! [`Workforce`](crate::workforce::orchestrator::Workforce). A task with no
//! subtasks is routed to a single worker; a task with subtasks becomes a
//! dependency graph whose nodes run in parallel where the edges allow.
//! Tasks never name a worker directly. They declare required
//! [`CapabilityTag`]s and the registry picks the worker at dispatch time.

use crate::workforce::capability::CapabilityTag;
use std::error::Error;
use std::fmt;
use uuid::Uuid;

/// Lifecycle state of a [`Task`] or subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Created but not yet submitted, or submitted and waiting on
    /// unsatisfied dependencies.
    Pending,
    /// Dispatched to a worker, or (for a parent) at least one subtask
    /// dispatched.
    InProgress,
    /// Finished with a result.
    Completed,
    /// Finished without a usable result. `failure` says why.
    Failed,
}

/// Coarse classification of why a task or subtask failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No registered worker covers the required capabilities.
    UnknownWorker,
    /// The model backend failed or the subtask overran its time budget.
    ModelInvocation,
    /// The model requested a tool the worker does not hold.
    ToolUnavailable,
    /// A credential was rejected somewhere in the worker's stack.
    Authentication,
    /// The run was cancelled before this unit completed.
    Cancelled,
    /// The subtask graph itself is malformed (duplicate ids, unknown or
    /// cyclic dependencies).
    InvalidDependencies,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::UnknownWorker => "unknown worker",
            FailureKind::ModelInvocation => "model invocation",
            FailureKind::ToolUnavailable => "tool unavailable",
            FailureKind::Authentication => "authentication",
            FailureKind::Cancelled => "cancelled",
            FailureKind::InvalidDependencies => "invalid dependencies",
        };
        write!(f, "{}", name)
    }
}

/// A classified failure attached to a finished-but-failed task.
#[derive(Debug, Clone)]
pub struct TaskFailure {
    /// Id of the subtask that triggered the failure, `None` when the
    /// failure belongs to the root task itself.
    pub subtask_id: Option<String>,
    pub kind: FailureKind,
    pub message: String,
}

impl TaskFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            subtask_id: None,
            kind,
            message: message.into(),
        }
    }

    pub fn for_subtask(subtask_id: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            subtask_id: Some(subtask_id.into()),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subtask_id {
            Some(id) => write!(f, "subtask '{}' failed ({}): {}", id, self.kind, self.message),
            None => write!(f, "task failed ({}): {}", self.kind, self.message),
        }
    }
}

impl Error for TaskFailure {}

/// A unit of work, optionally decomposed into dependent subtasks.
#[derive(Debug, Clone)]
pub struct Task {
    /// Stable identifier. Auto-generated UUID unless set via
    /// [`with_id`](Task::with_id).
    pub id: String,
    /// What the worker is asked to do, in natural language.
    pub content: String,
    /// Current lifecycle state.
    pub status: TaskStatus,
    /// Capabilities a worker must cover to be eligible for this task.
    pub required_capabilities: Vec<CapabilityTag>,
    /// Ids of sibling subtasks whose results must exist before this one
    /// is dispatched. Only meaningful on subtasks.
    pub depends_on: Vec<String>,
    /// Decomposition of this task. Empty for leaf tasks.
    pub subtasks: Vec<Task>,
    /// Final merged output once `status` is `Completed`.
    pub result: Option<String>,
    /// Classified failure once `status` is `Failed`.
    pub failure: Option<TaskFailure>,
}

impl Task {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            status: TaskStatus::Pending,
            required_capabilities: Vec::new(),
            depends_on: Vec::new(),
            subtasks: Vec::new(),
            result: None,
            failure: None,
        }
    }

    /// Replace the auto-generated id with a caller-chosen one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_required_capability(mut self, tag: CapabilityTag) -> Self {
        self.required_capabilities.push(tag);
        self
    }

    /// Declare a dependency on a sibling subtask by id.
    pub fn with_dependency(mut self, subtask_id: impl Into<String>) -> Self {
        self.depends_on.push(subtask_id.into());
        self
    }

    /// Append a subtask. Declaration order is preserved end to end: it is
    /// the dispatch tie-break order and the merge order of results.
    pub fn with_subtask(mut self, subtask: Task) -> Self {
        self.subtasks.push(subtask);
        self
    }

    /// Whether this task decomposes into subtasks.
    pub fn has_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("write a paragraph");
        assert!(!task.id.is_empty());
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.subtasks.is_empty());
        assert!(task.result.is_none());
        assert!(task.failure.is_none());
    }

    #[test]
    fn test_builder_preserves_declaration_order() {
        let task = Task::new("parent")
            .with_subtask(Task::new("one").with_id("a"))
            .with_subtask(Task::new("two").with_id("b").with_dependency("a"))
            .with_subtask(Task::new("three").with_id("c"));
        let ids: Vec<&str> = task.subtasks.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(task.subtasks[1].depends_on, vec!["a".to_string()]);
    }

    #[test]
    fn test_failure_display() {
        let failure = TaskFailure::for_subtask("research", FailureKind::ModelInvocation, "timed out");
        assert_eq!(
            failure.to_string(),
            "subtask 'research' failed (model invocation): timed out"
        );
        let failure = TaskFailure::new(FailureKind::Cancelled, "cancelled by caller");
        assert_eq!(failure.to_string(), "task failed (cancelled): cancelled by caller");
    }
}
