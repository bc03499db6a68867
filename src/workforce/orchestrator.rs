//! The workforce engine: capability routing, dependency-aware parallel
//! scheduling, and result merging.
//!
//! A [`Workforce`] owns a registry of [`Worker`]s and processes [`Task`]s
//! submitted to it. A task without subtasks is routed to a single worker.
//! A task with subtasks is treated as a dependency graph: a subtask is
//! dispatched once every subtask it depends on has completed, independent
//! subtasks run in parallel up to the configured bound, and completed
//! contributions are merged in declared order regardless of completion
//! order.
//!
//! Failures follow the configured [`FailurePolicy`]: stop everything on the
//! first failure, or keep going and omit the failed subtask together with
//! everything that depends on it.
//!
//! # Example
//!
//! ```rust,no_run
//! use workforce::capability::CapabilityTag;
//! use workforce::clients::openai::OpenAiClient;
//! use workforce::config::{FailurePolicy, WorkforceConfig};
//! use workforce::orchestrator::Workforce;
//! use workforce::task::Task;
//! use workforce::worker::Worker;
//! use std::sync::Arc;
//!
//! # async {
//! let client = Arc::new(OpenAiClient::new("key", "gpt-4o-mini"));
//!
//! let mut team = Workforce::new(
//!     "brochure-team",
//!     "Brochure Team",
//!     WorkforceConfig::new(FailurePolicy::ContinueWithOmission),
//! );
//! team.add_worker(
//!     Worker::new("writer", "Content Writer", client.clone())
//!         .with_capability(CapabilityTag::TextSynthesis),
//! )?;
//! team.add_worker(
//!     Worker::new("researcher", "Researcher", client)
//!         .with_capability(CapabilityTag::WebLookup),
//! )?;
//!
//! let task = Task::new("Produce a brochure for Oakdale")
//!     .with_subtask(
//!         Task::new("Research Oakdale's landmarks")
//!             .with_id("research")
//!             .with_required_capability(CapabilityTag::WebLookup),
//!     )
//!     .with_subtask(
//!         Task::new("Write the introduction using the research")
//!             .with_id("intro")
//!             .with_required_capability(CapabilityTag::TextSynthesis)
//!             .with_dependency("research"),
//!     );
//!
//! let finished = team.submit(task).await;
//! println!("{:?}", finished.result);
//! # Ok::<(), workforce::registry::RegistryError>(())
//! # };
//! ```

use crate::workforce::blueprints::WorkerBlueprint;
use crate::workforce::capability::CapabilityTag;
use crate::workforce::composer::{Artifact, Composer};
use crate::workforce::config::{FailurePolicy, WorkforceConfig};
use crate::workforce::event::{EventHandler, WorkforceEvent};
use crate::workforce::model_client::ModelClient;
use crate::workforce::registry::{RegistryError, WorkerHandle, WorkerRegistry};
use crate::workforce::task::{FailureKind, Task, TaskFailure, TaskStatus};
use crate::workforce::worker::{Contribution, Worker, WorkerError, WorkerProfile};
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::timeout;

/// Cooperative cancellation for a running [`Workforce::submit_with_cancel`]
/// call.
///
/// Cloning shares the flag. Cancellation is observed between subtasks: the
/// scheduler stops dispatching, in-flight subtasks run to completion but
/// their results are discarded, and the task fails as cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Immutable per-subtask snapshot taken before scheduling starts, so the
/// dispatch loop never borrows the task it will later mutate.
struct SubtaskSpec {
    id: String,
    content: String,
    required: Vec<CapabilityTag>,
    depends_on: Vec<String>,
}

/// What came back from one spawned subtask.
struct SubtaskOutcome {
    subtask_id: String,
    worker_id: String,
    result: Result<Contribution, TaskFailure>,
}

/// Mutable bookkeeping for one graph run.
#[derive(Default)]
struct GraphState {
    /// Subtasks handed to a worker (or terminally rejected by routing).
    dispatched: HashSet<String>,
    /// Subtask id to contribution text.
    completed: HashMap<String, String>,
    /// Subtask id to its root-cause failure.
    failed: HashMap<String, TaskFailure>,
    /// Omitted subtask id to the failed subtask it transitively depends on.
    omitted: HashMap<String, String>,
    /// First failure observed, in completion order.
    first_failure: Option<TaskFailure>,
    /// When set, no further subtasks are dispatched.
    halted: bool,
}

/// A team of workers plus the scheduler that drives them.
pub struct Workforce {
    /// Stable identifier, carried in log lines.
    pub id: String,
    /// Human-readable display name.
    pub name: String,

    registry: WorkerRegistry,
    config: WorkforceConfig,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl Workforce {
    pub fn new(id: impl Into<String>, name: impl Into<String>, config: WorkforceConfig) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            registry: WorkerRegistry::new(),
            config,
            event_handler: None,
        }
    }

    /// Attach an [`EventHandler`] that will receive [`WorkforceEvent`]s
    /// (builder pattern).
    ///
    /// The handler is also propagated to every worker added afterwards via
    /// [`add_worker`](Workforce::add_worker), so one handler observes both
    /// scheduler-level and worker-level events.
    pub fn with_event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Register a worker with this workforce.
    ///
    /// If the workforce has an event handler, it replaces whatever handler
    /// the worker carried so all events flow to one place. Fails if a
    /// worker with the same id is already registered.
    pub fn add_worker(&mut self, mut worker: Worker) -> Result<(), RegistryError> {
        if let Some(handler) = &self.event_handler {
            worker.set_event_handler(Arc::clone(handler));
        }
        self.registry.register(worker)
    }

    /// Build a worker from a blueprint and register it.
    ///
    /// The workforce's configured invocation policy always applies; the
    /// blueprint's memory window is used when set, otherwise the
    /// workforce's default.
    pub fn hire(
        &mut self,
        blueprint: WorkerBlueprint,
        model: Arc<dyn ModelClient>,
    ) -> Result<(), RegistryError> {
        let window = blueprint.memory_window.unwrap_or(self.config.memory_window);
        let worker = blueprint
            .build(model)
            .with_memory_window(window)
            .with_invocation_policy(self.config.invocation.clone());
        self.add_worker(worker)
    }

    /// Fetch a registered worker's handle by id.
    pub fn worker(&self, id: &str) -> Result<WorkerHandle, RegistryError> {
        self.registry.lookup(id)
    }

    /// Routing profiles of all registered workers, in registration order.
    pub fn worker_profiles(&self) -> Vec<&WorkerProfile> {
        self.registry.profiles()
    }

    /// Profiles of every worker covering all of `required`.
    pub fn workers_with_capability(&self, required: &[CapabilityTag]) -> Vec<&WorkerProfile> {
        self.registry.list_by_capability(required)
    }

    pub fn worker_count(&self) -> usize {
        self.registry.len()
    }

    pub fn config(&self) -> &WorkforceConfig {
        &self.config
    }

    async fn emit(&self, event: WorkforceEvent) {
        if let Some(handler) = &self.event_handler {
            handler.on_workforce_event(&event).await;
        }
    }

    /// Process a task to completion and return it with statuses, results,
    /// and failures filled in.
    ///
    /// This never returns an error: scheduling problems are recorded on
    /// the returned task itself (`status`, `failure`).
    pub async fn submit(&self, task: Task) -> Task {
        self.submit_with_cancel(task, &CancelHandle::new()).await
    }

    /// Like [`submit`](Workforce::submit), but observing a [`CancelHandle`].
    pub async fn submit_with_cancel(&self, mut task: Task, cancel: &CancelHandle) -> Task {
        task.status = TaskStatus::InProgress;
        self.emit(WorkforceEvent::TaskStarted {
            task_id: task.id.clone(),
            subtask_count: task.subtasks.len(),
        })
        .await;

        let outcome = if task.subtasks.is_empty() {
            self.run_single(&task, cancel).await
        } else {
            self.run_graph(&mut task, cancel).await
        };

        match outcome {
            Ok(result) => {
                self.emit(WorkforceEvent::TaskCompleted {
                    task_id: task.id.clone(),
                    result_length: result.len(),
                })
                .await;
                task.status = TaskStatus::Completed;
                task.result = Some(result);
            }
            Err(failure) => {
                if failure.kind == FailureKind::Cancelled {
                    self.emit(WorkforceEvent::TaskCancelled {
                        task_id: task.id.clone(),
                    })
                    .await;
                } else {
                    self.emit(WorkforceEvent::TaskFailed {
                        task_id: task.id.clone(),
                        subtask_id: failure.subtask_id.clone(),
                        kind: failure.kind,
                        message: failure.message.clone(),
                    })
                    .await;
                }
                task.status = TaskStatus::Failed;
                task.failure = Some(failure);
            }
        }
        task
    }

    /// Compose the task's merged result into an [`Artifact`], resolving
    /// local media against the configured media root when one is set.
    ///
    /// A task without a result composes to an empty artifact.
    pub fn compose_artifact(&self, task: &Task) -> Artifact {
        let text = task.result.as_deref().unwrap_or("");
        let mut artifact = Composer::compose(text);
        if let Some(root) = &self.config.media_root {
            Composer::resolve_local_media(&mut artifact, root);
        }
        artifact
    }

    /// Run a task with no subtasks on a single routed worker.
    async fn run_single(&self, task: &Task, cancel: &CancelHandle) -> Result<String, TaskFailure> {
        if cancel.is_cancelled() {
            return Err(TaskFailure::new(
                FailureKind::Cancelled,
                "cancelled before dispatch",
            ));
        }

        let (worker_id, worker_name) =
            match self.registry.select_worker(&task.required_capabilities) {
                Ok(profile) => (profile.id.clone(), profile.display_name.clone()),
                Err(err) => {
                    return Err(TaskFailure::new(FailureKind::UnknownWorker, err.to_string()))
                }
            };
        let handle = self
            .registry
            .lookup(&worker_id)
            .map_err(|err| TaskFailure::new(FailureKind::UnknownWorker, err.to_string()))?;

        self.emit(WorkforceEvent::SubtaskDispatched {
            task_id: task.id.clone(),
            subtask_id: task.id.clone(),
            worker_id: worker_id.clone(),
            worker_name,
        })
        .await;

        let mut worker = handle.lock().await;
        let outcome = timeout(
            self.config.subtask_timeout,
            worker.execute(&task.id, &task.content),
        )
        .await;

        match outcome {
            Ok(Ok(contribution)) => {
                self.emit(WorkforceEvent::SubtaskCompleted {
                    task_id: task.id.clone(),
                    subtask_id: task.id.clone(),
                    worker_id,
                    response_length: contribution.text.len(),
                })
                .await;
                Ok(contribution.text)
            }
            Ok(Err(err)) => {
                let failure = TaskFailure::new(failure_kind(&err), err.to_string());
                self.emit(WorkforceEvent::SubtaskFailed {
                    task_id: task.id.clone(),
                    subtask_id: task.id.clone(),
                    error: failure.message.clone(),
                })
                .await;
                Err(failure)
            }
            Err(_) => {
                worker.discard_unanswered_prompts();
                let failure = TaskFailure::new(
                    FailureKind::ModelInvocation,
                    format!("task timed out after {:?}", self.config.subtask_timeout),
                );
                self.emit(WorkforceEvent::SubtaskFailed {
                    task_id: task.id.clone(),
                    subtask_id: task.id.clone(),
                    error: failure.message.clone(),
                })
                .await;
                Err(failure)
            }
        }
    }

    /// Run a task's subtask graph to completion.
    async fn run_graph(&self, task: &mut Task, cancel: &CancelHandle) -> Result<String, TaskFailure> {
        validate_subtasks(&task.subtasks)?;

        let specs: Vec<SubtaskSpec> = task
            .subtasks
            .iter()
            .map(|s| SubtaskSpec {
                id: s.id.clone(),
                content: s.content.clone(),
                required: s.required_capabilities.clone(),
                depends_on: s.depends_on.clone(),
            })
            .collect();

        if cancel.is_cancelled() {
            for subtask in task.subtasks.iter_mut() {
                subtask.status = TaskStatus::Failed;
                subtask.failure = Some(TaskFailure::for_subtask(
                    subtask.id.clone(),
                    FailureKind::Cancelled,
                    "cancelled before dispatch",
                ));
            }
            return Err(TaskFailure::new(FailureKind::Cancelled, "task cancelled"));
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_parallelism));
        let mut in_flight: FuturesUnordered<BoxFuture<'static, SubtaskOutcome>> =
            FuturesUnordered::new();
        let mut state = GraphState::default();

        self.dispatch_eligible(&task.id, &specs, &mut state, &mut in_flight, &semaphore, cancel)
            .await;

        let mut cancelled = false;
        while let Some(outcome) = in_flight.next().await {
            if cancel.is_cancelled() {
                cancelled = true;
                state.halted = true;
                break;
            }
            match outcome.result {
                Ok(contribution) => {
                    self.emit(WorkforceEvent::SubtaskCompleted {
                        task_id: task.id.clone(),
                        subtask_id: outcome.subtask_id.clone(),
                        worker_id: outcome.worker_id,
                        response_length: contribution.text.len(),
                    })
                    .await;
                    state.completed.insert(outcome.subtask_id, contribution.text);
                    if !state.halted {
                        self.dispatch_eligible(
                            &task.id, &specs, &mut state, &mut in_flight, &semaphore, cancel,
                        )
                        .await;
                    }
                }
                Err(failure) => {
                    self.emit(WorkforceEvent::SubtaskFailed {
                        task_id: task.id.clone(),
                        subtask_id: outcome.subtask_id.clone(),
                        error: failure.message.clone(),
                    })
                    .await;
                    if state.first_failure.is_none() {
                        state.first_failure = Some(failure.clone());
                    }
                    state.failed.insert(outcome.subtask_id, failure);
                    match self.config.failure_policy {
                        FailurePolicy::AbortAll => state.halted = true,
                        FailurePolicy::ContinueWithOmission => {
                            self.sweep_omissions(&task.id, &specs, &mut state).await;
                            self.dispatch_eligible(
                                &task.id, &specs, &mut state, &mut in_flight, &semaphore, cancel,
                            )
                            .await;
                        }
                    }
                }
            }
        }
        if cancel.is_cancelled() {
            cancelled = true;
        }

        for subtask in task.subtasks.iter_mut() {
            if let Some(text) = state.completed.get(&subtask.id) {
                subtask.status = TaskStatus::Completed;
                subtask.result = Some(text.clone());
            } else if let Some(failure) = state.failed.get(&subtask.id) {
                subtask.status = TaskStatus::Failed;
                subtask.failure = Some(failure.clone());
            } else if let Some(origin) = state.omitted.get(&subtask.id) {
                let kind = state
                    .failed
                    .get(origin)
                    .map(|f| f.kind)
                    .unwrap_or(FailureKind::ModelInvocation);
                subtask.status = TaskStatus::Failed;
                subtask.failure = Some(TaskFailure::for_subtask(
                    subtask.id.clone(),
                    kind,
                    format!("skipped: dependency '{}' failed", origin),
                ));
            } else if cancelled {
                subtask.status = TaskStatus::Failed;
                subtask.failure = Some(TaskFailure::for_subtask(
                    subtask.id.clone(),
                    FailureKind::Cancelled,
                    "cancelled before completion",
                ));
            }
        }

        if cancelled {
            return Err(TaskFailure::new(FailureKind::Cancelled, "task cancelled"));
        }

        match self.config.failure_policy {
            FailurePolicy::AbortAll => {
                if let Some(failure) = state.first_failure {
                    return Err(failure);
                }
                let merged: Vec<String> = specs
                    .iter()
                    .filter_map(|s| state.completed.get(&s.id).cloned())
                    .collect();
                Ok(merged.join("\n\n"))
            }
            FailurePolicy::ContinueWithOmission => {
                if state.completed.is_empty() {
                    for spec in &specs {
                        if let Some(failure) = state.failed.get(&spec.id) {
                            return Err(failure.clone());
                        }
                    }
                    return Err(TaskFailure::new(
                        FailureKind::ModelInvocation,
                        "no subtasks completed",
                    ));
                }
                let mut sections = Vec::new();
                for spec in &specs {
                    if let Some(text) = state.completed.get(&spec.id) {
                        sections.push(text.clone());
                    } else if let Some(origin) = state.omitted.get(&spec.id) {
                        sections.push(format!(
                            "[Omitted: subtask '{}' skipped: dependency '{}' failed]",
                            spec.id, origin
                        ));
                    } else if let Some(failure) = state.failed.get(&spec.id) {
                        sections.push(format!(
                            "[Omitted: subtask '{}' failed: {}]",
                            spec.id, failure.message
                        ));
                    }
                }
                Ok(sections.join("\n\n"))
            }
        }
    }

    /// Dispatch every undispatched subtask whose dependencies are all
    /// completed, in declared order.
    ///
    /// Routing happens here, at dispatch time: a subtask no registered
    /// worker covers fails immediately without consuming a worker.
    async fn dispatch_eligible(
        &self,
        task_id: &str,
        specs: &[SubtaskSpec],
        state: &mut GraphState,
        in_flight: &mut FuturesUnordered<BoxFuture<'static, SubtaskOutcome>>,
        semaphore: &Arc<Semaphore>,
        cancel: &CancelHandle,
    ) {
        for spec in specs {
            if state.halted {
                return;
            }
            if state.dispatched.contains(&spec.id) || state.omitted.contains_key(&spec.id) {
                continue;
            }
            let ready = spec
                .depends_on
                .iter()
                .all(|dep| state.completed.contains_key(dep));
            if !ready {
                continue;
            }

            let profile = match self.registry.select_worker(&spec.required) {
                Ok(profile) => profile,
                Err(err) => {
                    let failure = TaskFailure::for_subtask(
                        spec.id.clone(),
                        FailureKind::UnknownWorker,
                        err.to_string(),
                    );
                    self.emit(WorkforceEvent::SubtaskFailed {
                        task_id: task_id.to_string(),
                        subtask_id: spec.id.clone(),
                        error: failure.message.clone(),
                    })
                    .await;
                    if state.first_failure.is_none() {
                        state.first_failure = Some(failure.clone());
                    }
                    state.failed.insert(spec.id.clone(), failure);
                    state.dispatched.insert(spec.id.clone());
                    match self.config.failure_policy {
                        FailurePolicy::AbortAll => state.halted = true,
                        FailurePolicy::ContinueWithOmission => {
                            self.sweep_omissions(task_id, specs, state).await;
                        }
                    }
                    continue;
                }
            };
            let worker_id = profile.id.clone();
            let worker_name = profile.display_name.clone();

            let handle = match self.registry.lookup(&worker_id) {
                Ok(handle) => handle,
                Err(err) => {
                    let failure = TaskFailure::for_subtask(
                        spec.id.clone(),
                        FailureKind::UnknownWorker,
                        err.to_string(),
                    );
                    if state.first_failure.is_none() {
                        state.first_failure = Some(failure.clone());
                    }
                    state.failed.insert(spec.id.clone(), failure);
                    state.dispatched.insert(spec.id.clone());
                    continue;
                }
            };

            self.emit(WorkforceEvent::SubtaskDispatched {
                task_id: task_id.to_string(),
                subtask_id: spec.id.clone(),
                worker_id: worker_id.clone(),
                worker_name,
            })
            .await;
            state.dispatched.insert(spec.id.clone());
            in_flight.push(self.spawn_subtask(
                spec,
                worker_id,
                handle,
                Arc::clone(semaphore),
                cancel.clone(),
            ));
        }
    }

    /// Spawn one subtask onto the runtime, bounded by the parallelism
    /// semaphore. The worker is locked only once a permit is held.
    fn spawn_subtask(
        &self,
        spec: &SubtaskSpec,
        worker_id: String,
        handle: WorkerHandle,
        semaphore: Arc<Semaphore>,
        cancel: CancelHandle,
    ) -> BoxFuture<'static, SubtaskOutcome> {
        let subtask_id = spec.id.clone();
        let content = spec.content.clone();
        let budget = self.config.subtask_timeout;
        let join_id = subtask_id.clone();
        let join_worker = worker_id.clone();

        let join = tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return SubtaskOutcome {
                        subtask_id: subtask_id.clone(),
                        worker_id,
                        result: Err(TaskFailure::for_subtask(
                            subtask_id,
                            FailureKind::Cancelled,
                            "scheduler shut down",
                        )),
                    }
                }
            };
            if cancel.is_cancelled() {
                return SubtaskOutcome {
                    subtask_id: subtask_id.clone(),
                    worker_id,
                    result: Err(TaskFailure::for_subtask(
                        subtask_id,
                        FailureKind::Cancelled,
                        "cancelled before execution",
                    )),
                };
            }

            let mut worker = handle.lock().await;
            let outcome = timeout(budget, worker.execute(&subtask_id, &content)).await;
            let result = match outcome {
                Ok(Ok(contribution)) => Ok(contribution),
                Ok(Err(err)) => Err(TaskFailure::for_subtask(
                    subtask_id.clone(),
                    failure_kind(&err),
                    err.to_string(),
                )),
                Err(_) => {
                    worker.discard_unanswered_prompts();
                    Err(TaskFailure::for_subtask(
                        subtask_id.clone(),
                        FailureKind::ModelInvocation,
                        format!("subtask timed out after {:?}", budget),
                    ))
                }
            };
            SubtaskOutcome {
                subtask_id,
                worker_id,
                result,
            }
        });

        Box::pin(async move {
            match join.await {
                Ok(outcome) => outcome,
                Err(err) => SubtaskOutcome {
                    subtask_id: join_id.clone(),
                    worker_id: join_worker,
                    result: Err(TaskFailure::for_subtask(
                        join_id,
                        FailureKind::ModelInvocation,
                        format!("worker task panicked: {}", err),
                    )),
                },
            }
        })
    }

    /// Propagate failures to undispatched dependents until a fixpoint.
    ///
    /// `omitted` maps each skipped subtask to the *originally failed*
    /// subtask, not the intermediate skipped one, so chains report the
    /// true root cause.
    async fn sweep_omissions(&self, task_id: &str, specs: &[SubtaskSpec], state: &mut GraphState) {
        loop {
            let mut newly: Vec<(String, String)> = Vec::new();
            for spec in specs {
                if state.dispatched.contains(&spec.id) || state.omitted.contains_key(&spec.id) {
                    continue;
                }
                let origin = spec.depends_on.iter().find_map(|dep| {
                    if state.failed.contains_key(dep) {
                        Some(dep.clone())
                    } else {
                        state.omitted.get(dep).cloned()
                    }
                });
                if let Some(origin) = origin {
                    newly.push((spec.id.clone(), origin));
                }
            }
            if newly.is_empty() {
                break;
            }
            for (subtask_id, origin) in newly {
                state.omitted.insert(subtask_id.clone(), origin.clone());
                self.emit(WorkforceEvent::SubtaskOmitted {
                    task_id: task_id.to_string(),
                    subtask_id,
                    failed_dependency: origin,
                })
                .await;
            }
        }
    }
}

fn failure_kind(err: &WorkerError) -> FailureKind {
    match err {
        WorkerError::ModelInvocation(_) => FailureKind::ModelInvocation,
        WorkerError::ToolUnavailable(_) => FailureKind::ToolUnavailable,
        WorkerError::Authentication(_) => FailureKind::Authentication,
    }
}

/// Reject malformed subtask graphs before anything is dispatched:
/// duplicate ids, self-dependencies, dependencies on unknown ids, and
/// cycles.
fn validate_subtasks(subtasks: &[Task]) -> Result<(), TaskFailure> {
    let mut seen: HashSet<&str> = HashSet::new();
    for subtask in subtasks {
        if !seen.insert(subtask.id.as_str()) {
            return Err(TaskFailure::new(
                FailureKind::InvalidDependencies,
                format!("duplicate subtask id '{}'", subtask.id),
            ));
        }
    }
    for subtask in subtasks {
        for dep in &subtask.depends_on {
            if dep == &subtask.id {
                return Err(TaskFailure::new(
                    FailureKind::InvalidDependencies,
                    format!("subtask '{}' depends on itself", subtask.id),
                ));
            }
            if !seen.contains(dep.as_str()) {
                return Err(TaskFailure::new(
                    FailureKind::InvalidDependencies,
                    format!("subtask '{}' depends on unknown subtask '{}'", subtask.id, dep),
                ));
            }
        }
    }

    // Kahn's algorithm. Anything left with a nonzero in-degree is on a cycle.
    let mut in_degree: HashMap<&str, usize> = subtasks
        .iter()
        .map(|s| (s.id.as_str(), s.depends_on.len()))
        .collect();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for subtask in subtasks {
        for dep in &subtask.depends_on {
            dependents
                .entry(dep.as_str())
                .or_insert_with(Vec::new)
                .push(subtask.id.as_str());
        }
    }
    let mut queue: VecDeque<&str> = subtasks
        .iter()
        .filter(|s| s.depends_on.is_empty())
        .map(|s| s.id.as_str())
        .collect();
    let mut processed = 0usize;
    while let Some(id) = queue.pop_front() {
        processed += 1;
        if let Some(children) = dependents.get(id) {
            for child in children {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(child);
                    }
                }
            }
        }
    }
    if processed < subtasks.len() {
        let cyclic: Vec<&str> = subtasks
            .iter()
            .filter(|s| in_degree.get(s.id.as_str()).map(|d| *d > 0).unwrap_or(false))
            .map(|s| s.id.as_str())
            .collect();
        return Err(TaskFailure::new(
            FailureKind::InvalidDependencies,
            format!("dependency cycle involving subtasks: {}", cyclic.join(", ")),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_handle_shares_flag() {
        let handle = CancelHandle::new();
        let clone = handle.clone();
        assert!(!clone.is_cancelled());
        handle.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_validate_accepts_diamond() {
        let subtasks = vec![
            Task::new("a").with_id("a"),
            Task::new("b").with_id("b").with_dependency("a"),
            Task::new("c").with_id("c").with_dependency("a"),
            Task::new("d")
                .with_id("d")
                .with_dependency("b")
                .with_dependency("c"),
        ];
        assert!(validate_subtasks(&subtasks).is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let subtasks = vec![Task::new("a").with_id("x"), Task::new("b").with_id("x")];
        let failure = validate_subtasks(&subtasks).unwrap_err();
        assert_eq!(failure.kind, FailureKind::InvalidDependencies);
        assert!(failure.message.contains("duplicate"));
    }

    #[test]
    fn test_validate_rejects_self_dependency() {
        let subtasks = vec![Task::new("a").with_id("a").with_dependency("a")];
        let failure = validate_subtasks(&subtasks).unwrap_err();
        assert!(failure.message.contains("depends on itself"));
    }

    #[test]
    fn test_validate_rejects_unknown_dependency() {
        let subtasks = vec![Task::new("a").with_id("a").with_dependency("ghost")];
        let failure = validate_subtasks(&subtasks).unwrap_err();
        assert!(failure.message.contains("unknown subtask 'ghost'"));
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let subtasks = vec![
            Task::new("a").with_id("a").with_dependency("c"),
            Task::new("b").with_id("b").with_dependency("a"),
            Task::new("c").with_id("c").with_dependency("b"),
        ];
        let failure = validate_subtasks(&subtasks).unwrap_err();
        assert_eq!(failure.kind, FailureKind::InvalidDependencies);
        assert!(failure.message.contains("cycle"));
    }
}
