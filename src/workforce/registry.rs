//! Worker registry and capability-based routing.
//!
//! The registry owns every hired [`Worker`] behind a
//! [`WorkerHandle`] (an async mutex), remembers registration order, and
//! keeps an immutable [`WorkerProfile`] snapshot per worker so routing
//! decisions never need to lock a live worker.
//!
//! Routing rule: a worker is eligible for a subtask when its capability
//! set is a superset of the subtask's required tags. When several workers
//! are eligible, the earliest-registered one wins. Registration order is
//! therefore part of the API contract, not an accident.

use crate::workforce::capability::{format_tags, CapabilityTag};
use crate::workforce::worker::{Worker, WorkerProfile};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to a live worker. Execution locks the worker for the
/// duration of one subtask, so a single worker never runs two subtasks
/// concurrently.
pub type WorkerHandle = Arc<Mutex<Worker>>;

/// Errors produced by registry operations.
#[derive(Debug, Clone)]
pub enum RegistryError {
    /// No worker is registered under the given id.
    UnknownWorker(String),
    /// A worker with the same id is already registered.
    DuplicateWorker(String),
    /// No registered worker covers the required capability set.
    NoCapabilityMatch(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownWorker(id) => write!(f, "Worker not found: {}", id),
            RegistryError::DuplicateWorker(id) => write!(f, "Duplicate worker: {}", id),
            RegistryError::NoCapabilityMatch(tags) => {
                write!(f, "No registered worker covers capabilities: {}", tags)
            }
        }
    }
}

impl Error for RegistryError {}

/// Holds workers keyed by id, preserving registration order for routing
/// tie-breaks.
#[derive(Default)]
pub struct WorkerRegistry {
    workers: HashMap<String, WorkerHandle>,
    profiles: HashMap<String, WorkerProfile>,
    order: Vec<String>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a worker under its own id.
    ///
    /// Fails with [`RegistryError::DuplicateWorker`] if the id is taken;
    /// the existing worker is never silently replaced.
    pub fn register(&mut self, worker: Worker) -> Result<(), RegistryError> {
        if self.workers.contains_key(&worker.id) {
            return Err(RegistryError::DuplicateWorker(worker.id.clone()));
        }
        let profile = worker.profile();
        let id = worker.id.clone();
        self.workers.insert(id.clone(), Arc::new(Mutex::new(worker)));
        self.profiles.insert(id.clone(), profile);
        self.order.push(id);
        Ok(())
    }

    /// Fetch the handle for a worker by id.
    pub fn lookup(&self, id: &str) -> Result<WorkerHandle, RegistryError> {
        self.workers
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownWorker(id.to_string()))
    }

    /// Routing profiles of all workers, in registration order.
    pub fn profiles(&self) -> Vec<&WorkerProfile> {
        self.order
            .iter()
            .filter_map(|id| self.profiles.get(id))
            .collect()
    }

    /// Profiles of every worker covering all of `required`, in
    /// registration order.
    pub fn list_by_capability(&self, required: &[CapabilityTag]) -> Vec<&WorkerProfile> {
        self.profiles()
            .into_iter()
            .filter(|profile| profile.covers(required))
            .collect()
    }

    /// Pick the worker for a subtask: the earliest-registered profile whose
    /// capability set covers every required tag.
    ///
    /// An empty `required` slice matches the first registered worker.
    pub fn select_worker(&self, required: &[CapabilityTag]) -> Result<&WorkerProfile, RegistryError> {
        for id in &self.order {
            if let Some(profile) = self.profiles.get(id) {
                if profile.covers(required) {
                    return Ok(profile);
                }
            }
        }
        Err(RegistryError::NoCapabilityMatch(format_tags(required)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
