// src/workforce/mod.rs

pub mod blueprints;
pub mod capability;
pub mod clients;
pub mod composer;
pub mod config;
pub mod event;
pub mod invocation;
pub mod model_client;
pub mod orchestrator;
pub mod registry;
pub mod task;
pub mod tool;
pub mod tools;
pub mod worker;

// Export the two structs most callers start from, so they read as
// workforce::Workforce and workforce::Worker instead of the full paths.
pub use orchestrator::Workforce;
pub use worker::Worker;
