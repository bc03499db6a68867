//! Tool invocation with timeout, bounded retry, and audit records.
//!
//! [`ToolInvoker`] is the only path from a worker to a tool backend. Each
//! call is wrapped in the policy timeout; transient failures ([`ToolError`]
//! variants where `is_transient()` holds) are retried with exponential
//! backoff up to the attempt ceiling. Non-transient failures are returned
//! immediately without a second attempt.

use crate::workforce::tool::{ToolError, ToolRef, ToolResult};
use serde_json::Value;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Hard ceiling on attempts per invocation. Policies may lower
/// `max_attempts` but can never raise it past this.
pub const ATTEMPT_CAP: u32 = 2;

/// Tunables governing a single tool invocation.
#[derive(Debug, Clone)]
pub struct InvocationPolicy {
    /// Wall-clock budget per attempt.
    pub timeout: Duration,
    /// Attempts per invocation, counting the first. Clamped to
    /// [`ATTEMPT_CAP`].
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per subsequent attempt.
    pub backoff_base: Duration,
}

impl Default for InvocationPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: ATTEMPT_CAP,
            backoff_base: Duration::from_millis(500),
        }
    }
}

impl InvocationPolicy {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1).min(ATTEMPT_CAP);
        self
    }

    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }
}

/// One entry in a contribution's tool audit trail.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool that was invoked.
    pub tool_name: String,
    /// Arguments exactly as parsed from the model's tool call.
    pub arguments: Value,
    /// Whether the invocation ultimately succeeded.
    pub ok: bool,
    /// Short outcome summary: payload feedback on success, error text on
    /// failure.
    pub summary: String,
}

/// Executes tool calls under an [`InvocationPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ToolInvoker {
    policy: InvocationPolicy,
}

impl ToolInvoker {
    pub fn new(policy: InvocationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &InvocationPolicy {
        &self.policy
    }

    /// Invoke `tool` with `arguments`, retrying transient failures.
    ///
    /// Never returns an `Err`; all failure modes are folded into the
    /// returned [`ToolResult`] so callers can decide whether to feed the
    /// failure back to the model or escalate it.
    pub async fn invoke(&self, tool: &ToolRef, arguments: Value) -> ToolResult {
        let max_attempts = self.policy.max_attempts.max(1).min(ATTEMPT_CAP);
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let outcome = timeout(self.policy.timeout, tool.backend().invoke(arguments.clone())).await;

            let error = match outcome {
                Ok(Ok(payload)) => return ToolResult::success(payload).with_attempts(attempt),
                Ok(Err(err)) => err,
                Err(_) => ToolError::Timeout,
            };

            if !error.is_transient() || attempt >= max_attempts {
                return ToolResult::failure(error).with_attempts(attempt);
            }

            let backoff = self.policy.backoff_base * 2u32.pow(attempt - 1);
            log::debug!(
                "Tool '{}' attempt {} failed ({}), retrying in {:?}",
                tool.name(),
                attempt,
                error,
                backoff
            );
            sleep(backoff).await;
        }
    }
}
