//! Reasoning trace types
//!
//! The ordered iteration records of one research run. Attached to cache
//! entries so a cached answer can show how it was derived.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one function invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallOutcome {
    Success { value: Value },
    Failure { message: String },
}

impl CallOutcome {
    pub fn success(value: Value) -> Self {
        Self::Success { value }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// One function call and its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub function: String,
    pub arguments: Value,
    pub outcome: CallOutcome,
}

impl CallRecord {
    pub fn new(function: impl Into<String>, arguments: Value, outcome: CallOutcome) -> Self {
        Self {
            function: function.into(),
            arguments,
            outcome,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_failure()
    }
}

/// Everything that happened in one loop iteration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Zero-based iteration index
    pub index: u32,
    /// Calls issued this iteration, in selection order
    pub calls: Vec<CallRecord>,
    /// Short description of what this iteration added to the context
    pub summary: String,
}

impl IterationRecord {
    pub fn new(index: u32, calls: Vec<CallRecord>, summary: impl Into<String>) -> Self {
        Self {
            index,
            calls,
            summary: summary.into(),
        }
    }

    pub fn failure_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_failure()).count()
    }
}

/// The full reasoning trace of a research run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasoningTrace {
    pub iterations: Vec<IterationRecord>,
}

impl ReasoningTrace {
    pub fn new(iterations: Vec<IterationRecord>) -> Self {
        Self { iterations }
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn total_calls(&self) -> usize {
        self.iterations.iter().map(|i| i.calls.len()).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.iterations.iter().map(|i| i.failure_count()).sum()
    }
}
