//! Research loop configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds for one research run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Hard cap on loop iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Corrective retries the selector gets for a malformed proposal
    #[serde(default = "default_selector_retries")]
    pub selector_retries: u32,

    /// Timeout per function call in seconds
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,

    /// Wall-clock budget for a whole run in seconds
    #[serde(default = "default_run_budget_secs")]
    pub run_budget_secs: u64,
}

fn default_max_iterations() -> u32 {
    5
}

fn default_selector_retries() -> u32 {
    2
}

fn default_call_timeout_secs() -> u64 {
    30
}

fn default_run_budget_secs() -> u64 {
    120
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            selector_retries: default_selector_retries(),
            call_timeout_secs: default_call_timeout_secs(),
            run_budget_secs: default_run_budget_secs(),
        }
    }
}

impl ResearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    pub fn run_budget(&self) -> Duration {
        Duration::from_secs(self.run_budget_secs)
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_selector_retries(mut self, retries: u32) -> Self {
        self.selector_retries = retries;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout_secs = timeout.as_secs();
        self
    }

    pub fn with_run_budget(mut self, budget: Duration) -> Self {
        self.run_budget_secs = budget.as_secs();
        self
    }
}
