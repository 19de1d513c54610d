//! Research run outcomes

use serde::{Deserialize, Serialize};

use super::ReasoningTrace;

/// Why a research run stopped iterating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The selector judged the accumulated context sufficient
    ContextSufficient,
    /// The selector could not produce a usable proposal within its retries
    SelectorExhausted,
    /// The iteration cap was reached
    MaxIterations,
    /// The wall-clock budget ran out
    BudgetExhausted,
}

/// Result of a finished research run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchOutcome {
    /// Synthesized answer text
    pub answer: String,
    /// False when the run was cut short and the answer is best-effort
    pub complete: bool,
    /// Why iteration stopped
    pub reason: TerminationReason,
    /// The full reasoning trace
    pub trace: ReasoningTrace,
}

impl ResearchOutcome {
    /// Only complete runs are eligible for the semantic cache; partial
    /// answers would otherwise be served back for every paraphrase.
    pub fn is_cacheable(&self) -> bool {
        self.complete
    }
}
