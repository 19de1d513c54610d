//! Accumulated research context

use super::{IterationRecord, ReasoningTrace};

/// Context accumulated over the iterations of one research run.
///
/// Owned exclusively by that run; the essential output survives in the
/// reasoning trace, not in this type.
#[derive(Debug, Clone)]
pub struct ResearchContext {
    query: String,
    iterations: Vec<IterationRecord>,
}

impl ResearchContext {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            iterations: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn iteration_count(&self) -> u32 {
        self.iterations.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// Fold one iteration's results (successes and failure notices alike)
    /// into the context
    pub fn fold_iteration(&mut self, record: IterationRecord) {
        self.iterations.push(record);
    }

    /// Render the context for a reasoning prompt.
    ///
    /// Failures are rendered as explicit notices so the next selection
    /// round can route around them.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for iteration in &self.iterations {
            for call in &iteration.calls {
                let args =
                    serde_json::to_string(&call.arguments).unwrap_or_else(|_| "{}".to_string());

                match &call.outcome {
                    super::CallOutcome::Success { value } => {
                        let rendered =
                            serde_json::to_string(value).unwrap_or_else(|_| "null".to_string());
                        out.push_str(&format!("{}({}) => {}\n", call.function, args, rendered));
                    }
                    super::CallOutcome::Failure { message } => {
                        out.push_str(&format!(
                            "{}({}) => FAILED: {}\n",
                            call.function, args, message
                        ));
                    }
                }
            }
        }

        out
    }

    /// Consume the context, keeping the trace
    pub fn into_trace(self) -> ReasoningTrace {
        ReasoningTrace::new(self.iterations)
    }
}
