//! The research loop state machine
//!
//! Drives select -> execute -> fold until the selector is satisfied or a
//! bound trips. Call failures are folded into context as notices rather
//! than aborting the run, so a later selection round can route around a
//! broken function or answer from what it has.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::{
    AnswerSynthesizer, CallOutcome, CallRecord, CancelHandle, IterationRecord, ResearchConfig,
    ResearchContext, ResearchOutcome, TerminationReason,
};
use crate::domain::execution::FunctionExecutor;
use crate::domain::registry::FunctionRegistry;
use crate::domain::selector::{FunctionSelector, Selection};
use crate::domain::DomainError;

/// The orchestration loop over one query
#[derive(Debug)]
pub struct ResearchEngine {
    registry: Arc<FunctionRegistry>,
    selector: Arc<dyn FunctionSelector>,
    executor: Arc<dyn FunctionExecutor>,
    synthesizer: Arc<dyn AnswerSynthesizer>,
    config: ResearchConfig,
}

impl ResearchEngine {
    pub fn new(
        registry: Arc<FunctionRegistry>,
        selector: Arc<dyn FunctionSelector>,
        executor: Arc<dyn FunctionExecutor>,
        synthesizer: Arc<dyn AnswerSynthesizer>,
        config: ResearchConfig,
    ) -> Self {
        Self {
            registry,
            selector,
            executor,
            synthesizer,
            config,
        }
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Run the loop to completion.
    ///
    /// Returns `Ok` with a complete or partial outcome; `Err` only for
    /// cancellation and synthesis failure, which produce no answer at all.
    pub async fn run(
        &self,
        query: &str,
        cancel: &CancelHandle,
    ) -> Result<ResearchOutcome, DomainError> {
        let deadline = Instant::now() + self.config.run_budget();
        let mut context = ResearchContext::new(query);
        let mut reason = TerminationReason::MaxIterations;

        for iteration in 0..self.config.max_iterations {
            if cancel.is_cancelled() {
                info!(query, iteration, "research run cancelled");
                return Err(DomainError::Cancelled);
            }

            if Instant::now() >= deadline {
                warn!(query, iteration, "research run budget exhausted");
                reason = TerminationReason::BudgetExhausted;
                break;
            }

            let rendered = context.render();
            let selection = match self
                .selector
                .select(query, &rendered, &self.registry)
                .await
            {
                Ok(selection) => selection,
                Err(error) => {
                    warn!(query, iteration, %error, "selector exhausted its retries");
                    reason = TerminationReason::SelectorExhausted;
                    break;
                }
            };

            if selection.is_empty() {
                debug!(query, iteration, "selector returned no calls, context sufficient");
                reason = TerminationReason::ContextSufficient;
                break;
            }

            let record = self.execute_selection(iteration, selection).await;
            debug!(query, iteration, summary = %record.summary, "iteration folded");
            context.fold_iteration(record);
        }

        let complete = reason == TerminationReason::ContextSufficient;
        let answer = self
            .synthesizer
            .synthesize(query, &context.render(), complete)
            .await?;

        info!(
            query,
            iterations = context.iteration_count(),
            complete,
            ?reason,
            "research run finished"
        );

        Ok(ResearchOutcome {
            answer,
            complete,
            reason,
            trace: context.into_trace(),
        })
    }

    /// Execute every call in the selection concurrently and wait for all
    /// of them to settle. A timeout counts as that call's failure.
    async fn execute_selection(&self, iteration: u32, selection: Selection) -> IterationRecord {
        let timeout = self.config.call_timeout();

        let futures = selection.calls.into_iter().map(|call| {
            let executor = Arc::clone(&self.executor);
            async move {
                let outcome =
                    match tokio::time::timeout(timeout, executor.invoke(&call.name, &call.arguments))
                        .await
                    {
                        Ok(Ok(value)) => CallOutcome::success(value),
                        Ok(Err(error)) => CallOutcome::failure(error.to_string()),
                        Err(_) => CallOutcome::failure(format!(
                            "timed out after {}s",
                            timeout.as_secs()
                        )),
                    };

                CallRecord::new(call.name, call.arguments, outcome)
            }
        });

        let calls = join_all(futures).await;
        let failures = calls.iter().filter(|c| c.is_failure()).count();
        let summary = format!("{} calls, {} failed", calls.len(), failures);

        IterationRecord::new(iteration, calls, summary)
    }
}
