//! Answer synthesis trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for turning accumulated context into a final answer.
///
/// `complete` is false when the run was cut short; implementations should
/// answer from what is available and say so.
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync + Debug {
    async fn synthesize(
        &self,
        query: &str,
        context: &str,
        complete: bool,
    ) -> Result<String, DomainError>;
}
