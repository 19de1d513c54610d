//! Function selector trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::Selection;
use crate::domain::registry::FunctionRegistry;
use crate::domain::DomainError;

/// Trait for function selection strategies.
///
/// `context` is the rendered accumulated context of the run so far; empty
/// on the first iteration. Implementations own their retry policy and
/// return `DomainError::Selection` once retries are exhausted.
#[async_trait]
pub trait FunctionSelector: Send + Sync + Debug {
    async fn select(
        &self,
        query: &str,
        context: &str,
        registry: &FunctionRegistry,
    ) -> Result<Selection, DomainError>;
}
