//! Research query service
//!
//! The top-level request path: probe the semantic cache, run the research
//! loop on a miss, store complete answers back.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ResearchCacheService;
use crate::domain::research::{CancelHandle, ReasoningTrace, ResearchEngine};
use crate::domain::semantic_cache::SemanticCacheStats;
use crate::domain::DomainError;

/// Answer to a research query, from cache or from a fresh run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchAnswer {
    /// The answer text
    pub answer: String,
    /// True when served from the semantic cache
    pub cached: bool,
    /// False when the producing run was cut short
    pub complete: bool,
    /// Similarity score of the cache hit, when cached
    pub similarity: Option<f32>,
    /// The reasoning trace that produced the answer
    pub trace: ReasoningTrace,
}

/// End-to-end research query handling
#[derive(Debug)]
pub struct ResearchService {
    cache: Arc<ResearchCacheService>,
    engine: Arc<ResearchEngine>,
}

impl ResearchService {
    pub fn new(cache: Arc<ResearchCacheService>, engine: Arc<ResearchEngine>) -> Self {
        Self { cache, engine }
    }

    /// Answer a research query.
    ///
    /// Independent queries may run concurrently; the semantic cache is the
    /// only shared state.
    pub async fn answer(
        &self,
        query: &str,
        cancel: &CancelHandle,
    ) -> Result<ResearchAnswer, DomainError> {
        if let Some(hit) = self.cache.lookup(query).await? {
            info!(
                query,
                similarity = hit.similarity,
                "answered from semantic cache"
            );

            return Ok(ResearchAnswer {
                answer: hit.entry.answer().to_string(),
                cached: true,
                complete: true,
                similarity: Some(hit.similarity),
                trace: hit.entry.trace().clone(),
            });
        }

        let outcome = self.engine.run(query, cancel).await?;

        if outcome.is_cacheable() {
            if let Err(error) = self.cache.store(query, &outcome).await {
                // a failed store must not fail the answer
                warn!(%error, "failed to store answer in semantic cache");
            }
        }

        Ok(ResearchAnswer {
            answer: outcome.answer,
            cached: false,
            complete: outcome.complete,
            similarity: None,
            trace: outcome.trace,
        })
    }

    /// Get cache statistics
    pub async fn cache_stats(&self) -> Result<SemanticCacheStats, DomainError> {
        self.cache.stats().await
    }

    /// Drop all cached answers
    pub async fn clear_cache(&self) -> Result<(), DomainError> {
        self.cache.clear().await
    }

    /// Remove expired cache entries
    pub async fn cleanup_cache(&self) -> Result<usize, DomainError> {
        self.cache.cleanup().await
    }
}
