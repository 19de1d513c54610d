//! Semantic cache trait

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CachedAnswer, SemanticSearchParams, SemanticSearchResult};
use crate::domain::DomainError;

/// Outcome of an atomic store attempt
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    /// The entry was inserted as a new cluster representative
    Inserted,
    /// A sufficiently similar entry already exists; the write was a no-op
    Deduplicated {
        existing_id: String,
        similarity: f32,
    },
}

impl StoreOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Statistics for the semantic cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemanticCacheStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Total cache hits
    pub hits: u64,
    /// Total cache misses
    pub misses: u64,
    /// Total entries evicted
    pub evictions: u64,
    /// Store attempts dropped because a near-duplicate already existed
    pub deduplicated: u64,
}

impl SemanticCacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;

        if total == 0 {
            return 0.0;
        }

        self.hits as f32 / total as f32
    }
}

/// Trait for semantic (vector-based) answer caching
#[async_trait]
pub trait SemanticCache: Send + Sync + Debug {
    /// Find the most similar non-expired entry at or above the threshold.
    ///
    /// Entries embedded under a different encoder version are skipped. When
    /// several entries tie at the maximum similarity, the earliest-created
    /// one wins.
    async fn find_similar(
        &self,
        embedding: &[f32],
        params: &SemanticSearchParams,
    ) -> Result<Option<SemanticSearchResult>, DomainError>;

    /// Atomically re-check for a near-duplicate and insert.
    ///
    /// The duplicate check and the insertion happen under one write lock so
    /// that two concurrent stores of semantically identical queries produce
    /// exactly one entry (first writer wins).
    async fn store_if_absent(
        &self,
        entry: CachedAnswer,
        params: &SemanticSearchParams,
    ) -> Result<StoreOutcome, DomainError>;

    /// Get an entry by ID
    async fn get(&self, id: &str) -> Result<Option<CachedAnswer>, DomainError>;

    /// Clear all entries
    async fn clear(&self) -> Result<(), DomainError>;

    /// Get cache statistics
    async fn stats(&self) -> Result<SemanticCacheStats, DomainError>;

    /// Get the number of entries
    async fn size(&self) -> Result<usize, DomainError>;

    /// Record a cache hit
    async fn record_hit(&self, id: &str) -> Result<(), DomainError>;

    /// Record a cache miss
    async fn record_miss(&self) -> Result<(), DomainError>;

    /// Clean up expired entries
    async fn cleanup_expired(&self) -> Result<usize, DomainError>;
}
