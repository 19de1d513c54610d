//! Semantic answer caching service
//!
//! Wraps the embedding provider and the cache store behind the two
//! operations the research path needs: probe before a run, store after.
//! Embedding failures degrade to a miss or a skipped store; caching is an
//! optimization, never a correctness dependency of the query path.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::research::ResearchOutcome;
use crate::domain::semantic_cache::{
    CachedAnswer, SemanticCache, SemanticCacheConfig, SemanticCacheStats, SemanticSearchParams,
    SemanticSearchResult, StoreOutcome,
};
use crate::domain::DomainError;

/// Semantic cache service over research answers
#[derive(Debug)]
pub struct ResearchCacheService {
    cache: Arc<dyn SemanticCache>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    config: SemanticCacheConfig,
}

impl ResearchCacheService {
    /// Create a new cache service with default configuration
    pub fn new(cache: Arc<dyn SemanticCache>, embedding_provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(cache, embedding_provider, SemanticCacheConfig::default())
    }

    /// Create a new cache service with custom configuration
    pub fn with_config(
        cache: Arc<dyn SemanticCache>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        config: SemanticCacheConfig,
    ) -> Self {
        Self {
            cache,
            embedding_provider,
            config,
        }
    }

    /// Check if semantic caching is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get the configuration
    pub fn config(&self) -> &SemanticCacheConfig {
        &self.config
    }

    /// Normalize a query for embedding: case and whitespace never carry
    /// meaning for similarity
    fn normalize_query(query: &str) -> String {
        query.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn search_params(&self) -> SemanticSearchParams {
        SemanticSearchParams::new(
            self.config.similarity_threshold,
            self.embedding_provider
                .encoder_version(&self.config.embedding_model),
        )
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest::new(
            &self.config.embedding_model,
            Self::normalize_query(query),
        );

        let response = self
            .embedding_provider
            .embed(request)
            .await
            .map_err(|e| DomainError::encoding(e.to_string()))?;

        Ok(response.into_vector())
    }

    /// Probe the cache for a semantically equivalent query.
    ///
    /// A hit short-circuits the whole research loop. An embedding failure
    /// degrades to a miss.
    pub async fn lookup(&self, query: &str) -> Result<Option<SemanticSearchResult>, DomainError> {
        if !self.config.enabled {
            return Ok(None);
        }

        let embedding = match self.embed_query(query).await {
            Ok(embedding) => embedding,
            Err(error) => {
                warn!(%error, "embedding failed, treating lookup as a miss");
                self.cache.record_miss().await?;
                return Ok(None);
            }
        };

        match self.cache.find_similar(&embedding, &self.search_params()).await? {
            Some(result) => {
                debug!(
                    similarity = result.similarity,
                    entry = result.entry.id(),
                    "semantic cache hit"
                );
                self.cache.record_hit(result.entry.id()).await?;
                Ok(Some(result))
            }
            None => {
                debug!(query, "semantic cache miss");
                self.cache.record_miss().await?;
                Ok(None)
            }
        }
    }

    /// Store a finished run's answer.
    ///
    /// Partial and failed runs are never stored. Returns `None` when the
    /// store was skipped (caching disabled, non-cacheable outcome, or
    /// embedding failure), otherwise the store outcome.
    pub async fn store(
        &self,
        query: &str,
        outcome: &ResearchOutcome,
    ) -> Result<Option<StoreOutcome>, DomainError> {
        if !self.config.enabled || !outcome.is_cacheable() {
            return Ok(None);
        }

        let embedding = match self.embed_query(query).await {
            Ok(embedding) => embedding,
            Err(error) => {
                warn!(%error, "embedding failed, skipping cache store");
                return Ok(None);
            }
        };

        let entry = CachedAnswer::new(
            format!("res:{}", Uuid::new_v4()),
            embedding,
            query,
            self.embedding_provider
                .encoder_version(&self.config.embedding_model),
            outcome.answer.clone(),
            outcome.trace.clone(),
            self.config.ttl(),
        );

        let store_outcome = self
            .cache
            .store_if_absent(entry, &self.search_params())
            .await?;

        if let StoreOutcome::Deduplicated { ref existing_id, similarity } = store_outcome {
            debug!(existing_id = %existing_id, similarity, "near-duplicate entry already cached");
        }

        Ok(Some(store_outcome))
    }

    /// Get cache statistics
    pub async fn stats(&self) -> Result<SemanticCacheStats, DomainError> {
        self.cache.stats().await
    }

    /// Drop all cached answers
    pub async fn clear(&self) -> Result<(), DomainError> {
        self.cache.clear().await
    }

    /// Remove expired entries
    pub async fn cleanup(&self) -> Result<usize, DomainError> {
        self.cache.cleanup_expired().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::research::{ReasoningTrace, TerminationReason};
    use crate::infrastructure::semantic_cache::InMemorySemanticCache;

    fn outcome(answer: &str, complete: bool) -> ResearchOutcome {
        ResearchOutcome {
            answer: answer.into(),
            complete,
            reason: if complete {
                TerminationReason::ContextSufficient
            } else {
                TerminationReason::MaxIterations
            },
            trace: ReasoningTrace::default(),
        }
    }

    fn service_with_provider(provider: MockEmbeddingProvider) -> ResearchCacheService {
        ResearchCacheService::with_config(
            Arc::new(InMemorySemanticCache::new(100)),
            Arc::new(provider),
            SemanticCacheConfig::new().with_similarity_threshold(0.92),
        )
    }

    #[tokio::test]
    async fn test_store_then_lookup_same_query() {
        let service = service_with_provider(MockEmbeddingProvider::new("mock", 64));

        let stored = service
            .store("What type is Bulbasaur?", &outcome("Grass.", true))
            .await
            .unwrap();
        assert!(matches!(stored, Some(StoreOutcome::Inserted)));

        let hit = service.lookup("What type is Bulbasaur?").await.unwrap().unwrap();
        assert_eq!(hit.entry.answer(), "Grass.");
        assert!(hit.similarity > 0.99);
    }

    #[tokio::test]
    async fn test_lookup_normalizes_case_and_whitespace() {
        let service = service_with_provider(MockEmbeddingProvider::new("mock", 64));

        service
            .store("What type is Bulbasaur?", &outcome("Grass.", true))
            .await
            .unwrap();

        let hit = service
            .lookup("  what type IS bulbasaur?  ")
            .await
            .unwrap();

        assert!(hit.is_some());
    }

    #[tokio::test]
    async fn test_paraphrase_hits_with_similar_vectors() {
        let provider = MockEmbeddingProvider::new("mock", 3)
            .with_vector("what is pikachu's type?", vec![1.0, 0.05, 0.0])
            .with_vector("what type is pikachu?", vec![0.99, 0.1, 0.0]);
        let service = service_with_provider(provider);

        service
            .store("What is Pikachu's type?", &outcome("Electric.", true))
            .await
            .unwrap();

        let hit = service.lookup("What type is Pikachu?").await.unwrap().unwrap();
        assert_eq!(hit.entry.answer(), "Electric.");
    }

    #[tokio::test]
    async fn test_unrelated_query_misses() {
        let service = service_with_provider(MockEmbeddingProvider::new("mock", 64));

        service
            .store("What type is Bulbasaur?", &outcome("Grass.", true))
            .await
            .unwrap();

        let miss = service
            .lookup("Which Pokemon live in caves?")
            .await
            .unwrap();

        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_partial_outcomes_never_stored() {
        let service = service_with_provider(MockEmbeddingProvider::new("mock", 64));

        let stored = service
            .store("What type is Bulbasaur?", &outcome("maybe grass?", false))
            .await
            .unwrap();

        assert!(stored.is_none());
        assert_eq!(service.stats().await.unwrap().total_entries, 0);
    }

    #[tokio::test]
    async fn test_store_is_idempotent_per_cluster() {
        let service = service_with_provider(MockEmbeddingProvider::new("mock", 64));

        let first = service
            .store("What type is Bulbasaur?", &outcome("Grass.", true))
            .await
            .unwrap()
            .unwrap();
        let second = service
            .store("What type is Bulbasaur?", &outcome("Grass again.", true))
            .await
            .unwrap()
            .unwrap();

        assert!(first.is_inserted());
        assert!(!second.is_inserted());
        assert_eq!(service.stats().await.unwrap().total_entries, 1);
    }

    #[tokio::test]
    async fn test_embedding_failure_degrades_to_miss() {
        let service =
            service_with_provider(MockEmbeddingProvider::new("mock", 64).with_error("encoder down"));

        let result = service.lookup("What type is Bulbasaur?").await.unwrap();

        assert!(result.is_none());
        assert_eq!(service.stats().await.unwrap().misses, 1);
    }

    #[tokio::test]
    async fn test_embedding_failure_skips_store() {
        let service =
            service_with_provider(MockEmbeddingProvider::new("mock", 64).with_error("encoder down"));

        let stored = service
            .store("What type is Bulbasaur?", &outcome("Grass.", true))
            .await
            .unwrap();

        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_disabled_cache_always_misses() {
        let service = ResearchCacheService::with_config(
            Arc::new(InMemorySemanticCache::new(100)),
            Arc::new(MockEmbeddingProvider::new("mock", 64)),
            SemanticCacheConfig::new().with_enabled(false),
        );

        service
            .store("query", &outcome("answer", true))
            .await
            .unwrap();

        assert!(service.lookup("query").await.unwrap().is_none());
    }
}
