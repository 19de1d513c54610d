//! In-memory semantic cache implementation

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::embedding::cosine_similarity;
use crate::domain::semantic_cache::{
    CachedAnswer, SemanticCache, SemanticCacheStats, SemanticSearchParams, SemanticSearchResult,
    StoreOutcome,
};
use crate::domain::DomainError;

/// In-memory semantic cache using linear search
///
/// Suitable for a single process; the cache lives and dies with it.
#[derive(Debug)]
pub struct InMemorySemanticCache {
    entries: RwLock<HashMap<String, CachedAnswer>>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    deduplicated: AtomicU64,
}

impl InMemorySemanticCache {
    /// Create a new in-memory semantic cache
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            deduplicated: AtomicU64::new(0),
        }
    }

    /// Evict oldest entries if the cache is full
    fn evict_if_needed(&self, entries: &mut HashMap<String, CachedAnswer>) {
        if entries.len() < self.max_entries {
            return;
        }

        if let Some(oldest_id) = entries
            .iter()
            .min_by_key(|(_, entry)| entry.created_at())
            .map(|(id, _)| id.clone())
        {
            entries.remove(&oldest_id);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Best match among non-expired, version-compatible entries.
    ///
    /// Ties at the maximum similarity resolve to the earliest-created
    /// entry so repeated lookups are reproducible.
    fn best_match(
        entries: &HashMap<String, CachedAnswer>,
        embedding: &[f32],
        params: &SemanticSearchParams,
    ) -> Option<SemanticSearchResult> {
        let mut best: Option<(&CachedAnswer, f32)> = None;

        for entry in entries.values() {
            if entry.is_expired() || entry.encoder_version() != params.encoder_version {
                continue;
            }

            let similarity = cosine_similarity(embedding, entry.embedding());

            if similarity < params.min_similarity {
                continue;
            }

            best = match best {
                None => Some((entry, similarity)),
                Some((current, current_similarity)) => {
                    if similarity > current_similarity
                        || (similarity == current_similarity
                            && entry.created_at() < current.created_at())
                    {
                        Some((entry, similarity))
                    } else {
                        Some((current, current_similarity))
                    }
                }
            };
        }

        best.map(|(entry, similarity)| SemanticSearchResult::new(entry.clone(), similarity))
    }

    fn read_entries(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, CachedAnswer>>, DomainError> {
        self.entries
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_entries(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, CachedAnswer>>, DomainError> {
        self.entries
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl SemanticCache for InMemorySemanticCache {
    async fn find_similar(
        &self,
        embedding: &[f32],
        params: &SemanticSearchParams,
    ) -> Result<Option<SemanticSearchResult>, DomainError> {
        let entries = self.read_entries()?;

        Ok(Self::best_match(&entries, embedding, params))
    }

    async fn store_if_absent(
        &self,
        entry: CachedAnswer,
        params: &SemanticSearchParams,
    ) -> Result<StoreOutcome, DomainError> {
        // Re-check and insert under one write lock: two concurrent stores
        // of the same cluster must yield exactly one entry.
        let mut entries = self.write_entries()?;

        if let Some(existing) = Self::best_match(&entries, entry.embedding(), params) {
            self.deduplicated.fetch_add(1, Ordering::Relaxed);

            return Ok(StoreOutcome::Deduplicated {
                existing_id: existing.entry.id().to_string(),
                similarity: existing.similarity,
            });
        }

        self.evict_if_needed(&mut entries);
        entries.insert(entry.id().to_string(), entry);

        Ok(StoreOutcome::Inserted)
    }

    async fn get(&self, id: &str) -> Result<Option<CachedAnswer>, DomainError> {
        let entries = self.read_entries()?;

        Ok(entries.get(id).cloned().filter(|e| !e.is_expired()))
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut entries = self.write_entries()?;

        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.deduplicated.store(0, Ordering::Relaxed);

        Ok(())
    }

    async fn stats(&self) -> Result<SemanticCacheStats, DomainError> {
        let entries = self.read_entries()?;

        Ok(SemanticCacheStats {
            total_entries: entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
        })
    }

    async fn size(&self) -> Result<usize, DomainError> {
        let entries = self.read_entries()?;

        Ok(entries.len())
    }

    async fn record_hit(&self, id: &str) -> Result<(), DomainError> {
        self.hits.fetch_add(1, Ordering::Relaxed);

        let mut entries = self.write_entries()?;

        if let Some(entry) = entries.get_mut(id) {
            entry.increment_hits();
        }

        Ok(())
    }

    async fn record_miss(&self) -> Result<(), DomainError> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn cleanup_expired(&self) -> Result<usize, DomainError> {
        let mut entries = self.write_entries()?;

        let expired_keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(id, _)| id.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            entries.remove(&key);
        }

        Ok(count)
    }
}
