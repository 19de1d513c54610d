//! Cached answer entry and search types

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::research::ReasoningTrace;

/// A cached research answer
///
/// Each entry is the representative of one similarity cluster: the store
/// path refuses to insert a second entry within the configured threshold
/// of an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAnswer {
    /// Unique identifier for this entry
    id: String,
    /// The embedding vector for similarity search
    embedding: Vec<f32>,
    /// The query text this entry was created from
    query_text: String,
    /// Encoder version that produced the embedding
    encoder_version: String,
    /// The synthesized answer
    answer: String,
    /// The research trace that produced the answer
    trace: ReasoningTrace,
    /// When this entry was created (unix seconds)
    created_at: u64,
    /// When this entry expires (unix seconds)
    expires_at: u64,
    /// Number of cache hits
    hit_count: u32,
}

impl CachedAnswer {
    /// Create a new cached answer
    pub fn new(
        id: impl Into<String>,
        embedding: Vec<f32>,
        query_text: impl Into<String>,
        encoder_version: impl Into<String>,
        answer: impl Into<String>,
        trace: ReasoningTrace,
        ttl: Duration,
    ) -> Self {
        let now = unix_now();

        Self {
            id: id.into(),
            embedding,
            query_text: query_text.into(),
            encoder_version: encoder_version.into(),
            answer: answer.into(),
            trace,
            created_at: now,
            expires_at: now + ttl.as_secs(),
            hit_count: 0,
        }
    }

    /// Get the entry ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the embedding vector
    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    /// Get the query text this entry represents
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Get the encoder version that produced the embedding
    pub fn encoder_version(&self) -> &str {
        &self.encoder_version
    }

    /// Get the synthesized answer
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Get the reasoning trace
    pub fn trace(&self) -> &ReasoningTrace {
        &self.trace
    }

    /// Get creation timestamp
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Get expiration timestamp
    pub fn expires_at(&self) -> u64 {
        self.expires_at
    }

    /// Get hit count
    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    /// Check if the entry is expired
    pub fn is_expired(&self) -> bool {
        unix_now() >= self.expires_at
    }

    /// Increment hit count
    pub fn increment_hits(&mut self) {
        self.hit_count += 1;
    }

    #[cfg(test)]
    pub(crate) fn force_expire(&mut self) {
        self.expires_at = 0;
    }
}

fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Result of a semantic cache search
#[derive(Debug, Clone)]
pub struct SemanticSearchResult {
    /// The matching cached entry
    pub entry: CachedAnswer,
    /// Similarity score (0.0 to 1.0)
    pub similarity: f32,
}

impl SemanticSearchResult {
    /// Create a new search result
    pub fn new(entry: CachedAnswer, similarity: f32) -> Self {
        Self { entry, similarity }
    }
}

/// Search parameters for a semantic cache lookup
#[derive(Debug, Clone)]
pub struct SemanticSearchParams {
    /// Minimum similarity for a hit
    pub min_similarity: f32,
    /// Only entries embedded under this encoder version are comparable
    pub encoder_version: String,
}

impl SemanticSearchParams {
    /// Create new search params
    pub fn new(min_similarity: f32, encoder_version: impl Into<String>) -> Self {
        Self {
            min_similarity,
            encoder_version: encoder_version.into(),
        }
    }
}
