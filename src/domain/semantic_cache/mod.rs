//! Semantic cache domain models and traits
//!
//! Maps semantically clustered queries to previously synthesized answers.
//! A lookup that scores at or above the similarity threshold short-circuits
//! the whole research loop.

mod config;
mod entry;
mod repository;

pub use config::SemanticCacheConfig;
pub use entry::{CachedAnswer, SemanticSearchParams, SemanticSearchResult};
pub use repository::{SemanticCache, SemanticCacheStats, StoreOutcome};
