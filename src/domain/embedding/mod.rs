//! Embedding domain models and traits
//!
//! Queries are compared in vector space: the provider turns text into a
//! fixed-length vector and `nearest_neighbor` finds the closest stored
//! vector under cosine similarity.

mod provider;
mod request;
mod response;

pub use provider::EmbeddingProvider;
pub use request::EmbeddingRequest;
pub use response::{
    cosine_similarity, nearest_neighbor, Embedding, EmbeddingResponse, EmbeddingUsage,
};

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
