//! Infrastructure services

mod cache_service;
mod research_service;

pub use cache_service::ResearchCacheService;
pub use research_service::{ResearchAnswer, ResearchService};
