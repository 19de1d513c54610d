//! Pokemon Research Agent
//!
//! Answers open-ended research questions about Pokemon by iteratively
//! selecting and executing PokeAPI functions through a reasoning engine,
//! with a semantic cache that short-circuits paraphrased repeats:
//! - Function registry built from the PokeAPI surface
//! - LLM-driven function selection with corrective retries
//! - Bounded research loop with per-call timeouts and cancellation
//! - Embedding-based semantic answer cache

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use domain::embedding::EmbeddingProvider;
use domain::execution::FunctionExecutor;
use domain::research::{AnswerSynthesizer, ResearchEngine};
use domain::selector::FunctionSelector;
use domain::semantic_cache::SemanticCache;
use domain::LlmProvider;
use infrastructure::embedding::OpenAiEmbeddingProvider;
use infrastructure::llm::OpenAiProvider;
use infrastructure::pokeapi::{builtin_registry, PokeApiClient, PokeApiExecutor};
use infrastructure::reasoning::{LlmAnswerSynthesizer, LlmFunctionSelector};
use infrastructure::semantic_cache::InMemorySemanticCache;
use infrastructure::services::{ResearchCacheService, ResearchService};
use infrastructure::HttpClient;

/// Wire up the research service from configuration.
///
/// Requires `OPENAI_API_KEY` in the environment (a `.env` file is loaded
/// by the binary before this runs).
pub fn create_research_service(config: &AppConfig) -> anyhow::Result<Arc<ResearchService>> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable is required"))?;

    let registry = Arc::new(builtin_registry()?);

    let llm_http = HttpClient::with_timeout(Duration::from_secs(config.llm.request_timeout_secs))?;
    let llm_provider: Arc<dyn LlmProvider> = match &config.llm.base_url {
        Some(base_url) => Arc::new(OpenAiProvider::with_base_url(
            llm_http.clone(),
            &api_key,
            base_url,
        )),
        None => Arc::new(OpenAiProvider::new(llm_http.clone(), &api_key)),
    };

    let embedding_provider: Arc<dyn EmbeddingProvider> = match &config.llm.base_url {
        Some(base_url) => Arc::new(OpenAiEmbeddingProvider::with_base_url(
            llm_http.clone(),
            &api_key,
            base_url,
        )),
        None => Arc::new(OpenAiEmbeddingProvider::new(llm_http, &api_key)),
    };

    let selector: Arc<dyn FunctionSelector> = Arc::new(LlmFunctionSelector::new(
        Arc::clone(&llm_provider),
        &config.llm.model,
        config.research.selector_retries,
    ));
    let synthesizer: Arc<dyn AnswerSynthesizer> = Arc::new(LlmAnswerSynthesizer::new(
        Arc::clone(&llm_provider),
        &config.llm.model,
    ));

    let pokeapi_http =
        HttpClient::with_timeout(Duration::from_secs(config.pokeapi.request_timeout_secs))?;
    let executor: Arc<dyn FunctionExecutor> = Arc::new(PokeApiExecutor::new(
        PokeApiClient::with_base_url(pokeapi_http, &config.pokeapi.base_url),
    ));

    let engine = Arc::new(ResearchEngine::new(
        registry,
        selector,
        executor,
        synthesizer,
        config.research.clone(),
    ));

    let cache: Arc<dyn SemanticCache> =
        Arc::new(InMemorySemanticCache::new(config.cache.max_entries));
    let cache_service = Arc::new(ResearchCacheService::with_config(
        cache,
        embedding_provider,
        config.cache.clone(),
    ));

    Ok(Arc::new(ResearchService::new(cache_service, engine)))
}
