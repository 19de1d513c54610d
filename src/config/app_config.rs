use serde::Deserialize;

use crate::domain::research::ResearchConfig;
use crate::domain::semantic_cache::SemanticCacheConfig;

/// Application configuration
///
/// Layered from `config/default`, `config/local`, and `APP__`-prefixed
/// environment variables. Secrets (the OpenAI API key) come from the
/// environment only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub pokeapi: PokeApiSettings,
    #[serde(default)]
    pub cache: SemanticCacheConfig,
    #[serde(default)]
    pub research: ResearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Reasoning engine settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// Chat model used for selection and synthesis
    pub model: String,
    /// Override for OpenAI-compatible endpoints
    pub base_url: Option<String>,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            request_timeout_secs: 60,
        }
    }
}

/// PokeAPI settings
#[derive(Debug, Clone, Deserialize)]
pub struct PokeApiSettings {
    pub base_url: String,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for PokeApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.pokeapi.base_url, "https://pokeapi.co");
        assert_eq!(config.research.max_iterations, 5);
        assert!((config.cache.similarity_threshold - 0.92).abs() < 0.01);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{"llm": {"model": "gpt-4o", "base_url": null, "request_timeout_secs": 30}}"#,
        )
        .unwrap();

        assert_eq!(config.llm.model, "gpt-4o");
        // untouched sections fall back to defaults
        assert_eq!(config.research.max_iterations, 5);
    }
}
