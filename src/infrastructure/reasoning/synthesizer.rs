//! LLM-backed answer synthesis

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::SYSTEM_PROMPT;
use crate::domain::research::AnswerSynthesizer;
use crate::domain::{DomainError, LlmProvider, LlmRequest};

/// Synthesizes the final answer text from the accumulated research context
#[derive(Debug)]
pub struct LlmAnswerSynthesizer {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmAnswerSynthesizer {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    fn synthesis_prompt(&self, query: &str, context: &str, complete: bool) -> String {
        let notes = if context.is_empty() {
            "No function data was gathered.".to_string()
        } else {
            format!("Function data gathered during research:\n{}", context)
        };

        let caveat = if complete {
            ""
        } else {
            "\n\nThe research was cut short before it could finish. Answer from the data available and state clearly which parts of the question you could not verify."
        };

        format!(
            "Research question: {query}\n\n{notes}\n\nWrite the final answer to the research question based on the data above. Failed function calls are marked FAILED; do not invent data for them.{caveat}",
            query = query,
            notes = notes,
            caveat = caveat,
        )
    }
}

#[async_trait]
impl AnswerSynthesizer for LlmAnswerSynthesizer {
    async fn synthesize(
        &self,
        query: &str,
        context: &str,
        complete: bool,
    ) -> Result<String, DomainError> {
        let request = LlmRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(self.synthesis_prompt(query, context, complete))
            .temperature(0.2)
            .build();

        let response = self
            .provider
            .chat(&self.model, request)
            .await
            .map_err(|e| DomainError::synthesis(e.to_string()))?;

        let answer = response.content().trim().to_string();

        if answer.is_empty() {
            return Err(DomainError::synthesis("the model returned an empty answer"));
        }

        debug!(query, chars = answer.len(), "answer synthesized");

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    #[tokio::test]
    async fn test_synthesize_answer() {
        let provider =
            Arc::new(MockLlmProvider::new("mock").with_reply("Bulbasaur is a grass type."));
        let synthesizer = LlmAnswerSynthesizer::new(provider.clone(), "gpt-4o-mini");

        let answer = synthesizer
            .synthesize(
                "What type is Bulbasaur?",
                "get_pokemon({\"name\":\"bulbasaur\"}) => {\"types\":[\"grass\",\"poison\"]}",
                true,
            )
            .await
            .unwrap();

        assert_eq!(answer, "Bulbasaur is a grass type.");

        let request = &provider.calls()[0];
        assert!(request.messages[1].content().contains("grass"));
    }

    #[tokio::test]
    async fn test_incomplete_run_gets_caveat() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply("partial answer"));
        let synthesizer = LlmAnswerSynthesizer::new(provider.clone(), "gpt-4o-mini");

        synthesizer
            .synthesize("query", "context", false)
            .await
            .unwrap();

        let request = &provider.calls()[0];
        assert!(request.messages[1].content().contains("cut short"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_synthesis_error() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_failure("model down"));
        let synthesizer = LlmAnswerSynthesizer::new(provider, "gpt-4o-mini");

        let error = synthesizer.synthesize("query", "", true).await.unwrap_err();

        assert!(matches!(error, DomainError::Synthesis { .. }));
    }

    #[tokio::test]
    async fn test_empty_answer_is_synthesis_error() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply("   "));
        let synthesizer = LlmAnswerSynthesizer::new(provider, "gpt-4o-mini");

        let error = synthesizer.synthesize("query", "", true).await.unwrap_err();

        assert!(matches!(error, DomainError::Synthesis { .. }));
    }
}
