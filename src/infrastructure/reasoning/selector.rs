//! LLM-backed function selector

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::SYSTEM_PROMPT;
use crate::domain::registry::FunctionRegistry;
use crate::domain::selector::{parse_proposal, FunctionSelector, Selection};
use crate::domain::{DomainError, LlmProvider, LlmRequest, LlmResponseFormat};

/// Function selector that asks the reasoning engine for a JSON proposal.
///
/// A rejected proposal (malformed JSON, unknown function, schema-invalid
/// arguments) is retried with a corrective prompt carrying the exact
/// validation error, up to `max_retries` extra attempts.
#[derive(Debug)]
pub struct LlmFunctionSelector {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_retries: u32,
}

impl LlmFunctionSelector {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>, max_retries: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            max_retries,
        }
    }

    fn selection_prompt(&self, query: &str, context: &str, registry: &FunctionRegistry) -> String {
        let context_block = if context.is_empty() {
            "No research has been performed yet.".to_string()
        } else {
            format!("Data gathered so far:\n{}", context)
        };

        format!(
            "Research question: {query}\n\n{context_block}\n\nAvailable functions:\n{catalog}\n\nDecide which functions to call next to answer the question. Respond with a JSON object of the form {{\"calls\": [{{\"name\": \"<function>\", \"arguments\": {{...}}}}]}}. Propose only functions from the catalog, with arguments matching their parameters. If the gathered data already answers the question (or no function would help), respond with {{\"calls\": []}}.",
            query = query,
            context_block = context_block,
            catalog = registry.render_for_prompt(),
        )
    }

    fn base_request(&self, prompt: &str) -> LlmRequest {
        LlmRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(prompt)
            .temperature(0.0)
            .response_format(LlmResponseFormat::JsonObject)
            .build()
    }
}

#[async_trait]
impl FunctionSelector for LlmFunctionSelector {
    async fn select(
        &self,
        query: &str,
        context: &str,
        registry: &FunctionRegistry,
    ) -> Result<Selection, DomainError> {
        let prompt = self.selection_prompt(query, context, registry);
        let mut request = self.base_request(&prompt);
        let mut last_error = String::new();

        for attempt in 0..=self.max_retries {
            let response = match self.provider.chat(&self.model, request.clone()).await {
                Ok(response) => response,
                Err(error) => {
                    warn!(attempt, %error, "selection call failed");
                    last_error = error.to_string();
                    continue;
                }
            };

            match parse_proposal(response.content(), registry) {
                Ok(selection) => {
                    debug!(attempt, calls = selection.len(), "selection accepted");
                    return Ok(selection);
                }
                Err(error) => {
                    warn!(attempt, %error, "proposal rejected");
                    last_error = error.to_string();

                    // corrective round: show the model its output and the
                    // validation error
                    request = LlmRequest::builder()
                        .system(SYSTEM_PROMPT)
                        .user(&prompt)
                        .assistant(response.content())
                        .user(format!(
                            "That proposal was rejected: {}. Respond again with only a valid JSON object of the form {{\"calls\": [...]}} using functions and arguments from the catalog.",
                            error
                        ))
                        .temperature(0.0)
                        .response_format(LlmResponseFormat::JsonObject)
                        .build();
                }
            }
        }

        Err(DomainError::selection(format!(
            "no usable proposal after {} attempts: {}",
            self.max_retries + 1,
            last_error
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::registry::{FunctionDescriptor, ParameterSpec, ParameterType};

    fn registry() -> FunctionRegistry {
        FunctionRegistry::new(vec![FunctionDescriptor::new(
            "get_pokemon",
            "Look up a Pokemon by name",
        )
        .with_parameter(ParameterSpec::required(
            "name",
            ParameterType::String,
            "Pokemon name",
        ))])
        .unwrap()
    }

    #[tokio::test]
    async fn test_valid_proposal_accepted_first_try() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply(
            r#"{"calls": [{"name": "get_pokemon", "arguments": {"name": "bulbasaur"}}]}"#,
        ));
        let selector = LlmFunctionSelector::new(provider.clone(), "gpt-4o-mini", 2);

        let selection = selector
            .select("What type is Bulbasaur?", "", &registry())
            .await
            .unwrap();

        assert_eq!(selection.len(), 1);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_corrective_retry_recovers() {
        let provider = Arc::new(
            MockLlmProvider::new("mock")
                .with_reply(r#"{"calls": [{"name": "get_berry", "arguments": {}}]}"#)
                .with_reply(
                    r#"{"calls": [{"name": "get_pokemon", "arguments": {"name": "bulbasaur"}}]}"#,
                ),
        );
        let selector = LlmFunctionSelector::new(provider.clone(), "gpt-4o-mini", 2);

        let selection = selector
            .select("What type is Bulbasaur?", "", &registry())
            .await
            .unwrap();

        assert_eq!(selection.len(), 1);
        assert_eq!(provider.call_count(), 2);

        // the corrective round carries the validation error back
        let retry_request = &provider.calls()[1];
        let last_user = retry_request.messages.last().unwrap();
        assert!(last_user.content().contains("unknown function 'get_berry'"));
    }

    #[tokio::test]
    async fn test_retries_exhausted_is_selection_error() {
        let provider = Arc::new(
            MockLlmProvider::new("mock")
                .with_reply("not json at all")
                .with_reply("still not json")
                .with_reply("no luck"),
        );
        let selector = LlmFunctionSelector::new(provider.clone(), "gpt-4o-mini", 2);

        let error = selector
            .select("What type is Bulbasaur?", "", &registry())
            .await
            .unwrap_err();

        assert!(matches!(error, DomainError::Selection { .. }));
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_provider_failure_retried() {
        let provider = Arc::new(
            MockLlmProvider::new("mock")
                .with_failure("timeout")
                .with_reply(r#"{"calls": []}"#),
        );
        let selector = LlmFunctionSelector::new(provider.clone(), "gpt-4o-mini", 2);

        let selection = selector
            .select("What type is Bulbasaur?", "", &registry())
            .await
            .unwrap();

        assert!(selection.is_empty());
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_prompt_contains_catalog_and_context() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply(r#"{"calls": []}"#));
        let selector = LlmFunctionSelector::new(provider.clone(), "gpt-4o-mini", 0);

        selector
            .select(
                "What type is Bulbasaur?",
                "get_pokemon({\"name\":\"bulbasaur\"}) => {\"types\":[\"grass\"]}",
                &registry(),
            )
            .await
            .unwrap();

        let request = &provider.calls()[0];
        let user = request.messages[1].content();

        assert!(user.contains("get_pokemon"));
        assert!(user.contains("Data gathered so far"));
        assert_eq!(request.response_format, Some(LlmResponseFormat::JsonObject));
    }
}
