use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Embedding unavailable: {message}")]
    Encoding { message: String },

    #[error("Function selection failed: {message}")]
    Selection { message: String },

    #[error("Function '{function}' failed: {message}")]
    Execution { function: String, message: String },

    #[error("Answer synthesis failed: {message}")]
    Synthesis { message: String },

    #[error("Research budget exceeded: {message}")]
    BudgetExceeded { message: String },

    #[error("Research run was cancelled")]
    Cancelled,
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    pub fn selection(message: impl Into<String>) -> Self {
        Self::Selection {
            message: message.into(),
        }
    }

    pub fn execution(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }

    pub fn budget_exceeded(message: impl Into<String>) -> Self {
        Self::BudgetExceeded {
            message: message.into(),
        }
    }

    /// Message suitable for showing to an end user. Provider internals are
    /// replaced with a generic notice instead of being passed through.
    pub fn user_message(&self) -> String {
        match self {
            Self::Synthesis { message } => {
                format!("I could not put together an answer: {}", message)
            }
            Self::Selection { message } => {
                format!("I could not decide how to research this: {}", message)
            }
            Self::BudgetExceeded { message } => {
                format!("Research stopped early: {}", message)
            }
            Self::Cancelled => "The research run was cancelled.".to_string(),
            Self::Provider { .. } | Self::Internal { .. } => {
                "An internal error occurred while researching your question.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Function 'get_pokemon' not found");
        assert_eq!(
            error.to_string(),
            "Not found: Function 'get_pokemon' not found"
        );
    }

    #[test]
    fn test_execution_error() {
        let error = DomainError::execution("get_pokemon", "HTTP 404");
        assert_eq!(error.to_string(), "Function 'get_pokemon' failed: HTTP 404");
    }

    #[test]
    fn test_user_message_hides_provider_details() {
        let error = DomainError::provider("openai", "401 invalid api key");
        assert!(!error.user_message().contains("api key"));
    }

    #[test]
    fn test_user_message_synthesis() {
        let error = DomainError::synthesis("empty completion");
        assert!(error.user_message().contains("empty completion"));
    }
}
