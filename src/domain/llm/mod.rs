//! Reasoning engine domain models and traits
//!
//! The research loop talks to a chat-completion style LLM at two points:
//! function selection (structured JSON proposals) and final answer
//! synthesis (free text).

mod message;
mod provider;
mod request;
mod response;

pub use message::{Message, MessageRole};
pub use provider::LlmProvider;
pub use request::{LlmRequest, LlmRequestBuilder, LlmResponseFormat};
pub use response::{FinishReason, LlmResponse, Usage};

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
