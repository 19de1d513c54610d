//! Reasoning-engine backed implementations of the selection and synthesis
//! contracts

mod selector;
mod synthesizer;

pub use selector::LlmFunctionSelector;
pub use synthesizer::LlmAnswerSynthesizer;

pub(crate) const SYSTEM_PROMPT: &str = "You are a Pokemon research assistant with access to a catalog of Pokemon data functions. You gather data by calling functions and answer strictly from the data you gathered.";
