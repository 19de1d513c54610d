//! Function selection domain models and traits
//!
//! The selector decides which domain-data functions to call next for a
//! query. An empty selection signals that the accumulated context is
//! sufficient and the loop should move to synthesis.

mod proposal;
mod provider;

pub use proposal::{parse_proposal, FunctionCall, Selection};
pub use provider::FunctionSelector;

#[cfg(test)]
pub use provider::mock::MockFunctionSelector;
