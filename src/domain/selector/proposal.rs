//! Function-call proposals and their validation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::registry::FunctionRegistry;
use crate::domain::DomainError;

/// One proposed invocation of a registered function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default = "empty_object")]
    pub arguments: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// An ordered set of function calls proposed for one iteration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selection {
    pub calls: Vec<FunctionCall>,
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(calls: Vec<FunctionCall>) -> Self {
        Self { calls }
    }

    /// An empty selection means "context is sufficient, stop researching"
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }
}

/// Wire shape the reasoning engine is asked to produce
#[derive(Debug, Deserialize)]
struct ProposalPayload {
    #[serde(default)]
    calls: Vec<FunctionCall>,
}

/// Parse and validate a JSON proposal from the reasoning engine.
///
/// Rejects malformed JSON, names missing from the registry, and arguments
/// that fail the descriptor's schema. The error text is fed back to the
/// model in the corrective retry prompt, so it names the exact problem.
pub fn parse_proposal(content: &str, registry: &FunctionRegistry) -> Result<Selection, DomainError> {
    let payload: ProposalPayload = serde_json::from_str(content.trim())
        .map_err(|e| DomainError::selection(format!("proposal is not valid JSON: {}", e)))?;

    for call in &payload.calls {
        let descriptor = registry.get(&call.name).ok_or_else(|| {
            DomainError::selection(format!("unknown function '{}'", call.name))
        })?;

        descriptor
            .validate_arguments(&call.arguments)
            .map_err(|e| DomainError::selection(e.to_string()))?;
    }

    Ok(Selection::new(payload.calls))
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn test_parse_valid_proposal() {
        let selection = parse_proposal(
            r#"{"calls": [{"name": "get_pokemon", "arguments": {"name": "bulbasaur"}}]}"#,
            &registry(),
        )
        .unwrap();

        assert_eq!(selection.len(), 1);
        assert_eq!(selection.calls[0].name, "get_pokemon");
    }

    #[test]
    fn test_parse_empty_proposal() {
        let selection = parse_proposal(r#"{"calls": []}"#, &registry()).unwrap();
        assert!(selection.is_empty());

        // a missing calls array is an explicit "done" as well
        let selection = parse_proposal(r#"{}"#, &registry()).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_proposal("call get_pokemon please", &registry()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_parse_rejects_unknown_function() {
        let err = parse_proposal(
            r#"{"calls": [{"name": "get_berry", "arguments": {"name": "oran"}}]}"#,
            &registry(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("unknown function 'get_berry'"));
    }

    #[test]
    fn test_parse_rejects_invalid_arguments() {
        let err = parse_proposal(
            r#"{"calls": [{"name": "get_pokemon", "arguments": {}}]}"#,
            &registry(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("missing required argument"));
    }

    #[test]
    fn test_missing_arguments_default_to_empty_object() {
        let registry = FunctionRegistry::new(vec![FunctionDescriptor::new(
            "list_generations",
            "List all generations",
        )])
        .unwrap();

        let selection =
            parse_proposal(r#"{"calls": [{"name": "list_generations"}]}"#, &registry).unwrap();

        assert_eq!(selection.len(), 1);
        assert!(selection.calls[0].arguments.is_object());
    }
}
