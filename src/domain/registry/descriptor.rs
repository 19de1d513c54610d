//! Function descriptors and argument validation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// JSON type of a function parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParameterType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// A single parameter of a domain-data function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    name: String,
    param_type: ParameterType,
    description: String,
    required: bool,
}

impl ParameterSpec {
    /// Create a required parameter
    pub fn required(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: true,
        }
    }

    /// Create an optional parameter
    pub fn optional(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParameterType {
        self.param_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Metadata describing one callable domain-data operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Stable function name, matching the execution adapter's surface
    name: String,
    /// Natural-language purpose, used for relevance scoring by the selector
    purpose: String,
    /// Parameter schema
    parameters: Vec<ParameterSpec>,
}

impl FunctionDescriptor {
    /// Create a new descriptor
    pub fn new(name: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            purpose: purpose.into(),
            parameters: Vec::new(),
        }
    }

    /// Add a parameter to the schema
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Validate a proposed argument object against this schema.
    ///
    /// Required parameters must be present, types must match, and unknown
    /// keys are rejected so a hallucinated argument never reaches the
    /// execution adapter.
    pub fn validate_arguments(&self, arguments: &Value) -> Result<(), DomainError> {
        let object = arguments.as_object().ok_or_else(|| {
            DomainError::validation(format!(
                "arguments for '{}' must be a JSON object",
                self.name
            ))
        })?;

        for spec in &self.parameters {
            match object.get(spec.name()) {
                Some(value) => {
                    if !spec.param_type().matches(value) {
                        return Err(DomainError::validation(format!(
                            "argument '{}' of '{}' must be a {}",
                            spec.name(),
                            self.name,
                            spec.param_type().name()
                        )));
                    }
                }
                None if spec.is_required() => {
                    return Err(DomainError::validation(format!(
                        "missing required argument '{}' for '{}'",
                        spec.name(),
                        self.name
                    )));
                }
                None => {}
            }
        }

        if let Some(unknown) = object
            .keys()
            .find(|key| !self.parameters.iter().any(|p| p.name() == key.as_str()))
        {
            return Err(DomainError::validation(format!(
                "unknown argument '{}' for '{}'",
                unknown, self.name
            )));
        }

        Ok(())
    }

    /// Render this descriptor as a prompt line for the selector
    pub fn render_for_prompt(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| {
                format!(
                    "{}: {}{} ({})",
                    p.name(),
                    p.param_type().name(),
                    if p.is_required() { "" } else { "?" },
                    p.description()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("- {}({}): {}", self.name, params, self.purpose)
    }
}
