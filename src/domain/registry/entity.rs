//! Read-only registry of callable functions

use std::collections::HashMap;

use super::FunctionDescriptor;
use crate::domain::DomainError;

/// Catalog of the domain-data operations available to the selector.
///
/// Built once at startup; duplicate names are a load-time error.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    descriptors: Vec<FunctionDescriptor>,
    by_name: HashMap<String, usize>,
}

impl FunctionRegistry {
    /// Build a registry, rejecting duplicate function names
    pub fn new(descriptors: Vec<FunctionDescriptor>) -> Result<Self, DomainError> {
        let mut by_name = HashMap::with_capacity(descriptors.len());

        for (idx, descriptor) in descriptors.iter().enumerate() {
            if by_name
                .insert(descriptor.name().to_string(), idx)
                .is_some()
            {
                return Err(DomainError::validation(format!(
                    "duplicate function name '{}' in registry",
                    descriptor.name()
                )));
            }
        }

        Ok(Self {
            descriptors,
            by_name,
        })
    }

    /// All descriptors, in declaration order
    pub fn list(&self) -> &[FunctionDescriptor] {
        &self.descriptors
    }

    /// Resolve a descriptor by name
    pub fn get(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.by_name.get(name).map(|idx| &self.descriptors[*idx])
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Render the whole catalog as prompt lines for the selector
    pub fn render_for_prompt(&self) -> String {
        self.descriptors
            .iter()
            .map(|d| d.render_for_prompt())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
