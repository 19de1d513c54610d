//! Static function catalog for the PokeAPI surface
//!
//! Purposes are written for relevance scoring: the selector ranks these
//! descriptions against the research question.

use once_cell::sync::Lazy;

use crate::domain::registry::{
    FunctionDescriptor, FunctionRegistry, ParameterSpec, ParameterType,
};
use crate::domain::DomainError;

static DESCRIPTORS: Lazy<Vec<FunctionDescriptor>> = Lazy::new(|| {
    vec![
        FunctionDescriptor::new(
            "get_pokemon",
            "Look up a Pokemon by name: base stats, types, abilities, height, weight, and moves.",
        )
        .with_parameter(ParameterSpec::required(
            "name",
            ParameterType::String,
            "Pokemon name, e.g. 'pikachu'",
        )),
        FunctionDescriptor::new(
            "get_pokemon_species",
            "Look up a Pokemon species by name: color, shape, habitat, egg groups, growth rate, capture rate, and the id of its evolution chain.",
        )
        .with_parameter(ParameterSpec::required(
            "name",
            ParameterType::String,
            "Species name, e.g. 'eevee'",
        )),
        FunctionDescriptor::new(
            "get_type",
            "Look up a damage type by name: damage relations against other types and the Pokemon that have it.",
        )
        .with_parameter(ParameterSpec::required(
            "name",
            ParameterType::String,
            "Type name, e.g. 'electric'",
        )),
        FunctionDescriptor::new(
            "get_ability",
            "Look up an ability by name: its effect text and the Pokemon that can have it.",
        )
        .with_parameter(ParameterSpec::required(
            "name",
            ParameterType::String,
            "Ability name, e.g. 'overgrow'",
        )),
        FunctionDescriptor::new(
            "get_move",
            "Look up a move by name: power, accuracy, PP, damage class, type, and the Pokemon that learn it.",
        )
        .with_parameter(ParameterSpec::required(
            "name",
            ParameterType::String,
            "Move name, e.g. 'thunderbolt'",
        )),
        FunctionDescriptor::new(
            "get_evolution_chain",
            "Look up an evolution chain by its numeric id, as referenced from a species record.",
        )
        .with_parameter(ParameterSpec::required(
            "id",
            ParameterType::Integer,
            "Evolution chain id from get_pokemon_species",
        )),
        FunctionDescriptor::new(
            "list_pokemon_by_attribute",
            "List the names of all Pokemon sharing an attribute. Combine calls to cross-reference, e.g. grass types living in forests.",
        )
        .with_parameter(ParameterSpec::required(
            "attribute",
            ParameterType::String,
            "One of: type, habitat, color, shape, egg-group, growth-rate",
        ))
        .with_parameter(ParameterSpec::required(
            "value",
            ParameterType::String,
            "Attribute value, e.g. 'grass' for type or 'forest' for habitat",
        )),
    ]
});

/// The built-in descriptors, cloned for callers that need ownership
pub fn builtin_descriptors() -> Vec<FunctionDescriptor> {
    DESCRIPTORS.clone()
}

/// Build the registry of PokeAPI functions
pub fn builtin_registry() -> Result<FunctionRegistry, DomainError> {
    FunctionRegistry::new(builtin_descriptors())
}
