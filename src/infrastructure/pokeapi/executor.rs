//! Execution adapter over the PokeAPI client

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::{prune_json, PokeApiClient, PruneLimits};
use crate::domain::execution::FunctionExecutor;
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

/// Attribute groups supported by `list_pokemon_by_attribute`.
///
/// (attribute, endpoint, member list key); the type endpoint nests member
/// names one level deeper than the species-keyed groups.
const ATTRIBUTE_GROUPS: &[(&str, &str, &str)] = &[
    ("type", "type", "pokemon"),
    ("habitat", "pokemon-habitat", "pokemon_species"),
    ("color", "pokemon-color", "pokemon_species"),
    ("shape", "pokemon-shape", "pokemon_species"),
    ("egg-group", "egg-group", "pokemon_species"),
    ("growth-rate", "growth-rate", "pokemon_species"),
];

/// Maps registry function names onto PokeAPI calls
#[derive(Debug)]
pub struct PokeApiExecutor<C: HttpClientTrait> {
    client: PokeApiClient<C>,
    limits: PruneLimits,
}

impl<C: HttpClientTrait> PokeApiExecutor<C> {
    pub fn new(client: PokeApiClient<C>) -> Self {
        Self {
            client,
            limits: PruneLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: PruneLimits) -> Self {
        self.limits = limits;
        self
    }

    async fn fetch_pruned(&self, function: &str, resource: &str, key: &str) -> Result<Value, DomainError> {
        let value = self
            .client
            .fetch(resource, key)
            .await
            .map_err(|e| DomainError::execution(function, e.to_string()))?;

        Ok(prune_json(&value, self.limits))
    }

    /// Name set of an attribute group, kept unpruned: the whole point of
    /// the call is the full membership list.
    async fn list_by_attribute(
        &self,
        function: &str,
        attribute: &str,
        value: &str,
    ) -> Result<Value, DomainError> {
        let (_, endpoint, member_key) = ATTRIBUTE_GROUPS
            .iter()
            .find(|(name, _, _)| *name == attribute)
            .ok_or_else(|| {
                DomainError::execution(
                    function,
                    format!(
                        "unsupported attribute '{}', expected one of: {}",
                        attribute,
                        ATTRIBUTE_GROUPS
                            .iter()
                            .map(|(name, _, _)| *name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
            })?;

        let response = self
            .client
            .fetch(endpoint, value)
            .await
            .map_err(|e| DomainError::execution(function, e.to_string()))?;

        let members = response
            .get(*member_key)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                DomainError::execution(
                    function,
                    format!("response missing '{}' member list", member_key),
                )
            })?;

        let names: Vec<&str> = members
            .iter()
            .filter_map(|member| {
                let name = if *member_key == "pokemon" {
                    member.get("pokemon").and_then(|p| p.get("name"))
                } else {
                    member.get("name")
                };

                name.and_then(Value::as_str)
            })
            .collect();

        Ok(json!({
            "attribute": attribute,
            "value": value,
            "count": names.len(),
            "pokemon": names,
        }))
    }
}

fn string_arg<'a>(function: &str, arguments: &'a Value, key: &str) -> Result<&'a str, DomainError> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            DomainError::execution(function, format!("missing string argument '{}'", key))
        })
}

fn integer_arg(function: &str, arguments: &Value, key: &str) -> Result<i64, DomainError> {
    arguments
        .get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            DomainError::execution(function, format!("missing integer argument '{}'", key))
        })
}

#[async_trait]
impl<C: HttpClientTrait> FunctionExecutor for PokeApiExecutor<C> {
    async fn invoke(&self, name: &str, arguments: &Value) -> Result<Value, DomainError> {
        match name {
            "get_pokemon" => {
                self.fetch_pruned(name, "pokemon", string_arg(name, arguments, "name")?)
                    .await
            }
            "get_pokemon_species" => {
                self.fetch_pruned(name, "pokemon-species", string_arg(name, arguments, "name")?)
                    .await
            }
            "get_type" => {
                self.fetch_pruned(name, "type", string_arg(name, arguments, "name")?)
                    .await
            }
            "get_ability" => {
                self.fetch_pruned(name, "ability", string_arg(name, arguments, "name")?)
                    .await
            }
            "get_move" => {
                self.fetch_pruned(name, "move", string_arg(name, arguments, "name")?)
                    .await
            }
            "get_evolution_chain" => {
                let id = integer_arg(name, arguments, "id")?;
                self.fetch_pruned(name, "evolution-chain", &id.to_string())
                    .await
            }
            "list_pokemon_by_attribute" => {
                let attribute = string_arg(name, arguments, "attribute")?;
                let value = string_arg(name, arguments, "value")?;
                self.list_by_attribute(name, attribute, value).await
            }
            other => Err(DomainError::execution(
                other,
                "not part of the PokeAPI function surface",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MockHttpClient;

    fn executor(client: MockHttpClient) -> PokeApiExecutor<MockHttpClient> {
        PokeApiExecutor::new(PokeApiClient::new(client))
    }

    #[tokio::test]
    async fn test_get_pokemon() {
        let client = MockHttpClient::new().with_response(
            "https://pokeapi.co/api/v2/pokemon/bulbasaur",
            json!({"name": "bulbasaur", "types": [{"type": {"name": "grass"}}]}),
        );

        let value = executor(client)
            .invoke("get_pokemon", &json!({"name": "bulbasaur"}))
            .await
            .unwrap();

        assert_eq!(value["name"], "bulbasaur");
    }

    #[tokio::test]
    async fn test_get_pokemon_result_is_pruned() {
        let moves: Vec<Value> = (0..50).map(|i| json!({"move": {"name": format!("move-{}", i)}})).collect();
        let client = MockHttpClient::new().with_response(
            "https://pokeapi.co/api/v2/pokemon/pikachu",
            json!({"name": "pikachu", "moves": moves}),
        );

        let value = executor(client)
            .invoke("get_pokemon", &json!({"name": "pikachu"}))
            .await
            .unwrap();

        // 3 kept + truncation marker
        assert_eq!(value["moves"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_get_evolution_chain_by_id() {
        let client = MockHttpClient::new().with_response(
            "https://pokeapi.co/api/v2/evolution-chain/67",
            json!({"id": 67}),
        );

        let value = executor(client)
            .invoke("get_evolution_chain", &json!({"id": 67}))
            .await
            .unwrap();

        assert_eq!(value["id"], 67);
    }

    #[tokio::test]
    async fn test_list_by_type_attribute() {
        let client = MockHttpClient::new().with_response(
            "https://pokeapi.co/api/v2/type/grass",
            json!({
                "pokemon": [
                    {"pokemon": {"name": "bulbasaur"}},
                    {"pokemon": {"name": "oddish"}},
                ]
            }),
        );

        let value = executor(client)
            .invoke(
                "list_pokemon_by_attribute",
                &json!({"attribute": "type", "value": "grass"}),
            )
            .await
            .unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["pokemon"][0], "bulbasaur");
    }

    #[tokio::test]
    async fn test_list_by_habitat_attribute() {
        let client = MockHttpClient::new().with_response(
            "https://pokeapi.co/api/v2/pokemon-habitat/forest",
            json!({
                "pokemon_species": [
                    {"name": "caterpie"},
                    {"name": "pikachu"},
                    {"name": "oddish"},
                ]
            }),
        );

        let value = executor(client)
            .invoke(
                "list_pokemon_by_attribute",
                &json!({"attribute": "habitat", "value": "forest"}),
            )
            .await
            .unwrap();

        assert_eq!(value["count"], 3);
        assert_eq!(value["pokemon"][1], "pikachu");
    }

    #[tokio::test]
    async fn test_unsupported_attribute() {
        let error = executor(MockHttpClient::new())
            .invoke(
                "list_pokemon_by_attribute",
                &json!({"attribute": "height", "value": "tall"}),
            )
            .await
            .unwrap_err();

        assert!(error.to_string().contains("unsupported attribute"));
    }

    #[tokio::test]
    async fn test_unknown_function() {
        let error = executor(MockHttpClient::new())
            .invoke("get_berry", &json!({"name": "oran"}))
            .await
            .unwrap_err();

        assert!(matches!(error, DomainError::Execution { .. }));
    }

    #[tokio::test]
    async fn test_missing_argument() {
        let error = executor(MockHttpClient::new())
            .invoke("get_pokemon", &json!({}))
            .await
            .unwrap_err();

        assert!(error.to_string().contains("missing string argument 'name'"));
    }

    #[tokio::test]
    async fn test_http_failure_is_execution_failure() {
        let client = MockHttpClient::new()
            .with_error("https://pokeapi.co/api/v2/pokemon/missingno", "HTTP 404");

        let error = executor(client)
            .invoke("get_pokemon", &json!({"name": "missingno"}))
            .await
            .unwrap_err();

        assert!(matches!(error, DomainError::Execution { .. }));
    }
}
