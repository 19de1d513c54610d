//! PokeAPI REST client and response pruning

use serde_json::Value;

use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co";

/// Thin client for PokeAPI v2 resource lookups
#[derive(Debug)]
pub struct PokeApiClient<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> PokeApiClient<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_POKEAPI_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a resource by name or id, e.g. `fetch("pokemon", "bulbasaur")`
    pub async fn fetch(&self, resource: &str, key: &str) -> Result<Value, DomainError> {
        let url = format!(
            "{}/api/v2/{}/{}",
            self.base_url,
            resource,
            normalize_key(key)
        );

        self.client.get_json(&url, vec![]).await
    }
}

/// PokeAPI keys are lowercase and dash-separated ("mr. mime" -> "mr.-mime")
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "-")
}

/// Width and depth bounds applied to raw PokeAPI responses before they are
/// folded into research context. Full resource records run to hundreds of
/// kilobytes; the reasoning prompt only gets a bounded sample.
#[derive(Debug, Clone, Copy)]
pub struct PruneLimits {
    /// Maximum nesting depth to descend
    pub max_depth: usize,
    /// Arrays keep at most this many leading items
    pub max_array_items: usize,
    /// Objects keep at most this many keys
    pub max_object_keys: usize,
}

impl Default for PruneLimits {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_array_items: 3,
            max_object_keys: 10,
        }
    }
}

/// Depth- and width-limit a JSON value
pub fn prune_json(value: &Value, limits: PruneLimits) -> Value {
    prune_at_depth(value, limits, 0)
}

fn prune_at_depth(value: &Value, limits: PruneLimits, depth: usize) -> Value {
    if depth >= limits.max_depth {
        return match value {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
            _ => Value::String("[max depth reached]".to_string()),
        };
    }

    match value {
        Value::Array(items) => {
            let mut pruned: Vec<Value> = items
                .iter()
                .take(limits.max_array_items)
                .map(|item| prune_at_depth(item, limits, depth + 1))
                .collect();

            if items.len() > limits.max_array_items {
                pruned.push(Value::String(format!(
                    "[{} more items]",
                    items.len() - limits.max_array_items
                )));
            }

            Value::Array(pruned)
        }
        Value::Object(map) => {
            let pruned = map
                .iter()
                .take(limits.max_object_keys)
                .map(|(key, item)| (key.clone(), prune_at_depth(item, limits, depth + 1)))
                .collect();

            Value::Object(pruned)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::infrastructure::MockHttpClient;

    #[tokio::test]
    async fn test_fetch_builds_url() {
        let client = MockHttpClient::new().with_response(
            "https://pokeapi.co/api/v2/pokemon/bulbasaur",
            json!({"name": "bulbasaur"}),
        );
        let api = PokeApiClient::new(client);

        let value = api.fetch("pokemon", "bulbasaur").await.unwrap();

        assert_eq!(value["name"], "bulbasaur");
    }

    #[tokio::test]
    async fn test_fetch_normalizes_key() {
        let client = MockHttpClient::new().with_response(
            "https://pokeapi.co/api/v2/pokemon/mr.-mime",
            json!({"name": "mr-mime"}),
        );
        let api = PokeApiClient::new(client);

        let value = api.fetch("pokemon", "  Mr. Mime ").await.unwrap();

        assert_eq!(value["name"], "mr-mime");
    }

    #[tokio::test]
    async fn test_fetch_custom_base_url() {
        let client = MockHttpClient::new().with_response(
            "http://localhost:9000/api/v2/type/grass",
            json!({"name": "grass"}),
        );
        let api = PokeApiClient::with_base_url(client, "http://localhost:9000/");

        let value = api.fetch("type", "grass").await.unwrap();

        assert_eq!(value["name"], "grass");
    }

    #[test]
    fn test_prune_depth() {
        let value = json!({"a": {"b": {"c": {"d": 1}}}});

        let pruned = prune_json(&value, PruneLimits::default());

        assert_eq!(pruned["a"]["b"]["c"], "[max depth reached]");
    }

    #[test]
    fn test_prune_scalars_survive_at_depth_limit() {
        let value = json!({"a": {"b": {"c": 42}}});

        let pruned = prune_json(&value, PruneLimits::default());

        assert_eq!(pruned["a"]["b"]["c"], 42);
    }

    #[test]
    fn test_prune_long_array_truncated_with_marker() {
        let value = json!([1, 2, 3, 4, 5, 6, 7]);

        let pruned = prune_json(&value, PruneLimits::default());
        let items = pruned.as_array().unwrap();

        assert_eq!(items.len(), 4);
        assert_eq!(items[3], "[4 more items]");
    }

    #[test]
    fn test_prune_wide_object_truncated() {
        let map: serde_json::Map<String, Value> =
            (0..20).map(|i| (format!("k{:02}", i), json!(i))).collect();

        let pruned = prune_json(&Value::Object(map), PruneLimits::default());

        assert_eq!(pruned.as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_prune_small_values_untouched() {
        let value = json!({"name": "bulbasaur", "types": ["grass", "poison"]});

        let pruned = prune_json(&value, PruneLimits::default());

        assert_eq!(pruned, value);
    }
}
