//! Execution adapter contract
//!
//! The loop invokes domain-data functions through this boundary. It only
//! requires stable names matching the function registry and a failure
//! signal distinguishable from a success value; how names resolve to real
//! calls is the adapter's business.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for invoking domain-data functions by name
#[async_trait]
pub trait FunctionExecutor: Send + Sync + Debug {
    /// Invoke a function; a failure is reported as `DomainError::Execution`
    async fn invoke(&self, name: &str, arguments: &Value) -> Result<Value, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::domain::selector::FunctionCall;

    /// Canned executor for loop tests
    #[derive(Debug, Default)]
    pub struct MockFunctionExecutor {
        results: HashMap<String, Value>,
        failures: HashMap<String, String>,
        fail_all: Option<String>,
        invocations: Mutex<Vec<FunctionCall>>,
    }

    impl MockFunctionExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_result(mut self, name: impl Into<String>, result: Value) -> Self {
            self.results.insert(name.into(), result);
            self
        }

        pub fn with_function_failure(
            mut self,
            name: impl Into<String>,
            message: impl Into<String>,
        ) -> Self {
            self.failures.insert(name.into(), message.into());
            self
        }

        /// Every invocation fails, regardless of name
        pub fn failing(mut self, message: impl Into<String>) -> Self {
            self.fail_all = Some(message.into());
            self
        }

        /// Invocations seen so far, in order
        pub fn invocations(&self) -> Vec<FunctionCall> {
            self.invocations.lock().unwrap().clone()
        }

        pub fn invocation_count(&self) -> usize {
            self.invocations.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl FunctionExecutor for MockFunctionExecutor {
        async fn invoke(&self, name: &str, arguments: &Value) -> Result<Value, DomainError> {
            self.invocations
                .lock()
                .unwrap()
                .push(FunctionCall::new(name, arguments.clone()));

            if let Some(ref message) = self.fail_all {
                return Err(DomainError::execution(name, message));
            }

            if let Some(message) = self.failures.get(name) {
                return Err(DomainError::execution(name, message));
            }

            self.results
                .get(name)
                .cloned()
                .ok_or_else(|| DomainError::execution(name, "no canned result"))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde_json::json;

        #[tokio::test]
        async fn test_canned_results_and_failures() {
            let executor = MockFunctionExecutor::new()
                .with_result("get_pokemon", json!({"type": "grass"}))
                .with_function_failure("get_type", "HTTP 500");

            let ok = executor
                .invoke("get_pokemon", &json!({"name": "bulbasaur"}))
                .await
                .unwrap();
            assert_eq!(ok["type"], "grass");

            let err = executor.invoke("get_type", &json!({})).await.unwrap_err();
            assert!(matches!(err, DomainError::Execution { .. }));

            assert_eq!(executor.invocation_count(), 2);
        }
    }
}
