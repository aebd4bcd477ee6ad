//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call is independent
///
/// One request in, one structured response out. Implementations do not retry
/// and do not stream; failures go straight back to the caller.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and wait for the full answer
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tracing::debug;

    /// Mock LLM client for unit tests
    ///
    /// Replays scripted results in order and records every request it sees.
    pub struct MockLlmClient {
        responses: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<Result<CompletionResponse, LlmError>>) -> Self {
            debug!(response_count = %responses.len(), "MockLlmClient::new: called");
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Client that answers once with the given payload
        pub fn with_payload(payload: serde_json::Value) -> Self {
            Self::new(vec![Ok(CompletionResponse::structured(payload))])
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.requests.lock().unwrap().last().map(|r| r.prompt.clone())
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            debug!("MockLlmClient::complete: called");
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(LlmError::InvalidResponse("No more mock responses".to_string())))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::llm::OutputSchema;

        fn request() -> CompletionRequest {
            CompletionRequest {
                system_prompt: "Test".to_string(),
                prompt: "Suggest".to_string(),
                output: OutputSchema::new("out", "", serde_json::json!({"type": "object"})),
                max_tokens: 1000,
            }
        }

        #[tokio::test]
        async fn test_mock_client_returns_responses() {
            let client = MockLlmClient::new(vec![
                Ok(CompletionResponse::structured(serde_json::json!({"n": 1}))),
                Ok(CompletionResponse::structured(serde_json::json!({"n": 2}))),
            ]);

            let resp1 = client.complete(request()).await.unwrap();
            assert_eq!(resp1.payload.unwrap()["n"], 1);

            let resp2 = client.complete(request()).await.unwrap();
            assert_eq!(resp2.payload.unwrap()["n"], 2);

            assert_eq!(client.call_count(), 2);
            assert_eq!(client.last_prompt().as_deref(), Some("Suggest"));
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);
            assert!(client.complete(request()).await.is_err());
        }
    }
}
