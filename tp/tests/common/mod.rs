//! Shared helpers for tripplanner integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use tripplanner::flow::FlowRunner;
use tripplanner::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use tripplanner::prompts::PromptLoader;

/// LLM client that replays scripted answers and records requests
pub struct ScriptedClient {
    answers: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn new(answers: Vec<Result<CompletionResponse, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn payloads(payloads: Vec<Value>) -> Arc<Self> {
        Self::new(payloads.into_iter().map(|p| Ok(CompletionResponse::structured(p))).collect())
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Self::new(vec![Err(LlmError::ApiError {
            status,
            message: "request rejected".to_string(),
        })])
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("script exhausted".to_string())))
    }
}

pub fn runner(client: Arc<ScriptedClient>) -> FlowRunner {
    FlowRunner::new(client, PromptLoader::embedded_only())
}
