//! LLM request/response types
//!
//! Every request asks for one structured answer: the rendered prompt plus the
//! JSON schema the answer must follow. Providers map the schema onto their own
//! structured-output mechanism.

use serde_json::Value;
use tracing::debug;

/// A completion request - everything needed for one model call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt
    pub system_prompt: String,

    /// Rendered user prompt
    pub prompt: String,

    /// Shape the answer must take
    pub output: OutputSchema,

    /// Max tokens for response (capped by config)
    pub max_tokens: u32,
}

/// Declared output shape for a structured answer
#[derive(Debug, Clone)]
pub struct OutputSchema {
    /// Identifier sent to the provider (snake_case)
    pub name: String,

    /// Short description of the answer
    pub description: String,

    /// JSON Schema of the answer object
    pub schema: Value,
}

impl OutputSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }

    /// Anthropic tool definition whose input is the answer
    pub fn to_anthropic_tool(&self) -> Value {
        debug!(name = %self.name, "OutputSchema::to_anthropic_tool: called");
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.schema,
        })
    }

    /// OpenAI `response_format` block
    pub fn to_openai_response_format(&self) -> Value {
        debug!(name = %self.name, "OutputSchema::to_openai_response_format: called");
        serde_json::json!({
            "type": "json_schema",
            "json_schema": {
                "name": self.name,
                "description": self.description,
                "schema": self.schema,
                "strict": false,
            }
        })
    }
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Structured answer, if the model produced parseable JSON
    pub payload: Option<Value>,

    /// Raw text content (if any)
    pub text: Option<String>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Response carrying only a structured payload
    pub fn structured(payload: Value) -> Self {
        Self {
            payload: Some(payload),
            text: None,
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
}

impl StopReason {
    /// Parse from Anthropic API stop_reason string
    pub fn from_anthropic(s: &str) -> Self {
        match s {
            "tool_use" => StopReason::ToolUse,
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        }
    }

    /// Parse from OpenAI API finish_reason string
    pub fn from_openai(s: &str) -> Self {
        match s {
            "tool_calls" | "function_call" => StopReason::ToolUse,
            "length" => StopReason::MaxTokens,
            "content_filter" => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        }
    }
}

/// Token usage for a single call
#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Pull a JSON value out of free-form model text
///
/// Accepts bare JSON or JSON wrapped in a markdown code fence. Returns `None`
/// when nothing parses; the caller decides what that means.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let fenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"));
    if let Some(inner) = fenced {
        debug!("extract_json: found fenced block");
        return serde_json::from_str(inner.trim()).ok();
    }

    None
}
