//! Flow error types

use thiserror::Error;

use super::ValidationError;
use crate::llm::LlmError;

/// Model output that failed the output contract
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaValidationError {
    #[error("model returned no structured payload")]
    MissingPayload,

    #[error("payload does not match the output schema: {0}")]
    Schema(String),

    #[error("payload could not be decoded: {0}")]
    Decode(String),

    #[error("payload rejected: {0}")]
    Rule(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Errors from running a prompt flow
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to render prompt: {0}")]
    Render(String),

    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("invalid model output: {0}")]
    Schema(#[from] SchemaValidationError),
}

impl FlowError {
    /// True when the caller's input was at fault and resubmitting unchanged will not help
    pub fn is_input_error(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FlowError::Schema(SchemaValidationError::Rule("expected 3 days, got 2".into()));
        assert_eq!(err.to_string(), "invalid model output: payload rejected: expected 3 days, got 2");

        let err = FlowError::Model(LlmError::MissingApiKey("ANTHROPIC_API_KEY".into()));
        assert!(err.to_string().starts_with("model call failed"));
        assert!(!err.is_input_error());
    }
}
