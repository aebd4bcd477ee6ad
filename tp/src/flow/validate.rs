//! Input validation
//!
//! Flow inputs collect every failing field before reporting, so a form can show
//! all problems at once.

use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::SchemaValidationError;

/// A single failing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", join(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn join(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// True if `field` is among the failures
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Types that check their own field constraints
pub trait Validate {
    /// Trim strings and turn blank optional fields into `None`
    fn normalize(&mut self) {}

    fn validate(&self) -> Result<(), ValidationError>;
}

/// Accumulates field errors
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
        self
    }

    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, "is required");
        }
        self
    }

    pub fn min_chars(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.trim().chars().count() < min {
            self.fail(field, format!("must be at least {} characters", min));
        }
        self
    }

    pub fn range(&mut self, field: &str, value: u32, min: u32, max: u32) -> &mut Self {
        if value < min || value > max {
            self.fail(field, format!("must be between {} and {}", min, max));
        }
        self
    }

    pub fn non_negative(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() || value < 0.0 {
            self.fail(field, "must be zero or more");
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}

/// Blank strings become `None`, others are trimmed
pub fn normalize_optional(value: &mut Option<String>) {
    *value = value
        .take()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
}

/// Untyped counterpart of [`Validate::normalize`] for a context object
///
/// Top-level strings are trimmed. Blank optional strings are removed so
/// template conditionals treat them as absent; blank required ones stay as ""
/// for the schema to reject.
pub fn normalize_context(schema: &Value, context: &mut Value) {
    let Some(fields) = context.as_object_mut() else {
        return;
    };
    let required: Vec<&str> = schema["required"]
        .as_array()
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    fields.retain(|key, value| {
        let Some(text) = value.as_str() else {
            return true;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() && !required.contains(&key.as_str()) {
            debug!(field = %key, "normalize_context: blank optional field dropped");
            return false;
        }
        if trimmed.len() != text.len() {
            *value = Value::String(trimmed.to_string());
        }
        true
    });
}

fn compile(schema: &Value) -> Result<jsonschema::Validator, SchemaValidationError> {
    jsonschema::Validator::new(schema).map_err(|e| SchemaValidationError::InvalidSchema(e.to_string()))
}

/// Check untyped input against a flow's input schema
pub fn validate_input(schema: &Value, input: &Value) -> Result<(), super::FlowError> {
    let validator = compile(schema)?;
    if validator.is_valid(input) {
        return Ok(());
    }
    let errors = validator
        .iter_errors(input)
        .map(|e| {
            let path = e.instance_path.to_string();
            FieldError {
                field: path.trim_start_matches('/').to_string(),
                message: e.to_string(),
            }
        })
        .collect();
    Err(ValidationError { errors }.into())
}

/// Check a model payload against a flow's output schema
pub fn validate_output(schema: &Value, payload: &Value) -> Result<(), SchemaValidationError> {
    let validator = compile(schema)?;
    if validator.is_valid(payload) {
        return Ok(());
    }
    let errors: Vec<String> = validator.iter_errors(payload).map(|e| e.to_string()).collect();
    Err(SchemaValidationError::Schema(errors.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validator_collects_all_fields() {
        let err = Validator::new()
            .require("destination", " ")
            .range("duration", 0, 1, 30)
            .non_negative("budget", -5.0)
            .finish()
            .unwrap_err();
        assert_eq!(err.errors.len(), 3);
        assert!(err.has_field("destination"));
        assert!(err.has_field("duration"));
        assert!(err.has_field("budget"));
        assert!(err.to_string().starts_with("invalid input: destination: is required"));
    }

    #[test]
    fn test_validator_ok() {
        assert!(
            Validator::new()
                .require("destination", "Goa")
                .min_chars("preferences", "beaches and seafood", 10)
                .range("duration", 30, 1, 30)
                .non_negative("budget", 0.0)
                .finish()
                .is_ok()
        );
    }

    #[test]
    fn test_min_chars_counts_characters() {
        assert!(Validator::new().min_chars("p", "ééééé", 5).finish().is_ok());
        assert!(Validator::new().min_chars("p", "short", 10).finish().is_err());
    }

    #[test]
    fn test_nan_budget_rejected() {
        assert!(Validator::new().non_negative("budget", f64::NAN).finish().is_err());
    }

    #[test]
    fn test_normalize_optional() {
        let mut blank = Some("   ".to_string());
        normalize_optional(&mut blank);
        assert_eq!(blank, None);

        let mut padded = Some(" vegan ".to_string());
        normalize_optional(&mut padded);
        assert_eq!(padded.as_deref(), Some("vegan"));
    }

    #[test]
    fn test_normalize_context_drops_blank_optional() {
        let schema = json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string", "minLength": 1},
                "preferences": {"type": "string"}
            },
            "required": ["destination"]
        });

        let mut ctx = json!({"destination": "  Goa ", "preferences": "   ", "guests": 2});
        normalize_context(&schema, &mut ctx);
        assert_eq!(ctx, json!({"destination": "Goa", "guests": 2}));

        let mut ctx = json!({"destination": "  "});
        normalize_context(&schema, &mut ctx);
        assert_eq!(ctx, json!({"destination": ""}));
        assert!(validate_input(&schema, &ctx).is_err());
    }

    #[test]
    fn test_validate_output_schema() {
        let schema = json!({
            "type": "object",
            "properties": {"items": {"type": "array", "items": {"type": "string"}}},
            "required": ["items"]
        });
        assert!(validate_output(&schema, &json!({"items": ["a"]})).is_ok());
        assert!(matches!(
            validate_output(&schema, &json!({"items": [1]})),
            Err(SchemaValidationError::Schema(_))
        ));
        assert!(validate_output(&schema, &json!({})).is_err());
    }

    #[test]
    fn test_validate_input_reports_field() {
        let schema = json!({
            "type": "object",
            "properties": {"duration": {"type": "integer", "minimum": 1}},
            "required": ["duration"]
        });
        let err = validate_input(&schema, &json!({"duration": 0})).unwrap_err();
        match err {
            super::super::FlowError::Validation(v) => assert!(v.has_field("duration")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_schema() {
        let schema = json!({"type": "not-a-type"});
        assert!(matches!(
            validate_output(&schema, &json!({})),
            Err(SchemaValidationError::InvalidSchema(_))
        ));
    }
}
