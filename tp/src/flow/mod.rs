//! Prompt flows
//!
//! A prompt flow is a typed contract around one model call:
//!
//! ```text
//! Input ──validate──▶ template ──render──▶ LlmClient ──payload──▶ output schema
//!                                                                    │
//!                                     Output ◀──semantic check◀──decode
//! ```
//!
//! Each flow declares its input and output JSON schemas, the template it
//! renders, and any rules the schema cannot express (day numbering, list
//! sizes). `FlowRunner` executes any flow; the built-in flows live in
//! [`builtin`].

mod error;
mod runner;
mod validate;

pub mod builtin;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::{FlowError, SchemaValidationError};
pub use runner::{FlowRunner, prepare};
pub use validate::{
    FieldError, Validate, ValidationError, Validator, normalize_context, normalize_optional, validate_input,
    validate_output,
};

/// A typed prompt flow
pub trait PromptFlow {
    /// Registry name, e.g. `generateDailyItinerary`
    const NAME: &'static str;

    /// Prompt template name
    const TEMPLATE: &'static str;

    /// One-line description, also sent as the output tool description
    const DESCRIPTION: &'static str;

    type Input: Serialize + Validate + Send + Sync;
    type Output: Serialize + DeserializeOwned + Send;

    fn input_schema() -> Value;

    fn output_schema() -> Value;

    /// Handlebars context for the template
    fn prompt_context(input: &Self::Input) -> Result<Value, FlowError> {
        serde_json::to_value(input).map_err(|e| FlowError::Render(e.to_string()))
    }

    /// Rules beyond what the output schema expresses
    fn check_output(_input: &Self::Input, _output: &Self::Output) -> Result<(), SchemaValidationError> {
        Ok(())
    }

    fn spec() -> PromptFlowSpec {
        PromptFlowSpec {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            input_schema: Self::input_schema(),
            output_schema: Self::output_schema(),
            template: Self::TEMPLATE.to_string(),
        }
    }
}

/// Untyped description of a flow
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFlowSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub output_schema: Value,
    pub template: String,
}

/// Specs for every built-in flow
pub fn flow_specs() -> Vec<PromptFlowSpec> {
    vec![
        builtin::SuggestDestinations::spec(),
        builtin::GenerateDailyItinerary::spec(),
        builtin::SuggestChecklistItems::spec(),
        builtin::SuggestCafeRestaurant::spec(),
        builtin::SuggestHotels::spec(),
    ]
}

/// Look up a built-in flow spec by name
pub fn find_spec(name: &str) -> Option<PromptFlowSpec> {
    flow_specs().into_iter().find(|s| s.name == name)
}
