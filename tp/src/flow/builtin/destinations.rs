//! suggestDestinations - destination finder

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::flow::{FlowError, FlowRunner, PromptFlow, SchemaValidationError, Validate, ValidationError, Validator};

/// Free-text description of the trip the traveller wants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationsInput {
    pub preferences: String,
}

impl Validate for DestinationsInput {
    fn normalize(&mut self) {
        self.preferences = self.preferences.trim().to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new().min_chars("preferences", &self.preferences, 10).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationsOutput {
    pub destinations: Vec<String>,
}

pub struct SuggestDestinations;

impl PromptFlow for SuggestDestinations {
    const NAME: &'static str = "suggestDestinations";
    const TEMPLATE: &'static str = "destinations";
    const DESCRIPTION: &'static str = "Destinations that match the traveller's preferences";

    type Input = DestinationsInput;
    type Output = DestinationsOutput;

    fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "preferences": {
                    "type": "string",
                    "minLength": 10,
                    "description": "Travel style, budget and interests"
                }
            },
            "required": ["preferences"]
        })
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "destinations": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Suggested destination names"
                }
            },
            "required": ["destinations"]
        })
    }

    fn check_output(_input: &Self::Input, output: &Self::Output) -> Result<(), SchemaValidationError> {
        debug!(count = output.destinations.len(), "SuggestDestinations::check_output: called");
        super::check_non_blank("destination name", output.destinations.iter().map(String::as_str))
    }
}

/// Suggest destinations for a free-text description
pub async fn suggest_destinations(runner: &FlowRunner, preferences: &str) -> Result<Vec<String>, FlowError> {
    let input = DestinationsInput {
        preferences: preferences.to_string(),
    };
    Ok(runner.run::<SuggestDestinations>(input).await?.destinations)
}
