//! suggestChecklistItems - destination-aware pre-trip checklist

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::flow::{FlowError, FlowRunner, PromptFlow, SchemaValidationError, Validate, ValidationError, Validator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistInput {
    pub destination: String,
}

impl Validate for ChecklistInput {
    fn normalize(&mut self) {
        self.destination = self.destination.trim().to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new().require("destination", &self.destination).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistOutput {
    pub checklist: Vec<String>,
}

pub struct SuggestChecklistItems;

impl PromptFlow for SuggestChecklistItems {
    const NAME: &'static str = "suggestChecklistItems";
    const TEMPLATE: &'static str = "checklist";
    const DESCRIPTION: &'static str = "Pre-trip checklist items for the destination";

    type Input = ChecklistInput;
    type Output = ChecklistOutput;

    fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string", "minLength": 1}
            },
            "required": ["destination"]
        })
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "checklist": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 1
                }
            },
            "required": ["checklist"]
        })
    }

    fn check_output(input: &Self::Input, output: &Self::Output) -> Result<(), SchemaValidationError> {
        debug!(destination = %input.destination, items = output.checklist.len(), "SuggestChecklistItems::check_output: called");
        super::check_non_blank("checklist item", output.checklist.iter().map(String::as_str))
    }
}

/// Suggest checklist item texts for a destination
pub async fn suggest_checklist_items(runner: &FlowRunner, destination: &str) -> Result<Vec<String>, FlowError> {
    let input = ChecklistInput {
        destination: destination.to_string(),
    };
    Ok(runner.run::<SuggestChecklistItems>(input).await?.checklist)
}
