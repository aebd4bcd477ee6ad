//! suggestCafeRestaurant - cafe and restaurant finder

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::RestaurantSuggestion;
use crate::flow::{
    FlowError, FlowRunner, PromptFlow, SchemaValidationError, Validate, ValidationError, Validator, normalize_optional,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantsInput {
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
}

impl Validate for RestaurantsInput {
    fn normalize(&mut self) {
        self.destination = self.destination.trim().to_string();
        normalize_optional(&mut self.preferences);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new().require("destination", &self.destination).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantsOutput {
    pub suggestions: Vec<RestaurantSuggestion>,
}

pub struct SuggestCafeRestaurant;

impl PromptFlow for SuggestCafeRestaurant {
    const NAME: &'static str = "suggestCafeRestaurant";
    const TEMPLATE: &'static str = "restaurants";
    const DESCRIPTION: &'static str = "Three to five cafes or restaurants with a one-sentence description";

    type Input = RestaurantsInput;
    type Output = RestaurantsOutput;

    fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string", "minLength": 1},
                "preferences": {"type": "string"}
            },
            "required": ["destination"]
        })
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "suggestions": {
                    "type": "array",
                    "minItems": 3,
                    "maxItems": 5,
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "description": {"type": "string"}
                        },
                        "required": ["name", "description"]
                    }
                }
            },
            "required": ["suggestions"]
        })
    }

    fn check_output(_input: &Self::Input, output: &Self::Output) -> Result<(), SchemaValidationError> {
        debug!(count = output.suggestions.len(), "SuggestCafeRestaurant::check_output: called");
        super::check_count("suggestions", output.suggestions.len())?;
        super::check_non_blank("restaurant name", output.suggestions.iter().map(|s| s.name.as_str()))
    }
}

/// Suggest 3-5 cafes and restaurants
pub async fn suggest_cafe_restaurant(
    runner: &FlowRunner,
    destination: &str,
    preferences: Option<&str>,
) -> Result<Vec<RestaurantSuggestion>, FlowError> {
    let input = RestaurantsInput {
        destination: destination.to_string(),
        preferences: preferences.map(str::to_string),
    };
    Ok(runner.run::<SuggestCafeRestaurant>(input).await?.suggestions)
}
