//! suggestHotels - hotel recommendations

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::HotelSuggestion;
use crate::flow::{FlowError, FlowRunner, PromptFlow, SchemaValidationError, Validate, ValidationError, Validator};
use crate::prompts::format_amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelsInput {
    pub destination: String,
    /// Upper bound on the nightly price (INR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

impl Validate for HotelsInput {
    fn normalize(&mut self) {
        self.destination = self.destination.trim().to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require("destination", &self.destination);
        if let Some(budget) = self.budget {
            v.non_negative("budget", budget);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelsOutput {
    pub hotels: Vec<HotelSuggestion>,
}

pub struct SuggestHotels;

impl PromptFlow for SuggestHotels {
    const NAME: &'static str = "suggestHotels";
    const TEMPLATE: &'static str = "hotels";
    const DESCRIPTION: &'static str = "Three to five hotels with star rating and nightly price";

    type Input = HotelsInput;
    type Output = HotelsOutput;

    fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string", "minLength": 1},
                "budget": {"type": "number", "minimum": 0}
            },
            "required": ["destination"]
        })
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "hotels": {
                    "type": "array",
                    "minItems": 3,
                    "maxItems": 5,
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "rating": {"type": "number", "minimum": 1, "maximum": 5},
                            "pricePerNight": {"type": "number", "minimum": 0}
                        },
                        "required": ["name", "rating", "pricePerNight"]
                    }
                }
            },
            "required": ["hotels"]
        })
    }

    /// `has_budget` is set for any budget, including 0
    fn prompt_context(input: &Self::Input) -> Result<Value, FlowError> {
        debug!(destination = %input.destination, budget = ?input.budget, "SuggestHotels::prompt_context: called");
        let mut ctx = json!({
            "destination": input.destination,
            "has_budget": input.budget.is_some(),
        });
        if let Some(budget) = input.budget {
            ctx["budget"] = Value::String(format_amount(budget));
        }
        Ok(ctx)
    }

    fn check_output(_input: &Self::Input, output: &Self::Output) -> Result<(), SchemaValidationError> {
        debug!(count = output.hotels.len(), "SuggestHotels::check_output: called");
        super::check_count("hotels", output.hotels.len())?;
        super::check_non_blank("hotel name", output.hotels.iter().map(|h| h.name.as_str()))?;
        for hotel in &output.hotels {
            if !(1.0..=5.0).contains(&hotel.rating) {
                return Err(SchemaValidationError::Rule(format!(
                    "{} has rating {} outside 1-5",
                    hotel.name, hotel.rating
                )));
            }
            if hotel.price_per_night < 0.0 {
                return Err(SchemaValidationError::Rule(format!("{} has a negative price", hotel.name)));
            }
        }
        Ok(())
    }
}

/// Suggest 3-5 hotels, optionally within a nightly budget
pub async fn suggest_hotels(
    runner: &FlowRunner,
    destination: &str,
    budget: Option<f64>,
) -> Result<Vec<HotelSuggestion>, FlowError> {
    let input = HotelsInput {
        destination: destination.to_string(),
        budget,
    };
    Ok(runner.run::<SuggestHotels>(input).await?.hotels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::PromptLoader;

    fn hotel(name: &str, rating: f64) -> HotelSuggestion {
        HotelSuggestion {
            name: name.to_string(),
            rating,
            price_per_night: 5000.0,
        }
    }

    fn input(budget: Option<f64>) -> HotelsInput {
        HotelsInput {
            destination: "Jaipur".to_string(),
            budget,
        }
    }

    #[test]
    fn test_zero_budget_still_rendered() {
        let loader = PromptLoader::embedded_only();
        let ctx = SuggestHotels::prompt_context(&input(Some(0.0))).unwrap();
        let rendered = loader.render("hotels", &ctx).unwrap();
        assert!(rendered.contains("at or below 0 INR"));

        let ctx = SuggestHotels::prompt_context(&input(None)).unwrap();
        let rendered = loader.render("hotels", &ctx).unwrap();
        assert!(!rendered.contains("at or below"));
    }

    #[test]
    fn test_rating_out_of_range() {
        let out = HotelsOutput {
            hotels: vec![hotel("A", 4.0), hotel("B", 5.5), hotel("C", 3.0)],
        };
        assert!(SuggestHotels::check_output(&input(None), &out).is_err());
    }

    #[test]
    fn test_valid_hotels() {
        let out = HotelsOutput {
            hotels: vec![hotel("A", 4.0), hotel("B", 1.0), hotel("C", 5.0)],
        };
        assert!(SuggestHotels::check_output(&input(None), &out).is_ok());
    }

    #[test]
    fn test_negative_budget_rejected() {
        assert!(input(Some(-10.0)).validate().is_err());
        assert!(input(None).validate().is_ok());
    }
}
