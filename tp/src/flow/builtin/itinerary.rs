//! generateDailyItinerary - day-by-day trip plan

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::ItineraryDay;
use crate::flow::{FlowError, FlowRunner, PromptFlow, SchemaValidationError, Validate, ValidationError, Validator};
use crate::prompts::format_amount;

pub const DEFAULT_DURATION: u32 = 7;
pub const DEFAULT_BUDGET: f64 = 12000.0;

/// What the traveller asked the planner for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub destination: String,
    /// Trip length in days
    pub duration: u32,
    pub preferences: String,
    /// Daily budget
    pub budget: f64,
}

impl PlanRequest {
    pub fn new(destination: impl Into<String>, preferences: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            duration: DEFAULT_DURATION,
            preferences: preferences.into(),
            budget: DEFAULT_BUDGET,
        }
    }
}

impl Validate for PlanRequest {
    fn normalize(&mut self) {
        self.destination = self.destination.trim().to_string();
        self.preferences = self.preferences.trim().to_string();
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Validator::new()
            .require("destination", &self.destination)
            .range("duration", self.duration, 1, 30)
            .min_chars("preferences", &self.preferences, 10)
            .non_negative("budget", self.budget)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryOutput {
    pub itinerary: Vec<ItineraryDay>,
}

pub struct GenerateDailyItinerary;

impl PromptFlow for GenerateDailyItinerary {
    const NAME: &'static str = "generateDailyItinerary";
    const TEMPLATE: &'static str = "itinerary";
    const DESCRIPTION: &'static str = "Day-by-day itinerary with activities and estimated daily cost";

    type Input = PlanRequest;
    type Output = ItineraryOutput;

    fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination": {"type": "string", "minLength": 1},
                "duration": {"type": "integer", "minimum": 1, "maximum": 30},
                "preferences": {"type": "string"},
                "budget": {"type": "number", "minimum": 0}
            },
            "required": ["destination", "duration", "budget"]
        })
    }

    fn output_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "itinerary": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "day": {"type": "integer", "minimum": 1},
                            "activities": {"type": "array", "items": {"type": "string"}},
                            "estimatedCost": {"type": "number", "minimum": 0}
                        },
                        "required": ["day", "activities", "estimatedCost"]
                    }
                }
            },
            "required": ["itinerary"]
        })
    }

    fn prompt_context(input: &Self::Input) -> Result<Value, FlowError> {
        debug!(destination = %input.destination, duration = input.duration, "GenerateDailyItinerary::prompt_context: called");
        Ok(json!({
            "destination": input.destination,
            "duration": input.duration,
            "preferences": input.preferences,
            "budget": format_amount(input.budget),
        }))
    }

    fn check_output(input: &Self::Input, output: &Self::Output) -> Result<(), SchemaValidationError> {
        let days = &output.itinerary;
        debug!(expected = input.duration, got = days.len(), "GenerateDailyItinerary::check_output: called");
        if days.len() != input.duration as usize {
            return Err(SchemaValidationError::Rule(format!(
                "expected {} days, got {}",
                input.duration,
                days.len()
            )));
        }
        for (index, day) in days.iter().enumerate() {
            let expected = index as u32 + 1;
            if day.day != expected {
                return Err(SchemaValidationError::Rule(format!(
                    "day {} is numbered {}",
                    expected, day.day
                )));
            }
            if day.estimated_cost > input.budget {
                return Err(SchemaValidationError::Rule(format!(
                    "day {} costs {} over the daily budget {}",
                    day.day,
                    format_amount(day.estimated_cost),
                    format_amount(input.budget)
                )));
            }
        }
        Ok(())
    }
}

/// Generate an itinerary with exactly `request.duration` days
pub async fn generate_daily_itinerary(runner: &FlowRunner, request: PlanRequest) -> Result<Vec<ItineraryDay>, FlowError> {
    Ok(runner.run::<GenerateDailyItinerary>(request).await?.itinerary)
}
