//! ItineraryDay domain type

use serde::{Deserialize, Serialize};

/// One day of a generated itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    /// Day number, starting at 1
    pub day: u32,

    /// Suggested activities in order
    pub activities: Vec<String>,

    /// Estimated cost for the day
    pub estimated_cost: f64,
}

impl ItineraryDay {
    pub fn new(day: u32, activities: Vec<String>, estimated_cost: f64) -> Self {
        Self {
            day,
            activities,
            estimated_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields() {
        let day = ItineraryDay::new(1, vec!["Baga beach".to_string()], 2500.0);
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["estimatedCost"], 2500.0);
        assert!(json.get("estimated_cost").is_none());
    }

    #[test]
    fn test_rejects_negative_day() {
        let raw = serde_json::json!({"day": -1, "activities": [], "estimatedCost": 0});
        assert!(serde_json::from_value::<ItineraryDay>(raw).is_err());
    }
}
