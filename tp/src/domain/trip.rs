//! SavedTrip domain type

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChecklistItem, ItineraryDay, RestaurantSuggestion};

/// Trip id for a creation time: RFC 3339 with millisecond precision
pub fn trip_id(created_at: DateTime<Utc>) -> String {
    created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A generated trip plan the user chose to keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTrip {
    pub id: String,
    pub destination: String,
    pub duration: u32,
    #[serde(default)]
    pub preferences: String,
    pub budget: f64,
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub food_suggestions: Vec<RestaurantSuggestion>,
    pub created_at: DateTime<Utc>,
}

impl SavedTrip {
    pub fn new(
        destination: impl Into<String>,
        duration: u32,
        preferences: impl Into<String>,
        budget: f64,
        itinerary: Vec<ItineraryDay>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: trip_id(created_at),
            destination: destination.into(),
            duration,
            preferences: preferences.into(),
            budget,
            itinerary,
            checklist: Vec::new(),
            food_suggestions: Vec::new(),
            created_at,
        }
    }

    pub fn with_checklist(mut self, checklist: Vec<ChecklistItem>) -> Self {
        self.checklist = checklist;
        self
    }

    pub fn with_food_suggestions(mut self, suggestions: Vec<RestaurantSuggestion>) -> Self {
        self.food_suggestions = suggestions;
        self
    }

    /// Move the creation time forward one millisecond and re-derive the id
    pub fn bump_id(&mut self) {
        self.created_at += chrono::Duration::milliseconds(1);
        self.id = trip_id(self.created_at);
        debug!(id = %self.id, "SavedTrip::bump_id: id bumped");
    }

    /// Sum of the estimated daily costs
    pub fn estimated_total(&self) -> f64 {
        self.itinerary.iter().map(|d| d.estimated_cost).sum()
    }

    /// Flip a checklist item's completed flag, returning the new state
    pub fn toggle_checklist_item(&mut self, item_id: u64) -> Option<bool> {
        debug!(trip = %self.id, item_id, "SavedTrip::toggle_checklist_item: called");
        let item = self.checklist.iter_mut().find(|i| i.id == item_id)?;
        item.completed = !item.completed;
        Some(item.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn sample() -> SavedTrip {
        SavedTrip::new(
            "Paris",
            2,
            "museums and cafes",
            9000.0,
            vec![
                ItineraryDay::new(1, vec!["Louvre".into()], 4000.0),
                ItineraryDay::new(2, vec!["Montmartre".into()], 3500.0),
            ],
            fixed_time(),
        )
    }

    #[test]
    fn test_id_is_millisecond_timestamp() {
        assert_eq!(sample().id, "2026-03-14T09:30:00.000Z");
    }

    #[test]
    fn test_bump_id() {
        let mut trip = sample();
        trip.bump_id();
        assert_eq!(trip.id, "2026-03-14T09:30:00.001Z");
    }

    #[test]
    fn test_json_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("foodSuggestions").is_some());
        assert_eq!(json["itinerary"][0]["estimatedCost"], 4000.0);
    }

    #[test]
    fn test_legacy_record_without_checklist_or_food() {
        let raw = serde_json::json!({
            "id": "2025-01-01T00:00:00.000Z",
            "destination": "Goa",
            "duration": 1,
            "preferences": "beaches",
            "budget": 3000,
            "itinerary": [{"day": 1, "activities": ["Baga"], "estimatedCost": 2000}],
            "createdAt": "2025-01-01T00:00:00.000Z"
        });
        let trip: SavedTrip = serde_json::from_value(raw).unwrap();
        assert!(trip.checklist.is_empty());
        assert!(trip.food_suggestions.is_empty());
    }

    #[test]
    fn test_round_trip_deep_equal() {
        let trip = sample()
            .with_checklist(vec![ChecklistItem::new(7, "Pack adapter")])
            .with_food_suggestions(vec![RestaurantSuggestion {
                name: "Café de Flore".into(),
                description: "Classic Left Bank café".into(),
            }]);
        let text = serde_json::to_string(&trip).unwrap();
        let back: SavedTrip = serde_json::from_str(&text).unwrap();
        assert_eq!(back, trip);
    }

    #[test]
    fn test_toggle_checklist_item() {
        let mut trip = sample().with_checklist(vec![ChecklistItem::new(7, "Pack adapter")]);
        assert_eq!(trip.toggle_checklist_item(7), Some(true));
        assert_eq!(trip.toggle_checklist_item(8), None);
        assert_eq!(trip.estimated_total(), 7500.0);
    }
}
