//! Built-in prompt flows

mod checklist;
mod destinations;
mod hotels;
mod itinerary;
mod restaurants;

pub use checklist::{ChecklistInput, ChecklistOutput, SuggestChecklistItems, suggest_checklist_items};
pub use destinations::{DestinationsInput, DestinationsOutput, SuggestDestinations, suggest_destinations};
pub use hotels::{HotelsInput, HotelsOutput, SuggestHotels, suggest_hotels};
pub use itinerary::{DEFAULT_BUDGET, DEFAULT_DURATION, GenerateDailyItinerary, ItineraryOutput, PlanRequest, generate_daily_itinerary};
pub use restaurants::{RestaurantsInput, RestaurantsOutput, SuggestCafeRestaurant, suggest_cafe_restaurant};

use super::SchemaValidationError;

/// Suggestion lists must hold between 3 and 5 entries
fn check_count(what: &str, count: usize) -> Result<(), SchemaValidationError> {
    if (3..=5).contains(&count) {
        Ok(())
    } else {
        Err(SchemaValidationError::Rule(format!("expected 3 to 5 {}, got {}", what, count)))
    }
}

fn check_non_blank<'a>(what: &str, values: impl IntoIterator<Item = &'a str>) -> Result<(), SchemaValidationError> {
    if values.into_iter().any(|v| v.trim().is_empty()) {
        return Err(SchemaValidationError::Rule(format!("blank {}", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_count_bounds() {
        assert!(check_count("hotels", 2).is_err());
        assert!(check_count("hotels", 3).is_ok());
        assert!(check_count("hotels", 5).is_ok());
        assert!(check_count("hotels", 6).is_err());
    }

    #[test]
    fn test_check_non_blank() {
        assert!(check_non_blank("name", ["a", "b"]).is_ok());
        assert!(check_non_blank("name", ["a", "  "]).is_err());
    }
}
