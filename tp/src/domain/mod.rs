//! Domain types
//!
//! Plain value records exchanged between flows, storage and the CLI. JSON field
//! names follow the browser-era layout (camelCase) so stored data stays readable
//! by either side.

mod checklist;
mod itinerary;
mod suggestions;
mod trip;

pub use checklist::{Checklist, ChecklistItem};
pub use itinerary::ItineraryDay;
pub use suggestions::{HotelSuggestion, RestaurantSuggestion};
pub use trip::{SavedTrip, trip_id};

/// Current time in unix milliseconds
pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
