//! Trip storage
//!
//! Saved trips, per-destination checklists and per-destination food
//! suggestions, kept in a `keystore::JsonStore`. Reads never fail: absent or
//! unreadable values come back as their defaults. Writes are logged on failure
//! and otherwise ignored.

use std::sync::Arc;

use keystore::{JsonStore, Store};
use tracing::{debug, info};

use crate::domain::{Checklist, RestaurantSuggestion, SavedTrip};
use crate::links::{self, LinkError};

pub const SAVED_TRIPS_KEY: &str = "savedTrips";

pub fn checklist_key(destination: &str) -> String {
    format!("tripChecklist-{}", destination)
}

pub fn food_key(destination: &str) -> String {
    format!("foodSuggestions-{}", destination)
}

/// Persisted planner state
pub struct TripStorage {
    store: JsonStore,
}

impl TripStorage {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store: JsonStore::new(store),
        }
    }

    /// Trips in insertion order
    pub fn trips(&self) -> Vec<SavedTrip> {
        self.store.get(SAVED_TRIPS_KEY, Vec::new())
    }

    /// Trips, newest first
    pub fn list_trips(&self) -> Vec<SavedTrip> {
        let mut trips = self.trips();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        trips
    }

    pub fn get_trip(&self, id: &str) -> Option<SavedTrip> {
        self.trips().into_iter().find(|t| t.id == id)
    }

    /// Append a trip, bumping its id until it is unique
    pub fn save_trip(&self, mut trip: SavedTrip) -> SavedTrip {
        debug!(destination = %trip.destination, "TripStorage::save_trip: called");
        let mut trips = self.trips();
        while trips.iter().any(|t| t.id == trip.id) {
            trip.bump_id();
        }
        trips.push(trip.clone());
        self.store.set(SAVED_TRIPS_KEY, &trips);
        info!(id = %trip.id, destination = %trip.destination, "Trip saved");
        trip
    }

    /// Remove a trip; false when no trip has that id
    pub fn delete_trip(&self, id: &str) -> bool {
        let mut trips = self.trips();
        let before = trips.len();
        trips.retain(|t| t.id != id);
        if trips.len() == before {
            debug!(%id, "TripStorage::delete_trip: not found");
            return false;
        }
        self.store.set(SAVED_TRIPS_KEY, &trips);
        info!(%id, "Trip deleted");
        true
    }

    /// Flip one checklist item of a saved trip, returning the new state
    pub fn toggle_trip_checklist_item(&self, trip_id: &str, item_id: u64) -> Option<bool> {
        let mut trips = self.trips();
        let completed = trips
            .iter_mut()
            .find(|t| t.id == trip_id)?
            .toggle_checklist_item(item_id)?;
        self.store.set(SAVED_TRIPS_KEY, &trips);
        Some(completed)
    }

    /// Working checklist for a destination, the default list if none is stored
    pub fn checklist(&self, destination: &str) -> Checklist {
        self.store.get(&checklist_key(destination), Checklist::default())
    }

    pub fn set_checklist(&self, destination: &str, checklist: &Checklist) {
        self.store.set(&checklist_key(destination), checklist);
    }

    /// Last food suggestions for a destination; `None` if never generated
    pub fn food_suggestions(&self, destination: &str) -> Option<Vec<RestaurantSuggestion>> {
        self.store.get(&food_key(destination), None)
    }

    /// Store suggestions, or `None` to mark that there are none to show
    pub fn set_food_suggestions(&self, destination: &str, suggestions: Option<&[RestaurantSuggestion]>) {
        self.store.set(&food_key(destination), &suggestions);
    }

    /// Share text for a saved trip
    pub fn share_text(&self, trip_id: &str, base_url: &str) -> Option<Result<String, LinkError>> {
        self.get_trip(trip_id).map(|trip| links::share_text(&trip, base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChecklistItem, ItineraryDay};
    use chrono::{TimeZone, Utc};
    use keystore::MemoryStore;

    fn storage() -> TripStorage {
        TripStorage::new(Arc::new(MemoryStore::new()))
    }

    fn trip(destination: &str, minute: u32) -> SavedTrip {
        SavedTrip::new(
            destination,
            1,
            "anything goes",
            1000.0,
            vec![ItineraryDay::new(1, vec!["Walk".into()], 500.0)],
            Utc.with_ymd_and_hms(2026, 1, 1, 10, minute, 0).unwrap(),
        )
        .with_checklist(vec![ChecklistItem::new(1, "Book flights")])
    }

    #[test]
    fn test_empty_store_defaults() {
        let s = storage();
        assert!(s.list_trips().is_empty());
        assert!(s.checklist("Goa").is_default());
        assert_eq!(s.food_suggestions("Goa"), None);
    }

    #[test]
    fn test_list_newest_first() {
        let s = storage();
        s.save_trip(trip("Goa", 0));
        s.save_trip(trip("Paris", 5));
        let listed: Vec<_> = s.list_trips().into_iter().map(|t| t.destination).collect();
        assert_eq!(listed, vec!["Paris", "Goa"]);
        assert_eq!(s.trips()[0].destination, "Goa");
    }

    #[test]
    fn test_colliding_ids_bumped() {
        let s = storage();
        let first = s.save_trip(trip("Goa", 0));
        let second = s.save_trip(trip("Goa", 0));
        assert_ne!(first.id, second.id);
        assert_eq!(second.id, "2026-01-01T10:00:00.001Z");
    }

    #[test]
    fn test_delete_twice() {
        let s = storage();
        let saved = s.save_trip(trip("Goa", 0));
        assert!(s.delete_trip(&saved.id));
        assert!(!s.delete_trip(&saved.id));
        assert!(s.trips().is_empty());
    }

    #[test]
    fn test_toggle_trip_item_persists() {
        let s = storage();
        let saved = s.save_trip(trip("Goa", 0));
        assert_eq!(s.toggle_trip_checklist_item(&saved.id, 1), Some(true));
        assert!(s.get_trip(&saved.id).unwrap().checklist[0].completed);
        assert_eq!(s.toggle_trip_checklist_item(&saved.id, 1), Some(false));
        assert_eq!(s.toggle_trip_checklist_item(&saved.id, 42), None);
        assert_eq!(s.toggle_trip_checklist_item("missing", 1), None);
    }

    #[test]
    fn test_checklist_per_destination() {
        let s = storage();
        let mut list = Checklist::default();
        list.add("Pack reef-safe sunscreen");
        s.set_checklist("Goa", &list);

        assert_eq!(s.checklist("Goa"), list);
        assert!(s.checklist("Manali").is_default());
    }

    #[test]
    fn test_food_suggestions_cleared() {
        let s = storage();
        let list = vec![RestaurantSuggestion {
            name: "Britto's".into(),
            description: "Beach shack".into(),
        }];
        s.set_food_suggestions("Goa", Some(&list));
        assert_eq!(s.food_suggestions("Goa"), Some(list));

        s.set_food_suggestions("Goa", None);
        assert_eq!(s.food_suggestions("Goa"), None);
    }

    #[test]
    fn test_corrupt_trips_fall_back_to_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set_raw(SAVED_TRIPS_KEY, "{not json").unwrap();
        let s = TripStorage::new(store);
        assert!(s.list_trips().is_empty());
    }

    #[test]
    fn test_share_text_for_missing_trip() {
        let s = storage();
        assert!(s.share_text("nope", "http://localhost:9002").is_none());
        let saved = s.save_trip(trip("Goa", 0));
        let text = s.share_text(&saved.id, "http://localhost:9002").unwrap().unwrap();
        assert!(text.contains("1-day trip to Goa"));
    }
}
