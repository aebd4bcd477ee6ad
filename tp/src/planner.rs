//! Planner - flows wired to storage
//!
//! The flows themselves are pure request/response. The planner adds the
//! persistence each feature needs around them: the working checklist, the last
//! food suggestions per destination, and saved trips.

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{Checklist, ItineraryDay, RestaurantSuggestion, SavedTrip};
use crate::flow::builtin::{PlanRequest, generate_daily_itinerary, suggest_cafe_restaurant, suggest_checklist_items};
use crate::flow::{FlowError, FlowRunner};
use crate::storage::TripStorage;

pub struct Planner {
    runner: FlowRunner,
    storage: TripStorage,
}

impl Planner {
    pub fn new(runner: FlowRunner, storage: TripStorage) -> Self {
        Self { runner, storage }
    }

    pub fn runner(&self) -> &FlowRunner {
        &self.runner
    }

    pub fn storage(&self) -> &TripStorage {
        &self.storage
    }

    /// Generate an itinerary; nothing is stored
    pub async fn plan(&self, request: PlanRequest) -> Result<Vec<ItineraryDay>, FlowError> {
        generate_daily_itinerary(&self.runner, request).await
    }

    /// Save a generated itinerary together with the destination's checklist
    /// and food suggestions
    pub fn save_plan(&self, request: &PlanRequest, itinerary: Vec<ItineraryDay>) -> SavedTrip {
        debug!(destination = %request.destination, "Planner::save_plan: called");
        let destination = request.destination.trim();
        let checklist = self.storage.checklist(destination).into_items();
        let food = self.storage.food_suggestions(destination).unwrap_or_default();

        let trip = SavedTrip::new(
            destination,
            request.duration,
            request.preferences.clone(),
            request.budget,
            itinerary,
            Utc::now(),
        )
        .with_checklist(checklist)
        .with_food_suggestions(food);
        self.storage.save_trip(trip)
    }

    /// Replace the destination's checklist with generated items
    ///
    /// On failure the stored checklist is left as it was.
    pub async fn regenerate_checklist(&self, destination: &str) -> Result<Checklist, FlowError> {
        let items = suggest_checklist_items(&self.runner, destination).await?;
        let mut checklist = self.storage.checklist(destination);
        checklist.replace_with(items);
        self.storage.set_checklist(destination, &checklist);
        info!(%destination, items = checklist.len(), "Checklist regenerated");
        Ok(checklist)
    }

    /// Find food suggestions, replacing the stored ones
    ///
    /// Stored suggestions are cleared before the call, so a failure leaves none.
    pub async fn find_food(
        &self,
        destination: &str,
        preferences: Option<&str>,
    ) -> Result<Vec<RestaurantSuggestion>, FlowError> {
        let destination = destination.trim();
        self.storage.set_food_suggestions(destination, None);
        let suggestions = suggest_cafe_restaurant(&self.runner, destination, preferences).await?;
        self.storage.set_food_suggestions(destination, Some(&suggestions));
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionResponse, LlmError};
    use crate::prompts::PromptLoader;
    use keystore::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    fn planner(responses: Vec<Result<CompletionResponse, LlmError>>) -> Planner {
        let runner = FlowRunner::new(Arc::new(MockLlmClient::new(responses)), PromptLoader::embedded_only());
        Planner::new(runner, TripStorage::new(Arc::new(MemoryStore::new())))
    }

    fn food_payload() -> serde_json::Value {
        json!({"suggestions": [
            {"name": "Britto's", "description": "Beach shack"},
            {"name": "Gunpowder", "description": "South Indian"},
            {"name": "Thalassa", "description": "Greek by the sea"}
        ]})
    }

    #[tokio::test]
    async fn test_find_food_persists() {
        let p = planner(vec![Ok(CompletionResponse::structured(food_payload()))]);
        let found = p.find_food("Goa", None).await.unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(p.storage().food_suggestions("Goa"), Some(found));
    }

    #[tokio::test]
    async fn test_find_food_failure_clears_previous() {
        let p = planner(vec![
            Ok(CompletionResponse::structured(food_payload())),
            Err(LlmError::ApiError {
                status: 503,
                message: "unavailable".into(),
            }),
        ]);
        p.find_food("Goa", None).await.unwrap();
        assert!(p.find_food("Goa", None).await.is_err());
        assert_eq!(p.storage().food_suggestions("Goa"), None);
    }

    #[tokio::test]
    async fn test_regenerate_checklist_failure_keeps_list() {
        let p = planner(vec![Ok(CompletionResponse::structured(json!({"checklist": []})))]);
        assert!(p.regenerate_checklist("Manali").await.is_err());
        assert!(p.storage().checklist("Manali").is_default());
    }

    #[tokio::test]
    async fn test_regenerate_checklist_with_blank_items_keeps_list() {
        let p = planner(vec![Ok(CompletionResponse::structured(
            json!({"checklist": ["Pack a warm jacket", "   ", ""]}),
        ))]);
        let err = p.regenerate_checklist("Manali").await.unwrap_err();
        assert!(matches!(err, FlowError::Schema(_)));
        assert!(p.storage().checklist("Manali").is_default());
    }

    #[tokio::test]
    async fn test_save_plan_attaches_checklist_and_food() {
        let p = planner(vec![
            Ok(CompletionResponse::structured(json!({"checklist": ["Pack a warm jacket"]}))),
            Ok(CompletionResponse::structured(food_payload())),
        ]);
        p.regenerate_checklist("Goa").await.unwrap();
        p.find_food("Goa", Some("seafood")).await.unwrap();

        let request = PlanRequest::new("Goa", "beaches and seafood");
        let trip = p.save_plan(&request, vec![ItineraryDay::new(1, vec!["Baga".into()], 100.0)]);
        assert_eq!(trip.checklist.len(), 1);
        assert_eq!(trip.checklist[0].text, "Pack a warm jacket");
        assert_eq!(trip.food_suggestions.len(), 3);
        assert_eq!(p.storage().list_trips(), vec![trip]);
    }
}
