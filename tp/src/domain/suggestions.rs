//! Restaurant and hotel suggestion types

use serde::{Deserialize, Serialize};

/// A cafe or restaurant recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantSuggestion {
    pub name: String,

    /// One sentence on vibe, specialties or what makes it unique
    pub description: String,
}

/// A hotel recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSuggestion {
    pub name: String,

    /// Star rating in [1, 5]
    pub rating: f64,

    /// Estimated price per night (INR)
    pub price_per_night: f64,
}

impl HotelSuggestion {
    /// Whole stars for display, clamped to 0..=5
    pub fn stars(&self) -> usize {
        self.rating.floor().clamp(0.0, 5.0) as usize
    }
}
