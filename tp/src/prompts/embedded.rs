//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System prompt shared by every flow
pub const SYSTEM: &str = include_str!("../../prompts/system.pmt");

/// Destination finder prompt
pub const DESTINATIONS: &str = include_str!("../../prompts/destinations.pmt");

/// Daily itinerary prompt
pub const ITINERARY: &str = include_str!("../../prompts/itinerary.pmt");

/// Pre-trip checklist prompt
pub const CHECKLIST: &str = include_str!("../../prompts/checklist.pmt");

/// Cafe and restaurant finder prompt
pub const RESTAURANTS: &str = include_str!("../../prompts/restaurants.pmt");

/// Hotel suggestion prompt
pub const HOTELS: &str = include_str!("../../prompts/hotels.pmt");

/// Names of all embedded templates
pub const NAMES: &[&str] = &["system", "destinations", "itinerary", "checklist", "restaurants", "hotels"];

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "system" => Some(SYSTEM),
        "destinations" => Some(DESTINATIONS),
        "itinerary" => Some(ITINERARY),
        "checklist" => Some(CHECKLIST),
        "restaurants" => Some(RESTAURANTS),
        "hotels" => Some(HOTELS),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_names_resolve() {
        for name in NAMES {
            assert!(get_embedded(name).is_some(), "missing embedded template {}", name);
        }
    }

    #[test]
    fn test_get_embedded_itinerary() {
        let itinerary = get_embedded("itinerary").unwrap();
        assert!(itinerary.contains("{{destination}}"));
        assert!(itinerary.contains("{{#if preferences}}"));
        assert!(itinerary.contains("estimatedCost"));
    }

    #[test]
    fn test_get_embedded_checklist_mentions_mountains() {
        let checklist = get_embedded("checklist").unwrap();
        assert!(checklist.contains("hiking boots"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
