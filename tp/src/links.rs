//! Booking and sharing links
//!
//! Nothing here calls the network: flights and hotels are booked by handing the
//! user a prefilled Google Travel search, and trips are shared as a planner URL
//! that reopens the itinerary form.

use chrono::NaiveDate;
use reqwest::Url;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::SavedTrip;
use crate::flow::builtin::{DEFAULT_BUDGET, DEFAULT_DURATION, PlanRequest};
use crate::flow::{ValidationError, Validator};

const FLIGHTS_URL: &str = "https://www.google.com/travel/flights";
const HOTELS_URL: &str = "https://www.google.com/travel/hotels/search";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum LinkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("missing query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid value for {field}: {value}")]
    InvalidParameter { field: &'static str, value: String },
}

fn parse_url(raw: &str) -> Result<Url, LinkError> {
    Url::parse(raw).map_err(|e| LinkError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// Parse a `yyyy-mm-dd` date
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, LinkError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| LinkError::InvalidParameter {
        field,
        value: raw.to_string(),
    })
}

/// Flight search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightSearch {
    pub from: String,
    pub to: String,
    pub departure: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
}

impl FlightSearch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require("from", &self.from)
            .require("to", &self.to)
            .range("passengers", self.passengers, 1, 9);
        if self.return_date.is_some_and(|ret| ret < self.departure) {
            v.fail("return", "must not be before the departure date");
        }
        v.finish()
    }

    /// The search phrase Google Flights understands
    pub fn query(&self) -> String {
        let mut q = format!(
            "{} to {} from {}",
            self.from.trim(),
            self.to.trim(),
            self.departure.format(DATE_FORMAT)
        );
        if let Some(ret) = self.return_date {
            q.push_str(&format!(" to {}", ret.format(DATE_FORMAT)));
        }
        q.push_str(&format!(" for {} passengers", self.passengers));
        q
    }

    pub fn url(&self) -> Result<Url, LinkError> {
        debug!(from = %self.from, to = %self.to, "FlightSearch::url: called");
        self.validate()?;
        let mut url = parse_url(FLIGHTS_URL)?;
        url.query_pairs_mut().append_pair("q", &self.query());
        Ok(url)
    }
}

/// Hotel search form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelSearch {
    pub destination: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

impl HotelSearch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        v.require("destination", &self.destination)
            .range("guests", self.guests, 1, 9);
        if self.check_out <= self.check_in {
            v.fail("checkOut", "check-out date must be after check-in date");
        }
        v.finish()
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Booking link for one hotel at the searched destination
    pub fn booking_url(&self, hotel_name: &str) -> Result<Url, LinkError> {
        debug!(%hotel_name, destination = %self.destination, "HotelSearch::booking_url: called");
        self.validate()?;
        let mut url = parse_url(HOTELS_URL)?;
        url.query_pairs_mut()
            .append_pair("q", &format!("{}, {}", hotel_name.trim(), self.destination.trim()))
            .append_pair("checkin", &self.check_in.format(DATE_FORMAT).to_string())
            .append_pair("checkout", &self.check_out.format(DATE_FORMAT).to_string())
            .append_pair("guests", &self.guests.to_string())
            .append_pair("hl", "en");
        Ok(url)
    }
}

/// A hotel search result card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelListing {
    pub id: String,
    pub name: String,
    pub image: String,
    pub rating: f64,
    pub price_per_night: f64,
}

/// Fixed results standing in for a hotel search backend
pub fn mock_hotel_results() -> Vec<HotelListing> {
    let listing = |id: &str, name: &str, rating: f64, price: f64| HotelListing {
        id: id.to_string(),
        name: name.to_string(),
        image: "https://placehold.co/600x400.png".to_string(),
        rating,
        price_per_night: price,
    };
    vec![
        listing("1", "The Oberoi, Mumbai", 5.0, 15000.0),
        listing("2", "Taj Mahal Palace, Mumbai", 5.0, 18000.0),
        listing("3", "Trident, Nariman Point", 4.5, 12000.0),
    ]
}

/// `{base}/itinerary`, keeping any path the base already has
fn itinerary_base(base_url: &str) -> Result<Url, LinkError> {
    let mut base = parse_url(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    debug!(base = %base, "itinerary_base: called");
    base.join("itinerary")
        .map_err(|e| LinkError::InvalidUrl(format!("{}: {}", base_url, e)))
}

/// Link that reopens the itinerary form prefilled with a request
pub fn resume_url(base_url: &str, request: &PlanRequest) -> Result<Url, LinkError> {
    let mut url = itinerary_base(base_url)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("destination", &request.destination)
            .append_pair("duration", &request.duration.to_string())
            .append_pair("budget", &request.budget.to_string());
        if !request.preferences.is_empty() {
            pairs.append_pair("preferences", &request.preferences);
        }
    }
    Ok(url)
}

/// Link to the planner for a destination only
pub fn trip_url(base_url: &str, destination: &str) -> Result<Url, LinkError> {
    let mut url = itinerary_base(base_url)?;
    url.query_pairs_mut().append_pair("destination", destination);
    Ok(url)
}

/// Parse a resume link back into a plan request
///
/// Missing or unparseable numbers fall back to the planner defaults; a missing
/// destination is an error.
pub fn parse_resume_url(raw: &str) -> Result<PlanRequest, LinkError> {
    debug!(%raw, "parse_resume_url: called");
    let url = parse_url(raw)?;

    let mut destination = None;
    let mut request = PlanRequest::new("", "");
    for (key, value) in url.query_pairs() {
        match &*key {
            "destination" => destination = Some(value.trim().to_string()),
            "duration" => request.duration = value.parse().unwrap_or(DEFAULT_DURATION),
            "budget" => {
                request.budget = value
                    .parse::<f64>()
                    .ok()
                    .filter(|b| b.is_finite())
                    .unwrap_or(DEFAULT_BUDGET)
            }
            "preferences" => request.preferences = value.into_owned(),
            _ => {}
        }
    }

    request.destination = destination
        .filter(|d| !d.is_empty())
        .ok_or(LinkError::MissingParameter("destination"))?;
    Ok(request)
}

/// Plain-text summary of a saved trip for pasting into a message
pub fn share_text(trip: &SavedTrip, base_url: &str) -> Result<String, LinkError> {
    let url = trip_url(base_url, &trip.destination)?;
    let mut text = format!(
        "Check out my upcoming {}-day trip to {}!\n\nView the full plan here: {}\n\nItinerary:\n",
        trip.duration, trip.destination, url
    );
    for day in &trip.itinerary {
        text.push_str(&format!("Day {}:\n", day.day));
        for activity in &day.activities {
            text.push_str(&format!("- {}\n", activity));
        }
    }
    Ok(text)
}
