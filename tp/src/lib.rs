//! TripPlanner - LLM-backed travel planning
//!
//! Every feature is a typed prompt flow: validated input, a Handlebars
//! template, one structured model call, and an output checked against a JSON
//! schema before anyone sees it. Results the user keeps go to a local
//! key-value store.
//!
//! # Modules
//!
//! - [`flow`] - prompt-flow contract, runner and the built-in flows
//! - [`llm`] - LLM client trait with Anthropic and OpenAI implementations
//! - [`prompts`] - embedded templates with an override directory
//! - [`domain`] - itinerary, checklist, suggestion and saved-trip records
//! - [`storage`] - saved trips and per-destination state over `keystore`
//! - [`planner`] - flows wired to storage
//! - [`session`] - result slots that drop stale responses
//! - [`links`] - flight, hotel and itinerary links
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod flow;
pub mod links;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod session;
pub mod storage;

pub use config::{Config, LlmConfig};
pub use domain::{Checklist, ChecklistItem, HotelSuggestion, ItineraryDay, RestaurantSuggestion, SavedTrip};
pub use flow::builtin::PlanRequest;
pub use flow::{FlowError, FlowRunner, PromptFlow, PromptFlowSpec, SchemaValidationError, ValidationError, flow_specs};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OutputSchema, create_client};
pub use planner::Planner;
pub use session::{Notice, Outcome, ResultSlot, Ticket};
pub use storage::TripStorage;
