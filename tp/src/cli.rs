//! CLI command definitions and subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::flow::builtin::{DEFAULT_BUDGET, DEFAULT_DURATION};

/// TripPlanner - AI travel planning from the terminal
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan trips with an LLM: destinations, itineraries, checklists, food and hotels",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Print the rendered prompt instead of calling the model
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Suggest destinations from a description of the trip you want
    Destinations {
        /// Travel style, budget and interests (at least 10 characters)
        preferences: String,
    },

    /// Generate a day-by-day itinerary
    Itinerary {
        destination: String,

        /// Trip length in days (1-30)
        #[arg(short, long, default_value_t = DEFAULT_DURATION)]
        duration: u32,

        /// Daily budget
        #[arg(short, long, default_value_t = DEFAULT_BUDGET)]
        budget: f64,

        /// Interests and constraints (at least 10 characters)
        #[arg(short, long)]
        preferences: String,

        /// Save the generated itinerary to My Trips
        #[arg(short, long)]
        save: bool,
    },

    /// Manage the pre-trip checklist for a destination
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommand,
    },

    /// Find cafes and restaurants
    Food {
        destination: String,

        /// Cuisine, budget or vibe
        #[arg(short, long)]
        preferences: Option<String>,
    },

    /// Hotel suggestions, search and booking links
    Hotels {
        #[command(subcommand)]
        command: HotelsCommand,
    },

    /// Flight search links
    Flights {
        #[command(subcommand)]
        command: FlightsCommand,
    },

    /// Saved trips
    Trips {
        #[command(subcommand)]
        command: TripsCommand,
    },

    /// List the available prompt flows
    Flows {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Reopen an itinerary link
    Resume {
        /// Link produced by `trips share` or the planner
        url: String,

        /// Generate the itinerary for the link (needs --preferences when the link has none)
        #[arg(short, long)]
        generate: bool,

        /// Preferences to use when the link carries none
        #[arg(short, long)]
        preferences: Option<String>,
    },
}

/// Checklist subcommands
#[derive(Debug, Subcommand)]
pub enum ChecklistCommand {
    /// Replace the checklist with destination-specific suggestions
    Suggest { destination: String },

    /// Show the checklist
    Show { destination: String },

    /// Add an item
    Add { destination: String, text: String },

    /// Toggle an item's completed flag
    Toggle { destination: String, id: u64 },

    /// Delete an item
    Delete { destination: String, id: u64 },

    /// Restore the default checklist
    Reset { destination: String },
}

/// Hotel subcommands
#[derive(Debug, Subcommand)]
pub enum HotelsCommand {
    /// Suggest hotels with the model
    Suggest {
        destination: String,

        /// Maximum price per night (INR)
        #[arg(short, long)]
        budget: Option<f64>,
    },

    /// Search hotels (sample results)
    Search {
        destination: String,

        /// Check-in date (yyyy-mm-dd)
        #[arg(long)]
        check_in: String,

        /// Check-out date (yyyy-mm-dd)
        #[arg(long)]
        check_out: String,

        #[arg(short, long, default_value_t = 2)]
        guests: u32,
    },

    /// Print a booking link for one hotel
    Link {
        hotel: String,
        destination: String,

        /// Check-in date (yyyy-mm-dd)
        #[arg(long)]
        check_in: String,

        /// Check-out date (yyyy-mm-dd)
        #[arg(long)]
        check_out: String,

        #[arg(short, long, default_value_t = 2)]
        guests: u32,
    },
}

/// Flight subcommands
#[derive(Debug, Subcommand)]
pub enum FlightsCommand {
    /// Print a flight search link
    Link {
        from: String,
        to: String,

        /// Departure date (yyyy-mm-dd)
        #[arg(short, long)]
        departure: String,

        /// Return date (yyyy-mm-dd)
        #[arg(short, long = "return")]
        return_date: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        passengers: u32,
    },
}

/// Saved trip subcommands
#[derive(Debug, Subcommand)]
pub enum TripsCommand {
    /// List saved trips, newest first
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show one trip
    Show {
        id: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Delete a trip
    Delete { id: String },

    /// Toggle a checklist item of a trip
    Toggle { id: String, item: u64 },

    /// Print share text for a trip
    Share { id: String },
}

/// Output format for listings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs")
        .join("tripplanner.log")
}
