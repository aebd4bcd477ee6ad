//! TripPlanner - CLI entry point

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail, eyre};
use tracing::{debug, info};

use keystore::Store;
use tripplanner::cli::{
    ChecklistCommand, Cli, Command, FlightsCommand, HotelsCommand, OutputFormat, TripsCommand, get_log_path,
};
use tripplanner::config::Config;
use tripplanner::domain::{Checklist, ItineraryDay, SavedTrip};
use tripplanner::flow::builtin::{
    ChecklistInput, DestinationsInput, GenerateDailyItinerary, HotelsInput, PlanRequest, RestaurantsInput,
    SuggestCafeRestaurant, SuggestChecklistItems, SuggestDestinations, SuggestHotels, suggest_destinations,
    suggest_hotels,
};
use tripplanner::flow::{FlowError, FlowRunner, PromptFlow, flow_specs, prepare};
use tripplanner::links::{self, FlightSearch, HotelSearch};
use tripplanner::llm::create_client;
use tripplanner::planner::Planner;
use tripplanner::prompts::{PromptLoader, format_amount};
use tripplanner::session::ResultSlot;
use tripplanner::storage::TripStorage;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(provider = %config.llm.provider, backend = %config.storage.backend, "TripPlanner loaded config");

    let app = App::new(config, cli.dry_run)?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Destinations { preferences } => app.destinations(preferences).await,
        Command::Itinerary {
            destination,
            duration,
            budget,
            preferences,
            save,
        } => {
            let request = PlanRequest {
                destination,
                duration,
                preferences,
                budget,
            };
            app.itinerary(request, save).await
        }
        Command::Checklist { command } => app.checklist(command).await,
        Command::Food {
            destination,
            preferences,
        } => app.food(destination, preferences).await,
        Command::Hotels { command } => app.hotels(command).await,
        Command::Flights { command } => app.flights(command),
        Command::Trips { command } => app.trips(command),
        Command::Flows { format } => cmd_flows(format),
        Command::Resume {
            url,
            generate,
            preferences,
        } => app.resume(&url, generate, preferences).await,
    }
}

struct App {
    config: Config,
    store: Arc<dyn Store>,
    dry_run: bool,
}

impl App {
    fn new(config: Config, dry_run: bool) -> Result<Self> {
        let store = keystore::open(config.storage.backend, &config.storage.path)
            .context(format!("Failed to open {} store at {}", config.storage.backend, config.storage.path.display()))?;
        Ok(Self { config, store, dry_run })
    }

    fn prompts(&self) -> PromptLoader {
        PromptLoader::new(self.config.prompts.expanded_dir())
    }

    fn storage(&self) -> TripStorage {
        TripStorage::new(self.store.clone())
    }

    fn runner(&self) -> Result<FlowRunner> {
        self.config.validate()?;
        let llm = create_client(&self.config.llm).context("Failed to create LLM client")?;
        Ok(FlowRunner::new(llm, self.prompts()).with_max_tokens(self.config.llm.max_tokens))
    }

    fn planner(&self) -> Result<Planner> {
        Ok(Planner::new(self.runner()?, self.storage()))
    }

    /// Print the prompt a flow would send; true if this was a dry run
    fn preview<F: PromptFlow>(&self, input: F::Input) -> Result<bool> {
        if !self.dry_run {
            return Ok(false);
        }
        let (_, prompt) = prepare::<F>(&self.prompts(), input)?;
        println!("{}", prompt);
        Ok(true)
    }

    async fn destinations(&self, preferences: String) -> Result<()> {
        debug!("App::destinations: called");
        if self.preview::<SuggestDestinations>(DestinationsInput {
            preferences: preferences.clone(),
        })? {
            return Ok(());
        }
        let runner = self.runner()?;
        let found = settle(
            "Failed to suggest destinations. Please try again.",
            suggest_destinations(&runner, &preferences).await,
        )?;

        if found.is_empty() {
            println!("{}", "No destinations suggested.".yellow());
            return Ok(());
        }
        println!("{}", "Suggested destinations:".bold());
        for destination in &found {
            println!("  • {}", destination.cyan());
        }
        Ok(())
    }

    async fn itinerary(&self, request: PlanRequest, save: bool) -> Result<()> {
        debug!(destination = %request.destination, save, "App::itinerary: called");
        if self.preview::<GenerateDailyItinerary>(request.clone())? {
            return Ok(());
        }
        let planner = self.planner()?;
        let days = settle(
            "Failed to generate itinerary. Please try again.",
            planner.plan(request.clone()).await,
        )?;

        println!(
            "{}",
            format!("{}-day itinerary for {}", request.duration, request.destination).bold()
        );
        print_itinerary(&days);

        if let Ok(url) = links::resume_url(&self.config.links.share_base_url, &request) {
            println!("\n{} {}", "Plan link:".dimmed(), url);
        }

        if save {
            let trip = planner.save_plan(&request, days);
            println!(
                "{} {} has been added to your saved trips ({})",
                "✓".green(),
                trip.destination.cyan(),
                trip.id.dimmed()
            );
        }
        Ok(())
    }

    async fn checklist(&self, command: ChecklistCommand) -> Result<()> {
        let storage = self.storage();
        match command {
            ChecklistCommand::Suggest { destination } => {
                if self.preview::<SuggestChecklistItems>(ChecklistInput {
                    destination: destination.clone(),
                })? {
                    return Ok(());
                }
                let planner = self.planner()?;
                let items = settle(
                    "Failed to generate checklist. Please try again.",
                    planner.regenerate_checklist(&destination).await.map(Checklist::into_items),
                )?;
                print_checklist(&destination, &Checklist::from_items(items));
            }
            ChecklistCommand::Show { destination } => {
                print_checklist(&destination, &storage.checklist(&destination));
            }
            ChecklistCommand::Add { destination, text } => {
                let mut list = storage.checklist(&destination);
                let Some(id) = list.add(&text) else {
                    bail!("Checklist item text cannot be empty");
                };
                storage.set_checklist(&destination, &list);
                println!("{} Added item {}", "✓".green(), id);
            }
            ChecklistCommand::Toggle { destination, id } => {
                let mut list = storage.checklist(&destination);
                let completed = list
                    .toggle(id)
                    .ok_or_else(|| eyre!("No checklist item with id {}", id))?;
                storage.set_checklist(&destination, &list);
                let state = if completed { "done" } else { "not done" };
                println!("{} Item {} marked {}", "✓".green(), id, state);
            }
            ChecklistCommand::Delete { destination, id } => {
                let mut list = storage.checklist(&destination);
                if list.delete(id) {
                    storage.set_checklist(&destination, &list);
                    println!("{} Deleted item {}", "✓".green(), id);
                } else {
                    println!("{}", format!("No checklist item with id {}", id).yellow());
                }
            }
            ChecklistCommand::Reset { destination } => {
                storage.set_checklist(&destination, &Checklist::default());
                println!("{} Checklist for {} reset", "✓".green(), destination.cyan());
            }
        }
        Ok(())
    }

    async fn food(&self, destination: String, preferences: Option<String>) -> Result<()> {
        debug!(%destination, "App::food: called");
        if self.preview::<SuggestCafeRestaurant>(RestaurantsInput {
            destination: destination.clone(),
            preferences: preferences.clone(),
        })? {
            return Ok(());
        }
        let planner = self.planner()?;
        let suggestions = settle(
            "Failed to get suggestions. Please try again.",
            planner.find_food(&destination, preferences.as_deref()).await,
        )?;

        println!("{}", format!("Places to eat in {}:", destination).bold());
        for place in &suggestions {
            println!("  {} {}", "•".cyan(), place.name.bold());
            println!("    {}", place.description);
        }
        Ok(())
    }

    async fn hotels(&self, command: HotelsCommand) -> Result<()> {
        match command {
            HotelsCommand::Suggest { destination, budget } => {
                if self.preview::<SuggestHotels>(HotelsInput {
                    destination: destination.clone(),
                    budget,
                })? {
                    return Ok(());
                }
                let runner = self.runner()?;
                let hotels = settle(
                    "Failed to suggest hotels. Please try again.",
                    suggest_hotels(&runner, &destination, budget).await,
                )?;
                println!("{}", format!("Hotels in {}:", destination).bold());
                for hotel in &hotels {
                    println!(
                        "  {} {:<40} {} ₹{}/night",
                        "•".cyan(),
                        hotel.name,
                        "★".repeat(hotel.stars()).yellow(),
                        format_amount(hotel.price_per_night)
                    );
                }
            }
            HotelsCommand::Search {
                destination,
                check_in,
                check_out,
                guests,
            } => {
                let search = hotel_search(destination, &check_in, &check_out, guests)?;
                search.validate()?;
                println!(
                    "{}",
                    format!(
                        "Sample results for {} ({} nights, {} guests):",
                        search.destination,
                        search.nights(),
                        search.guests
                    )
                    .bold()
                );
                for hotel in links::mock_hotel_results() {
                    let url = search.booking_url(&hotel.name)?;
                    println!(
                        "  {} {:<28} {:>3} ★ ₹{}/night",
                        "•".cyan(),
                        hotel.name,
                        hotel.rating,
                        format_amount(hotel.price_per_night)
                    );
                    println!("    {}", url.as_str().dimmed());
                }
            }
            HotelsCommand::Link {
                hotel,
                destination,
                check_in,
                check_out,
                guests,
            } => {
                let search = hotel_search(destination, &check_in, &check_out, guests)?;
                println!("{}", search.booking_url(&hotel)?);
            }
        }
        Ok(())
    }

    fn flights(&self, command: FlightsCommand) -> Result<()> {
        match command {
            FlightsCommand::Link {
                from,
                to,
                departure,
                return_date,
                passengers,
            } => {
                let search = FlightSearch {
                    from,
                    to,
                    departure: links::parse_date("departure", &departure)?,
                    return_date: return_date
                        .as_deref()
                        .map(|d| links::parse_date("return", d))
                        .transpose()?,
                    passengers,
                };
                println!("{}", search.url()?);
            }
        }
        Ok(())
    }

    fn trips(&self, command: TripsCommand) -> Result<()> {
        let storage = self.storage();
        match command {
            TripsCommand::List { format } => {
                let trips = storage.list_trips();
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trips)?),
                    OutputFormat::Text => {
                        if trips.is_empty() {
                            println!("{}", "No saved trips yet.".yellow());
                        }
                        for trip in &trips {
                            println!(
                                "{}  {:<20} {:>2} days  saved {}",
                                trip.id.dimmed(),
                                trip.destination.cyan(),
                                trip.duration,
                                trip.created_at.format("%Y-%m-%d")
                            );
                        }
                    }
                }
            }
            TripsCommand::Show { id, format } => {
                let trip = storage.get_trip(&id).ok_or_else(|| eyre!("No saved trip with id {}", id))?;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trip)?),
                    OutputFormat::Text => print_trip(&trip),
                }
            }
            TripsCommand::Delete { id } => {
                if storage.delete_trip(&id) {
                    println!("{} Trip deleted", "✓".green());
                } else {
                    println!("{}", format!("No saved trip with id {}", id).yellow());
                }
            }
            TripsCommand::Toggle { id, item } => {
                let completed = storage
                    .toggle_trip_checklist_item(&id, item)
                    .ok_or_else(|| eyre!("No checklist item {} in trip {}", item, id))?;
                let state = if completed { "done" } else { "not done" };
                println!("{} Item {} marked {}", "✓".green(), item, state);
            }
            TripsCommand::Share { id } => {
                let text = storage
                    .share_text(&id, &self.config.links.share_base_url)
                    .ok_or_else(|| eyre!("No saved trip with id {}", id))??;
                print!("{}", text);
            }
        }
        Ok(())
    }

    async fn resume(&self, url: &str, generate: bool, preferences: Option<String>) -> Result<()> {
        let mut request = links::parse_resume_url(url)?;
        if request.preferences.is_empty() {
            request.preferences = preferences.unwrap_or_default();
        }

        println!("{} {}", "Destination:".bold(), request.destination);
        println!("{} {} days", "Duration:".bold(), request.duration);
        println!("{} {}", "Daily budget:".bold(), format_amount(request.budget));
        if !request.preferences.is_empty() {
            println!("{} {}", "Preferences:".bold(), request.preferences);
        }

        if generate {
            println!();
            return self.itinerary(request, false).await;
        }
        Ok(())
    }
}

/// Route a flow result through a result slot
///
/// Input errors are reported field by field; any other failure becomes the
/// slot's generic notification.
fn settle<T>(failure: &str, result: std::result::Result<Vec<T>, FlowError>) -> Result<Vec<T>> {
    if let Err(FlowError::Validation(e)) = &result {
        return Err(eyre!("{}", e));
    }
    if let Err(FlowError::Model(e)) = &result {
        if let Some(wait) = e.retry_after() {
            eprintln!("{}", format!("Rate limited by the provider; retry in {}s", wait.as_secs()).yellow());
        }
    }

    let mut slot = ResultSlot::new(failure);
    let ticket = slot.begin();
    slot.complete(ticket, result);
    if let Some(notice) = slot.notice() {
        eprintln!("{} {}", format!("{}:", notice.title).red().bold(), notice.description);
        bail!("{}", notice.description);
    }
    Ok(slot.into_items())
}

fn hotel_search(destination: String, check_in: &str, check_out: &str, guests: u32) -> Result<HotelSearch> {
    Ok(HotelSearch {
        destination,
        check_in: links::parse_date("checkin", check_in)?,
        check_out: links::parse_date("checkout", check_out)?,
        guests,
    })
}

fn cmd_flows(format: OutputFormat) -> Result<()> {
    let specs = flow_specs();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&specs)?),
        OutputFormat::Text => {
            for spec in &specs {
                println!("{:<24} {:<12} {}", spec.name.cyan(), spec.template, spec.description);
            }
        }
    }
    Ok(())
}

fn print_itinerary(days: &[ItineraryDay]) {
    for day in days {
        println!(
            "\n{} {}",
            format!("Day {}", day.day).bold(),
            format!("(est. {})", format_amount(day.estimated_cost)).dimmed()
        );
        for activity in &day.activities {
            println!("  • {}", activity);
        }
    }
    let total: f64 = days.iter().map(|d| d.estimated_cost).sum();
    println!("\n{} {}", "Estimated total:".bold(), format_amount(total));
}

fn print_checklist(destination: &str, list: &Checklist) {
    println!(
        "{} ({}/{} done)",
        format!("Checklist for {}", destination).bold(),
        list.completed_count(),
        list.len()
    );
    for item in list.items() {
        let mark = if item.completed { "[x]".green() } else { "[ ]".normal() };
        println!("  {} {:<14} {}", mark, item.id.to_string().dimmed(), item.text);
    }
}

fn print_trip(trip: &SavedTrip) {
    println!(
        "{} {}",
        format!("{} ({} days)", trip.destination, trip.duration).bold(),
        trip.id.dimmed()
    );
    if !trip.preferences.is_empty() {
        println!("{} {}", "Preferences:".bold(), trip.preferences);
    }
    println!("{} {}", "Daily budget:".bold(), format_amount(trip.budget));
    print_itinerary(&trip.itinerary);

    if !trip.checklist.is_empty() {
        println!("\n{}", "Checklist".bold());
        for item in &trip.checklist {
            let mark = if item.completed { "[x]".green() } else { "[ ]".normal() };
            println!("  {} {:<14} {}", mark, item.id.to_string().dimmed(), item.text);
        }
    }
    if !trip.food_suggestions.is_empty() {
        println!("\n{}", "Food".bold());
        for place in &trip.food_suggestions {
            println!("  • {}: {}", place.name, place.description);
        }
    }
}
