//! `leave` CLI: check, book, and decide time-off requests against a JSON
//! bookings file.
//!
//! ## Usage
//!
//! ```sh
//! # Would 2024-02-10..2024-02-15 collide with anything? Prints the decision as JSON.
//! leave check -b bookings.json --start 2024-02-10 --end 2024-02-15
//!
//! # Book it (stored as pending) if it is free; the file is updated in place.
//! leave book -b bookings.json --start 2024-02-10 --end 2024-02-15 --note "ski trip"
//!
//! # Approve or reject a pending booking
//! leave decide -b bookings.json --id 3 --approve --comment "enjoy" --today 2024-02-01
//!
//! # Show merged occupied ranges
//! leave merge -b bookings.json
//!
//! # Show the search window for a request, with custom horizons
//! leave window --start 2024-02-10 --end 2024-02-15 --lookback 14
//! ```
//!
//! Engine settings can come from a JSON file (`--config`), with individual
//! flags taking precedence. `--today` pins the evaluation date. Logs go to
//! stderr; `-v` for info, `-vv` for debug.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use leave_engine::range::{BookingStatus, DateRange};
use leave_engine::{
    merge_ranges, search_window, BookingOutcome, BookingRequest, Clock, ConflictResolver,
    EngineConfig, FixedClock, MemoryCalendar, SystemClock,
};
use serde::Serialize;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(
    name = "leave",
    version,
    about = "Time-off conflict checker and booking CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a request against the calendar without booking it
    Check {
        #[command(flatten)]
        request: RequestArgs,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Book a request as pending if it does not conflict
    Book {
        #[command(flatten)]
        request: RequestArgs,
        /// Free-text note stored with the booking
        #[arg(long)]
        note: Option<String>,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Approve or reject a pending booking
    Decide {
        /// Bookings file (JSON array)
        #[arg(short, long)]
        bookings: String,
        /// Booking id
        #[arg(long)]
        id: u64,
        /// Approve the booking
        #[arg(long, conflicts_with = "reject", required_unless_present = "reject")]
        approve: bool,
        /// Reject the booking
        #[arg(long)]
        reject: bool,
        /// Approval comment or rejection reason
        #[arg(long)]
        comment: Option<String>,
        /// Record the decision as made on this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print merged occupied ranges (pending and approved bookings)
    Merge {
        /// Bookings file (JSON array)
        #[arg(short, long)]
        bookings: String,
    },
    /// Print the search window for a date range
    Window {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args)]
struct RequestArgs {
    /// Bookings file (JSON array); a missing file is an empty calendar
    #[arg(short, long)]
    bookings: String,
    /// First day off (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day off, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[derive(Args)]
struct EngineArgs {
    /// JSON file with engine settings
    #[arg(long)]
    config: Option<String>,
    /// Days searched before the requested start
    #[arg(long)]
    lookback: Option<u32>,
    /// Days searched after the requested end
    #[arg(long)]
    lookforward: Option<u32>,
    /// Maximum number of alternative slots to suggest
    #[arg(long)]
    max_suggestions: Option<usize>,
    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { request, engine } => {
            let calendar = load_calendar(&request.bookings)?;
            let resolver = build_resolver(&engine)?;
            let decision = resolver
                .evaluate(&booking_request(&request, None), &calendar)
                .context("Failed to evaluate request")?;
            print_json(&decision)?;
        }
        Commands::Book {
            request,
            note,
            engine,
        } => {
            let calendar = load_calendar(&request.bookings)?;
            let resolver = build_resolver(&engine)?;
            let outcome = resolver
                .book(&booking_request(&request, note), &calendar)
                .context("Failed to book request")?;
            if let BookingOutcome::Booked(_) = outcome {
                save_calendar(&request.bookings, &calendar)?;
            }
            print_json(&outcome)?;
        }
        Commands::Decide {
            bookings,
            id,
            approve,
            reject: _,
            comment,
            today,
        } => {
            let calendar = load_calendar(&bookings)?;
            let today = today.unwrap_or_else(|| SystemClock.today());
            let booking = calendar
                .decide(id, approve, comment.as_deref(), today)
                .with_context(|| format!("Failed to decide booking {}", id))?;
            save_calendar(&bookings, &calendar)?;
            print_json(&booking)?;
        }
        Commands::Merge { bookings } => {
            let calendar = load_calendar(&bookings)?;
            let ranges: Vec<DateRange> = calendar
                .bookings()?
                .iter()
                .filter(|b| b.status.is_occupying())
                .map(|b| b.range)
                .collect();
            print_json(&merge_ranges(&ranges))?;
        }
        Commands::Window { start, end, engine } => {
            if end < start {
                anyhow::bail!("End date {} is before start date {}", end, start);
            }
            let config = load_config(&engine)?;
            let window = search_window(
                &DateRange::new(start, end),
                config.lookback_days,
                config.lookforward_days,
            );
            print_json(&window)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn booking_request(args: &RequestArgs, note: Option<String>) -> BookingRequest {
    BookingRequest {
        start: args.start,
        end: args.end,
        note,
    }
}

/// Build the resolver from `--config` plus flag overrides. The clock is pinned
/// to `--today` when given, otherwise to the system date at startup.
fn build_resolver(args: &EngineArgs) -> Result<ConflictResolver<FixedClock>> {
    let config = load_config(args)?;
    let today = args.today.unwrap_or_else(|| SystemClock.today());
    debug!(?config, %today, "engine settings");
    Ok(ConflictResolver::new(config, FixedClock(today)))
}

fn load_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => EngineConfig::default(),
    };

    if let Some(days) = args.lookback {
        config.lookback_days = days;
    }
    if let Some(days) = args.lookforward {
        config.lookforward_days = days;
    }
    if let Some(max) = args.max_suggestions {
        config.max_suggestions = max;
    }

    Ok(config)
}

fn load_calendar(path: &str) -> Result<MemoryCalendar> {
    if !Path::new(path).exists() {
        debug!(path, "bookings file not found, starting empty");
        return Ok(MemoryCalendar::new());
    }
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    let calendar = MemoryCalendar::from_json(&raw)
        .with_context(|| format!("Failed to parse bookings file: {}", path))?;

    let pending = calendar
        .bookings()?
        .iter()
        .filter(|b| b.status == BookingStatus::Pending)
        .count();
    debug!(path, pending, "loaded bookings");

    Ok(calendar)
}

fn save_calendar(path: &str, calendar: &MemoryCalendar) -> Result<()> {
    let json = calendar.to_json()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write file: {}", path))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{}", pretty);
    Ok(())
}
