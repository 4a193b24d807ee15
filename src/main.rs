mod commands;
mod parse;
mod render;
mod session;

use std::path::PathBuf;

use agenda_core::config::AgendaConfig;
use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::event::EventFields;
use parse::{parse_day_or_today, parse_month};
use session::Session;

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "Manage local events and calendars with day, week and month views")]
struct Cli {
    /// Use this data directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, change or remove events
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },
    /// Create, rename, remove or toggle calendars
    Calendar {
        #[command(subcommand)]
        command: CalendarCommand,
    },
    /// Show one day's events
    Day {
        /// Day to show (YYYY-MM-DD or e.g. "tomorrow"), defaults to today
        date: Option<String>,
    },
    /// Show the Sunday-to-Saturday week containing a day
    Week {
        /// Any day of the week (YYYY-MM-DD), defaults to the last viewed day
        date: Option<String>,
    },
    /// Show a month grid with event days marked
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        month: Option<String>,

        /// Day whose events are listed under the grid (YYYY-MM-DD)
        #[arg(short, long)]
        select: Option<String>,
    },
}

#[derive(Subcommand)]
enum EventCommand {
    /// Add an event
    Add {
        title: String,

        /// Day to list the event under (defaults to the start day)
        #[arg(long)]
        date: Option<String>,

        /// Start time (e.g., "tomorrow 9am", "2024-03-04T09:00:00Z")
        #[arg(short, long)]
        start: String,

        /// End time or duration (e.g., "45m", "until 10:30am")
        #[arg(short, long)]
        end: String,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Change fields of an existing event
    Update {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        /// New end time, or a duration from the start (e.g., "1h")
        #[arg(short, long)]
        end: Option<String>,

        /// New location (empty string clears it)
        #[arg(short, long)]
        location: Option<String>,

        /// New description (empty string clears it)
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event
    Delete { id: String },
}

#[derive(Subcommand)]
enum CalendarCommand {
    /// Add a calendar
    Add { name: String },
    /// Rename a calendar
    Rename { id: String, name: String },
    /// Delete a calendar
    Delete { id: String },
    /// Flip a calendar's visibility
    Toggle { id: String },
    /// List calendars
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AgendaConfig::load().context("Failed to load configuration")?;
    let session = Session::open(config, cli.data_dir).await;

    match cli.command {
        Commands::Event { command } => run_event(&session, command).await,
        Commands::Calendar { command } => run_calendar(&session, command).await,
        Commands::Day { date } => {
            let day = parse_day_or_today(date.as_deref())?;
            commands::day::run(&session, day).await
        }
        Commands::Week { date } => {
            let day = match date {
                Some(raw) => Some(parse_day_or_today(Some(raw.as_str()))?),
                None => None,
            };
            commands::week::run(&session, day).await
        }
        Commands::Month { month, select } => {
            let today = Local::now().date_naive();
            let (year, month) = match month {
                Some(raw) => parse_month(&raw)?,
                None => (today.year(), today.month()),
            };
            let selected = match select {
                Some(raw) => parse_day_or_today(Some(raw.as_str()))?,
                None => today,
            };
            commands::month::run(&session, year, month, Some(selected)).await
        }
    }
}

async fn run_event(session: &Session, command: EventCommand) -> Result<()> {
    match command {
        EventCommand::Add {
            title,
            date,
            start,
            end,
            location,
            description,
        } => {
            let fields = EventFields {
                title: None,
                date,
                start: Some(start),
                end: Some(end),
                location,
                description,
            };
            commands::event::add(session, title, fields).await
        }
        EventCommand::Update {
            id,
            title,
            date,
            start,
            end,
            location,
            description,
        } => {
            let fields = EventFields {
                title,
                date,
                start,
                end,
                location,
                description,
            };
            commands::event::update(session, &id, fields).await
        }
        EventCommand::Delete { id } => commands::event::delete(session, &id).await,
    }
}

async fn run_calendar(session: &Session, command: CalendarCommand) -> Result<()> {
    match command {
        CalendarCommand::Add { name } => commands::calendar::add(session, &name).await,
        CalendarCommand::Rename { id, name } => {
            commands::calendar::rename(session, &id, &name).await
        }
        CalendarCommand::Delete { id } => commands::calendar::delete(session, &id).await,
        CalendarCommand::Toggle { id } => commands::calendar::toggle(session, &id).await,
        CalendarCommand::List { json } => commands::calendar::list(session, json).await,
    }
}
