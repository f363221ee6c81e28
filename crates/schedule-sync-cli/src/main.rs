//! `schedule-sync` CLI: busy/free queries over a JSON schedule file.
//!
//! ## Usage
//!
//! ```sh
//! # Who is busy right now?
//! schedule-sync -i schedule.json status alice bob
//!
//! # At a specific instant, as JSON
//! schedule-sync -i schedule.json status alice --at 2025-10-22T09:05:00Z --json
//!
//! # Busy at any point of a local day or the current week
//! schedule-sync -i schedule.json --tz Europe/Berlin window alice --day 2025-10-22
//! schedule-sync -i schedule.json window alice --week
//!
//! # Free slots of at least 30 minutes
//! schedule-sync -i schedule.json free-slots alice \
//!   --start 2025-10-22T08:00:00Z --end 2025-10-22T17:00:00Z --min-minutes 30
//!
//! # Overlapping events in one schedule
//! schedule-sync -i schedule.json conflicts alice
//! ```
//!
//! The schedule file maps owner ids to event lists:
//! `{"alice": [{"id": "e1", "title": "Standup", "start": "...", "end": "..."}]}`.

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use schedule_sync::{
    find_conflicts, find_free_slots, normalize_events, parse_timestamp, AvailabilityEngine,
    BoundaryPolicy, Clock, EngineConfig, EventStore, FixedClock, InMemoryEventStore,
    MissingOwnerPolicy, OwnerStatus, SystemClock, Window,
};
use serde_json::json;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

#[derive(Parser)]
#[command(
    name = "schedule-sync",
    version,
    about = "Busy/free availability queries over ScheduleSync schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Engine config file (TOML)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Whether event end points count as busy (overrides config)
    #[arg(long, value_enum, global = true)]
    policy: Option<PolicyArg>,

    /// What to report for owners missing from the schedule (overrides config)
    #[arg(long, value_enum, global = true)]
    missing_owner: Option<MissingOwnerArg>,

    /// IANA timezone for --day and --week (overrides config)
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Busy/free status of one or more owners at an instant
    Status {
        #[arg(required = true)]
        owners: Vec<String>,
        /// Instant to check (defaults to now)
        #[arg(long)]
        at: Option<String>,
        /// Print a JSON array instead of one line per owner
        #[arg(long)]
        json: bool,
    },
    /// Busy/free status of an owner over a window
    Window {
        owner: String,
        /// Window start (requires --end)
        #[arg(long, requires = "end", conflicts_with_all = ["day", "week"])]
        start: Option<String>,
        /// Window end (requires --start)
        #[arg(long, requires = "start")]
        end: Option<String>,
        /// A whole local day, YYYY-MM-DD
        #[arg(long, conflicts_with = "week")]
        day: Option<String>,
        /// The local Monday-to-Monday week containing --at (or now)
        #[arg(long)]
        week: bool,
        /// Reference instant for --week
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Free slots in an owner's schedule
    ///
    /// Events count as [start, end) here regardless of --policy, so a slot
    /// may start at the instant an event ends.
    FreeSlots {
        owner: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// Only report slots at least this long
        #[arg(long, default_value_t = 0)]
        min_minutes: i64,
    },
    /// Overlapping events within an owner's schedule
    Conflicts { owner: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Inclusive,
    HalfOpen,
}

impl From<PolicyArg> for BoundaryPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Inclusive => BoundaryPolicy::Inclusive,
            PolicyArg::HalfOpen => BoundaryPolicy::HalfOpen,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MissingOwnerArg {
    Free,
    Unknown,
}

impl From<MissingOwnerArg> for MissingOwnerPolicy {
    fn from(arg: MissingOwnerArg) -> Self {
        match arg {
            MissingOwnerArg::Free => MissingOwnerPolicy::Free,
            MissingOwnerArg::Unknown => MissingOwnerPolicy::Unknown,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let tz = config.tz()?;
    let engine = AvailabilityEngine::new(config);
    let store = load_store(cli.input.as_deref())?;

    match cli.command {
        Commands::Status { owners, at, json } => {
            let clock = clock_for(at.as_deref())?;
            let owner_refs: Vec<&str> = owners.iter().map(String::as_str).collect();
            let statuses = engine.statuses(&store, &owner_refs, clock.as_ref());
            print_statuses(&statuses, json)?;
        }
        Commands::Window {
            owner,
            start,
            end,
            day,
            week,
            at,
            json,
        } => {
            let window = match (start, end, day) {
                (Some(start), Some(end), _) => {
                    Window::new(parse_arg(&start, "--start")?, parse_arg(&end, "--end")?)?
                }
                (_, _, Some(day)) => {
                    let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                        .with_context(|| format!("Invalid --day '{}', expected YYYY-MM-DD", day))?;
                    Window::day(date, tz)?
                }
                _ if week => Window::week_of(clock_for(at.as_deref())?.now(), tz)?,
                _ => anyhow::bail!("window needs --start/--end, --day or --week"),
            };
            log::info!(
                "event=window owner={} start={} end={}",
                owner,
                window.start().to_rfc3339(),
                window.end().to_rfc3339()
            );
            let status = engine.owner_status_during(&store, &owner, &window);
            print_statuses(&[(owner.as_str(), status)], json)?;
        }
        Commands::FreeSlots {
            owner,
            start,
            end,
            min_minutes,
        } => {
            let window = Window::new(parse_arg(&start, "--start")?, parse_arg(&end, "--end")?)?;
            let events = owner_events(&store, &owner)?;
            let slots = find_free_slots(&events, &window);
            for slot in slots.iter().filter(|s| s.duration_minutes >= min_minutes) {
                println!(
                    "{} .. {} ({} min)",
                    slot.start.to_rfc3339(),
                    slot.end.to_rfc3339(),
                    slot.duration_minutes
                );
            }
        }
        Commands::Conflicts { owner } => {
            let events = owner_events(&store, &owner)?;
            let conflicts = find_conflicts(&events);
            if conflicts.is_empty() {
                println!("no conflicts");
            }
            for c in &conflicts {
                println!(
                    "{} <> {}: {} min",
                    c.event_a.title(),
                    c.event_b.title(),
                    c.overlap_minutes
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    ) {
        eprintln!("warning: logging disabled: {}", err);
    }
}

/// Config file (or defaults) with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };
    if let Some(policy) = cli.policy {
        config.boundary = policy.into();
    }
    if let Some(missing) = cli.missing_owner {
        config.missing_owner = missing.into();
    }
    if let Some(tz) = &cli.tz {
        config.timezone = tz.clone();
    }
    config.validate()?;
    Ok(config)
}

fn load_store(path: Option<&str>) -> Result<InMemoryEventStore> {
    let json = read_input(path)?;
    InMemoryEventStore::from_json(&json).context("Failed to parse schedule JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_arg(value: &str, flag: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(value).with_context(|| format!("Invalid {} timestamp", flag))
}

fn clock_for(at: Option<&str>) -> Result<Box<dyn Clock>> {
    Ok(match at {
        Some(ts) => Box::new(FixedClock(parse_arg(ts, "--at")?)),
        None => Box::new(SystemClock),
    })
}

/// Validated events of an owner who must exist in the schedule.
fn owner_events(store: &InMemoryEventStore, owner: &str) -> Result<Vec<schedule_sync::Event>> {
    let raw = store
        .events_for(owner)
        .with_context(|| format!("No schedule for owner '{}'", owner))?;
    Ok(normalize_events(&raw).events)
}

fn print_statuses(statuses: &[(&str, OwnerStatus)], as_json: bool) -> Result<()> {
    if as_json {
        let rows: Vec<serde_json::Value> = statuses
            .iter()
            .map(|(owner, status)| {
                json!({
                    "owner": owner,
                    "status": status.label(),
                    "event": status.event(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for (owner, status) in statuses {
        match status.event() {
            Some(event) => println!("{}: {} ({})", owner, status.label(), event.title()),
            None => println!("{}: {}", owner, status.label()),
        }
    }
    Ok(())
}
