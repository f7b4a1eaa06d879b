//! Eventify CLI
//!
//! Command-line front end for Eventify:
//! - Log in, sign up and log out
//! - Browse the dashboard and event details
//! - Register for and create events
//! - Analyse events and export them to CSV

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use eventify::actions::{self, EventDetails};
use eventify::client::{AuthClient, EventsClient};
use eventify::config::{generate_default_config, Config};
use eventify::logging::init_logging;
use eventify::session::SessionStore;
use eventify_core::analysis::EXPORT_FILENAME;
use eventify_core::{
    AnalysisQuery, AnalysisReport, CategoryFilter, Credentials, Dashboard, DashboardQuery, Event,
    EventForm, EventId, EventStore, EventType, MonthFilter, Notice, SignupFlow, SortOrder,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eventify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse, register for, create and analyse events")]
#[command(long_about = "Eventify lets you discover festivals, conferences and playground events.\nRegister for them, publish your own and see how the calendar fills up.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Log level, overriding the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with your username and password
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Signup(SignupArgs),

    /// Forget the logged-in user
    Logout,

    /// Show the event dashboard
    Events {
        /// Category tab (all, festival, conference, playground)
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Case-insensitive location search
        #[arg(long, default_value = "")]
        location: String,
        /// Sort by date (asc, desc)
        #[arg(long, default_value = "asc")]
        sort: SortOrder,
        /// Load this many more chunks after the first page
        #[arg(long, default_value = "0")]
        more: usize,
        /// Show every matching event
        #[arg(long)]
        all: bool,
    },

    /// Show an event with its details and related events
    Show {
        id: EventId,
    },

    /// Register for an event
    Register {
        id: EventId,
    },

    /// Create an event
    Create(CreateArgs),

    /// Analyse events by month, type and search text
    Analysis {
        /// Month key (YYYY-MM), "upcoming" or "all"
        #[arg(long, default_value = "upcoming")]
        month: MonthFilter,
        /// Search title and description
        #[arg(long, default_value = "")]
        search: String,
        /// Only events of this type
        #[arg(long = "type")]
        event_type: Option<EventType>,
        /// Table page (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Write the filtered events to a CSV file
        #[arg(long, num_args = 0..=1, default_missing_value = EXPORT_FILENAME)]
        export: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct SignupArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    address: String,
    /// 10-digit phone number
    #[arg(long)]
    phone: String,
    /// Birth date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    birth_date: String,
    /// 10-character PAN (5 letters, 4 digits, 1 letter)
    #[arg(long)]
    pan: String,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    title: String,
    /// Date (YYYY-MM-DD)
    #[arg(long)]
    date: String,
    /// Start time, e.g. 10:00 or "10:00 AM"
    #[arg(long)]
    start_time: String,
    /// End time, e.g. 12:00 or "12:00 PM"
    #[arg(long)]
    end_time: String,
    #[arg(long, default_value = eventify_core::forms::LOCATIONS[0])]
    location: String,
    #[arg(long)]
    price: String,
    #[arg(long)]
    description: String,
    /// festival, conference or playground
    #[arg(long = "type", default_value = "festival")]
    event_type: EventType,
    #[arg(long)]
    organiser: String,
    #[arg(long)]
    email: String,
    /// 10-digit phone number
    #[arg(long)]
    phone_number: String,
    #[arg(long)]
    speaker: String,
    #[arg(long)]
    video_url: String,
    /// 6-digit zip code
    #[arg(long)]
    zip: String,
}

impl From<CreateArgs> for EventForm {
    fn from(args: CreateArgs) -> Self {
        EventForm {
            title: args.title,
            date: args.date,
            start_time: args.start_time,
            end_time: args.end_time,
            location: args.location,
            price: args.price,
            description: args.description,
            event_type: args.event_type,
            organiser: args.organiser,
            email: args.email,
            phone_number: args.phone_number,
            speaker: args.speaker,
            video_url: args.video_url,
            zip: args.zip,
        }
    }
}

impl Commands {
    /// Whether the command needs a logged-in user
    fn requires_session(&self) -> bool {
        !matches!(
            self,
            Commands::Login { .. } | Commands::Signup(_) | Commands::Logout | Commands::Config { .. }
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())
        .with_context(|| "Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_logging(&config.logging)?;

    let sessions = SessionStore::new(&config.session.path);
    if cli.command.requires_session() {
        let session = sessions.require()?;
        tracing::debug!(username = %session.username, "Session found");
    }

    let today = Local::now().date_naive();
    let format = cli.format;

    match cli.command {
        Commands::Login { username, password } => {
            let auth = AuthClient::from_config(&config.auth)?;
            let notice = actions::login(&auth, &sessions, &Credentials::new(username, password)).await;
            report(notice)?;
        }

        Commands::Signup(args) => {
            signup(&config, args, today).await?;
        }

        Commands::Logout => {
            report(actions::logout(&sessions))?;
        }

        Commands::Events {
            category,
            location,
            sort,
            more,
            all,
        } => {
            let client = EventsClient::from_config(&config.backend)?;
            let mut store = EventStore::new();
            let events = actions::load_events(&client, &mut store)
                .await
                .or_else(fail)?;

            let query = DashboardQuery {
                category,
                location,
                sort,
            };
            let mut dashboard =
                Dashboard::with_query(events, query, config.dashboard.feed_config());
            if all {
                dashboard.feed_mut().see_all();
            } else {
                for _ in 0..more {
                    dashboard.feed_mut().load_more();
                }
            }

            let feed = dashboard.feed();
            match format {
                OutputFormat::Json => print_json(feed.visible())?,
                OutputFormat::Table => {
                    print_event_table(feed.visible(), today);
                    println!();
                    println!("Showing {} of {} events", feed.shown(), feed.total());
                    if feed.has_more() {
                        println!("Use --more N or --all to see more.");
                    }
                }
            }
        }

        Commands::Show { id } => {
            let client = EventsClient::from_config(&config.backend)?;
            let details = actions::load_event_details(&client, id).await.or_else(fail)?;

            match format {
                OutputFormat::Json => print_json(&details.event)?,
                OutputFormat::Table => print_details(&details, today),
            }
        }

        Commands::Register { id } => {
            let client = EventsClient::from_config(&config.backend)?;
            let mut store = EventStore::new();
            actions::load_events(&client, &mut store).await.or_else(fail)?;

            let mut event = match store.get(id) {
                Some(event) => event.clone(),
                None => bail!("Event {} not found", id),
            };
            report(actions::register_for_event(&client, &mut store, &mut event).await)?;
        }

        Commands::Create(args) => {
            let client = EventsClient::from_config(&config.backend)?;
            let mut store = EventStore::new();
            actions::load_events(&client, &mut store).await.or_else(fail)?;

            let form = EventForm::from(args);
            let notice =
                actions::create_event(&client, &mut store, &form, &mut rand::thread_rng()).await;
            report(notice)?;
        }

        Commands::Analysis {
            month,
            search,
            event_type,
            page,
            export,
        } => {
            let client = EventsClient::from_config(&config.backend)?;
            let mut store = EventStore::new();
            let events = actions::load_events(&client, &mut store)
                .await
                .or_else(fail)?;

            let query = AnalysisQuery {
                month,
                search,
                event_type,
            };
            let report = AnalysisReport::build(&events, &query, today);
            let per_page = config.analysis.per_page;

            if let Some(path) = export {
                let csv = report.to_csv(today)?;
                std::fs::write(&path, csv)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Exported {} events to {:?}", report.filtered.len(), path);
                return Ok(());
            }

            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "summary": {
                        "upcoming": report.summary.upcoming,
                        "completed": report.summary.completed,
                        "total": report.summary.total,
                        "matching": report.summary.matching,
                    },
                    "histogram": report.histogram,
                    "page": page,
                    "pages": report.page_count(per_page),
                    "events": report.page(page, per_page),
                }))?,
                OutputFormat::Table => print_analysis(&report, &query, page, per_page, today),
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Run both signup steps, then submit
async fn signup(config: &Config, args: SignupArgs, today: NaiveDate) -> anyhow::Result<()> {
    let mut flow = SignupFlow::new();
    {
        let form = flow.form_mut();
        form.first_name = args.first_name;
        form.last_name = args.last_name;
        form.email = args.email;
        form.password = args.password;
        form.address = args.address;
        form.phone = args.phone;
        form.birth_date = args.birth_date;
        form.pan = args.pan;
    }

    if !flow.next() {
        return field_errors(&flow);
    }
    let form = match flow.submit(today) {
        Some(form) => form.clone(),
        None => return field_errors(&flow),
    };

    let auth = AuthClient::from_config(&config.auth)?;
    report(actions::signup(&auth, &form).await)
}

fn field_errors(flow: &SignupFlow) -> anyhow::Result<()> {
    for message in flow.errors().values() {
        eprintln!("  {}", message);
    }
    bail!("Please fix the fields above")
}

/// Print a notice, failing the command when it is an error
fn report(notice: Notice) -> anyhow::Result<()> {
    if notice.is_error() {
        bail!(notice.message);
    }
    println!("{}", notice.message);
    Ok(())
}

fn fail<T>(notice: Notice) -> anyhow::Result<T> {
    bail!(notice.message)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Shorten to `width` characters, marking the cut
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn print_event_table(events: &[Event], today: NaiveDate) {
    if events.is_empty() {
        println!("No events found.");
        return;
    }

    println!(
        "{:<6} {:<24} {:<11} {:<20} {:<18} {:<11} {:<10}",
        "ID", "Title", "Date", "Time", "Location", "Type", "Status"
    );
    println!("{}", "-".repeat(106));

    for event in events {
        let status = if event.is_registered {
            "Registered".to_string()
        } else {
            event.status(today).to_string()
        };
        println!(
            "{:<6} {:<24} {:<11} {:<20} {:<18} {:<11} {:<10}",
            event.id,
            truncate(&event.title, 24),
            event.date,
            truncate(&event.time, 20),
            truncate(&event.location, 18),
            event.event_type.label(),
            status
        );
    }
}

fn print_details(details: &EventDetails, today: NaiveDate) {
    let event = &details.event;

    println!("{}", event.title);
    println!("{}", "=".repeat(event.title.chars().count().max(1)));
    println!("{}", event.description);
    println!();
    println!("When & Where");
    println!("  Date:     {}", event.date);
    println!("  Time:     {}", event.time);
    println!("  Location: {}", event.location);
    if !event.zip.is_empty() {
        println!("  Zip:      {}", event.zip);
    }
    if let Some(map) = event.map_embed_url() {
        println!("  Map:      {}", map);
    }
    println!();
    println!("Organiser");
    println!("  Name:     {}", event.organiser);
    println!("  Email:    {}", event.email);
    println!("  Phone:    {}", event.phone_number);
    println!("  Speaker:  {}", event.speaker);
    if !event.video_url.is_empty() {
        println!("  Video:    {}", event.video_url);
    }
    println!();
    println!(
        "Price: {}    Type: {}    Status: {}",
        event.price,
        event.event_type.label(),
        event.status(today)
    );
    if event.is_registered {
        println!("You are registered for this event.");
    }

    if !details.related.is_empty() {
        println!();
        println!("Related events");
        print_event_table(&details.related, today);
    }
}

fn print_analysis(
    report: &AnalysisReport,
    query: &AnalysisQuery,
    page: usize,
    per_page: usize,
    today: NaiveDate,
) {
    let month = match &query.month {
        MonthFilter::Month(ym) => ym.label(),
        MonthFilter::Upcoming => "Upcoming".to_string(),
    };
    println!("Events: {}", month);
    println!();
    println!(
        "Upcoming: {}    Completed: {}    Total: {}",
        report.summary.upcoming, report.summary.completed, report.summary.total
    );
    println!();

    let max = report.histogram.max().max(1);
    for (label, count) in report.histogram.labelled() {
        let bar = "#".repeat(count * 40 / max);
        println!("{:<4} {:>3} {}", label, count, bar);
    }
    println!();

    let pages = report.page_count(per_page);
    print_event_table(report.page(page, per_page), today);
    println!();
    println!(
        "Page {} of {} ({} matching events)",
        page,
        pages.max(1),
        report.summary.matching
    );
}
