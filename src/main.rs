mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use plancal_core::config::PlanCalConfig;
use plancal_core::parse::BulkOptions;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plancal")]
#[command(about = "Turn pasted schedules into planning events and preview their calendar lanes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one event per line from a pasted schedule
    Import {
        /// File to read ("-" or omitted for stdin)
        file: Option<PathBuf>,

        /// Keep events outside the operating year
        #[arg(long)]
        all: bool,

        /// Print drafts as JSON
        #[arg(long)]
        json: bool,

        /// Reference date for dates without a year (YYYY-MM-DD or a phrase)
        #[arg(long)]
        today: Option<String>,
    },
    /// Quick-add an event from a sentence (e.g. "Team meeting tomorrow 2-4pm")
    Add {
        #[arg(required = true)]
        words: Vec<String>,

        /// Resolve "today"/"tomorrow" against this date instead of the local date
        #[arg(long)]
        today: Option<String>,

        /// Print the draft as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how multi-day events stack into lanes, week by week
    Lanes {
        file: PathBuf,

        /// Month to lay out (YYYY-MM), defaults to the current month
        #[arg(short, long, conflicts_with = "on")]
        month: Option<String>,

        /// Only the business week containing this day (e.g. "next friday")
        #[arg(long)]
        on: Option<String>,

        /// Keep events outside the operating year
        #[arg(long)]
        all: bool,
    },
    /// Show config path and operating year
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            file,
            all,
            json,
            today,
        } => {
            let options = bulk_options(today.as_deref(), all)?;
            commands::import::run(file.as_deref(), &options, json)
        }
        Commands::Add { words, today, json } => {
            let today = utils::dates::reference_day(today.as_deref())?;
            commands::add::run(&words.join(" "), today, json)
        }
        Commands::Lanes {
            file,
            month,
            on,
            all,
        } => {
            let options = bulk_options(None, all)?;
            let view = commands::lanes::View::from_args(month.as_deref(), on.as_deref())?;
            commands::lanes::run(&file, &options, view)
        }
        Commands::Config => commands::config::run(),
    }
}

fn bulk_options(today: Option<&str>, all: bool) -> Result<BulkOptions> {
    let config = PlanCalConfig::load().map_err(|e| anyhow::anyhow!(e))?;
    let window = config.window().map_err(|e| anyhow::anyhow!(e))?;
    let reference = utils::dates::reference_day(today)?;

    Ok(BulkOptions::new(reference)
        .with_window(window)
        .with_clipping(!all))
}
