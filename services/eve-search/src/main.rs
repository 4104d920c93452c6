//! SDO/EVE archive search tool.
//!
//! Maps time ranges to archive URLs without touching the network:
//! - Lists the configured client variants
//! - Enumerates a variant's URLs for a time range
//! - Runs every variant responsible for a query
//! - Summarizes local EVE time-series files

mod output;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use eve_client::ClientRegistry;
use eve_common::{LevelValue, QueryTerm, TimeRange};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "eve-search")]
#[command(about = "Find SDO/EVE archive files by time range")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory (contains variants/*.yaml)
    #[arg(long, global = true, env = "EVE_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available client variants
    Variants,

    /// Print the URLs one variant would fetch for a time range
    Urls {
        /// Variant id (e.g., eve-level2b)
        #[arg(short, long)]
        variant: String,

        /// Range start (e.g., 2018/04/20 or 2018-04-20T12:00:00Z)
        #[arg(short, long)]
        start: String,

        /// Range end, inclusive
        #[arg(short, long)]
        end: String,
    },

    /// Search every variant that accepts the query
    Search {
        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,

        #[arg(short, long, default_value = "eve")]
        instrument: String,

        /// Data level: an integer (2) or a label (2b, 3m)
        #[arg(short, long)]
        level: Option<String>,

        /// Observatory name (e.g., SDO)
        #[arg(long)]
        source: Option<String>,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a Level 0CS or averages file
    Parse {
        file: PathBuf,

        /// Series kind: eve, eve_l2b
        #[arg(long)]
        source: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn log_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn query_terms(
    range: TimeRange,
    instrument: &str,
    level: Option<&str>,
    source: Option<&str>,
) -> Vec<QueryTerm> {
    let mut terms = vec![QueryTerm::time(range), QueryTerm::instrument(instrument)];
    if let Some(level) = level {
        terms.push(QueryTerm::Level(LevelValue::from_arg(level)));
    }
    if let Some(source) = source {
        terms.push(QueryTerm::source(source));
    }
    terms
}

fn time_range(start: &str, end: &str) -> Result<TimeRange> {
    TimeRange::parse(start, end).with_context(|| format!("Invalid time range {} - {}", start, end))
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Variants => {
            let registry = ClientRegistry::with_config_dir(&args.config_dir)?;
            print!("{}", output::variants_table(registry.iter()));
        }
        Commands::Urls { variant, start, end } => {
            let registry = ClientRegistry::with_config_dir(&args.config_dir)?;
            let Some(client) = registry.get(&variant) else {
                bail!("Unknown variant '{}' (see `eve-search variants`)", variant);
            };
            let range = time_range(&start, &end)?;
            for url in client.urls_for(&range)? {
                println!("{}", url);
            }
        }
        Commands::Search {
            start,
            end,
            instrument,
            level,
            source,
            json,
        } => {
            let registry = ClientRegistry::with_config_dir(&args.config_dir)?;
            let range = time_range(&start, &end)?;
            let terms = query_terms(range, &instrument, level.as_deref(), source.as_deref());

            let responsible: Vec<&str> = registry.responsible(&terms).into_iter().map(|v| v.id()).collect();
            debug!(variants = ?responsible, "Responsible variants");

            let rows = registry.search(&terms)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", output::rows_table(&rows));
            }
        }
        Commands::Parse { file, source, json } => {
            let series = eve_parser::read_with_source(&file, source.as_deref())
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            let summary = series.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", output::summary_text(&summary));
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&args.log_level))
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    run(args)
}
