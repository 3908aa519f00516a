//! Command line entry point for the xG rating engine
//!
//! Seeds base ratings from a ranking table, rebuilds the rating-change
//! ledger from fixture xG data, and prints current ratings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use xg_ratings::config::{AppConfig, GameweekPolicy};
use xg_ratings::data::write_rows;
use xg_ratings::RatingService;

/// xG Ratings - offensive/defensive team ratings driven by expected goals
#[derive(Parser)]
#[command(
    name = "xg-ratings",
    version,
    about = "Seed and update offensive/defensive team ratings from match xG",
    long_about = "xG Ratings converts an external team ranking into base ratings on a \
                 1300-1700 scale, then rebuilds an append-only ledger of rating changes \
                 by comparing each completed fixture's xG with what the ratings predicted."
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, global = true, value_name = "DIR", help = "Override data directory")]
    data_dir: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Fail the run when any item fails
    #[arg(long, global = true, help = "Abort without writing if any row or fixture fails")]
    strict: bool,

    /// Dry run mode
    #[arg(long, global = true, help = "Compute and report without writing any file")]
    dry_run: bool,

    /// Print the run report as JSON
    #[arg(long, global = true, help = "Print the run report as JSON on stdout")]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Seed base ratings from the ranking table
    Seed,
    /// Rebuild the rating-change ledger from all fixtures
    Update {
        /// Same-event fixture policy override
        #[arg(long, value_name = "POLICY", help = "sequential or snapshot")]
        policy: Option<GameweekPolicy>,
    },
    /// Print every team's current rating
    Ratings {
        /// Write the table to a CSV file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data_dir) = &args.data_dir {
        config.paths.data_dir = data_dir.clone();
    }

    if args.strict {
        config.service.strict = true;
    }

    if let Command::Update {
        policy: Some(policy),
    } = &args.command
    {
        config.rating.gameweek_policy = *policy;
    }

    xg_ratings::config::validate_config(&config)?;
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: &Args, service: &RatingService) -> Result<()> {
    match &args.command {
        Command::Seed => {
            let report = service.seed(args.dry_run)?;
            if args.json {
                print_json(&report)?;
            }
        }
        Command::Update { .. } => {
            let report = service.update(args.dry_run)?;
            if args.json {
                print_json(&report)?;
            }
        }
        Command::Ratings { output } => {
            let ratings = service.current_ratings()?;
            match output {
                Some(path) if !args.dry_run => {
                    xg_ratings::data::write_file(path, &ratings)?;
                    info!("💾 Saved {} current ratings to {}", ratings.len(), path.display());
                }
                _ if args.json => print_json(&ratings)?,
                _ => write_rows(std::io::stdout().lock(), &ratings)?,
            }
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("🚀 {} v{}", config.service.name, xg_ratings::VERSION);
    info!("   Data dir: {}", config.paths.data_dir.display());
    info!("   Gameweek policy: {}", config.rating.gameweek_policy);

    let service = RatingService::from_config(config);
    if let Err(e) = run(&args, &service) {
        error!("❌ {:#}", e);
        std::process::exit(1);
    }
}
