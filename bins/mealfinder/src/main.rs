//! mealfinder - rank restaurant meals against a fitness goal
//!
//! Resolves free-text goals, scores candidate meals against per-goal
//! nutrition rules, and prints the best matches.

use clap::{Parser, Subcommand};
use mealfinder_core::config::Config;
use mealfinder_core::error::{exit_codes, Error as CoreError};
use mealfinder_telemetry::{metrics, TelemetryConfig};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{goals, matching, menu, query, rank, Context};

/// Find restaurant meals that fit your fitness goal
#[derive(Parser)]
#[command(name = "mealfinder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "MEALFINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug) and print metrics on exit
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported fitness goals and their nutrition rules
    Goals,

    /// Resolve free text to a fitness goal
    Match {
        /// Goal text, e.g. "lean bulk" or "lose weight"
        text: String,
    },

    /// Rank meals for one or more goals
    Rank(rank::RankArgs),

    /// Extract meal candidates from raw menu text
    ParseMenu {
        /// Menu text file, or "-" for stdin
        file: PathBuf,

        /// Restaurant the menu belongs to
        #[arg(short, long)]
        restaurant: String,

        /// Cuisine to attach to every extracted meal
        #[arg(long)]
        cuisine: Option<String>,

        /// Maximum number of meals to extract
        #[arg(long, default_value = "10")]
        max_items: usize,
    },

    /// Parse a free-form search query into filters
    Query {
        /// Query text, e.g. "high protein lunch near me under 600 calories"
        text: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return exit_with(report_core_error(&e, cli.json)),
    };

    let telemetry = TelemetryConfig::from(&config.schema.logging).with_verbosity(cli.verbose);
    if let Err(e) = mealfinder_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    tracing::debug!(
        config = ?config.path,
        command = command_name(&cli.command),
        "Starting mealfinder"
    );

    let ctx = Context {
        config,
        json: cli.json,
    };

    let result = match cli.command {
        Commands::Goals => goals::run(&ctx),
        Commands::Match { text } => matching::run(&ctx, &text),
        Commands::Rank(args) => rank::run(&ctx, args),
        Commands::ParseMenu {
            file,
            restaurant,
            cuisine,
            max_items,
        } => menu::run(&file, &restaurant, cuisine.as_deref(), max_items),
        Commands::Query { text } => query::run(&ctx, &text),
    };

    if cli.verbose > 0 {
        match serde_json::to_string_pretty(&metrics().export_json()) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => tracing::warn!(error = %e, "Failed to export metrics"),
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => exit_with(report_error(&e, cli.json)),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Goals => "goals",
        Commands::Match { .. } => "match",
        Commands::Rank(_) => "rank",
        Commands::ParseMenu { .. } => "parse-menu",
        Commands::Query { .. } => "query",
    }
}

/// Print an error and return the exit code for it
fn report_error(err: &anyhow::Error, json: bool) -> i32 {
    match err.downcast_ref::<CoreError>() {
        Some(core) => report_core_error(core, json),
        None => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            exit_codes::FAILURE
        }
    }
}

fn report_core_error(err: &CoreError, json: bool) -> i32 {
    if json {
        let report = serde_json::to_string_pretty(&err.to_report()).unwrap_or_else(|_| err.to_string());
        eprintln!("{report}");
    } else {
        eprintln!("{} {}", "Error:".red().bold(), err);
    }
    exit_codes::for_code(err.code)
}

fn exit_with(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
