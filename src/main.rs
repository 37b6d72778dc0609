//! CLI entry point for the MBTA arrival tracker.
//!
//! Subcommands for listing bus routes, listing the stops on a route, showing
//! unified bus/subway arrival predictions, and managing favorite shortcuts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mbta_tracker::api::{NextBusClient, SubwayClient};
use mbta_tracker::decode::bus::BusPredictions;
use mbta_tracker::dispatch::{resolve_target, PredTarget};
use mbta_tracker::faves::{self, FaveStore, JsonFileStore};
use mbta_tracker::output;
use mbta_tracker::predictions::aggregate;
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const EXAMPLES: &str = "\
Examples:
  mbta stops 71
  mbta pred orange down
  mbta p r harv
  mbta p bus 71 20761
  mbta f set home r harv     (afterwards: mbta p home)
  mbta f set h home          (aliases can point at aliases)
";

#[derive(Parser)]
#[command(name = "mbta")]
#[command(about = "Shows MBTA bus and subway arrival predictions", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bus routes and their tags (the subway has no route list)
    #[command(visible_alias = "l")]
    List,
    /// List the stops on a bus route, with their IDs and tags
    #[command(visible_alias = "s")]
    Stops {
        #[arg(value_name = "ROUTE_TAG")]
        route: String,
    },
    /// Show arrival predictions for a stop
    ///
    /// Bus stops are addressed by route tag and stop tag, or by stop ID.
    /// Subway stops are addressed by line color and a name substring:
    /// "quincy" matches both Quincy Center and Quincy Adams. Any other first
    /// token is looked up as a saved alias. The green line has no feed.
    #[command(visible_alias = "p")]
    Pred {
        /// bus <route> <stop> | bus <stopId> | red|blue|orange <name>... | <alias>
        #[arg(value_name = "TARGET", required = true, num_args = 1..)]
        args: Vec<String>,
    },
    /// List favorites, or set/delete an alias
    #[command(visible_alias = "f")]
    Fave {
        #[command(subcommand)]
        action: Option<FaveAction>,
    },
}

#[derive(Subcommand)]
enum FaveAction {
    /// Save an alias for a prediction target, e.g. `fave set home r harv`
    Set {
        alias: String,
        #[arg(value_name = "TOKENS", required = true, num_args = 1..)]
        tokens: Vec<String>,
    },
    /// Delete one or more aliases
    Delete {
        #[arg(value_name = "ALIAS", required = true, num_args = 1..)]
        aliases: Vec<String>,
    },
}

fn main() {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("mbta: {e:#}");
        std::process::exit(1);
    }
}

/// Logging setup: colored stderr (warnings only unless RUST_LOG says more)
/// plus a JSON daily-rolling log file.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let log_file_path = std::env::var("MBTA_LOG_FILE").map(PathBuf::from).unwrap_or_else(|_| {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("mbta")
            .join("mbta.log")
    });
    let log_dir = log_file_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let log_file_name = log_file_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("mbta.log"));
    let _ = std::fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

fn faves_path() -> PathBuf {
    match std::env::var("MBTA_FAVES_FILE") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mbta_faves.json"),
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = JsonFileStore::new(faves_path());

    match cli.command {
        Commands::List => {
            let routes = NextBusClient::new()
                .route_list()
                .context("fetching the bus route list")?;
            output::print_routes(&routes);
        }
        Commands::Stops { route } => {
            let config = NextBusClient::new()
                .route_config(&route)
                .with_context(|| format!("fetching stops for route {route}"))?;
            output::print_route_config(&config);
        }
        Commands::Pred { args } => run_pred(&store, &args)?,
        Commands::Fave { action } => run_fave(&store, action)?,
    }

    Ok(())
}

fn run_pred(store: &JsonFileStore, args: &[String]) -> Result<()> {
    let faves = store.load()?;
    let target = resolve_target(args, &faves)?;
    debug!(?target, "resolved prediction target");

    match target {
        PredTarget::BusStop { route, stop } => {
            let preds = NextBusClient::new().predictions_for_stop(&route, &stop)?;
            print_bus(preds);
        }
        PredTarget::BusStopId { stop_id } => {
            let preds = NextBusClient::new().predictions_for_stop_id(&stop_id)?;
            print_bus(preds);
        }
        PredTarget::Subway { line, needle } => {
            let raw = SubwayClient::new().predictions(line, &needle)?;
            if raw.is_empty() {
                println!("No stops found");
            } else {
                output::print_board(&aggregate(raw));
            }
        }
    }

    Ok(())
}

fn print_bus(preds: BusPredictions) {
    output::print_messages(&preds.messages);
    if preds.predictions.is_empty() {
        output::print_no_predictions(&preds.stop_title);
    } else {
        output::print_board(&aggregate(preds.predictions));
    }
}

fn run_fave(store: &JsonFileStore, action: Option<FaveAction>) -> Result<()> {
    match action {
        None => output::print_faves(&store.load()?),
        Some(FaveAction::Set { alias, tokens }) => {
            let expansion = faves::set_alias(store, &alias, &tokens)?;
            println!("{:10} -> {}", alias, expansion);
        }
        Some(FaveAction::Delete { aliases }) => {
            for (name, removed) in faves::delete_aliases(store, &aliases)? {
                if removed {
                    println!("Deleted alias '{name}'");
                } else {
                    println!("No alias '{name}'");
                }
            }
        }
    }
    Ok(())
}
