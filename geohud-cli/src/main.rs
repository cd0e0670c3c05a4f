//! GeoHUD CLI - Command-line interface
//!
//! This binary prints the place behind a GeoGuessr-style panorama position,
//! either once for a given coordinate or continuously from observed
//! network text piped to standard input.

mod commands;
mod error;
mod hud;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::{BackendArg, PolicyArg};
use commands::config::ConfigCommands;
use commands::minimap::MinimapArgs;
use commands::resolve::ResolveArgs;
use commands::watch::WatchArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "geohud")]
#[command(version = geohud::VERSION)]
#[command(about = "Location HUD for GeoGuessr-style rounds", long_about = None)]
struct Cli {
    /// Enable debug logging regardless of RUST_LOG
    #[arg(long, global = true)]
    debug: bool,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read observed payloads and iframe URLs from stdin and print the HUD
    Watch {
        /// Override the configured tracker policy
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// Keep a minimap image of the displayed place at this path
        #[arg(long)]
        minimap: Option<PathBuf>,
    },

    /// Resolve one coordinate and print the HUD
    Resolve {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Also write the minimap image to this path
        #[arg(long)]
        minimap: Option<PathBuf>,
    },

    /// Print the coordinate found in text read from stdin
    Extract,

    /// Write a static map image for a coordinate
    Minimap {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Zoom level (1-20, clamped)
        #[arg(long, allow_hyphen_values = true)]
        zoom: Option<i32>,

        /// Override the configured backend
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,

        /// Output image path
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Config { command } => commands::config::run(command),
        Commands::Extract => commands::extract::run(),
        command => {
            let runner = CliRunner::new(cli.debug, cli.verbose)?;
            let result = run_with_runner(&runner, command);
            runner.shutdown();
            result
        }
    }
}

fn run_with_runner(runner: &CliRunner, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Watch { policy, minimap } => {
            commands::watch::run(runner, WatchArgs { policy, minimap })
        }
        Commands::Resolve { lat, lon, minimap } => {
            commands::resolve::run(runner, ResolveArgs { lat, lon, minimap })
        }
        Commands::Minimap {
            lat,
            lon,
            zoom,
            backend,
            output,
        } => commands::minimap::run(
            runner,
            MinimapArgs {
                lat,
                lon,
                zoom,
                backend,
                output,
            },
        ),
        Commands::Config { .. } | Commands::Extract => Ok(()),
    }
}
