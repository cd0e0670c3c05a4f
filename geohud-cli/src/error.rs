//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use geohud::config::{config_file_path, ConfigFileError};
use geohud::coord::CoordError;
use geohud::place::ResolveError;
use geohud::provider::ProviderError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to build the async runtime
    Runtime(std::io::Error),
    /// Coordinate given on the command line is out of range
    InvalidCoordinate(CoordError),
    /// Failed to create a provider or render the minimap
    Provider(ProviderError),
    /// The place lookup failed
    Resolve(ResolveError),
    /// Input contained no coordinate
    NoCoordinate,
    /// Failed to read standard input
    StdinRead(std::io::Error),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Provider(ProviderError::ProviderSpecific(_)) => {
                eprintln!();
                eprintln!("LocationIQ needs an access key. Either:");
                eprintln!(
                    "  1. Set api_key under [geocoder] in {}",
                    config_file_path().display()
                );
                eprintln!("  2. Or switch to the keyless geocoder: provider = nominatim");
            }
            CliError::Resolve(ResolveError::Upstream(_)) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network connection");
                eprintln!("  2. Rate limited (public Nominatim allows 1 request per second)");
                eprintln!("  3. Invalid or exhausted API key");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::InvalidCoordinate(e) => write!(f, "Invalid coordinate: {}", e),
            CliError::Provider(e) => write!(f, "{}", e),
            CliError::Resolve(e) => write!(f, "Resolution failed: {}", e),
            CliError::NoCoordinate => write!(f, "No coordinate found in input"),
            CliError::StdinRead(e) => write!(f, "Failed to read standard input: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::InvalidCoordinate(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Resolve(e) => Some(e),
            CliError::StdinRead(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::InvalidCoordinate(e)
    }
}
