//! Common types and utilities shared across CLI commands.

use std::io::Read;

use clap::ValueEnum;
use geohud::coord::Coordinate;
use geohud::minimap::MapBackend;
use geohud::tracker::TrackerPolicy;

use crate::error::CliError;

/// Minimap backend selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum BackendArg {
    /// Yandex static map (remote image with a pin)
    Yandex,
    /// OpenStreetMap tiles rendered locally
    Osm,
}

impl From<BackendArg> for MapBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Yandex => MapBackend::Yandex,
            BackendArg::Osm => MapBackend::Osm,
        }
    }
}

/// Tracker policy selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum PolicyArg {
    /// Resolve every coordinate change
    Always,
    /// Keep the first coordinate until unlocked
    Lock,
}

impl From<PolicyArg> for TrackerPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Always => TrackerPolicy::AlwaysRefresh,
            PolicyArg::Lock => TrackerPolicy::LockUntilRelease,
        }
    }
}

/// Validates a latitude/longitude pair from the command line.
pub fn parse_coordinate(lat: f64, lon: f64) -> Result<Coordinate, CliError> {
    Ok(Coordinate::new(lat, lon)?)
}

/// Reads all of standard input.
pub fn read_stdin() -> Result<String, CliError> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(CliError::StdinRead)?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_range() {
        assert!(parse_coordinate(48.85, 2.35).is_ok());
        assert!(matches!(
            parse_coordinate(91.0, 0.0),
            Err(CliError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(MapBackend::from(BackendArg::Osm), MapBackend::Osm);
        assert_eq!(
            TrackerPolicy::from(PolicyArg::Always),
            TrackerPolicy::AlwaysRefresh
        );
    }
}
