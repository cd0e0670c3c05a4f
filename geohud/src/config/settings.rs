//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::minimap::MapBackend;
use crate::tracker::TrackerPolicy;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Reverse/forward geocoder settings
    pub geocoder: GeocoderSettings,
    /// Country metadata settings
    pub metadata: MetadataSettings,
    /// Minimap settings
    pub map: MapSettings,
    /// Position tracker settings
    pub tracker: TrackerSettings,
    /// Lookup cache settings
    pub cache: CacheSettings,
    /// HTTP settings shared by all providers
    pub network: NetworkSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Which geocoder to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeocoderKind {
    #[default]
    LocationIq,
    Nominatim,
}

impl GeocoderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeocoderKind::LocationIq => "locationiq",
            GeocoderKind::Nominatim => "nominatim",
        }
    }
}

/// Geocoder configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderSettings {
    /// Provider: "locationiq" or "nominatim"
    pub provider: GeocoderKind,
    /// LocationIQ access key (only required for "locationiq")
    pub api_key: Option<String>,
    /// Endpoint override, e.g. a self-hosted Nominatim
    pub base_url: Option<String>,
    /// Language requested for place names
    pub language: String,
}

/// Country metadata configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataSettings {
    /// REST Countries alpha endpoint
    pub url: String,
}

/// Minimap configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub backend: MapBackend,
    /// Initial zoom, 1..=20
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
}

/// Position tracker configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
    pub policy: TrackerPolicy,
    /// Per-axis tolerance in degrees below which candidates count as unchanged
    pub epsilon: f64,
}

/// Lookup cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Decimals coordinates are rounded to before caching, 0..=7
    pub grid_precision: u8,
}

/// Network configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSettings {
    /// Timeout in seconds for each HTTP request
    pub timeout: u64,
    pub user_agent: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
