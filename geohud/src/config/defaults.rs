//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::settings::*;
use crate::coord::COORD_EPSILON;
use crate::minimap::{MapBackend, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_ZOOM};
use crate::place::DEFAULT_GRID_PRECISION;
use crate::provider::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, RESTCOUNTRIES_BASE_URL};
use crate::tracker::TrackerPolicy;

/// Default language for place names.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "geohud.log";

/// Default log file path (~/.geohud/geohud.log).
pub fn default_log_file() -> PathBuf {
    super::file::config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            geocoder: GeocoderSettings {
                provider: GeocoderKind::LocationIq,
                api_key: None,
                base_url: None,
                language: DEFAULT_LANGUAGE.to_string(),
            },
            metadata: MetadataSettings {
                url: RESTCOUNTRIES_BASE_URL.to_string(),
            },
            map: MapSettings {
                backend: MapBackend::Yandex,
                zoom: DEFAULT_ZOOM,
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
            },
            tracker: TrackerSettings {
                policy: TrackerPolicy::LockUntilRelease,
                epsilon: COORD_EPSILON,
            },
            cache: CacheSettings {
                grid_precision: DEFAULT_GRID_PRECISION,
            },
            network: NetworkSettings {
                timeout: DEFAULT_TIMEOUT_SECS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
