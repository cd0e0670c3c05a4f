//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let api_key = config.geocoder.api_key.as_deref().unwrap_or("");
    let base_url = config.geocoder.base_url.as_deref().unwrap_or("");

    format!(
        r#"[geocoder]
; Geocoder used for addresses and place centroids:
;   locationiq - LocationIQ (free tier available, requires API key)
;   nominatim  - OpenStreetMap Nominatim (free, 1 request per second)
provider = {}
; LocationIQ access key (only required when provider = locationiq)
; Get one at: https://locationiq.com
api_key = {}
; Optional endpoint override, e.g. a self-hosted Nominatim
base_url = {}
; Language for place names
language = {}

[metadata]
; Country metadata endpoint (ISO code -> continent)
url = {}

[map]
; Minimap source:
;   yandex - Yandex static map with a pin
;   osm    - OpenStreetMap tiles rendered locally
backend = {}
; Initial zoom level (1-20)
zoom = {}
; Image size in pixels
width = {}
height = {}

[tracker]
; When a new coordinate replaces the current one:
;   always - every change is resolved
;   lock   - the first coordinate is kept until unlocked (round-based play)
policy = {}
; Coordinates closer than this (degrees, per axis) count as unchanged
epsilon = {}

[cache]
; Decimals coordinates are rounded to before caching (0-7, 5 is about 1 m)
grid_precision = {}

[network]
; Timeout in seconds for each request
timeout = {}
user_agent = {}

[logging]
; Log file, cleared at the start of every session
file = {}
"#,
        config.geocoder.provider.as_str(),
        api_key,
        base_url,
        config.geocoder.language,
        config.metadata.url,
        config.map.backend,
        config.map.zoom,
        config.map.width,
        config.map.height,
        config.tracker.policy,
        config.tracker.epsilon,
        config.cache.grid_precision,
        config.network.timeout,
        config.network.user_agent,
        path_to_string(&config.logging.file),
    )
}

/// Convert path to string, using ~ for home directory.
pub(super) fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::GeocoderKind;
    use crate::minimap::MapBackend;
    use crate::tracker::TrackerPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_written_config_loads_back() {
        let mut config = ConfigFile::default();
        config.geocoder.provider = GeocoderKind::Nominatim;
        config.geocoder.api_key = Some("pk.test".to_string());
        config.map.backend = MapBackend::Osm;
        config.map.zoom = 9;
        config.tracker.policy = TrackerPolicy::AlwaysRefresh;
        config.cache.grid_precision = 4;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.ini");
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.geocoder.provider, GeocoderKind::Nominatim);
        assert_eq!(loaded.geocoder.api_key.as_deref(), Some("pk.test"));
        assert_eq!(loaded.map.backend, MapBackend::Osm);
        assert_eq!(loaded.map.zoom, 9);
        assert_eq!(loaded.tracker.policy, TrackerPolicy::AlwaysRefresh);
        assert_eq!(loaded.tracker.epsilon, config.tracker.epsilon);
        assert_eq!(loaded.cache.grid_precision, 4);
        assert_eq!(loaded.logging.file, config.logging.file);
    }

    #[test]
    fn test_empty_optionals_written_blank() {
        let content = to_config_string(&ConfigFile::default());
        assert!(content.contains("api_key = \n"));
        assert!(content.contains("provider = locationiq"));
        assert!(content.contains("policy = lock"));
    }

    #[test]
    fn test_path_outside_home_kept() {
        assert_eq!(path_to_string(Path::new("/tmp/hud.log")), "/tmp/hud.log");
    }
}
