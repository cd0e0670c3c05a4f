//! INI parsing logic for converting INI → `ConfigFile`.
//!
//! Values are overlaid onto `ConfigFile::default()`; absent keys keep their
//! defaults and empty values count as absent.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::{ConfigFile, GeocoderKind};
use crate::coord::MAX_GRID_PRECISION;
use crate::minimap::{clamp_zoom, MapBackend};
use crate::tracker::TrackerPolicy;

/// Parse INI content into a `ConfigFile`, starting from defaults.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [geocoder] section
    if let Some(section) = ini.section(Some("geocoder")) {
        if let Some(v) = non_empty(section.get("provider")) {
            config.geocoder.provider = match v.to_lowercase().as_str() {
                "locationiq" => GeocoderKind::LocationIq,
                "nominatim" => GeocoderKind::Nominatim,
                _ => {
                    return Err(invalid(
                        "geocoder",
                        "provider",
                        v,
                        "must be 'locationiq' or 'nominatim'",
                    ))
                }
            };
        }
        if let Some(v) = non_empty(section.get("api_key")) {
            config.geocoder.api_key = Some(v.to_string());
        }
        if let Some(v) = non_empty(section.get("base_url")) {
            config.geocoder.base_url = Some(parse_url("geocoder", "base_url", v)?);
        }
        if let Some(v) = non_empty(section.get("language")) {
            config.geocoder.language = v.to_string();
        }
    }

    // [metadata] section
    if let Some(section) = ini.section(Some("metadata")) {
        if let Some(v) = non_empty(section.get("url")) {
            config.metadata.url = parse_url("metadata", "url", v)?;
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = non_empty(section.get("backend")) {
            config.map.backend = v
                .parse::<MapBackend>()
                .map_err(|_| invalid("map", "backend", v, "must be 'yandex' or 'osm'"))?;
        }
        if let Some(v) = non_empty(section.get("zoom")) {
            let zoom = v
                .parse::<i32>()
                .map_err(|_| invalid("map", "zoom", v, "must be an integer"))?;
            config.map.zoom = clamp_zoom(zoom);
        }
        if let Some(v) = non_empty(section.get("width")) {
            config.map.width = parse_dimension("width", v)?;
        }
        if let Some(v) = non_empty(section.get("height")) {
            config.map.height = parse_dimension("height", v)?;
        }
    }

    // [tracker] section
    if let Some(section) = ini.section(Some("tracker")) {
        if let Some(v) = non_empty(section.get("policy")) {
            config.tracker.policy = v
                .parse::<TrackerPolicy>()
                .map_err(|_| invalid("tracker", "policy", v, "must be 'always' or 'lock'"))?;
        }
        if let Some(v) = non_empty(section.get("epsilon")) {
            let epsilon = v
                .parse::<f64>()
                .map_err(|_| invalid("tracker", "epsilon", v, "must be a number"))?;
            if !epsilon.is_finite() || epsilon < 0.0 {
                return Err(invalid(
                    "tracker",
                    "epsilon",
                    v,
                    "must be a non-negative number",
                ));
            }
            config.tracker.epsilon = epsilon;
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = non_empty(section.get("grid_precision")) {
            let precision = v.parse::<u8>().ok().filter(|p| *p <= MAX_GRID_PRECISION);
            config.cache.grid_precision = precision.ok_or_else(|| {
                invalid(
                    "cache",
                    "grid_precision",
                    v,
                    &format!("must be between 0 and {}", MAX_GRID_PRECISION),
                )
            })?;
        }
    }

    // [network] section
    if let Some(section) = ini.section(Some("network")) {
        if let Some(v) = non_empty(section.get("timeout")) {
            let timeout = v.parse::<u64>().ok().filter(|t| *t > 0);
            config.network.timeout = timeout.ok_or_else(|| {
                invalid(
                    "network",
                    "timeout",
                    v,
                    "must be a positive number of seconds",
                )
            })?;
        }
        if let Some(v) = non_empty(section.get("user_agent")) {
            config.network.user_agent = v.to_string();
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_url(section: &str, key: &str, value: &str) -> Result<String, ConfigFileError> {
    reqwest::Url::parse(value)
        .map(|_| value.trim_end_matches('/').to_string())
        .map_err(|e| invalid(section, key, value, &format!("not a valid URL: {}", e)))
}

fn parse_dimension(key: &str, value: &str) -> Result<u32, ConfigFileError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| invalid("map", key, value, "must be a positive number of pixels"))
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::DEFAULT_LANGUAGE;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_geocoder_section() {
        let config = load(
            r#"
[geocoder]
provider = Nominatim
base_url = http://localhost:8080/
language = de
"#,
        )
        .unwrap();

        assert_eq!(config.geocoder.provider, GeocoderKind::Nominatim);
        assert_eq!(
            config.geocoder.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(config.geocoder.language, "de");
        assert!(config.geocoder.api_key.is_none());
    }

    #[test]
    fn test_empty_values_keep_defaults() {
        let config = load(
            r#"
[geocoder]
api_key =
language =
"#,
        )
        .unwrap();

        assert!(config.geocoder.api_key.is_none());
        assert_eq!(config.geocoder.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = load("[geocoder]\nprovider = google\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue {
                section, key, value, ..
            } => {
                assert_eq!(section, "geocoder");
                assert_eq!(key, "provider");
                assert_eq!(value, "google");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_map_section() {
        let config = load(
            r#"
[map]
backend = osm
zoom = 17
width = 640
height = 480
"#,
        )
        .unwrap();

        assert_eq!(config.map.backend, MapBackend::Osm);
        assert_eq!(config.map.zoom, 17);
        assert_eq!(config.map.width, 640);
        assert_eq!(config.map.height, 480);
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(load("[map]\nzoom = 40\n").unwrap().map.zoom, 20);
        assert_eq!(load("[map]\nzoom = -3\n").unwrap().map.zoom, 1);
        assert!(load("[map]\nzoom = close\n").is_err());
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(load("[map]\nwidth = 0\n").is_err());
    }

    #[test]
    fn test_tracker_section() {
        let config = load(
            r#"
[tracker]
policy = always
epsilon = 0.0001
"#,
        )
        .unwrap();

        assert_eq!(config.tracker.policy, TrackerPolicy::AlwaysRefresh);
        assert!((config.tracker.epsilon - 0.0001).abs() < 1e-12);
    }

    #[test]
    fn test_negative_epsilon_rejected() {
        assert!(load("[tracker]\nepsilon = -1\n").is_err());
    }

    #[test]
    fn test_grid_precision_range() {
        assert_eq!(
            load("[cache]\ngrid_precision = 3\n")
                .unwrap()
                .cache
                .grid_precision,
            3
        );
        assert!(load("[cache]\ngrid_precision = 8\n").is_err());
    }

    #[test]
    fn test_network_section() {
        let config = load(
            r#"
[network]
timeout = 4
user_agent = my-hud/1.0
"#,
        )
        .unwrap();

        assert_eq!(config.network.timeout, 4);
        assert_eq!(config.network.user_agent, "my-hud/1.0");
        assert!(load("[network]\ntimeout = 0\n").is_err());
    }

    #[test]
    fn test_bad_metadata_url_rejected() {
        assert!(load("[metadata]\nurl = not a url\n").is_err());
    }

    #[test]
    fn test_logging_file_expands_tilde() {
        let config = load("[logging]\nfile = /var/log/geohud.log\n").unwrap();
        assert_eq!(config.logging.file, PathBuf::from("/var/log/geohud.log"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/hud.log"), home.join("hud.log"));
        }
    }
}
