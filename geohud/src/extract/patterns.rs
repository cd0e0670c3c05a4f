//! Compiled patterns for coordinate extraction.
//!
//! Each pattern captures latitude in group 1 and longitude in group 2.

use regex::Regex;
use std::sync::OnceLock;

/// Bare `"<float>,<float>"` pair, the legacy map-service format.
///
/// Example: `[null,[48.8566,2.3522]]`
pub(super) fn bare_pair() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(-?\d+\.\d+),(-?\d+\.\d+)").unwrap())
}

/// Street-level panorama metadata pair.
///
/// Example: `...!1d40.7128!2d-74.0060!...`
pub(super) fn panorama_pair() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"!1d(-?\d+\.\d+)!2d(-?\d+\.\d+)").unwrap())
}

/// JSON fragment with `"lat"` followed by the nearest `"lng"` (or `"lon"`).
///
/// Anything may sit between the two keys, nested objects and newlines
/// included.
pub(super) fn json_lat_lng() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"(?s)"lat"\s*:\s*(-?\d+(?:\.\d+)?).*?"(?:lng|lon)"\s*:\s*(-?\d+(?:\.\d+)?)"#,
        )
        .unwrap()
    })
}

/// Raw `location=`/`viewpoint=` parameter, for URLs that fail to parse.
pub(super) fn raw_query_param() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?:location|viewpoint)=([^&#\s]+)").unwrap())
}

/// Separator between the two numbers of a `location` value.
pub(super) fn value_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[ ,]+").unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_pair_captures() {
        let caps = bare_pair().captures("x 12.5,-3.25 y").unwrap();
        assert_eq!(&caps[1], "12.5");
        assert_eq!(&caps[2], "-3.25");
    }

    #[test]
    fn test_bare_pair_requires_decimals() {
        assert!(bare_pair().captures("12,34").is_none());
    }

    #[test]
    fn test_panorama_pair_captures() {
        let caps = panorama_pair().captures("!3m1!1d40.7128!2d-74.0060!4f").unwrap();
        assert_eq!(&caps[1], "40.7128");
        assert_eq!(&caps[2], "-74.0060");
    }

    #[test]
    fn test_json_pattern_tolerates_intervening_fields() {
        let text = r#"{"lat": 35.6762, "heading": 90, "lng": 139.6503}"#;
        let caps = json_lat_lng().captures(text).unwrap();
        assert_eq!(&caps[1], "35.6762");
        assert_eq!(&caps[2], "139.6503");
    }

    #[test]
    fn test_json_pattern_spans_nested_objects() {
        let text = "{\"lat\": 48.8566,\n \"pano\": {\"id\": \"abc\"}, \"lng\": 2.3522}";
        let caps = json_lat_lng().captures(text).unwrap();
        assert_eq!(&caps[1], "48.8566");
        assert_eq!(&caps[2], "2.3522");
    }

    #[test]
    fn test_json_pattern_pairs_nearest_lng() {
        let text = r#"{"lat": 1.5, "lng": 2.5}, {"lat": 3.5, "lng": 4.5}"#;
        let caps = json_lat_lng().captures(text).unwrap();
        assert_eq!(&caps[2], "2.5");
    }

    #[test]
    fn test_raw_query_param() {
        let caps = raw_query_param()
            .captures("/embed?foo=1&viewpoint=1.5%202.5&x=y")
            .unwrap();
        assert_eq!(&caps[1], "1.5%202.5");
    }
}
