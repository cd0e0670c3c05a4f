//! Coordinate extraction from observed game traffic.
//!
//! The game client never hands us a coordinate directly. It shows up inside
//! map-service response bodies in a handful of loosely structured shapes, or
//! in the query string of an embedded panorama iframe. This module turns any
//! such blob into a [`Coordinate`] or nothing.
//!
//! # Matching order
//!
//! The first matcher that yields a valid pair wins. Order encodes
//! precedence, not just fallback:
//!
//! 1. Bare `"<float>,<float>"` token
//! 2. Panorama metadata `!1d<float>!2d<float>`
//! 3. JSON fragment `"lat": <float> ... "lng": <float>`
//! 4. URL query parameter `location` or `viewpoint` (percent-decoded)
//!
//! A matcher that finds a pair outside the legal ranges keeps scanning its
//! remaining matches and then falls through to the next matcher.
//!
//! # Example
//!
//! ```
//! use geohud::extract::extract;
//!
//! let coord = extract("48.8566,2.3522 extra text").unwrap();
//! assert_eq!(coord.latitude(), 48.8566);
//! assert!(extract("nothing to see here").is_none());
//! ```

mod patterns;

use regex::Regex;
use reqwest::Url;

use crate::coord::{parse_pair, Coordinate};

/// Base used to resolve relative iframe `src` values.
const RELATIVE_URL_BASE: &str = "https://localhost/";

/// Query parameters that carry a panorama position, in preference order.
const POSITION_PARAMS: [&str; 2] = ["location", "viewpoint"];

/// Which matcher produced a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Bare `"<float>,<float>"` pair
    BarePair,
    /// `!1d<lat>!2d<lon>` panorama metadata
    PanoramaPair,
    /// `"lat": .. "lng": ..` JSON fragment
    JsonFragment,
    /// `location`/`viewpoint` URL parameter
    UrlParameter,
}

/// Extracts a coordinate from any observed text, trying every matcher in order.
pub fn extract(text: &str) -> Option<Coordinate> {
    extract_with_kind(text).map(|(coord, _)| coord)
}

/// Like [`extract`], also reporting which matcher fired.
pub fn extract_with_kind(text: &str) -> Option<(Coordinate, MatchKind)> {
    extract_payload_with_kind(text)
        .or_else(|| extract_from_url(text).map(|c| (c, MatchKind::UrlParameter)))
}

/// Extracts a coordinate from an HTTP response body (matchers 1-3).
pub fn extract_from_payload(text: &str) -> Option<Coordinate> {
    extract_payload_with_kind(text).map(|(coord, _)| coord)
}

/// Extracts a coordinate from an iframe URL's `location`/`viewpoint` parameter.
///
/// Accepts absolute URLs and relative ones (resolved against a dummy base).
/// If the URL cannot be parsed at all, the raw parameter is matched with a
/// regex instead.
pub fn extract_from_url(url: &str) -> Option<Coordinate> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    match parse_url(url) {
        Some(parsed) => {
            let value = POSITION_PARAMS.iter().find_map(|name| {
                parsed
                    .query_pairs()
                    .find(|(key, value)| key == *name && !value.is_empty())
                    .map(|(_, value)| value.into_owned())
            })?;
            parse_location_value(&value)
        }
        None => {
            let caps = patterns::raw_query_param().captures(url)?;
            parse_location_value(&decode_component(&caps[1])?)
        }
    }
}

fn extract_payload_with_kind(text: &str) -> Option<(Coordinate, MatchKind)> {
    let matchers: [(&Regex, MatchKind); 3] = [
        (patterns::bare_pair(), MatchKind::BarePair),
        (patterns::panorama_pair(), MatchKind::PanoramaPair),
        (patterns::json_lat_lng(), MatchKind::JsonFragment),
    ];

    matchers
        .into_iter()
        .find_map(|(pattern, kind)| first_valid_pair(pattern, text).map(|c| (c, kind)))
}

/// Returns the first capture pair of `pattern` that forms a valid coordinate.
fn first_valid_pair(pattern: &Regex, text: &str) -> Option<Coordinate> {
    pattern
        .captures_iter(text)
        .find_map(|caps| parse_pair(&caps[1], &caps[2]))
}

fn parse_url(url: &str) -> Option<Url> {
    match Url::parse(url) {
        Ok(parsed) => Some(parsed),
        Err(_) => Url::parse(RELATIVE_URL_BASE)
            .ok()
            .and_then(|base| base.join(url).ok()),
    }
}

/// Parses a `"<lat> <lon>"` or `"<lat>,<lon>"` value.
fn parse_location_value(value: &str) -> Option<Coordinate> {
    let mut parts = patterns::value_separator()
        .split(value.trim())
        .filter(|part| !part.is_empty());
    let lat = parts.next()?;
    let lon = parts.next()?;
    parse_pair(lat, lon)
}

/// Form-decodes a raw query value by re-parsing it as the only parameter
/// of a dummy URL.
fn decode_component(raw: &str) -> Option<String> {
    let mut url = Url::parse(RELATIVE_URL_BASE).ok()?;
    url.set_query(Some(&format!("v={}", raw)));
    let (_, value) = url.query_pairs().next()?;
    Some(value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_coord(coord: Option<Coordinate>, lat: f64, lon: f64) {
        let coord = coord.expect("expected a coordinate");
        assert!((coord.latitude() - lat).abs() < 1e-9, "lat {}", coord);
        assert!((coord.longitude() - lon).abs() < 1e-9, "lon {}", coord);
    }

    #[test]
    fn test_bare_pair_with_trailing_text() {
        assert_coord(extract("48.8566,2.3522 extra text"), 48.8566, 2.3522);
    }

    #[test]
    fn test_panorama_pair() {
        let text = "[\"...!1d40.7128!2d-74.0060...\"]";
        assert_coord(extract(text), 40.7128, -74.0060);
        assert_eq!(
            extract_with_kind(text).map(|(_, k)| k),
            Some(MatchKind::PanoramaPair)
        );
    }

    #[test]
    fn test_no_numeric_pair() {
        assert!(extract("no coordinates here, sorry").is_none());
        assert!(extract("").is_none());
        assert!(extract("12,34").is_none());
    }

    #[test]
    fn test_json_fragment() {
        let text = r#"{"round":3,"lat": -33.8688, "panoId":"abc", "lng": 151.2093}"#;
        assert_coord(extract(text), -33.8688, 151.2093);
        assert_eq!(
            extract_with_kind(text).map(|(_, k)| k),
            Some(MatchKind::JsonFragment)
        );
    }

    #[test]
    fn test_json_fragment_with_lon_alias() {
        assert_coord(extract(r#"{"lat":10,"lon":20}"#), 10.0, 20.0);
    }

    #[test]
    fn test_bare_pair_takes_precedence_over_panorama() {
        // Both shapes present: the bare pair wins even though it comes later
        let text = "!1d1.5!2d2.5 then 3.5,4.5";
        assert_coord(extract(text), 3.5, 4.5);
    }

    #[test]
    fn test_out_of_range_pair_falls_through() {
        // 123.4 is not a latitude, so the panorama pair is used
        let text = "version 123.4,567.8 !1d51.5074!2d-0.1278";
        assert_coord(extract(text), 51.5074, -0.1278);
    }

    #[test]
    fn test_out_of_range_bare_pair_skips_to_next_match() {
        let text = "[123.4,567.8],[12.5,13.5]";
        assert_coord(extract(text), 12.5, 13.5);
    }

    #[test]
    fn test_url_location_space_separated() {
        let url = "https://openguessr.com/embed?location=48.8566%202.3522&fov=90";
        assert_coord(extract_from_url(url), 48.8566, 2.3522);
    }

    #[test]
    fn test_url_location_plus_separated() {
        let url = "https://openguessr.com/embed?location=-22.9068+-43.1729";
        assert_coord(extract_from_url(url), -22.9068, -43.1729);
    }

    #[test]
    fn test_url_viewpoint_fallback() {
        let url = "https://maps.example.com/embed?viewpoint=35.6762,139.6503&heading=0";
        assert_coord(extract_from_url(url), 35.6762, 139.6503);
    }

    #[test]
    fn test_url_prefers_location_over_viewpoint() {
        let url = "https://x.example/?viewpoint=1.5,1.5&location=2.5,2.5";
        assert_coord(extract_from_url(url), 2.5, 2.5);
    }

    #[test]
    fn test_relative_url() {
        assert_coord(
            extract_from_url("/svembed?location=10.5%2C-20.25"),
            10.5,
            -20.25,
        );
    }

    #[test]
    fn test_url_without_position_param() {
        assert!(extract_from_url("https://openguessr.com/embed?fov=90").is_none());
        assert!(extract_from_url("https://openguessr.com/embed?location=").is_none());
        assert!(extract_from_url("").is_none());
    }

    #[test]
    fn test_url_with_garbage_value() {
        assert!(extract_from_url("https://x.example/?location=abc%20def").is_none());
    }

    #[test]
    fn test_extract_falls_back_to_url_matcher() {
        let url = "https://openguessr.com/embed?location=48.8566%202.3522";
        let (coord, kind) = extract_with_kind(url).unwrap();
        assert_eq!(kind, MatchKind::UrlParameter);
        assert_coord(Some(coord), 48.8566, 2.3522);
    }

    #[test]
    fn test_payload_extractor_ignores_urls() {
        let url = "https://openguessr.com/embed?location=48.8566%202.3522";
        assert!(extract_from_payload(url).is_none());
    }

    #[test]
    fn test_decode_component() {
        assert_eq!(decode_component("1.5%202.5").as_deref(), Some("1.5 2.5"));
        assert_eq!(decode_component("1.5%2C2.5").as_deref(), Some("1.5,2.5"));
        assert_eq!(decode_component("1.5+2.5").as_deref(), Some("1.5 2.5"));
        assert_eq!(decode_component("%2D12.5%2c%2B3.25").as_deref(), Some("-12.5,+3.25"));
    }

    #[test]
    fn test_json_fragment_with_nested_object() {
        let text = r#"{"lat": 48.8566, "pano": {"id": "abc"}, "lng": 2.3522}"#;
        assert_coord(extract(text), 48.8566, 2.3522);
    }
}
