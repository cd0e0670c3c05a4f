//! Geographic coordinate types.
//!
//! [`Coordinate`] is the validated position that flows through the whole
//! pipeline. [`GridKey`] is its rounded form, used to key the reverse
//! geocoding cache so near-identical coordinates share one lookup.

mod types;


pub use types::{
    Coordinate, CoordError, GridKey, COORD_EPSILON, MAX_GRID_PRECISION, MAX_LAT, MAX_LON,
    MIN_LAT, MIN_LON,
};

/// Parses a pair of decimal strings into a coordinate.
///
/// Returns `None` when either component is not a number or the pair is
/// outside the legal ranges. Used by every extractor matcher.
pub fn parse_pair(lat: &str, lon: &str) -> Option<Coordinate> {
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    Coordinate::new(lat, lon).ok()
}
