//! Coordinate type definitions

use std::fmt;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Tolerance in degrees below which two coordinates are considered unchanged.
pub const COORD_EPSILON: f64 = 1e-6;

/// Finest supported cache grid (7 decimals is ~1 cm, far below geocoder precision).
pub const MAX_GRID_PRECISION: u8 = 7;

/// A validated geographic position.
///
/// Both components are finite and inside the legal ranges. The only way to
/// obtain one is [`Coordinate::new`], so every `Coordinate` in the pipeline
/// is safe to act upon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Creates a coordinate by clamping each component into range.
    ///
    /// Non-finite components become 0. Meant for derived points such as box
    /// midpoints, never for extracted input.
    pub fn clamped(latitude: f64, longitude: f64) -> Self {
        let clamp = |v: f64, min: f64, max: f64| {
            if v.is_finite() {
                v.clamp(min, max)
            } else {
                0.0
            }
        };
        Self {
            latitude: clamp(latitude, MIN_LAT, MAX_LAT),
            longitude: clamp(longitude, MIN_LON, MAX_LON),
        }
    }

    /// Latitude in degrees (-90 to 90).
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees (-180 to 180).
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns true if both components differ by no more than `epsilon`.
    #[inline]
    pub fn approx_eq(&self, other: &Coordinate, epsilon: f64) -> bool {
        (self.latitude - other.latitude).abs() <= epsilon
            && (self.longitude - other.longitude).abs() <= epsilon
    }

    /// Returns the cache grid cell containing this coordinate.
    #[inline]
    pub fn grid_key(&self, precision: u8) -> GridKey {
        GridKey::new(self, precision)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Rounded-coordinate key identifying a cache grid cell.
///
/// Components are stored as integers scaled by `10^precision` so the key is
/// hashable and exact. Two coordinates that format identically at the
/// chosen number of decimals share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridKey {
    lat: i64,
    lon: i64,
    precision: u8,
}

impl GridKey {
    /// Rounds a coordinate to `precision` decimal places (clamped to
    /// [`MAX_GRID_PRECISION`]).
    pub fn new(coord: &Coordinate, precision: u8) -> Self {
        let precision = precision.min(MAX_GRID_PRECISION);
        let scale = 10_f64.powi(precision as i32);
        Self {
            lat: (coord.latitude * scale).round() as i64,
            lon: (coord.longitude * scale).round() as i64,
            precision,
        }
    }

    /// Number of decimal places this key was rounded to.
    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = 10_f64.powi(self.precision as i32);
        let digits = self.precision as usize;
        write!(
            f,
            "{:.*},{:.*}",
            digits,
            self.lat as f64 / scale,
            digits,
            self.lon as f64 / scale
        )
    }
}

/// Errors that can occur when constructing a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is non-finite or outside -90 to 90
    InvalidLatitude(f64),
    /// Longitude is non-finite or outside -180 to 180
    InvalidLongitude(f64),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
