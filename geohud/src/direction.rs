//! Compact cardinal/diagonal direction tags.
//!
//! Describes where one point lies relative to another ("the city is NE of
//! the country's centroid"). The comparison is a plain latitude/longitude
//! delta against a caller-supplied epsilon, which sets how far apart the
//! points must be before a component is reported at all.

use std::fmt;

use crate::coord::Coordinate;

/// Epsilon for continent-centroid vs country-centroid comparisons.
pub const CONTINENT_EPSILON: f64 = 0.1;

/// Epsilon for country-centroid vs city-centroid comparisons.
pub const COUNTRY_EPSILON: f64 = 0.05;

/// Epsilon for city-centroid vs exact position comparisons.
pub const CITY_EPSILON: f64 = 0.02;

/// North/south component of a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    North,
    South,
}

/// East/west component of a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    East,
    West,
}

/// Relative position of one point with respect to another.
///
/// Displays as `N`, `S`, `E`, `W`, a vertical-first combination such as
/// `NE`, or `Ctr` when both components are within epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionTag {
    /// At least one component exceeds epsilon.
    Offset {
        vertical: Option<Vertical>,
        horizontal: Option<Horizontal>,
    },
    /// Both components are within epsilon.
    Centered,
}

impl DirectionTag {
    /// Sentinel text for [`DirectionTag::Centered`].
    pub const CENTERED: &'static str = "Ctr";

    /// Returns true for the centered sentinel.
    pub fn is_centered(&self) -> bool {
        matches!(self, Self::Centered)
    }
}

impl fmt::Display for DirectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionTag::Centered => f.write_str(Self::CENTERED),
            DirectionTag::Offset {
                vertical,
                horizontal,
            } => {
                match vertical {
                    Some(Vertical::North) => f.write_str("N")?,
                    Some(Vertical::South) => f.write_str("S")?,
                    None => {}
                }
                match horizontal {
                    Some(Horizontal::East) => f.write_str("E"),
                    Some(Horizontal::West) => f.write_str("W"),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Computes the direction from `from` to `to`.
///
/// `N` when `to` is more than `epsilon` degrees north of `from`, `S` when
/// more than `epsilon` south, likewise `E`/`W` for longitude. A negative
/// epsilon is treated as its absolute value.
pub fn direction(from: Coordinate, to: Coordinate, epsilon: f64) -> DirectionTag {
    direction_between(
        from.latitude(),
        from.longitude(),
        to.latitude(),
        to.longitude(),
        epsilon,
    )
}

/// Raw-component form of [`direction`].
pub fn direction_between(
    from_lat: f64,
    from_lon: f64,
    to_lat: f64,
    to_lon: f64,
    epsilon: f64,
) -> DirectionTag {
    let epsilon = epsilon.abs();
    let d_lat = to_lat - from_lat;
    let d_lon = to_lon - from_lon;

    let vertical = if d_lat > epsilon {
        Some(Vertical::North)
    } else if d_lat < -epsilon {
        Some(Vertical::South)
    } else {
        None
    };

    let horizontal = if d_lon > epsilon {
        Some(Horizontal::East)
    } else if d_lon < -epsilon {
        Some(Horizontal::West)
    } else {
        None
    };

    if vertical.is_none() && horizontal.is_none() {
        DirectionTag::Centered
    } else {
        DirectionTag::Offset {
            vertical,
            horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(from: (f64, f64), to: (f64, f64), eps: f64) -> String {
        direction_between(from.0, from.1, to.0, to.1, eps).to_string()
    }

    #[test]
    fn test_same_point_is_centered() {
        for (lat, lon) in [(0.0, 0.0), (48.85, 2.35), (-89.9, 179.9), (90.0, -180.0)] {
            for eps in [1e-9, 0.02, 0.05, 1.0] {
                assert_eq!(
                    direction_between(lat, lon, lat, lon, eps),
                    DirectionTag::Centered
                );
            }
        }
    }

    #[test]
    fn test_cardinal_directions() {
        assert_eq!(tag((0.0, 0.0), (1.0, 0.0), 0.05), "N");
        assert_eq!(tag((0.0, 0.0), (-1.0, 0.0), 0.05), "S");
        assert_eq!(tag((0.0, 0.0), (0.0, 1.0), 0.05), "E");
        assert_eq!(tag((0.0, 0.0), (0.0, -1.0), 0.05), "W");
    }

    #[test]
    fn test_diagonals_are_vertical_first() {
        assert_eq!(tag((0.0, 0.0), (1.0, 1.0), 0.05), "NE");
        assert_eq!(tag((0.0, 0.0), (1.0, -1.0), 0.05), "NW");
        assert_eq!(tag((0.0, 0.0), (-1.0, 1.0), 0.05), "SE");
        assert_eq!(tag((0.0, 0.0), (-1.0, -1.0), 0.05), "SW");
    }

    #[test]
    fn test_component_within_epsilon_is_dropped() {
        assert_eq!(tag((0.0, 0.0), (0.01, 1.0), 0.02), "E");
        assert_eq!(tag((0.0, 0.0), (1.0, -0.04), 0.05), "N");
        assert_eq!(tag((0.0, 0.0), (0.04, 0.04), 0.05), "Ctr");
    }

    #[test]
    fn test_exactly_epsilon_is_not_reported() {
        assert_eq!(tag((0.0, 0.0), (0.5, 0.0), 0.5), "Ctr");
    }

    #[test]
    fn test_negative_epsilon_uses_magnitude() {
        assert_eq!(tag((0.0, 0.0), (0.04, 0.0), -0.05), "Ctr");
    }

    #[test]
    fn test_coordinate_form_matches_raw_form() {
        let country = Coordinate::new(46.6, 2.2).unwrap();
        let city = Coordinate::new(48.85, 2.35).unwrap();
        assert_eq!(direction(country, city, COUNTRY_EPSILON).to_string(), "NE");
        assert_eq!(direction(city, city, CITY_EPSILON), DirectionTag::Centered);
    }
}
