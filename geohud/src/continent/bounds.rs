//! Geometric continent heuristic.
//!
//! Used when no ISO code is available or the metadata service is down. The
//! boxes are deliberately coarse and overlap; the table order settles
//! overlaps:
//!
//! - Polar boxes come first, so high-latitude points go to Arctic or
//!   Antarctica rather than Europe/Asia/North America.
//! - Europe comes before Africa and Asia, so the Mediterranean rim and the
//!   Urals go to Europe.
//!
//! A point in no box falls back to a hemisphere default (north → Europe,
//! south → Africa). That default is a last resort, not geography: open
//! ocean points in particular get an arbitrary answer.

use super::types::Continent;
use crate::coord::Coordinate;

/// A latitude/longitude rectangle, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Whether `coord` lies inside or on the edge of this box.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.latitude())
            && (self.min_lon..=self.max_lon).contains(&coord.longitude())
    }

    /// Midpoint of the latitude and longitude ranges.
    pub fn midpoint(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

/// Ordered continent boxes. First containing box wins.
pub const CONTINENT_BOXES: [(Continent, BoundingBox); 8] = [
    (Continent::Antarctica, BoundingBox::new(-90.0, -60.0, -180.0, 180.0)),
    (Continent::Arctic, BoundingBox::new(75.0, 90.0, -180.0, 180.0)),
    (Continent::Europe, BoundingBox::new(35.0, 75.0, -25.0, 45.0)),
    (Continent::Africa, BoundingBox::new(-35.0, 37.5, -20.0, 52.0)),
    (Continent::Asia, BoundingBox::new(-11.0, 75.0, 25.0, 180.0)),
    (Continent::NorthAmerica, BoundingBox::new(7.0, 75.0, -170.0, -50.0)),
    (Continent::SouthAmerica, BoundingBox::new(-56.0, 13.0, -82.0, -34.0)),
    (Continent::Oceania, BoundingBox::new(-50.0, 0.0, 110.0, 180.0)),
];

/// Attributes a coordinate to a continent using the box table, then the
/// hemisphere default.
pub fn continent_by_bounds(coord: &Coordinate) -> Continent {
    CONTINENT_BOXES
        .iter()
        .find(|(_, bbox)| bbox.contains(coord))
        .map(|(continent, _)| *continent)
        .unwrap_or_else(|| hemisphere_default(coord))
}

/// Last-resort default: northern hemisphere → Europe, southern → Africa.
pub fn hemisphere_default(coord: &Coordinate) -> Continent {
    if coord.latitude() >= 0.0 {
        Continent::Europe
    } else {
        Continent::Africa
    }
}

/// Bounding box of a continent.
pub fn bounds_of(continent: Continent) -> BoundingBox {
    CONTINENT_BOXES
        .iter()
        .find(|(c, _)| *c == continent)
        .map(|(_, bbox)| *bbox)
        .unwrap_or(BoundingBox::new(-90.0, 90.0, -180.0, 180.0))
}

/// Box-midpoint centroid of a continent.
pub(super) fn centroid_of(continent: Continent) -> Coordinate {
    let (lat, lon) = bounds_of(continent).midpoint();
    Coordinate::clamped(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lon: f64) -> Continent {
        continent_by_bounds(&Coordinate::new(lat, lon).unwrap())
    }

    #[test]
    fn test_major_cities() {
        assert_eq!(at(48.8566, 2.3522), Continent::Europe); // Paris
        assert_eq!(at(-1.2921, 36.8219), Continent::Africa); // Nairobi
        assert_eq!(at(35.6762, 139.6503), Continent::Asia); // Tokyo
        assert_eq!(at(40.7128, -74.0060), Continent::NorthAmerica); // New York
        assert_eq!(at(-23.5505, -46.6333), Continent::SouthAmerica); // Sao Paulo
        assert_eq!(at(-33.8688, 151.2093), Continent::Oceania); // Sydney
        assert_eq!(at(-77.85, 166.67), Continent::Antarctica); // McMurdo
        assert_eq!(at(78.22, 15.65), Continent::Arctic); // Longyearbyen
    }

    #[test]
    fn test_polar_box_wins_overlap() {
        // 76N 100E is inside both the Arctic and the Asia box
        assert_eq!(at(76.0, 100.0), Continent::Arctic);
    }

    #[test]
    fn test_europe_wins_mediterranean_overlap() {
        // Tunis sits in the Europe/Africa overlap
        assert_eq!(at(36.8, 10.18), Continent::Europe);
    }

    #[test]
    fn test_box_edges_are_inclusive() {
        assert_eq!(at(-60.0, 0.0), Continent::Antarctica);
        assert_eq!(at(75.0, 0.0), Continent::Arctic);
    }

    #[test]
    fn test_hemisphere_default() {
        // Mid-Pacific and South Atlantic: no box applies
        assert_eq!(at(5.0, -140.0), Continent::Europe);
        assert_eq!(at(-40.0, -20.0), Continent::Africa);
        assert_eq!(at(0.0, -30.0), Continent::Europe);
    }

    #[test]
    fn test_centroids_are_box_midpoints() {
        let europe = Continent::Europe.centroid();
        assert_eq!(europe.latitude(), 55.0);
        assert_eq!(europe.longitude(), 10.0);

        let antarctica = Continent::Antarctica.centroid();
        assert_eq!(antarctica.latitude(), -75.0);
        assert_eq!(antarctica.longitude(), 0.0);
    }

    #[test]
    fn test_every_continent_has_a_box() {
        for continent in Continent::ALL {
            let bbox = bounds_of(continent);
            assert!(bbox.contains(&continent.centroid()), "{}", continent);
        }
    }
}
