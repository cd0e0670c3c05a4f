//! Continent names and lookup results.

use std::fmt;
use std::str::FromStr;

use crate::coord::Coordinate;

/// The fixed set of continents a coordinate can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continent {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Africa,
    Asia,
    Oceania,
    Antarctica,
    Arctic,
}

impl Continent {
    /// All continents, in bounding-box test order.
    pub const ALL: [Continent; 8] = [
        Continent::Antarctica,
        Continent::Arctic,
        Continent::Europe,
        Continent::Africa,
        Continent::Asia,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Oceania,
    ];

    /// Human-readable name, as shown on the HUD.
    pub fn name(&self) -> &'static str {
        match self {
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Europe => "Europe",
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Oceania => "Oceania",
            Continent::Antarctica => "Antarctica",
            Continent::Arctic => "Arctic",
        }
    }

    /// Midpoint of this continent's bounding box.
    pub fn centroid(&self) -> Coordinate {
        super::bounds::centroid_of(*self)
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a metadata service reports a continent we don't know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContinent(pub String);

impl fmt::Display for UnknownContinent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown continent: '{}'", self.0)
    }
}

impl std::error::Error for UnknownContinent {}

impl FromStr for Continent {
    type Err = UnknownContinent;

    /// Parses metadata-service spellings, case-insensitively.
    ///
    /// "Australia" is accepted for Oceania since some country metadata
    /// sources use it as the continent name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "northamerica" => Ok(Continent::NorthAmerica),
            "southamerica" => Ok(Continent::SouthAmerica),
            "europe" => Ok(Continent::Europe),
            "africa" => Ok(Continent::Africa),
            "asia" => Ok(Continent::Asia),
            "oceania" | "australia" => Ok(Continent::Oceania),
            "antarctica" => Ok(Continent::Antarctica),
            "arctic" => Ok(Continent::Arctic),
            _ => Err(UnknownContinent(s.to_string())),
        }
    }
}

/// Where a continent answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinentSource {
    /// Served from the per-code cache.
    Cache,
    /// Fresh answer from the country metadata service.
    Authoritative,
    /// Bounding-box / hemisphere heuristic. Never cached.
    Geometric,
}

/// Result of a continent lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinentLookup {
    pub continent: Continent,
    pub source: ContinentSource,
}

impl ContinentLookup {
    /// Whether the answer is a heuristic rather than metadata-backed.
    pub fn is_heuristic(&self) -> bool {
        self.source == ContinentSource::Geometric
    }
}
