//! Session outputs.

use crate::continent::ContinentLookup;
use crate::coord::Coordinate;
use crate::direction::DirectionTag;
use crate::place::ResolveError;
use crate::tracker::{Generation, Rejection};

/// A fully resolved position, ready to display.
///
/// Direction tags are `None` when a centroid needed to compute them could
/// not be found.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub coordinate: Coordinate,
    pub continent: ContinentLookup,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    /// Country centroid relative to the continent centroid.
    pub continent_direction: Option<DirectionTag>,
    /// City centroid relative to the country centroid.
    pub country_direction: Option<DirectionTag>,
    /// Exact position relative to the city centroid.
    pub city_direction: Option<DirectionTag>,
    pub generation: Generation,
}

/// Result of one resolution attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    /// Resolved, published and now on display.
    Displayed(ResolvedPlace),
    /// A newer coordinate or refresh superseded this one; nothing shown.
    Stale(Generation),
    /// The address lookup failed; the previous display is kept.
    Failed(ResolveError),
}

impl ResolveOutcome {
    /// The displayed place, if this attempt produced one.
    pub fn place(&self) -> Option<&ResolvedPlace> {
        match self {
            ResolveOutcome::Displayed(place) => Some(place),
            _ => None,
        }
    }
}

/// What happened to one piece of observed text.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    /// No coordinate could be extracted.
    NoCoordinate,
    /// A coordinate was found but the tracker did not adopt it.
    Rejected(Rejection),
    /// The coordinate was adopted and resolution ran.
    Resolved(ResolveOutcome),
}
