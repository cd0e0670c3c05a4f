//! Continent attribution.
//!
//! The authoritative answer comes from country metadata, keyed by ISO
//! code. When there is no code, or the metadata service fails, a coarse
//! bounding-box heuristic answers instead.
//!
//! # Components
//!
//! - `types` - `Continent`, `ContinentLookup`, `ContinentSource`
//! - `bounds` - ordered box table and hemisphere default
//! - `exceptions` - ISO codes for territories geocoders leave uncoded
//! - `resolver` - `ContinentResolver` with the per-code cache

pub mod bounds;
pub mod exceptions;
mod resolver;
mod types;

pub use bounds::{continent_by_bounds, BoundingBox, CONTINENT_BOXES};
pub use resolver::ContinentResolver;
pub use types::{Continent, ContinentLookup, ContinentSource, UnknownContinent};
