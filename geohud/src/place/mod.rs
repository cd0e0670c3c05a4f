//! Place resolution: coordinate → country / state / city.
//!
//! [`PlaceResolver`] wraps a geocoder with two session-scoped caches: one
//! for reverse lookups keyed by a rounded grid cell, one for forward
//! (centroid) lookups keyed by query text. [`AddressRecord`] is the
//! normalized result, built from the provider's loosely-typed address via
//! per-slot fallback chains.

mod address;
mod resolver;

pub use address::{or_not_available, AddressRecord, NOT_AVAILABLE};
pub use resolver::{PlaceResolver, ResolveError, DEFAULT_GRID_PRECISION};
