//! Cached reverse and forward geocoding.
//!
//! # Caching rules
//!
//! - Reverse results are keyed by [`GridKey`]; a second coordinate in the
//!   same cell is answered without a request.
//! - Centroids are keyed by the exact query string.
//! - Only successful, non-empty answers are cached. Failures are retried on
//!   the next call.
//!
//! Both caches are append-only for the lifetime of the resolver.

use std::time::Duration;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::address::AddressRecord;
use crate::coord::{Coordinate, GridKey};
use crate::provider::{
    with_timeout, ForwardGeocoder, ProviderError, ReverseGeocoder, DEFAULT_TIMEOUT_SECS,
};

/// Default cache grid precision (5 decimals, about 1 m).
pub const DEFAULT_GRID_PRECISION: u8 = 5;

/// Errors from place resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The provider answered but had nothing for this input.
    #[error("Nothing found for {0}")]
    Unresolved(String),

    /// The provider could not be reached or answered garbage.
    #[error("Upstream lookup failed: {0}")]
    Upstream(#[from] ProviderError),
}

/// Resolves coordinates to addresses and place names to centroids.
pub struct PlaceResolver<G> {
    geocoder: G,
    precision: u8,
    timeout: Duration,
    addresses: DashMap<GridKey, AddressRecord>,
    centroids: DashMap<String, Coordinate>,
}

impl<G> PlaceResolver<G>
where
    G: ReverseGeocoder + ForwardGeocoder,
{
    /// Creates a resolver with the default grid precision and timeout.
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            precision: DEFAULT_GRID_PRECISION,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            addresses: DashMap::new(),
            centroids: DashMap::new(),
        }
    }

    /// Sets the number of decimals coordinates are rounded to for caching.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves a coordinate into an address record.
    pub async fn resolve(&self, coord: Coordinate) -> Result<AddressRecord, ResolveError> {
        let key = coord.grid_key(self.precision);

        if let Some(cached) = self.addresses.get(&key) {
            debug!(key = %key, "Address cache hit");
            return Ok(cached.clone());
        }

        let raw = match with_timeout(self.timeout, self.geocoder.reverse(coord)).await {
            Ok(raw) => raw,
            Err(ProviderError::NotFound(reason)) => {
                debug!(coord = %coord, reason = %reason, "Reverse geocoder has no address");
                return Err(ResolveError::Unresolved(coord.to_string()));
            }
            Err(e) => {
                warn!(
                    coord = %coord,
                    provider = self.geocoder.name(),
                    error = %e,
                    transient = e.is_transient(),
                    "Reverse geocoding failed"
                );
                return Err(ResolveError::Upstream(e));
            }
        };

        let record = AddressRecord::from_raw(&raw);
        if record.is_empty() {
            debug!(coord = %coord, "Reverse geocoder returned an empty address");
            return Err(ResolveError::Unresolved(coord.to_string()));
        }

        debug!(
            key = %key,
            country = record.country.as_deref().unwrap_or("-"),
            city = record.city.as_deref().unwrap_or("-"),
            "Address resolved"
        );
        self.addresses.insert(key, record.clone());
        Ok(record)
    }

    /// Forward-geocodes `query` into a representative point.
    pub async fn centroid(&self, query: &str) -> Result<Coordinate, ResolveError> {
        if let Some(cached) = self.centroids.get(query) {
            return Ok(*cached);
        }

        match with_timeout(self.timeout, self.geocoder.search(query)).await {
            Ok(Some(coord)) => {
                debug!(query = query, coord = %coord, "Centroid resolved");
                self.centroids.insert(query.to_string(), coord);
                Ok(coord)
            }
            Ok(None) | Err(ProviderError::NotFound(_)) => {
                debug!(query = query, "No centroid found");
                Err(ResolveError::Unresolved(query.to_string()))
            }
            Err(e) => {
                warn!(
                    query = query,
                    error = %e,
                    transient = e.is_transient(),
                    "Centroid lookup failed"
                );
                Err(ResolveError::Upstream(e))
            }
        }
    }

    /// Number of cached grid cells.
    pub fn cached_addresses(&self) -> usize {
        self.addresses.len()
    }

    /// Number of cached centroids.
    pub fn cached_centroids(&self) -> usize {
        self.centroids.len()
    }

    /// Underlying geocoder.
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Grid precision in use.
    pub fn precision(&self) -> u8 {
        self.precision
    }
}
