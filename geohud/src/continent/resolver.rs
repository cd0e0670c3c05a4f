//! Continent resolution with a metadata-backed cache.
//!
//! # Lookup Order
//!
//! 1. Normalize the code, or derive one from the exception table
//! 2. Cached authoritative answer for the code
//! 3. Country metadata service; success is cached
//! 4. Geometric heuristic (box table, then hemisphere), never cached
//!
//! A failed metadata lookup is retried on the next call for that code.

use std::time::Duration;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::bounds::continent_by_bounds;
use super::exceptions::resolve_code;
use super::types::{Continent, ContinentLookup, ContinentSource};
use crate::coord::Coordinate;
use crate::provider::{with_timeout, CountryMetadata, DEFAULT_TIMEOUT_SECS};

/// Resolves the continent of a coordinate.
pub struct ContinentResolver<F> {
    metadata: F,
    timeout: Duration,
    cache: DashMap<String, Continent>,
}

impl<F: CountryMetadata> ContinentResolver<F> {
    pub fn new(metadata: F) -> Self {
        Self {
            metadata,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache: DashMap::new(),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Determines the continent for a place.
    ///
    /// `code` is the geocoder's ISO code if any; `country_name` feeds the
    /// exception table when the code is missing; `coord` drives the
    /// geometric fallback.
    pub async fn continent_for(
        &self,
        code: Option<&str>,
        country_name: Option<&str>,
        coord: Coordinate,
    ) -> ContinentLookup {
        let Some(code) = resolve_code(code, country_name) else {
            debug!(coord = %coord, "No country code, using geometric continent");
            return geometric(coord);
        };

        if let Some(continent) = self.cached(&code) {
            return ContinentLookup {
                continent,
                source: ContinentSource::Cache,
            };
        }

        match with_timeout(self.timeout, self.metadata.continent_of(&code)).await {
            Ok(continent) => {
                debug!(code = %code, continent = %continent, "Continent resolved");
                self.cache.insert(code, continent);
                ContinentLookup {
                    continent,
                    source: ContinentSource::Authoritative,
                }
            }
            Err(e) => {
                warn!(
                    code = %code,
                    error = %e,
                    transient = e.is_transient(),
                    "Country metadata lookup failed, using geometric continent"
                );
                geometric(coord)
            }
        }
    }

    /// Cached authoritative continent for `code`, if any.
    pub fn cached(&self, code: &str) -> Option<Continent> {
        self.cache.get(code).map(|entry| *entry)
    }

    /// Number of cached country codes.
    pub fn cached_codes(&self) -> usize {
        self.cache.len()
    }
}

fn geometric(coord: Coordinate) -> ContinentLookup {
    ContinentLookup {
        continent: continent_by_bounds(&coord),
        source: ContinentSource::Geometric,
    }
}
