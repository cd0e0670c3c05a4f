//! Provider types and traits

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use crate::continent::Continent;
use crate::coord::Coordinate;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed
    HttpError(String),
    /// Invalid response data from provider
    InvalidResponse(String),
    /// Provider had no answer for the query
    NotFound(String),
    /// Request did not finish within the configured timeout
    Timeout(Duration),
    /// Map image could not be produced
    Render(String),
    /// Provider-specific error
    ProviderSpecific(String),
}

impl ProviderError {
    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::HttpError(_) | ProviderError::Timeout(_))
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ProviderError::NotFound(what) => write!(f, "Not found: {}", what),
            ProviderError::Timeout(after) => {
                write!(f, "Request timed out after {:.1}s", after.as_secs_f64())
            }
            ProviderError::Render(msg) => write!(f, "Map render failed: {}", msg),
            ProviderError::ProviderSpecific(msg) => write!(f, "Provider error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Address record as returned by a reverse geocoder.
///
/// Field names follow the Nominatim `address` object, which LocationIQ
/// mirrors. Every field is optional; which ones appear depends on the
/// country and the point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawAddress {
    pub country: Option<String>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub province: Option<String>,
    pub state_district: Option<String>,
    pub county: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
    pub hamlet: Option<String>,
    pub locality: Option<String>,
}

impl RawAddress {
    /// True when the geocoder returned no usable field at all.
    pub fn is_empty(&self) -> bool {
        [
            &self.country,
            &self.country_name,
            &self.country_code,
            &self.state,
            &self.region,
            &self.province,
            &self.state_district,
            &self.county,
            &self.city,
            &self.town,
            &self.village,
            &self.municipality,
            &self.hamlet,
            &self.locality,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

/// Coordinate → address lookups.
pub trait ReverseGeocoder: Send + Sync {
    /// Reverse-geocodes a coordinate into an address record.
    fn reverse(
        &self,
        coord: Coordinate,
    ) -> impl Future<Output = Result<RawAddress, ProviderError>> + Send;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;
}

/// Free-text query → coordinate lookups.
pub trait ForwardGeocoder: Send + Sync {
    /// Returns the best match for `query`, or `None` if nothing matched.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<Coordinate>, ProviderError>> + Send;
}

/// Per-country metadata lookups.
pub trait CountryMetadata: Send + Sync {
    /// Returns the continent of the country with ISO 3166-1 alpha-2 `code`.
    fn continent_of(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Continent, ProviderError>> + Send;
}

/// Runs `future`, mapping an elapsed deadline to [`ProviderError::Timeout`].
pub async fn with_timeout<T, F>(timeout: Duration, future: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(timeout)),
    }
}
