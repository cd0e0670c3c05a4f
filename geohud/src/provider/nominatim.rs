//! Nominatim geocoder.
//!
//! Talks to an OpenStreetMap Nominatim instance. No API key is needed, but
//! the public instance requires an identifying User-Agent and allows at
//! most one request per second.
//!
//! # URL Pattern
//!
//! - Reverse: `{base}/reverse?lat={lat}&lon={lon}&format=jsonv2&accept-language={lang}`
//! - Search: `{base}/search?q={query}&format=jsonv2&limit=1&accept-language={lang}`
//!
//! The response parsers here are shared with the LocationIQ client, whose
//! API is Nominatim-compatible.

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::http::AsyncHttpClient;
use super::types::{ForwardGeocoder, ProviderError, RawAddress, ReverseGeocoder};
use crate::coord::{parse_pair, Coordinate};

/// Public OpenStreetMap Nominatim endpoint.
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<RawAddress>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Parses a Nominatim-style reverse response body.
///
/// An `{"error": ...}` body maps to [`ProviderError::NotFound`]; a body
/// without an `address` object yields an empty record.
pub(crate) fn parse_reverse_response(body: &[u8]) -> Result<RawAddress, ProviderError> {
    let response: ReverseResponse = serde_json::from_slice(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("reverse: {}", e)))?;

    if let Some(error) = response.error {
        return Err(ProviderError::NotFound(error));
    }

    Ok(response.address.unwrap_or_default())
}

/// Parses a Nominatim-style search response body, keeping the first hit.
pub(crate) fn parse_search_response(body: &[u8]) -> Result<Option<Coordinate>, ProviderError> {
    let hits: Vec<SearchHit> = serde_json::from_slice(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("search: {}", e)))?;

    match hits.first() {
        None => Ok(None),
        Some(hit) => parse_pair(&hit.lat, &hit.lon).map(Some).ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "search hit has invalid coordinates: {}, {}",
                hit.lat, hit.lon
            ))
        }),
    }
}

/// Builds `{base}/{path}` with URL-encoded query parameters.
pub(crate) fn build_url(
    base_url: &str,
    path: &str,
    params: &[(&str, &str)],
) -> Result<String, ProviderError> {
    let endpoint = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Url::parse_with_params(&endpoint, params)
        .map(String::from)
        .map_err(|e| ProviderError::HttpError(format!("Invalid URL '{}': {}", endpoint, e)))
}

/// Nominatim reverse and forward geocoder.
pub struct NominatimGeocoder<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
    language: String,
}

impl<C: AsyncHttpClient> NominatimGeocoder<C> {
    /// Creates a geocoder for the public Nominatim instance.
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, NOMINATIM_BASE_URL)
    }

    /// Creates a geocoder for a self-hosted or mirror instance.
    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            language: "en".to_string(),
        }
    }

    /// Sets the preferred language for place names.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    fn reverse_url(&self, coord: Coordinate) -> Result<String, ProviderError> {
        let lat = coord.latitude().to_string();
        let lon = coord.longitude().to_string();
        build_url(
            &self.base_url,
            "reverse",
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "jsonv2"),
                ("accept-language", self.language.as_str()),
            ],
        )
    }

    fn search_url(&self, query: &str) -> Result<String, ProviderError> {
        build_url(
            &self.base_url,
            "search",
            &[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", "1"),
                ("accept-language", self.language.as_str()),
            ],
        )
    }
}

impl<C: AsyncHttpClient> ReverseGeocoder for NominatimGeocoder<C> {
    async fn reverse(&self, coord: Coordinate) -> Result<RawAddress, ProviderError> {
        let url = self.reverse_url(coord)?;
        debug!(coord = %coord, "Nominatim reverse lookup");
        let body = self.http_client.get(&url).await?;
        parse_reverse_response(&body)
    }

    fn name(&self) -> &str {
        "Nominatim"
    }
}

impl<C: AsyncHttpClient> ForwardGeocoder for NominatimGeocoder<C> {
    async fn search(&self, query: &str) -> Result<Option<Coordinate>, ProviderError> {
        let url = self.search_url(query)?;
        debug!(query = query, "Nominatim search");
        let body = self.http_client.get(&url).await?;
        parse_search_response(&body)
    }
}
