//! LocationIQ geocoder.
//!
//! LocationIQ hosts a Nominatim-compatible API behind an access key.
//!
//! # URL Pattern
//!
//! - Reverse: `{base}/reverse.php?lat={lat}&lon={lon}&format=json&key={key}`
//! - Search: `{base}/search.php?q={query}&format=json&limit=1&key={key}`
//!
//! "Unable to geocode" comes back as HTTP 404, which the HTTP client maps
//! to [`ProviderError::NotFound`].

use tracing::debug;

use super::http::AsyncHttpClient;
use super::nominatim::{build_url, parse_reverse_response, parse_search_response};
use super::types::{ForwardGeocoder, ProviderError, RawAddress, ReverseGeocoder};
use crate::coord::Coordinate;

/// Default LocationIQ region endpoint.
pub const LOCATIONIQ_BASE_URL: &str = "https://us1.locationiq.com/v1";

/// LocationIQ reverse and forward geocoder.
pub struct LocationIqGeocoder<C: AsyncHttpClient> {
    http_client: C,
    api_key: String,
    base_url: String,
    language: String,
}

impl<C: AsyncHttpClient> LocationIqGeocoder<C> {
    /// Creates a geocoder using the default region endpoint.
    pub fn new(http_client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(http_client, api_key, LOCATIONIQ_BASE_URL)
    }

    /// Creates a geocoder for another region endpoint (e.g. `eu1`).
    pub fn with_base_url(
        http_client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
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
            "reverse.php",
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("accept-language", self.language.as_str()),
                ("key", self.api_key.as_str()),
            ],
        )
    }

    fn search_url(&self, query: &str) -> Result<String, ProviderError> {
        build_url(
            &self.base_url,
            "search.php",
            &[
                ("q", query),
                ("format", "json"),
                ("limit", "1"),
                ("accept-language", self.language.as_str()),
                ("key", self.api_key.as_str()),
            ],
        )
    }
}

impl<C: AsyncHttpClient> ReverseGeocoder for LocationIqGeocoder<C> {
    async fn reverse(&self, coord: Coordinate) -> Result<RawAddress, ProviderError> {
        let url = self.reverse_url(coord)?;
        debug!(coord = %coord, "LocationIQ reverse lookup");
        let body = self.http_client.get(&url).await?;
        parse_reverse_response(&body)
    }

    fn name(&self) -> &str {
        "LocationIQ"
    }
}

impl<C: AsyncHttpClient> ForwardGeocoder for LocationIqGeocoder<C> {
    async fn search(&self, query: &str) -> Result<Option<Coordinate>, ProviderError> {
        let url = self.search_url(query)?;
        debug!(query = query, "LocationIQ search");
        match self.http_client.get(&url).await {
            Ok(body) => parse_search_response(&body),
            // No match is reported as 404
            Err(ProviderError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    #[tokio::test]
    async fn test_reverse_url_carries_key() {
        let mock = MockAsyncHttpClient::with_body(
            r#"{"address":{"state":"Bavaria","country":"Germany","country_code":"de"}}"#,
        );
        let geocoder = LocationIqGeocoder::new(mock.clone(), "pk.test");

        let address = geocoder
            .reverse(Coordinate::new(48.1, 11.6).unwrap())
            .await
            .unwrap();
        assert_eq!(address.state.as_deref(), Some("Bavaria"));

        assert_eq!(
            mock.requested_urls()[0],
            "https://us1.locationiq.com/v1/reverse.php?lat=48.1&lon=11.6&format=json&accept-language=en&key=pk.test"
        );
    }

    #[tokio::test]
    async fn test_search_url_encodes_query() {
        let mock = MockAsyncHttpClient::with_body(r#"[{"lat":"48.1371","lon":"11.5754"}]"#);
        let geocoder =
            LocationIqGeocoder::with_base_url(mock.clone(), "pk.test", "https://eu1.locationiq.com/v1/");

        let coord = geocoder.search("Munich, Germany").await.unwrap();
        assert!(coord.is_some());
        assert_eq!(
            mock.requested_urls()[0],
            "https://eu1.locationiq.com/v1/search.php?q=Munich%2C+Germany&format=json&limit=1&accept-language=en&key=pk.test"
        );
    }

    #[tokio::test]
    async fn test_search_not_found_is_no_match() {
        let mock = MockAsyncHttpClient::new(Err(ProviderError::NotFound("404".into())));
        let geocoder = LocationIqGeocoder::new(mock, "pk.test");
        assert_eq!(geocoder.search("Nowhere, Atlantis").await, Ok(None));
    }

    #[tokio::test]
    async fn test_reverse_not_found_propagates() {
        let mock = MockAsyncHttpClient::new(Err(ProviderError::NotFound("404".into())));
        let geocoder = LocationIqGeocoder::new(mock, "pk.test");
        let result = geocoder.reverse(Coordinate::new(0.0, -30.0).unwrap()).await;
        assert!(matches!(result, Err(ProviderError::NotFound(_))));
    }

    #[test]
    fn test_name() {
        let geocoder = LocationIqGeocoder::new(MockAsyncHttpClient::with_body("{}"), "k");
        assert_eq!(geocoder.name(), "LocationIQ");
    }
}
