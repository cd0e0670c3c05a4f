//! Geocoder factory for centralized provider creation.
//!
//! Builds the configured geocoder behind a single enum, so the session can
//! stay generic over one concrete type without trait objects.

use super::http::AsyncReqwestClient;
use super::locationiq::{LocationIqGeocoder, LOCATIONIQ_BASE_URL};
use super::nominatim::{NominatimGeocoder, NOMINATIM_BASE_URL};
use super::types::{ForwardGeocoder, ProviderError, RawAddress, ReverseGeocoder};
use crate::coord::Coordinate;

/// Configuration for creating a geocoder.
///
/// # Example
///
/// ```
/// use geohud::provider::GeocoderConfig;
///
/// // Nominatim (no API key required)
/// let osm = GeocoderConfig::nominatim();
///
/// // LocationIQ (requires an access key)
/// let iq = GeocoderConfig::locationiq("pk.YOUR_KEY");
/// assert!(iq.requires_api_key());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocoderConfig {
    /// LocationIQ hosted geocoder.
    LocationIq {
        /// LocationIQ access key
        api_key: String,
        /// Region endpoint override
        base_url: Option<String>,
    },

    /// OpenStreetMap Nominatim.
    ///
    /// No API key required. The public instance is rate limited to one
    /// request per second.
    Nominatim {
        /// Self-hosted instance override
        base_url: Option<String>,
    },
}

impl GeocoderConfig {
    pub fn locationiq(api_key: impl Into<String>) -> Self {
        Self::LocationIq {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn nominatim() -> Self {
        Self::Nominatim { base_url: None }
    }

    /// Returns a copy pointing at `base_url` instead of the public endpoint.
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        let url = Some(url.into());
        match self {
            Self::LocationIq { api_key, .. } => Self::LocationIq {
                api_key,
                base_url: url,
            },
            Self::Nominatim { .. } => Self::Nominatim { base_url: url },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::LocationIq { .. } => "LocationIQ",
            Self::Nominatim { .. } => "Nominatim",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::LocationIq { .. })
    }

    /// Endpoint that requests will go to.
    pub fn base_url(&self) -> &str {
        match self {
            Self::LocationIq { base_url, .. } => {
                base_url.as_deref().unwrap_or(LOCATIONIQ_BASE_URL)
            }
            Self::Nominatim { base_url } => base_url.as_deref().unwrap_or(NOMINATIM_BASE_URL),
        }
    }
}

/// Enum wrapper over all supported geocoders.
pub enum GeocoderProvider {
    LocationIq(LocationIqGeocoder<AsyncReqwestClient>),
    Nominatim(NominatimGeocoder<AsyncReqwestClient>),
}

impl ReverseGeocoder for GeocoderProvider {
    async fn reverse(&self, coord: Coordinate) -> Result<RawAddress, ProviderError> {
        match self {
            Self::LocationIq(p) => p.reverse(coord).await,
            Self::Nominatim(p) => p.reverse(coord).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::LocationIq(p) => p.name(),
            Self::Nominatim(p) => p.name(),
        }
    }
}

impl ForwardGeocoder for GeocoderProvider {
    async fn search(&self, query: &str) -> Result<Option<Coordinate>, ProviderError> {
        match self {
            Self::LocationIq(p) => p.search(query).await,
            Self::Nominatim(p) => p.search(query).await,
        }
    }
}

/// Factory for creating geocoders from configuration.
pub struct GeocoderFactory {
    http_client: AsyncReqwestClient,
    language: String,
}

impl GeocoderFactory {
    pub fn new(http_client: AsyncReqwestClient) -> Self {
        Self {
            http_client,
            language: "en".to_string(),
        }
    }

    /// Sets the preferred language for place names.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Creates the configured geocoder.
    ///
    /// Fails when a key-based provider has an empty key.
    pub fn create(self, config: &GeocoderConfig) -> Result<GeocoderProvider, ProviderError> {
        let base_url = config.base_url().to_string();
        match config {
            GeocoderConfig::LocationIq { api_key, .. } => {
                if api_key.trim().is_empty() {
                    return Err(ProviderError::ProviderSpecific(
                        "LocationIQ requires an API key".to_string(),
                    ));
                }
                let provider =
                    LocationIqGeocoder::with_base_url(self.http_client, api_key.clone(), base_url)
                        .with_language(self.language);
                Ok(GeocoderProvider::LocationIq(provider))
            }
            GeocoderConfig::Nominatim { .. } => {
                let provider = NominatimGeocoder::with_base_url(self.http_client, base_url)
                    .with_language(self.language);
                Ok(GeocoderProvider::Nominatim(provider))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_names() {
        assert_eq!(GeocoderConfig::nominatim().name(), "Nominatim");
        assert_eq!(GeocoderConfig::locationiq("k").name(), "LocationIQ");
    }

    #[test]
    fn test_default_base_urls() {
        assert_eq!(GeocoderConfig::nominatim().base_url(), NOMINATIM_BASE_URL);
        assert_eq!(GeocoderConfig::locationiq("k").base_url(), LOCATIONIQ_BASE_URL);
    }

    #[test]
    fn test_base_url_override() {
        let config = GeocoderConfig::locationiq("k").with_base_url("https://eu1.locationiq.com/v1");
        assert_eq!(config.base_url(), "https://eu1.locationiq.com/v1");
        assert!(matches!(config, GeocoderConfig::LocationIq { ref api_key, .. } if api_key == "k"));
    }

    #[test]
    fn test_create_nominatim() {
        let client = AsyncReqwestClient::new().unwrap();
        let provider = GeocoderFactory::new(client)
            .create(&GeocoderConfig::nominatim())
            .unwrap();
        assert_eq!(provider.name(), "Nominatim");
    }

    #[test]
    fn test_create_locationiq_requires_key() {
        let client = AsyncReqwestClient::new().unwrap();
        let result = GeocoderFactory::new(client).create(&GeocoderConfig::locationiq("  "));
        assert!(result.is_err());
    }
}
