//! Geocoding and country metadata providers
//!
//! This module provides traits and implementations for the external lookups
//! the resolvers need: reverse geocoding (coordinate → address), forward
//! geocoding (place name → centroid) and country metadata (ISO code →
//! continent).
//!
//! # Factory Pattern
//!
//! For centralized geocoder creation, use the [`GeocoderFactory`]:
//!
//! ```ignore
//! use geohud::provider::{AsyncReqwestClient, GeocoderConfig, GeocoderFactory};
//!
//! let http_client = AsyncReqwestClient::new()?;
//! let geocoder = GeocoderFactory::new(http_client).create(&GeocoderConfig::nominatim())?;
//! ```

mod factory;
mod http;
mod locationiq;
mod nominatim;
mod restcountries;
mod types;

pub use factory::{GeocoderConfig, GeocoderFactory, GeocoderProvider};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use locationiq::{LocationIqGeocoder, LOCATIONIQ_BASE_URL};
pub use nominatim::{NominatimGeocoder, NOMINATIM_BASE_URL};
pub use restcountries::{RestCountriesClient, RESTCOUNTRIES_BASE_URL};
pub use types::{
    with_timeout, CountryMetadata, ForwardGeocoder, ProviderError, RawAddress, ReverseGeocoder,
};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
