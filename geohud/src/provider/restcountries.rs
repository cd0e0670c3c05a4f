//! REST Countries metadata client.
//!
//! `GET {base}/{code}?fields=continents` returns the continents of one
//! country. Depending on the API revision the body is either a one-element
//! array or a bare object; both are accepted. The first listed continent
//! wins.

use serde::Deserialize;
use tracing::debug;

use super::http::AsyncHttpClient;
use super::types::{CountryMetadata, ProviderError};
use crate::continent::Continent;

/// Public REST Countries v3.1 alpha-code endpoint.
pub const RESTCOUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1/alpha";

#[derive(Debug, Deserialize)]
struct CountryRecord {
    #[serde(default)]
    continents: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CountryResponse {
    Many(Vec<CountryRecord>),
    One(CountryRecord),
}

/// Extracts the first continent from a REST Countries response body.
fn parse_country_response(code: &str, body: &[u8]) -> Result<Continent, ProviderError> {
    let response: CountryResponse = serde_json::from_slice(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("country {}: {}", code, e)))?;

    let first = match response {
        CountryResponse::Many(records) => records
            .into_iter()
            .next()
            .and_then(|r| r.continents.into_iter().next()),
        CountryResponse::One(record) => record.continents.into_iter().next(),
    };

    let name =
        first.ok_or_else(|| ProviderError::NotFound(format!("continent for country {}", code)))?;

    name.parse::<Continent>()
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

/// Country metadata client backed by REST Countries.
pub struct RestCountriesClient<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> RestCountriesClient<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, RESTCOUNTRIES_BASE_URL)
    }

    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    fn build_url(&self, code: &str) -> String {
        format!(
            "{}/{}?fields=continents",
            self.base_url.trim_end_matches('/'),
            code.to_ascii_lowercase()
        )
    }
}

impl<C: AsyncHttpClient> CountryMetadata for RestCountriesClient<C> {
    async fn continent_of(&self, code: &str) -> Result<Continent, ProviderError> {
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ProviderError::NotFound(format!(
                "'{}' is not an ISO alpha-2 code",
                code
            )));
        }

        let url = self.build_url(code);
        debug!(code = code, "Country metadata lookup");
        let body = self.http_client.get(&url).await?;
        parse_country_response(code, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    #[test]
    fn test_parse_array_body() {
        let body = br#"[{"continents":["Europe"]}]"#;
        assert_eq!(parse_country_response("FR", body), Ok(Continent::Europe));
    }

    #[test]
    fn test_parse_object_body() {
        let body = br#"{"continents":["North America"]}"#;
        assert_eq!(
            parse_country_response("US", body),
            Ok(Continent::NorthAmerica)
        );
    }

    #[test]
    fn test_first_continent_wins() {
        let body = br#"[{"continents":["Europe","Asia"]}]"#;
        assert_eq!(parse_country_response("TR", body), Ok(Continent::Europe));
    }

    #[test]
    fn test_missing_continents() {
        let result = parse_country_response("XX", br#"[{"name":{}}]"#);
        assert!(matches!(result, Err(ProviderError::NotFound(_))));
        let result = parse_country_response("XX", b"[]");
        assert!(matches!(result, Err(ProviderError::NotFound(_))));
    }

    #[test]
    fn test_unknown_continent_name() {
        let result = parse_country_response("XX", br#"[{"continents":["Lemuria"]}]"#);
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_continent_of_requests_lowercase_code() {
        let mock = MockAsyncHttpClient::with_body(r#"[{"continents":["Oceania"]}]"#);
        let client = RestCountriesClient::new(mock.clone());

        assert_eq!(client.continent_of("AU").await, Ok(Continent::Oceania));
        assert_eq!(
            mock.requested_urls(),
            vec!["https://restcountries.com/v3.1/alpha/au?fields=continents".to_string()]
        );
    }

    #[tokio::test]
    async fn test_rejects_malformed_code_without_request() {
        let mock = MockAsyncHttpClient::with_body("[]");
        let client = RestCountriesClient::new(mock.clone());

        assert!(client.continent_of("FRA").await.is_err());
        assert!(client.continent_of("").await.is_err());
        assert!(mock.requested_urls().is_empty());
    }
}
