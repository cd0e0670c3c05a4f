//! Normalized address records.

use serde::Serialize;

use crate::provider::RawAddress;

/// Placeholder rendered for a missing field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Country, first-level subdivision and locality of a coordinate.
///
/// Built from a [`RawAddress`] by walking an ordered list of candidate
/// fields per slot; the first present, non-blank value wins. Geocoders name
/// subdivisions differently per country (German states come back as
/// `state`, some Italian regions only as `province`), hence the chains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressRecord {
    pub country: Option<String>,
    /// Upper-cased ISO 3166-1 alpha-2 code.
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl AddressRecord {
    /// Applies the field fallback chains to a raw geocoder record.
    pub fn from_raw(raw: &RawAddress) -> Self {
        Self {
            country: first_present(&[&raw.country, &raw.country_name]),
            country_code: first_present(&[&raw.country_code]).map(|c| c.to_ascii_uppercase()),
            state: first_present(&[
                &raw.state,
                &raw.region,
                &raw.province,
                &raw.state_district,
                &raw.county,
            ]),
            city: first_present(&[
                &raw.city,
                &raw.town,
                &raw.village,
                &raw.municipality,
                &raw.hamlet,
                &raw.locality,
            ]),
        }
    }

    /// True when no slot could be filled.
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.country_code.is_none()
            && self.state.is_none()
            && self.city.is_none()
    }

    /// Query string for the city centroid lookup, e.g. `"Munich, Germany"`.
    pub fn city_query(&self) -> Option<String> {
        let city = self.city.as_deref()?;
        Some(match self.country.as_deref() {
            Some(country) => format!("{}, {}", city, country),
            None => city.to_string(),
        })
    }
}

fn first_present(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|field| field.as_deref())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Returns the value or the `N/A` placeholder.
pub fn or_not_available(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}
