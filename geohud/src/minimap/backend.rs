//! Minimap backends and zoom limits.

use std::fmt;
use std::str::FromStr;

use crate::coord::Coordinate;

/// Default minimap zoom level.
pub const DEFAULT_ZOOM: u8 = 13;

/// Minimum minimap zoom level.
pub const MIN_ZOOM: u8 = 1;

/// Maximum minimap zoom level.
pub const MAX_ZOOM: u8 = 20;

/// Default minimap size in pixels.
pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 300;

/// Yandex static map endpoint.
pub const YANDEX_STATIC_URL: &str = "https://static-maps.yandex.ru/1.x/";

/// OpenStreetMap tile template used by the local renderer.
pub const OSM_TILE_TEMPLATE: &str = "https://a.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Clamps a requested zoom into the supported range.
pub fn clamp_zoom(zoom: i32) -> u8 {
    zoom.clamp(MIN_ZOOM as i32, MAX_ZOOM as i32) as u8
}

/// Where the minimap image comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapBackend {
    /// Remote Yandex static map with a red pin.
    #[default]
    Yandex,
    /// OSM tiles stitched locally with a circle marker.
    Osm,
}

impl MapBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapBackend::Yandex => "yandex",
            MapBackend::Osm => "osm",
        }
    }
}

impl fmt::Display for MapBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yandex" => Ok(MapBackend::Yandex),
            "osm" | "openstreetmap" => Ok(MapBackend::Osm),
            other => Err(format!("unknown map backend '{}'", other)),
        }
    }
}

/// Builds a Yandex static map URL centered on `coord` with a pin on it.
///
/// Yandex takes `lon,lat` order for both the center and the pin.
pub fn yandex_url(base_url: &str, coord: Coordinate, zoom: u8, width: u32, height: u32) -> String {
    let (lat, lon) = (coord.latitude(), coord.longitude());
    format!(
        "{}?ll={},{}&z={}&size={},{}&l=map&pt={},{},pm2rdm&lang=en_US",
        base_url,
        lon,
        lat,
        clamp_zoom(zoom as i32),
        width,
        height,
        lon,
        lat
    )
}
