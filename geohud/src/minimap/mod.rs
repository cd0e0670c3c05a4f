//! Static minimap of the current position.
//!
//! Two backends are available:
//!
//! - **Yandex** fetches a ready-made image from the Yandex static map API
//!   and checks it decodes before handing it out.
//! - **OSM** stitches OpenStreetMap tiles locally with `staticmap` and draws
//!   a circle marker on the point.
//!
//! Zoom is clamped to 1..=20 in both cases.

mod backend;
mod renderer;

pub use backend::{
    clamp_zoom, yandex_url, MapBackend, DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_ZOOM, MAX_ZOOM,
    MIN_ZOOM, OSM_TILE_TEMPLATE, YANDEX_STATIC_URL,
};
pub use renderer::{MapRenderer, MinimapRenderer};
