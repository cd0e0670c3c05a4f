//! Minimap rendering.

use std::future::Future;
use std::time::Duration;

use staticmap::tools::{CircleBuilder, Color};
use staticmap::StaticMapBuilder;
use tracing::debug;

use super::backend::{
    clamp_zoom, yandex_url, MapBackend, DEFAULT_HEIGHT, DEFAULT_WIDTH, OSM_TILE_TEMPLATE,
    YANDEX_STATIC_URL,
};
use crate::coord::Coordinate;
use crate::provider::{with_timeout, AsyncHttpClient, ProviderError, DEFAULT_TIMEOUT_SECS};

/// Marker radius in pixels for the OSM backend.
const MARKER_RADIUS: f32 = 6.0;

/// Produces a static map image for a coordinate.
pub trait MapRenderer: Send + Sync {
    /// Renders an image centered on `coord` at `zoom` (clamped to 1..=20).
    fn render(
        &self,
        coord: Coordinate,
        zoom: u8,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

/// Static map renderer over the configured backend.
pub struct MinimapRenderer<C: AsyncHttpClient> {
    http_client: C,
    backend: MapBackend,
    width: u32,
    height: u32,
    timeout: Duration,
    yandex_base: String,
    tile_template: String,
}

impl<C: AsyncHttpClient> MinimapRenderer<C> {
    pub fn new(http_client: C, backend: MapBackend) -> Self {
        Self {
            http_client,
            backend,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            yandex_base: YANDEX_STATIC_URL.to_string(),
            tile_template: OSM_TILE_TEMPLATE.to_string(),
        }
    }

    /// Sets the output image size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend(&self) -> MapBackend {
        self.backend
    }

    async fn render_yandex(&self, coord: Coordinate, zoom: u8) -> Result<Vec<u8>, ProviderError> {
        let url = yandex_url(&self.yandex_base, coord, zoom, self.width, self.height);
        let bytes = with_timeout(self.timeout, self.http_client.get(&url)).await?;

        image::load_from_memory(&bytes)
            .map_err(|e| ProviderError::Render(format!("static map is not an image: {}", e)))?;

        Ok(bytes)
    }

    async fn render_osm(&self, coord: Coordinate, zoom: u8) -> Result<Vec<u8>, ProviderError> {
        let (width, height) = (self.width, self.height);
        let template = self.tile_template.clone();

        // staticmap downloads tiles synchronously
        let task = tokio::task::spawn_blocking(move || {
            render_osm_blocking(&template, coord, zoom, width, height)
        });

        let joined = tokio::time::timeout(self.timeout, task)
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))?;
        joined.map_err(|e| ProviderError::Render(format!("render task failed: {}", e)))?
    }
}

fn render_osm_blocking(
    template: &str,
    coord: Coordinate,
    zoom: u8,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ProviderError> {
    let mut map = StaticMapBuilder::default()
        .width(width)
        .height(height)
        .url_template(template)
        .zoom(zoom)
        .lat_center(coord.latitude())
        .lon_center(coord.longitude())
        .build()
        .map_err(|e| ProviderError::Render(format!("Failed to create map: {}", e)))?;

    let marker = CircleBuilder::default()
        .lat_coordinate(coord.latitude())
        .lon_coordinate(coord.longitude())
        .color(Color::new(true, 220, 30, 30, 255))
        .radius(MARKER_RADIUS)
        .build()
        .map_err(|e| ProviderError::Render(format!("Failed to create marker: {}", e)))?;
    map.add_tool(marker);

    map.encode_png()
        .map_err(|e| ProviderError::Render(format!("Failed to encode map: {}", e)))
}

impl<C: AsyncHttpClient> MapRenderer for MinimapRenderer<C> {
    async fn render(&self, coord: Coordinate, zoom: u8) -> Result<Vec<u8>, ProviderError> {
        let zoom = clamp_zoom(zoom as i32);
        debug!(coord = %coord, zoom = zoom, backend = %self.backend, "Rendering minimap");
        match self.backend {
            MapBackend::Yandex => self.render_yandex(coord, zoom).await,
            MapBackend::Osm => self.render_osm(coord, zoom).await,
        }
    }
}
