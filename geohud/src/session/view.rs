//! Minimap viewport.

use crate::coord::Coordinate;
use crate::minimap::{clamp_zoom, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};

/// What the minimap shows: the displayed coordinate and a zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    /// Displayed coordinate, `None` until the first resolution.
    pub center: Option<Coordinate>,
    zoom: u8,
}

impl MapView {
    /// Creates an empty view at `zoom` (clamped to 1..=20).
    pub fn new(zoom: u8) -> Self {
        Self {
            center: None,
            zoom: clamp_zoom(zoom as i32),
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Zooms in one step, stopping at the maximum. Returns the new zoom.
    pub fn zoom_in(&mut self) -> u8 {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
        self.zoom
    }

    /// Zooms out one step, stopping at the minimum. Returns the new zoom.
    pub fn zoom_out(&mut self) -> u8 {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
        self.zoom
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zoom() {
        let view = MapView::default();
        assert_eq!(view.zoom(), 13);
        assert!(view.center.is_none());
    }

    #[test]
    fn test_zoom_bounds() {
        let mut view = MapView::new(19);
        assert_eq!(view.zoom_in(), 20);
        assert_eq!(view.zoom_in(), 20);

        let mut view = MapView::new(2);
        assert_eq!(view.zoom_out(), 1);
        assert_eq!(view.zoom_out(), 1);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(MapView::new(0).zoom(), 1);
        assert_eq!(MapView::new(42).zoom(), 20);
    }
}
