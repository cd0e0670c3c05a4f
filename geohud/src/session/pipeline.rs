//! The resolution pipeline.
//!
//! Receives observed text, pushes extracted coordinates through the
//! tracker, and for every accepted coordinate runs the resolvers and the
//! direction annotator. Finished places are broadcast to subscribers.
//!
//! # Staleness
//!
//! Each resolution carries the generation captured when its coordinate was
//! accepted. If another candidate or refresh arrives while the lookups are
//! in flight, the generation is no longer current and the result is
//! dropped as [`ResolveOutcome::Stale`].
//!
//! # Example
//!
//! ```ignore
//! let session = Arc::new(Session::new(places, continents, minimap, SessionConfig::default()));
//! let mut rx = session.subscribe();
//! session.on_candidate("48.8566,2.3522").await;
//! let place = rx.recv().await?;
//! ```

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use super::event::{CandidateOutcome, ResolveOutcome, ResolvedPlace};
use super::view::MapView;
use crate::continent::ContinentResolver;
use crate::coord::{Coordinate, COORD_EPSILON};
use crate::direction::{direction, CITY_EPSILON, CONTINENT_EPSILON, COUNTRY_EPSILON};
use crate::extract;
use crate::minimap::{MapRenderer, DEFAULT_ZOOM};
use crate::place::PlaceResolver;
use crate::provider::{CountryMetadata, ForwardGeocoder, ProviderError, ReverseGeocoder};
use crate::tracker::{Generation, PositionTracker, TrackerPolicy};

/// Session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Candidate acceptance policy.
    pub policy: TrackerPolicy,
    /// Tolerance for "unchanged" candidates.
    pub tracker_epsilon: f64,
    /// Initial minimap zoom.
    pub zoom: u8,
    /// Capacity of the resolved-place broadcast channel.
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            policy: TrackerPolicy::default(),
            tracker_epsilon: COORD_EPSILON,
            zoom: DEFAULT_ZOOM,
            channel_capacity: 16,
        }
    }
}

/// Mutable session state. Never locked across an await.
struct SessionState {
    tracker: PositionTracker,
    map_view: MapView,
}

/// One overlay session: tracker, caches and the outbound event channel.
pub struct Session<G, F, M> {
    places: PlaceResolver<G>,
    continents: ContinentResolver<F>,
    map: M,
    state: Mutex<SessionState>,
    events: broadcast::Sender<ResolvedPlace>,
}

impl<G, F, M> Session<G, F, M>
where
    G: ReverseGeocoder + ForwardGeocoder,
    F: CountryMetadata,
    M: MapRenderer,
{
    pub fn new(
        places: PlaceResolver<G>,
        continents: ContinentResolver<F>,
        map: M,
        config: SessionConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            places,
            continents,
            map,
            state: Mutex::new(SessionState {
                tracker: PositionTracker::with_epsilon(config.policy, config.tracker_epsilon),
                map_view: MapView::new(config.zoom),
            }),
            events,
        }
    }

    /// Subscribe to resolved places.
    pub fn subscribe(&self) -> broadcast::Receiver<ResolvedPlace> {
        self.events.subscribe()
    }

    /// Handles observed text of unknown shape (payload or URL).
    pub async fn on_candidate(&self, text: &str) -> CandidateOutcome {
        self.offer(extract::extract(text)).await
    }

    /// Handles an intercepted response body.
    pub async fn on_payload(&self, text: &str) -> CandidateOutcome {
        self.offer(extract::extract_from_payload(text)).await
    }

    /// Handles an observed embedded-frame URL.
    pub async fn on_url(&self, url: &str) -> CandidateOutcome {
        self.offer(extract::extract_from_url(url)).await
    }

    /// Handles an already-validated coordinate.
    pub async fn on_coordinate(&self, coord: Coordinate) -> CandidateOutcome {
        self.offer(Some(coord)).await
    }

    async fn offer(&self, candidate: Option<Coordinate>) -> CandidateOutcome {
        let Some(coord) = candidate else {
            trace!("No coordinate in observed text");
            return CandidateOutcome::NoCoordinate;
        };

        let accepted = self.state.lock().tracker.set_position(coord);
        match accepted {
            Ok(generation) => {
                info!(coord = %coord, generation = %generation, "Position accepted");
                CandidateOutcome::Resolved(self.resolve_current(generation).await)
            }
            Err(rejection) => {
                trace!(coord = %coord, rejection = ?rejection, "Candidate rejected");
                CandidateOutcome::Rejected(rejection)
            }
        }
    }

    /// Re-resolves the current coordinate without new input.
    ///
    /// Returns `None` before the first coordinate.
    pub async fn refresh(&self) -> Option<ResolveOutcome> {
        let generation = self.state.lock().tracker.refresh()?;
        debug!(generation = %generation, "Manual refresh");
        Some(self.resolve_current(generation).await)
    }

    /// Releases the tracker lock. Returns true if it was locked.
    pub fn unlock(&self) -> bool {
        let was_locked = self.state.lock().tracker.unlock();
        if was_locked {
            info!("Tracker unlocked, waiting for next position");
        }
        was_locked
    }

    /// Zooms the minimap in one step. Returns the new zoom.
    pub fn zoom_in(&self) -> u8 {
        self.state.lock().map_view.zoom_in()
    }

    /// Zooms the minimap out one step. Returns the new zoom.
    pub fn zoom_out(&self) -> u8 {
        self.state.lock().map_view.zoom_out()
    }

    /// Current minimap viewport.
    pub fn map_view(&self) -> MapView {
        self.state.lock().map_view
    }

    /// Whether the tracker currently rejects new candidates.
    pub fn is_locked(&self) -> bool {
        self.state.lock().tracker.is_locked()
    }

    /// Coordinate whose resolution is on display.
    pub fn displayed(&self) -> Option<Coordinate> {
        self.state.lock().tracker.displayed()
    }

    /// Place resolver, for cache inspection.
    pub fn places(&self) -> &PlaceResolver<G> {
        &self.places
    }

    /// Continent resolver, for cache inspection.
    pub fn continents(&self) -> &ContinentResolver<F> {
        &self.continents
    }

    /// Renders the minimap for the displayed coordinate at the current zoom.
    ///
    /// Returns `Ok(None)` until something has been displayed.
    pub async fn render_minimap(&self) -> Result<Option<Vec<u8>>, ProviderError> {
        let view = self.map_view();
        let Some(center) = view.center else {
            return Ok(None);
        };
        self.map.render(center, view.zoom()).await.map(Some)
    }

    fn current_coordinate(&self, generation: Generation) -> Option<Coordinate> {
        let state = self.state.lock();
        if state.tracker.is_current(generation) {
            state.tracker.current()
        } else {
            None
        }
    }

    /// Resolves the tracker's current coordinate for `generation`.
    ///
    /// This is the only path that changes what is displayed.
    pub async fn resolve_current(&self, generation: Generation) -> ResolveOutcome {
        let Some(coord) = self.current_coordinate(generation) else {
            debug!(generation = %generation, "Superseded before resolution started");
            return ResolveOutcome::Stale(generation);
        };

        let address = match self.places.resolve(coord).await {
            Ok(address) => address,
            Err(e) => {
                warn!(
                    coord = %coord,
                    error = %e,
                    "Resolution failed, keeping previous display"
                );
                return ResolveOutcome::Failed(e);
            }
        };

        if self.current_coordinate(generation).is_none() {
            debug!(generation = %generation, "Superseded after address lookup");
            return ResolveOutcome::Stale(generation);
        }

        let continent = self
            .continents
            .continent_for(
                address.country_code.as_deref(),
                address.country.as_deref(),
                coord,
            )
            .await;

        let country_centroid = match address.country.as_deref() {
            Some(country) => self.places.centroid(country).await.ok(),
            None => None,
        };
        let city_centroid = match address.city_query() {
            Some(query) => self.places.centroid(&query).await.ok(),
            None => None,
        };

        let place = ResolvedPlace {
            coordinate: coord,
            continent,
            continent_direction: country_centroid.map(|country| {
                direction(continent.continent.centroid(), country, CONTINENT_EPSILON)
            }),
            country_direction: country_centroid
                .zip(city_centroid)
                .map(|(country, city)| direction(country, city, COUNTRY_EPSILON)),
            city_direction: city_centroid.map(|city| direction(city, coord, CITY_EPSILON)),
            country: address.country,
            country_code: address.country_code,
            state: address.state,
            city: address.city,
            generation,
        };

        {
            let mut state = self.state.lock();
            if !state.tracker.mark_displayed(generation) {
                debug!(generation = %generation, "Discarding stale resolution");
                return ResolveOutcome::Stale(generation);
            }
            state.map_view.center = Some(coord);
        }

        info!(
            generation = %generation,
            continent = %place.continent.continent,
            country = place.country.as_deref().unwrap_or("N/A"),
            city = place.city.as_deref().unwrap_or("N/A"),
            "Place resolved"
        );

        // No subscribers is fine
        let _ = self.events.send(place.clone());
        ResolveOutcome::Displayed(place)
    }
}
