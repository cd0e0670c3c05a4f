//! GeoHUD - location overlay for GeoGuessr-style rounds
//!
//! This library turns text observed during a round (network payloads,
//! embedded map URLs) into a resolved place: continent, country, state and
//! city, each annotated with a compass direction relative to the enclosing
//! region, plus an optional minimap image.
//!
//! # Pipeline
//!
//! ```text
//! extract -> tracker -> place (reverse geocode) -> continent + direction -> session events
//! ```
//!
//! # High-Level API
//!
//! The [`session`] module wires the stages together:
//!
//! ```ignore
//! use geohud::session::{Session, SessionConfig};
//!
//! let session = Session::new(places, continents, map, SessionConfig::default());
//! let mut events = session.subscribe();
//! session.on_candidate(r#"{"lat": 48.8584, "lng": 2.2945}"#).await;
//! let place = events.recv().await?;
//! ```

pub mod config;
pub mod continent;
pub mod coord;
pub mod direction;
pub mod extract;
pub mod logging;
pub mod minimap;
pub mod place;
pub mod provider;
pub mod session;
pub mod tracker;

/// Version of the GeoHUD library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
