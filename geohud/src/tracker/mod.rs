//! Position tracking for candidate coordinates.
//!
//! Every coordinate the extractor finds, whatever its source, passes through
//! [`PositionTracker::set_position`]. The tracker decides whether the
//! candidate is news, tags accepted candidates with a [`Generation`], and
//! remembers which coordinate is currently on screen.
//!
//! # Components
//!
//! - `state` - `Generation`, `TrackerPolicy`, `Rejection`
//! - `model` - `PositionTracker` with policy-based acceptance

mod model;
mod state;

pub use model::PositionTracker;
pub use state::{Generation, Rejection, TrackerPolicy};
