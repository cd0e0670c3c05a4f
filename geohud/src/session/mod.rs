//! Session orchestration.
//!
//! A [`Session`] ties the pipeline together: extractor → tracker → place
//! resolver → continent resolver and direction annotator → broadcast. It
//! owns every cache and the tracker, so two sessions never share state.

mod event;
mod pipeline;
mod view;

pub use event::{CandidateOutcome, ResolveOutcome, ResolvedPlace};
pub use pipeline::{Session, SessionConfig};
pub use view::MapView;
