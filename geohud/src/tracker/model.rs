//! Position tracker - holds the current and last displayed coordinate.
//!
//! # Acceptance Logic
//!
//! - Empty tracker: the first candidate is always accepted
//! - [`TrackerPolicy::AlwaysRefresh`]: accept anything farther than epsilon
//!   from the stored coordinate
//! - [`TrackerPolicy::LockUntilRelease`]: after acceptance the tracker locks;
//!   everything is rejected until [`PositionTracker::unlock`], after which
//!   the next candidate is accepted and the tracker locks again
//!
//! # Example
//!
//! ```
//! use geohud::coord::Coordinate;
//! use geohud::tracker::{PositionTracker, Rejection, TrackerPolicy};
//!
//! let mut tracker = PositionTracker::new(TrackerPolicy::LockUntilRelease);
//! let paris = Coordinate::new(48.8566, 2.3522).unwrap();
//! let tokyo = Coordinate::new(35.6762, 139.6503).unwrap();
//!
//! assert!(tracker.set_position(paris).is_ok());
//! assert_eq!(tracker.set_position(tokyo), Err(Rejection::Locked));
//!
//! tracker.unlock();
//! assert!(tracker.set_position(tokyo).is_ok());
//! ```

use super::state::{Generation, Rejection, TrackerPolicy};
use crate::coord::{Coordinate, COORD_EPSILON};

/// Tracks the candidate coordinate stream for one session.
#[derive(Debug)]
pub struct PositionTracker {
    /// Acceptance policy.
    policy: TrackerPolicy,

    /// Tolerance for "unchanged" detection.
    epsilon: f64,

    /// Latest accepted coordinate (None only before any candidate).
    current: Option<Coordinate>,

    /// Coordinate whose resolution is currently on screen.
    displayed: Option<Coordinate>,

    /// Lock flag for [`TrackerPolicy::LockUntilRelease`].
    locked: bool,

    /// Tag of the most recent accepted coordinate or refresh.
    generation: Generation,
}

impl PositionTracker {
    /// Create an empty tracker with the default epsilon.
    pub fn new(policy: TrackerPolicy) -> Self {
        Self::with_epsilon(policy, COORD_EPSILON)
    }

    /// Create an empty tracker with a custom "unchanged" tolerance.
    pub fn with_epsilon(policy: TrackerPolicy, epsilon: f64) -> Self {
        Self {
            policy,
            epsilon: epsilon.abs(),
            current: None,
            displayed: None,
            locked: false,
            generation: Generation::default(),
        }
    }

    /// Offer a candidate coordinate.
    ///
    /// Returns the new generation when the candidate was adopted.
    pub fn set_position(&mut self, candidate: Coordinate) -> Result<Generation, Rejection> {
        match self.policy {
            TrackerPolicy::AlwaysRefresh => {
                if self
                    .current
                    .is_some_and(|current| current.approx_eq(&candidate, self.epsilon))
                {
                    return Err(Rejection::Unchanged);
                }
            }
            TrackerPolicy::LockUntilRelease => {
                if self.locked {
                    return Err(Rejection::Locked);
                }
                self.locked = true;
            }
        }

        self.current = Some(candidate);
        self.generation = self.generation.next();
        Ok(self.generation)
    }

    /// Force re-resolution of the current coordinate without new input.
    ///
    /// Returns `None` if no coordinate has been accepted yet.
    pub fn refresh(&mut self) -> Option<Generation> {
        self.current?;
        self.generation = self.generation.next();
        Some(self.generation)
    }

    /// Release the lock so the next candidate is accepted.
    ///
    /// Returns true if the tracker was locked. No-op under
    /// [`TrackerPolicy::AlwaysRefresh`].
    pub fn unlock(&mut self) -> bool {
        std::mem::replace(&mut self.locked, false)
    }

    /// Record that the resolution for `generation` is now on screen.
    ///
    /// Only the current generation may update the display; returns false
    /// (and changes nothing) for a stale one.
    pub fn mark_displayed(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.displayed = self.current;
        true
    }

    /// Latest accepted coordinate.
    pub fn current(&self) -> Option<Coordinate> {
        self.current
    }

    /// Coordinate whose resolution is on screen.
    pub fn displayed(&self) -> Option<Coordinate> {
        self.displayed
    }

    /// Whether any coordinate has been accepted yet.
    pub fn has_position(&self) -> bool {
        self.current.is_some()
    }

    /// Whether new candidates are currently being rejected by the lock.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Tag of the most recent accepted coordinate or refresh.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether `generation` is still the latest one.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    /// Acceptance policy in use.
    pub fn policy(&self) -> TrackerPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_new_tracker_has_no_position() {
        let tracker = PositionTracker::new(TrackerPolicy::AlwaysRefresh);
        assert!(!tracker.has_position());
        assert!(tracker.current().is_none());
        assert!(tracker.displayed().is_none());
        assert!(!tracker.is_locked());
    }

    #[test]
    fn test_always_refresh_accepts_first_candidate() {
        let mut tracker = PositionTracker::new(TrackerPolicy::AlwaysRefresh);
        let generation = tracker.set_position(coord(43.6, 1.4)).unwrap();
        assert_eq!(generation, Generation(1));
        assert_eq!(tracker.current(), Some(coord(43.6, 1.4)));
    }

    #[test]
    fn test_always_refresh_ignores_unchanged() {
        let mut tracker = PositionTracker::new(TrackerPolicy::AlwaysRefresh);
        tracker.set_position(coord(43.6, 1.4)).unwrap();

        let result = tracker.set_position(coord(43.6000001, 1.4000001));
        assert_eq!(result, Err(Rejection::Unchanged));
        assert_eq!(tracker.generation(), Generation(1));
    }

    #[test]
    fn test_always_refresh_adopts_moved_candidate() {
        let mut tracker = PositionTracker::new(TrackerPolicy::AlwaysRefresh);
        tracker.set_position(coord(43.6, 1.4)).unwrap();

        let generation = tracker.set_position(coord(53.5, 10.0)).unwrap();
        assert_eq!(generation, Generation(2));
        assert_eq!(tracker.current(), Some(coord(53.5, 10.0)));
        assert!(!tracker.is_locked());
    }

    #[test]
    fn test_lock_rejects_until_unlock() {
        let mut tracker = PositionTracker::new(TrackerPolicy::LockUntilRelease);
        let a = coord(43.6, 1.4);
        let b = coord(53.5, 10.0);

        assert!(tracker.set_position(a).is_ok());
        assert!(tracker.is_locked());
        assert_eq!(tracker.set_position(b), Err(Rejection::Locked));
        assert_eq!(tracker.current(), Some(a));

        assert!(tracker.unlock());
        let generation = tracker.set_position(b).unwrap();
        assert_eq!(generation, Generation(2));
        assert_eq!(tracker.current(), Some(b));
        assert!(tracker.is_locked(), "tracker re-locks after acceptance");
    }

    #[test]
    fn test_unlock_when_not_locked() {
        let mut tracker = PositionTracker::new(TrackerPolicy::LockUntilRelease);
        assert!(!tracker.unlock());
    }

    #[test]
    fn test_refresh_without_position() {
        let mut tracker = PositionTracker::new(TrackerPolicy::LockUntilRelease);
        assert!(tracker.refresh().is_none());
        assert_eq!(tracker.generation(), Generation(0));
    }

    #[test]
    fn test_refresh_bumps_generation_and_keeps_coordinate() {
        let mut tracker = PositionTracker::new(TrackerPolicy::LockUntilRelease);
        let first = tracker.set_position(coord(1.0, 2.0)).unwrap();
        let refreshed = tracker.refresh().unwrap();

        assert!(refreshed > first);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(refreshed));
        assert_eq!(tracker.current(), Some(coord(1.0, 2.0)));
    }

    #[test]
    fn test_mark_displayed_only_for_current_generation() {
        let mut tracker = PositionTracker::new(TrackerPolicy::AlwaysRefresh);
        let stale = tracker.set_position(coord(1.0, 2.0)).unwrap();
        let fresh = tracker.set_position(coord(3.0, 4.0)).unwrap();

        assert!(!tracker.mark_displayed(stale));
        assert!(tracker.displayed().is_none());

        assert!(tracker.mark_displayed(fresh));
        assert_eq!(tracker.displayed(), Some(coord(3.0, 4.0)));
    }

    #[test]
    fn test_custom_epsilon() {
        let mut tracker = PositionTracker::with_epsilon(TrackerPolicy::AlwaysRefresh, 0.01);
        tracker.set_position(coord(10.0, 10.0)).unwrap();
        assert_eq!(
            tracker.set_position(coord(10.005, 10.005)),
            Err(Rejection::Unchanged)
        );
        assert!(tracker.set_position(coord(10.02, 10.0)).is_ok());
    }
}
