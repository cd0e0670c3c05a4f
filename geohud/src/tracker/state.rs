//! Core state types for position tracking.

use std::fmt;
use std::str::FromStr;

/// Monotonically increasing tag identifying one resolution request.
///
/// Every accepted coordinate and every manual refresh produces a new
/// generation. A resolution that finishes for a generation that is no
/// longer current is stale and must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    /// Returns the following generation.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the tracker treats new candidates once it holds a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerPolicy {
    /// Adopt any candidate that differs from the stored coordinate.
    AlwaysRefresh,
    /// Keep the first accepted coordinate until explicitly unlocked.
    ///
    /// Models a round-based game where the position must not drift
    /// mid-round. After the first resolution, re-resolving the same point
    /// needs a manual refresh.
    #[default]
    LockUntilRelease,
}

impl TrackerPolicy {
    /// Config file spelling of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlwaysRefresh => "always",
            Self::LockUntilRelease => "lock",
        }
    }
}

impl fmt::Display for TrackerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" | "always-refresh" | "auto" => Ok(Self::AlwaysRefresh),
            "lock" | "lock-until-release" | "manual" => Ok(Self::LockUntilRelease),
            other => Err(format!("unknown tracker policy '{}'", other)),
        }
    }
}

/// Why a candidate coordinate was not adopted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Within epsilon of the stored coordinate.
    Unchanged,
    /// The tracker is locked until `unlock()`.
    Locked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_ordering() {
        let g = Generation::default();
        assert!(g.next() > g);
        assert_eq!(g.next().next(), Generation(2));
    }

    #[test]
    fn test_generation_display() {
        assert_eq!(Generation(7).to_string(), "#7");
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("always".parse(), Ok(TrackerPolicy::AlwaysRefresh));
        assert_eq!(" LOCK ".parse(), Ok(TrackerPolicy::LockUntilRelease));
        assert!("sometimes".parse::<TrackerPolicy>().is_err());
    }

    #[test]
    fn test_policy_roundtrips_through_config_spelling() {
        for policy in [TrackerPolicy::AlwaysRefresh, TrackerPolicy::LockUntilRelease] {
            assert_eq!(policy.as_str().parse::<TrackerPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_default_policy_is_lock() {
        assert_eq!(TrackerPolicy::default(), TrackerPolicy::LockUntilRelease);
    }
}
