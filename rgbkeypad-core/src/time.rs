//! Millisecond timestamps
//!
//! The engine never reads a clock itself; the host passes the current time
//! into every tick. Timestamps only need to be monotonically non-decreasing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Point in time with millisecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp(u64);

impl Timestamp {
    /// Zero point of the host clock
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from milliseconds since an arbitrary epoch
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Create a timestamp from whole seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Milliseconds since the epoch
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`
    ///
    /// Saturates to zero if `earlier` is actually later, so a clock that
    /// briefly steps backwards never produces a huge elapsed time.
    pub const fn millis_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Timestamp `ms` milliseconds after this one
    pub const fn add_millis(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

impl From<u64> for Timestamp {
    fn from(ms: u64) -> Self {
        Self(ms)
    }
}
