//! LED idle-sleep timer
//!
//! When enabled, the LEDs blank after a period without key activity and
//! come back on the next press, release or hold.

use crate::time::Timestamp;

/// Default idle time before the LEDs blank
pub const DEFAULT_SLEEP_TIMEOUT_MS: u32 = 5_000;

/// Idle-sleep state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SleepTimer {
    enabled: bool,
    timeout_ms: u32,
    /// None until the first tick establishes the time base
    last_activity_at: Option<Timestamp>,
    asleep: bool,
}

impl Default for SleepTimer {
    fn default() -> Self {
        Self::new(false, DEFAULT_SLEEP_TIMEOUT_MS)
    }
}

impl SleepTimer {
    /// Create an awake timer
    pub const fn new(enabled: bool, timeout_ms: u32) -> Self {
        Self {
            enabled,
            timeout_ms,
            last_activity_at: None,
            asleep: false,
        }
    }

    /// Check if sleeping is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable sleeping
    ///
    /// Disabling wakes the LEDs immediately.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.asleep = false;
        }
    }

    /// Idle timeout in milliseconds
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Set the idle timeout in milliseconds
    pub fn set_timeout_ms(&mut self, timeout_ms: u32) {
        self.timeout_ms = timeout_ms;
    }

    /// Check if the LEDs are currently blanked
    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    /// Time of the last key activity
    pub fn last_activity_at(&self) -> Option<Timestamp> {
        self.last_activity_at
    }

    /// Record key activity
    ///
    /// Returns true if this woke the LEDs.
    pub fn record_activity(&mut self, now: Timestamp) -> bool {
        self.last_activity_at = Some(now);
        let woke = self.asleep;
        self.asleep = false;
        woke
    }

    /// Re-evaluate the timer without activity
    ///
    /// The first call only starts the idle clock. Returns true if the LEDs
    /// fell asleep on this call.
    pub fn evaluate(&mut self, now: Timestamp) -> bool {
        let last = match self.last_activity_at {
            Some(t) => t,
            None => {
                self.last_activity_at = Some(now);
                return false;
            }
        };

        if !self.enabled || self.asleep {
            return false;
        }

        if now.millis_since(last) >= u64::from(self.timeout_ms) {
            self.asleep = true;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleeps_after_timeout() {
        let mut timer = SleepTimer::new(true, 5_000);
        assert!(!timer.evaluate(Timestamp::ZERO));
        assert!(!timer.evaluate(Timestamp::from_millis(4_999)));
        assert!(timer.evaluate(Timestamp::from_millis(5_000)));
        assert!(timer.is_asleep());

        // Already asleep: no second edge
        assert!(!timer.evaluate(Timestamp::from_millis(9_000)));
    }

    #[test]
    fn test_activity_wakes_and_restarts_clock() {
        let mut timer = SleepTimer::new(true, 1_000);
        timer.evaluate(Timestamp::ZERO);
        timer.evaluate(Timestamp::from_millis(1_000));
        assert!(timer.is_asleep());

        assert!(timer.record_activity(Timestamp::from_millis(1_500)));
        assert!(!timer.is_asleep());
        assert!(!timer.evaluate(Timestamp::from_millis(2_400)));
        assert!(timer.evaluate(Timestamp::from_millis(2_500)));
    }

    #[test]
    fn test_disabled_never_sleeps() {
        let mut timer = SleepTimer::new(false, 0);
        timer.evaluate(Timestamp::ZERO);
        assert!(!timer.evaluate(Timestamp::from_secs(3_600)));
        assert!(!timer.is_asleep());
    }

    #[test]
    fn test_disable_wakes() {
        let mut timer = SleepTimer::new(true, 0);
        timer.evaluate(Timestamp::ZERO);
        timer.evaluate(Timestamp::ZERO);
        assert!(timer.is_asleep());
        timer.set_enabled(false);
        assert!(!timer.is_asleep());
    }
}
