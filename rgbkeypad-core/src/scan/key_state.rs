//! Per-key press/release/hold state machine

use crate::time::Timestamp;

/// Default time a key must stay down before a hold fires
pub const DEFAULT_HOLD_DURATION_MS: u32 = 750;

/// Result of feeding one raw reading into a [`KeyState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionKind {
    /// No edge this tick
    #[default]
    None,
    /// Key went down
    Pressed,
    /// Key went up
    Released,
    /// Key has been down for the hold duration (once per press)
    HeldFirst,
}

impl TransitionKind {
    /// Check if anything happened on this key
    pub fn is_activity(&self) -> bool {
        !matches!(self, TransitionKind::None)
    }
}

/// Debounced state of a single key
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyState {
    /// Reading accepted this tick
    raw_pressed: bool,
    /// Reading accepted on the previous tick
    previous_pressed: bool,
    /// Start of the current press
    press_started_at: Option<Timestamp>,
    /// Hold already dispatched for the current press
    hold_fired: bool,
    /// Most recent press edge
    last_press_at: Option<Timestamp>,
    /// Most recent release edge
    last_release_at: Option<Timestamp>,
}

impl KeyState {
    /// Create a key state in the released position
    pub const fn new() -> Self {
        Self {
            raw_pressed: false,
            previous_pressed: false,
            press_started_at: None,
            hold_fired: false,
            last_press_at: None,
            last_release_at: None,
        }
    }

    /// Feed one raw reading and classify the edge
    ///
    /// # Arguments
    /// - `raw`: this tick's reading, `true` = pressed
    /// - `now`: time of the reading
    /// - `hold_duration_ms`: how long a press must last before it is a hold
    pub fn update(&mut self, raw: bool, now: Timestamp, hold_duration_ms: u32) -> TransitionKind {
        self.previous_pressed = self.raw_pressed;
        self.raw_pressed = raw;

        match (self.previous_pressed, raw) {
            (false, true) => {
                self.press_started_at = Some(now);
                self.last_press_at = Some(now);
                self.hold_fired = false;
                TransitionKind::Pressed
            }
            (true, false) => {
                self.press_started_at = None;
                self.last_release_at = Some(now);
                self.hold_fired = false;
                TransitionKind::Released
            }
            (true, true) if !self.hold_fired => match self.press_started_at {
                Some(start) if now.millis_since(start) >= u64::from(hold_duration_ms) => {
                    self.hold_fired = true;
                    TransitionKind::HeldFirst
                }
                _ => TransitionKind::None,
            },
            _ => TransitionKind::None,
        }
    }

    /// Check if the key is currently down
    pub fn is_pressed(&self) -> bool {
        self.raw_pressed
    }

    /// Check if the key was down on the previous tick
    pub fn was_pressed(&self) -> bool {
        self.previous_pressed
    }

    /// Check if the hold event already fired for the current press
    pub fn is_held(&self) -> bool {
        self.hold_fired
    }

    /// Start of the current press, if the key is down
    pub fn press_started_at(&self) -> Option<Timestamp> {
        self.press_started_at
    }

    /// Time of the most recent press edge
    pub fn time_of_last_press(&self) -> Option<Timestamp> {
        self.last_press_at
    }

    /// Time of the most recent release edge
    pub fn time_of_last_release(&self) -> Option<Timestamp> {
        self.last_release_at
    }

    /// Milliseconds since the most recent press edge
    pub fn time_since_last_press(&self, now: Timestamp) -> Option<u64> {
        self.last_press_at.map(|t| now.millis_since(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD: u32 = DEFAULT_HOLD_DURATION_MS;

    fn at(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn test_press_release() {
        let mut key = KeyState::new();
        assert_eq!(key.update(false, at(0), HOLD), TransitionKind::None);
        assert_eq!(key.update(true, at(10), HOLD), TransitionKind::Pressed);
        assert!(key.is_pressed());
        assert_eq!(key.press_started_at(), Some(at(10)));

        assert_eq!(key.update(false, at(100), HOLD), TransitionKind::Released);
        assert!(!key.is_pressed());
        assert!(key.press_started_at().is_none());
        assert_eq!(key.time_of_last_release(), Some(at(100)));
    }

    #[test]
    fn test_hold_fires_once() {
        let mut key = KeyState::new();
        key.update(true, at(0), HOLD);
        assert_eq!(key.update(true, at(500), HOLD), TransitionKind::None);
        assert_eq!(key.update(true, at(750), HOLD), TransitionKind::HeldFirst);
        assert!(key.is_held());
        assert_eq!(key.update(true, at(2_000), HOLD), TransitionKind::None);
        assert_eq!(key.update(true, at(9_000), HOLD), TransitionKind::None);
    }

    #[test]
    fn test_release_clears_hold() {
        let mut key = KeyState::new();
        key.update(true, at(0), HOLD);
        key.update(true, at(800), HOLD);
        assert!(key.is_held());

        assert_eq!(key.update(false, at(1_000), HOLD), TransitionKind::Released);
        assert!(!key.is_held());

        // A second press gets its own hold
        assert_eq!(key.update(true, at(1_100), HOLD), TransitionKind::Pressed);
        assert_eq!(key.update(true, at(1_900), HOLD), TransitionKind::HeldFirst);
    }

    #[test]
    fn test_short_press_never_holds() {
        let mut key = KeyState::new();
        key.update(true, at(0), HOLD);
        assert_eq!(key.update(true, at(749), HOLD), TransitionKind::None);
        assert_eq!(key.update(false, at(749), HOLD), TransitionKind::Released);
        assert!(!key.is_held());
    }

    #[test]
    fn test_zero_hold_duration_fires_on_next_tick() {
        let mut key = KeyState::new();
        assert_eq!(key.update(true, at(0), 0), TransitionKind::Pressed);
        assert_eq!(key.update(true, at(0), 0), TransitionKind::HeldFirst);
    }

    #[test]
    fn test_time_since_last_press() {
        let mut key = KeyState::new();
        assert!(key.time_since_last_press(at(100)).is_none());
        key.update(true, at(100), HOLD);
        key.update(false, at(200), HOLD);
        assert_eq!(key.time_since_last_press(at(1_100)), Some(1_000));
        assert!(key.was_pressed());
    }
}
