//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::led::DEFAULT_SLEEP_TIMEOUT_MS;
use crate::scan::DEFAULT_HOLD_DURATION_MS;

/// Default LED brightness (%)
pub const DEFAULT_BRIGHTNESS_PCT: u8 = 50;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Duration is negative
    NegativeDuration,
    /// Duration is NaN or infinite
    NonFiniteDuration,
    /// Duration does not fit in milliseconds
    DurationTooLong,
    /// Brightness above 100%
    BrightnessOutOfRange,
}

/// Keypad configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeypadConfig {
    /// Time a key must stay down before a hold fires (ms)
    pub hold_duration_ms: u32,
    /// Blank the LEDs after a period without key activity
    pub sleep_enabled: bool,
    /// Idle time before the LEDs blank (ms), only used if sleep is enabled
    pub sleep_timeout_ms: u32,
    /// Global LED brightness (0-100%)
    pub brightness_pct: u8,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            hold_duration_ms: DEFAULT_HOLD_DURATION_MS,
            sleep_enabled: false,
            sleep_timeout_ms: DEFAULT_SLEEP_TIMEOUT_MS,
            brightness_pct: DEFAULT_BRIGHTNESS_PCT,
        }
    }
}

impl KeypadConfig {
    /// Set the hold duration in milliseconds
    pub fn with_hold_duration_ms(mut self, ms: u32) -> Self {
        self.hold_duration_ms = ms;
        self
    }

    /// Set the hold duration in seconds
    pub fn with_hold_duration_s(mut self, secs: f32) -> Result<Self, ConfigError> {
        self.hold_duration_ms = secs_to_ms(secs)?;
        Ok(self)
    }

    /// Enable LED sleep with a timeout in milliseconds
    pub fn with_sleep_ms(mut self, timeout_ms: u32) -> Self {
        self.sleep_enabled = true;
        self.sleep_timeout_ms = timeout_ms;
        self
    }

    /// Set the sleep timeout in seconds
    ///
    /// Does not change whether sleep is enabled.
    pub fn with_sleep_timeout_s(mut self, secs: f32) -> Result<Self, ConfigError> {
        self.sleep_timeout_ms = secs_to_ms(secs)?;
        Ok(self)
    }

    /// Enable or disable LED sleep
    pub fn with_sleep_enabled(mut self, enabled: bool) -> Self {
        self.sleep_enabled = enabled;
        self
    }

    /// Set the global LED brightness (0-100%)
    pub fn with_brightness_pct(mut self, pct: u8) -> Result<Self, ConfigError> {
        self.brightness_pct = check_brightness(pct)?;
        Ok(self)
    }

    /// Check all values are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_brightness(self.brightness_pct)?;
        Ok(())
    }
}

/// Convert a duration in seconds to whole milliseconds
pub(crate) fn secs_to_ms(secs: f32) -> Result<u32, ConfigError> {
    if !secs.is_finite() {
        return Err(ConfigError::NonFiniteDuration);
    }
    if secs < 0.0 {
        return Err(ConfigError::NegativeDuration);
    }

    let ms = secs * 1000.0;
    if ms > u32::MAX as f32 {
        return Err(ConfigError::DurationTooLong);
    }
    Ok(ms as u32)
}

pub(crate) fn check_brightness(pct: u8) -> Result<u8, ConfigError> {
    if pct > 100 {
        Err(ConfigError::BrightnessOutOfRange)
    } else {
        Ok(pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KeypadConfig::default();
        assert_eq!(config.hold_duration_ms, 750);
        assert!(!config.sleep_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seconds_setters() {
        let config = KeypadConfig::default()
            .with_hold_duration_s(0.75)
            .unwrap()
            .with_sleep_timeout_s(5.0)
            .unwrap()
            .with_sleep_enabled(true);
        assert_eq!(config.hold_duration_ms, 750);
        assert_eq!(config.sleep_timeout_ms, 5_000);
        assert!(config.sleep_enabled);
    }

    #[test]
    fn test_rejects_bad_durations() {
        assert_eq!(
            KeypadConfig::default().with_hold_duration_s(-0.1),
            Err(ConfigError::NegativeDuration)
        );
        assert_eq!(
            KeypadConfig::default().with_sleep_timeout_s(f32::NAN),
            Err(ConfigError::NonFiniteDuration)
        );
        assert_eq!(
            KeypadConfig::default().with_sleep_timeout_s(1.0e10),
            Err(ConfigError::DurationTooLong)
        );
    }

    #[test]
    fn test_rejects_bad_brightness() {
        assert_eq!(
            KeypadConfig::default().with_brightness_pct(101),
            Err(ConfigError::BrightnessOutOfRange)
        );

        let mut config = KeypadConfig::default();
        config.brightness_pct = 200;
        assert_eq!(config.validate(), Err(ConfigError::BrightnessOutOfRange));
    }
}
