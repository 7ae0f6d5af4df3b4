//! Configuration loading
//!
//! The keypad settings come from `keypad.toml`, embedded at build time and
//! parsed with the core parser. The `[demo]` section is handled here.

use defmt::*;
use rgbkeypad_core::config::{parse_config, ParseError, Value};
use rgbkeypad_core::KeypadConfig;

/// Default scan period
pub const DEFAULT_TICK_MS: u32 = 10;

/// Longest accepted scan period
pub const MAX_TICK_MS: u32 = 1_000;

/// Demo program to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Format)]
pub enum DemoMode {
    /// Light each key cyan while it is down
    #[default]
    Reactive,
    /// All keys magenta, holding a key toggles its LED
    HoldToggle,
    /// Press lights yellow and logs the key's keycode, release turns off
    Highlight,
    /// Hue sweep across the grid
    Rainbow,
    /// Every press repaints the grid in random colors
    Random,
}

impl DemoMode {
    /// Look up a mode by its config name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "reactive" => Some(DemoMode::Reactive),
            "hold_toggle" => Some(DemoMode::HoldToggle),
            "highlight" => Some(DemoMode::Highlight),
            "rainbow" => Some(DemoMode::Rainbow),
            "random" => Some(DemoMode::Random),
            _ => None,
        }
    }
}

/// Settings from the `[demo]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct DemoConfig {
    pub mode: DemoMode,
    pub tick_ms: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            mode: DemoMode::default(),
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

/// Parse a full config file
pub fn parse(input: &str) -> Result<(KeypadConfig, DemoConfig), ParseError> {
    let mut demo = DemoConfig::default();

    let keypad = parse_config(input, |section, key, value| {
        apply_demo(&mut demo, section, key, value)
    })?;

    Ok((keypad, demo))
}

fn apply_demo(demo: &mut DemoConfig, section: &str, key: &str, value: Value<'_>) -> Result<(), ParseError> {
    if section != "demo" {
        return Err(ParseError::InvalidSection);
    }

    match key {
        "mode" => {
            demo.mode = DemoMode::from_name(value.as_str()?).ok_or(ParseError::InvalidValue)?;
        }
        "tick_ms" => match value.as_u32()? {
            ms @ 1..=MAX_TICK_MS => demo.tick_ms = ms,
            _ => return Err(ParseError::InvalidValue),
        },
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse the embedded config, falling back to defaults if it is broken
pub fn load(input: &str) -> (KeypadConfig, DemoConfig) {
    match parse(input) {
        Ok((keypad, demo)) => {
            info!(
                "Config: hold={}ms sleep={} ({}ms) brightness={}%",
                keypad.hold_duration_ms, keypad.sleep_enabled, keypad.sleep_timeout_ms, keypad.brightness_pct
            );
            info!("Demo: {} every {}ms", demo.mode, demo.tick_ms);
            (keypad, demo)
        }
        Err(e) => {
            // build.rs validates the file, so this only happens if the two disagree
            error!("Failed to parse embedded config: {}", e);
            error!("Using default configuration");
            (KeypadConfig::default(), DemoConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(DemoMode::from_name("hold_toggle"), Some(DemoMode::HoldToggle));
        assert_eq!(DemoMode::from_name("random"), Some(DemoMode::Random));
        assert_eq!(DemoMode::from_name("Rainbow"), None);
        assert_eq!(DemoMode::from_name(""), None);
    }

    #[test]
    fn test_parse_demo_section() {
        let (keypad, demo) = parse(
            "[keypad]\nhold_time_ms = 500\n\n[demo]\nmode = \"rainbow\"\ntick_ms = 20\n",
        )
        .unwrap();
        assert_eq!(keypad.hold_duration_ms, 500);
        assert_eq!(demo.mode, DemoMode::Rainbow);
        assert_eq!(demo.tick_ms, 20);
    }

    #[test]
    fn test_missing_demo_section_uses_defaults() {
        let (_, demo) = parse("[sleep]\nenabled = true\n").unwrap();
        assert_eq!(demo, DemoConfig::default());
    }

    #[test]
    fn test_unknown_mode() {
        assert_eq!(
            parse("[demo]\nmode = \"strobe\"\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse("[demo]\nmode = 3\n"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_tick_ms_range() {
        assert_eq!(parse("[demo]\ntick_ms = 0\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse("[demo]\ntick_ms = 1001\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse("[demo]\ntick_ms = -5\n"), Err(ParseError::InvalidValue));

        let (_, demo) = parse("[demo]\ntick_ms = 1000\n").unwrap();
        assert_eq!(demo.tick_ms, MAX_TICK_MS);
    }

    #[test]
    fn test_unknown_demo_key() {
        assert_eq!(parse("[demo]\nspeed = 2\n"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_foreign_section_rejected() {
        assert_eq!(parse("[leds]\ncount = 16\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_root_key_rejected() {
        assert_eq!(parse("mode = \"random\"\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let (keypad, demo) = load("[demo]\nmode = \"strobe\"\n");
        assert_eq!(keypad, KeypadConfig::default());
        assert_eq!(demo, DemoConfig::default());
    }
}
