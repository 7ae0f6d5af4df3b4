//! The shipped firmware config must parse with the on-device parser

use rgbkeypad_core::config::{parse_config, ParseError};
use rgbkeypad_core::KeypadConfig;

const FIRMWARE_CONFIG: &str = include_str!("../../rgbkeypad-firmware/keypad.toml");

#[test]
fn test_firmware_config_parses() {
    let mut demo_keys = Vec::new();

    let config = parse_config(FIRMWARE_CONFIG, |section, key, value| {
        if section != "demo" {
            return Err(ParseError::InvalidSection);
        }
        demo_keys.push((key.to_string(), format!("{:?}", value)));
        Ok(())
    })
    .unwrap();

    assert_eq!(config, KeypadConfig::default());
    assert!(demo_keys.iter().any(|(k, _)| k == "mode"));
    assert!(demo_keys.iter().any(|(k, _)| k == "tick_ms"));
}

#[test]
fn test_firmware_demo_mode_is_string() {
    let mut mode = None;

    parse_config(FIRMWARE_CONFIG, |_, key, value| {
        if key == "mode" {
            mode = Some(value.as_str()?.to_string());
        }
        Ok(())
    })
    .unwrap();

    assert_eq!(mode.as_deref(), Some("reactive"));
}
