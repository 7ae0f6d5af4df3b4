//! Minimal TOML parser for keypad configuration
//!
//! Handles only the subset needed for keypad config files, without
//! allocation:
//!
//! - `[section]` headers
//! - `key = value` pairs (integer, float, boolean, string)
//! - Comments (`# ...`), including trailing comments
//!
//! Sections `[keypad]` and `[sleep]` are applied to a [`KeypadConfig`].
//! Every other section (and keys before the first header) is passed to a
//! caller-supplied hook, so boards can add their own settings to the same
//! file.
//!
//! ```toml
//! [keypad]
//! hold_time_ms = 750
//! brightness = 50
//!
//! [sleep]
//! enabled = true
//! timeout = 5        # seconds
//! ```

use super::types::{check_brightness, secs_to_ms, ConfigError, KeypadConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or cannot be parsed
    InvalidValue,
    /// Key not known in its section
    UnknownKey,
    /// Value parsed but rejected by the config
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// A parsed right-hand side
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Integer(i64),
    Float(f32),
    Bool(bool),
    Str(&'a str),
}

impl<'a> Value<'a> {
    /// Parse a raw value string
    pub fn parse(raw: &'a str) -> Result<Self, ParseError> {
        let raw = raw.trim();
        if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            return Ok(Value::Str(&raw[1..raw.len() - 1]));
        }
        match raw {
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }
        if let Some(i) = parse_integer(raw) {
            return Ok(Value::Integer(i));
        }
        if let Ok(f) = raw.parse::<f32>() {
            return Ok(Value::Float(f));
        }
        Err(ParseError::InvalidValue)
    }

    /// Value as a boolean
    pub fn as_bool(&self) -> Result<bool, ParseError> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(ParseError::InvalidValue),
        }
    }

    /// Value as a string
    pub fn as_str(&self) -> Result<&'a str, ParseError> {
        match self {
            Value::Str(s) => Ok(*s),
            _ => Err(ParseError::InvalidValue),
        }
    }

    /// Value as an unsigned integer
    pub fn as_u32(&self) -> Result<u32, ParseError> {
        match self {
            Value::Integer(i) => u32::try_from(*i).map_err(|_| ParseError::InvalidValue),
            _ => Err(ParseError::InvalidValue),
        }
    }

    /// Value in seconds (integer or float), converted to milliseconds
    pub fn as_secs_in_ms(&self) -> Result<u32, ParseError> {
        let secs = match self {
            Value::Integer(i) => *i as f32,
            Value::Float(f) => *f,
            _ => return Err(ParseError::InvalidValue),
        };
        Ok(secs_to_ms(secs)?)
    }
}

/// Parse an integer, allowing digit-group underscores (`5_000`)
fn parse_integer(raw: &str) -> Option<i64> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in raw.chars().filter(|c| *c != '_') {
        digits.push(c).ok()?;
    }
    digits.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section<'a> {
    Keypad,
    Sleep,
    Other(&'a str),
}

/// Parse a config file
///
/// # Arguments
/// - `input`: file contents
/// - `extra`: called with `(section, key, value)` for every key outside
///   `[keypad]` and `[sleep]`; keys before the first header use section `""`
pub fn parse_config<F>(input: &str, mut extra: F) -> Result<KeypadConfig, ParseError>
where
    F: FnMut(&str, &str, Value<'_>) -> Result<(), ParseError>,
{
    let mut config = KeypadConfig::default();
    let mut section = Section::Other("");

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, raw) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        let value = Value::parse(raw)?;

        match section {
            Section::Keypad => apply_keypad(&mut config, key, value)?,
            Section::Sleep => apply_sleep(&mut config, key, value)?,
            Section::Other(name) => extra(name, key, value)?,
        }
    }

    config.validate()?;
    Ok(config)
}

fn apply_keypad(config: &mut KeypadConfig, key: &str, value: Value<'_>) -> Result<(), ParseError> {
    match key {
        "hold_time_ms" => config.hold_duration_ms = value.as_u32()?,
        "hold_time" => config.hold_duration_ms = value.as_secs_in_ms()?,
        "brightness" => {
            let pct = u8::try_from(value.as_u32()?).map_err(|_| ConfigError::BrightnessOutOfRange)?;
            config.brightness_pct = check_brightness(pct)?;
        }
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_sleep(config: &mut KeypadConfig, key: &str, value: Value<'_>) -> Result<(), ParseError> {
    match key {
        "enabled" => config.sleep_enabled = value.as_bool()?,
        "timeout_ms" => config.sleep_timeout_ms = value.as_u32()?,
        "timeout" => config.sleep_timeout_ms = value.as_secs_in_ms()?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse a section header like "[keypad]"
fn parse_section_header(line: &str) -> Result<Section<'_>, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .map(str::trim)
        .ok_or(ParseError::InvalidSection)?;

    if name.is_empty() {
        return Err(ParseError::InvalidSection);
    }

    Ok(match name {
        "keypad" => Section::Keypad,
        "sleep" => Section::Sleep,
        other => Section::Other(other),
    })
}

/// Split "key = value"
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Remove a trailing comment, ignoring '#' inside quoted strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}
