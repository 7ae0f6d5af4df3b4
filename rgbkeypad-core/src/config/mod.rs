//! Configuration
//!
//! Keypad behavior is described by [`KeypadConfig`]. Boards usually embed
//! a small TOML file and turn it into a config with [`parse_config`].

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError, Value};
pub use types::{ConfigError, KeypadConfig, DEFAULT_BRIGHTNESS_PCT};
