//! Board-agnostic core logic for 4x4 RGB backlit keypads
//!
//! This crate contains all keypad logic that does not depend on the
//! specific button and LED chips:
//!
//! - Key identities and grid geometry
//! - Per-key press/release/hold edge detection
//! - LED color buffer with idle-sleep timer
//! - Callback registry and the tick-driven event engine
//! - Configuration types and config file parsing
//! - The transport trait implemented by hardware drivers
//!
//! # Example
//!
//! ```ignore
//! let mut keypad = Keypad::new(transport, KeypadConfig::default())?;
//! keypad.on_hold(Key::new(0).unwrap(), |key, _| {
//!     key.toggle_led();
//!     Ok(())
//! })?;
//!
//! loop {
//!     keypad.tick(now(), &mut ())?;
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod key;
pub mod led;
pub mod registry;
pub mod scan;
pub mod time;
pub mod traits;

pub use config::{ConfigError, KeypadConfig};
pub use engine::{KeyContext, Keypad, KeypadError, TickReport};
pub use key::{Key, GRID_HEIGHT, GRID_WIDTH, KEY_COUNT};
pub use led::{LedFrame, Rgb};
pub use registry::{EventKind, Handler, HandlerId, RegistryError};
pub use scan::{KeyState, TransitionKind};
pub use time::Timestamp;
pub use traits::KeypadTransport;
