//! LED output side of the keypad
//!
//! Colors are buffered per key and only leave the buffer when the engine
//! flushes a [`LedFrame`] to the transport at the end of a tick.

pub mod buffer;
pub mod color;
pub mod sleep;

pub use buffer::{LedBuffer, LedFrame, LedSlot};
pub use color::{hsv_to_rgb, Rgb};
pub use sleep::{SleepTimer, DEFAULT_SLEEP_TIMEOUT_MS};
