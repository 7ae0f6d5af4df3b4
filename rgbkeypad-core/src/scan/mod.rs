//! Key scanning and edge detection
//!
//! Each key keeps a small state machine fed with one raw reading per tick.
//! The button controller debounces in hardware, so the scanner only
//! classifies edges and hold timeouts.

pub mod key_state;

pub use key_state::{KeyState, TransitionKind, DEFAULT_HOLD_DURATION_MS};
