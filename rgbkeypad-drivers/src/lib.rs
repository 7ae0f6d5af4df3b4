//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in rgbkeypad-core for the keypad hardware:
//!
//! - Button input (TCA9555 16-bit I2C port expander)
//! - Key LEDs (APA102 chain on SPI)
//! - [`PicoRgbKeypad`], the combined transport for the Pimoroni Pico RGB
//!   Keypad layout

#![no_std]
#![deny(unsafe_code)]

pub mod expander;
pub mod led;
pub mod pico_rgb_keypad;

pub use pico_rgb_keypad::{PicoRgbKeypad, TransportError};
