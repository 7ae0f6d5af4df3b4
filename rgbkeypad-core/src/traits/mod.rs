//! Hardware abstraction traits
//!
//! These traits define the interface between the keypad engine and the
//! chip-specific drivers.

pub mod transport;

pub use transport::KeypadTransport;
