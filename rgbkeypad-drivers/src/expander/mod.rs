//! I2C port expanders used for button input

pub mod tca9555;

pub use tca9555::Tca9555;
