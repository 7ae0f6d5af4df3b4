//! LED chain drivers

pub mod apa102;

pub use apa102::Apa102;
