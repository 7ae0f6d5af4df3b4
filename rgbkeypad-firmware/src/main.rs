//! Pico RGB Keypad demo firmware
//!
//! Brings up the keypad on an RP2040 Pico and runs one of the demo
//! programs selected in keypad.toml.
//!
//! Pins (fixed by the keypad board):
//! - I2C0 SDA=GP4 SCL=GP5: TCA9555 button expander
//! - SPI0 SCK=GP18 MOSI=GP19, CS=GP17: APA102 LED chain

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::{i2c, spi};
use {defmt_rtt as _, panic_probe as _};

use rgbkeypad_drivers::PicoRgbKeypad;

mod config;
mod demos;

/// Embedded configuration (compiled into firmware)
/// Edit keypad.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../keypad.toml");

/// Button expander bus speed
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// LED chain clock
const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("rgbkeypad firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let (keypad_config, demo_config) = config::load(EMBEDDED_CONFIG);

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = i2c::I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let spi = spi::Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);

    let mut board = PicoRgbKeypad::new(i2c, spi, cs);
    match board.init() {
        Ok(()) => info!("Keypad initialized"),
        // Keep going; the tick loop reports transport errors as they happen
        Err(e) => warn!("Keypad init failed: {}", e),
    }

    demos::run(demo_config, board, keypad_config).await
}
