//! Demo programs
//!
//! Each demo builds a [`Keypad`] over the board transport, registers its
//! handlers and then ticks forever on a fixed period.

pub mod highlight;
pub mod hold_toggle;
pub mod rainbow;
pub mod random;
pub mod reactive;

use core::fmt::Debug;

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::{I2C0, SPI0};
use embassy_rp::{i2c, spi};
use embassy_time::{Duration, Instant, Ticker};

use rgbkeypad_core::{Keypad, KeypadConfig, KeypadError, TickReport, Timestamp};
use rgbkeypad_drivers::PicoRgbKeypad;

use crate::config::{DemoConfig, DemoMode};

/// Pico RGB Keypad on the default RP2040 pins
pub type Board = PicoRgbKeypad<
    i2c::I2c<'static, I2C0, i2c::Blocking>,
    spi::Spi<'static, SPI0, spi::Blocking>,
    Output<'static>,
>;

/// Run the configured demo
pub async fn run(demo: DemoConfig, board: Board, config: KeypadConfig) -> ! {
    info!("Starting {} demo", demo.mode);

    match demo.mode {
        DemoMode::Reactive => reactive::run(board, config, demo.tick_ms).await,
        DemoMode::HoldToggle => hold_toggle::run(board, config, demo.tick_ms).await,
        DemoMode::Highlight => highlight::run(board, config, demo.tick_ms).await,
        DemoMode::Rainbow => rainbow::run(board, config, demo.tick_ms).await,
        DemoMode::Random => random::run(board, config, demo.tick_ms).await,
    }
}

/// Create the engine
///
/// The config was validated when it was parsed.
fn build<C, E>(board: Board, config: KeypadConfig) -> Keypad<Board, C, E> {
    unwrap!(Keypad::new(board, config))
}

/// Tick the keypad every `tick_ms`
///
/// `after_tick` runs after every successful tick; LED changes it makes go
/// out with the next frame. Tick errors are logged and the loop carries on.
async fn drive<C, E: Debug>(
    keypad: &mut Keypad<Board, C, E>,
    ctx: &mut C,
    tick_ms: u32,
    mut after_tick: impl FnMut(&mut Keypad<Board, C, E>, &mut C, &TickReport),
) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(tick_ms)));

    loop {
        let now = Timestamp::from_millis(Instant::now().as_millis());

        match keypad.tick(now, ctx) {
            Ok(report) => after_tick(keypad, ctx, &report),
            Err(KeypadError::Transport(e)) => warn!("Keypad transport error: {}", e),
            Err(KeypadError::Handler { key, kind, error }) => error!(
                "{} handler for key {} failed: {}",
                kind,
                key.number(),
                Debug2Format(&error)
            ),
        }

        ticker.next().await;
    }
}
