//! Light keys while pressed
//!
//! Polls key states after each tick instead of registering handlers.

use rgbkeypad_core::{Key, KeypadConfig, Rgb};

use super::{build, drive, Board};

const COLOR: Rgb = Rgb::CYAN;

pub async fn run(board: Board, config: KeypadConfig, tick_ms: u32) -> ! {
    let mut keypad = build::<(), core::convert::Infallible>(board, config);

    drive(&mut keypad, &mut (), tick_ms, |keypad, _, _| {
        for key in Key::all() {
            let color = if keypad.is_pressed(key) { COLOR } else { Rgb::BLACK };
            keypad.led(key).set_rgb(color);
        }
    })
    .await
}
