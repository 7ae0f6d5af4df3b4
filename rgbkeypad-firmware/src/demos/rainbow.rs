//! Rainbow hue sweep across the grid

use core::convert::Infallible;

use rgbkeypad_core::led::hsv_to_rgb;
use rgbkeypad_core::{Key, KeypadConfig};

use super::{build, drive, Board};

/// Ticks per hue step across one key
const STEPS_PER_KEY: u32 = 20;

/// Diagonals the hue wheel is spread over
const HUE_SPAN: u32 = 8;

/// Hue for a key at a given animation step (wrapped by `hsv_to_rgb`)
fn hue(key: Key, step: u32) -> f32 {
    let phase = f32::from(key.x() + key.y()) + step as f32 / STEPS_PER_KEY as f32;
    phase / HUE_SPAN as f32
}

pub async fn run(board: Board, config: KeypadConfig, tick_ms: u32) -> ! {
    let mut keypad = build::<u32, Infallible>(board, config);
    let mut step = 0u32;

    drive(&mut keypad, &mut step, tick_ms, |keypad, step, _| {
        *step = (*step + 1) % (STEPS_PER_KEY * HUE_SPAN);
        for key in Key::all() {
            keypad.led(key).set_rgb(hsv_to_rgb(hue(key, *step), 1.0, 1.0));
        }
    })
    .await
}
