//! Random colors on every key press
//!
//! Handlers only own their key's LED, so the press handler just flags a
//! recolor and the whole grid is repainted after the tick.

use core::convert::Infallible;

use defmt::*;
use embassy_rp::clocks::RoscRng;
use rand_core::RngCore;

use rgbkeypad_core::led::hsv_to_rgb;
use rgbkeypad_core::{Key, KeyContext, Keypad, KeypadConfig, Rgb};

use super::{build, drive, Board};

struct Shuffle {
    rng: RoscRng,
    pending: bool,
}

/// Fully saturated color with its hue taken from the top 24 bits
fn random_color(word: u32) -> Rgb {
    let hue = (word >> 8) as f32 / (1u32 << 24) as f32;
    hsv_to_rgb(hue, 1.0, 1.0)
}

fn recolor(keypad: &mut Keypad<Board, Shuffle, Infallible>, rng: &mut RoscRng) {
    for key in Key::all() {
        keypad.led(key).set_rgb(random_color(rng.next_u32()));
    }
}

fn press(key: &mut KeyContext<'_>, shuffle: &mut Shuffle) -> Result<(), Infallible> {
    debug!("Pressed {}", key.number());
    shuffle.pending = true;
    Ok(())
}

pub async fn run(board: Board, config: KeypadConfig, tick_ms: u32) -> ! {
    let mut keypad = build::<Shuffle, Infallible>(board, config);
    for key in Key::all() {
        unwrap!(keypad.on_press(key, press));
    }

    let mut shuffle = Shuffle {
        rng: RoscRng,
        pending: false,
    };
    recolor(&mut keypad, &mut shuffle.rng);

    drive(&mut keypad, &mut shuffle, tick_ms, |keypad, shuffle, _| {
        if shuffle.pending {
            shuffle.pending = false;
            recolor(keypad, &mut shuffle.rng);
        }
    })
    .await
}
