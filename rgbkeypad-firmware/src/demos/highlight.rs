//! Light a key yellow while pressed and log the keycode mapped to it

use core::convert::Infallible;

use defmt::*;
use rgbkeypad_core::{Key, KeyContext, KeypadConfig};

use super::{build, drive, Board};

/// HID usage IDs for keys 0-F, in key order
const KEYMAP: [u8; 16] = [
    0x27, // 0
    0x1E, // 1
    0x1F, // 2
    0x20, // 3
    0x21, // 4
    0x22, // 5
    0x23, // 6
    0x24, // 7
    0x25, // 8
    0x26, // 9
    0x04, // A
    0x05, // B
    0x06, // C
    0x07, // D
    0x08, // E
    0x09, // F
];

#[derive(Default)]
struct Stats {
    presses: u32,
}

fn press(key: &mut KeyContext<'_>, stats: &mut Stats) -> Result<(), Infallible> {
    stats.presses += 1;
    let keycode = KEYMAP[key.key().index()];
    info!("Key {} -> keycode {=u8:#x} ({} presses)", key.number(), keycode, stats.presses);
    key.set_led(255, 255, 0);
    Ok(())
}

fn release(key: &mut KeyContext<'_>, _: &mut Stats) -> Result<(), Infallible> {
    key.led_off();
    Ok(())
}

pub async fn run(board: Board, config: KeypadConfig, tick_ms: u32) -> ! {
    let mut keypad = build::<Stats, Infallible>(board, config);
    for key in Key::all() {
        unwrap!(keypad.on_press(key, press));
        unwrap!(keypad.on_release(key, release));
    }

    let mut stats = Stats::default();
    drive(&mut keypad, &mut stats, tick_ms, |_, _, _| {}).await
}
