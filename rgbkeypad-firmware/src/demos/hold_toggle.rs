//! Hold a key to toggle its LED
//!
//! Every key starts magenta. LED sleep is forced on, so the grid blanks
//! after the idle timeout and comes back on the next key activity.

use core::convert::Infallible;

use defmt::*;
use rgbkeypad_core::{Key, KeyContext, KeypadConfig};

use super::{build, drive, Board};

fn toggle(key: &mut KeyContext<'_>, _: &mut ()) -> Result<(), Infallible> {
    key.toggle_led();
    Ok(())
}

pub async fn run(board: Board, config: KeypadConfig, tick_ms: u32) -> ! {
    let mut keypad = build::<(), Infallible>(board, config.with_sleep_enabled(true));
    info!("LED sleep after {}ms idle", config.sleep_timeout_ms);

    keypad.set_all(255, 0, 255);
    for key in Key::all() {
        unwrap!(keypad.on_hold(key, toggle));
    }

    drive(&mut keypad, &mut (), tick_ms, |_, _, _| {}).await
}
