//! Per-key LED color buffer

use super::color::Rgb;
use super::sleep::SleepTimer;
use crate::key::{Key, KEY_COUNT};

/// Full 16-key LED payload handed to the transport in one flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedFrame {
    /// Color per key, indexed by key number
    pub colors: [Rgb; KEY_COUNT],
    /// Global brightness (0-100%)
    pub brightness_pct: u8,
}

impl LedFrame {
    /// Frame with every LED off
    pub const fn blank(brightness_pct: u8) -> Self {
        Self {
            colors: [Rgb::BLACK; KEY_COUNT],
            brightness_pct,
        }
    }

    /// Check if every LED in the frame is off
    pub fn is_blank(&self) -> bool {
        self.colors.iter().all(Rgb::is_black)
    }

    /// Color for one key
    pub fn color(&self, key: Key) -> Rgb {
        self.colors[key.index()]
    }
}

/// Stored state of one LED
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct LedCell {
    /// Color currently shown (when awake)
    color: Rgb,
    /// Last lit color, restored by toggle/led_on
    remembered: Option<Rgb>,
}

/// Mutable handle on a single key's LED
///
/// This is the only way to change a color, so a holder of a slot for key N
/// cannot touch any other key's LED.
pub struct LedSlot<'a> {
    cell: &'a mut LedCell,
}

impl LedSlot<'_> {
    /// Overwrite the stored color
    pub fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.set_rgb(Rgb::new(r, g, b));
    }

    /// Overwrite the stored color
    pub fn set_rgb(&mut self, color: Rgb) {
        self.cell.color = color;
    }

    /// Turn the LED off (same as `set_led(0, 0, 0)`)
    pub fn led_off(&mut self) {
        self.cell.color = Rgb::BLACK;
    }

    /// Restore the remembered color if the LED is off
    pub fn led_on(&mut self) {
        if self.cell.color.is_black() {
            if let Some(color) = self.cell.remembered {
                self.cell.color = color;
            }
        }
    }

    /// Switch between the current color and black
    ///
    /// Turning off remembers the color so the next toggle restores it. A
    /// black LED with nothing remembered stays black.
    pub fn toggle_led(&mut self) {
        if self.cell.color.is_black() {
            self.led_on();
        } else {
            self.cell.remembered = Some(self.cell.color);
            self.cell.color = Rgb::BLACK;
        }
    }

    /// Current stored color
    pub fn rgb(&self) -> Rgb {
        self.cell.color
    }

    /// Check if the stored color is not black
    pub fn is_lit(&self) -> bool {
        !self.cell.color.is_black()
    }
}

/// Color buffer for all keys plus brightness and sleep state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedBuffer {
    cells: [LedCell; KEY_COUNT],
    brightness_pct: u8,
    sleep: SleepTimer,
}

impl LedBuffer {
    /// Create a buffer with every LED off
    pub fn new(brightness_pct: u8, sleep: SleepTimer) -> Self {
        Self {
            cells: [LedCell::default(); KEY_COUNT],
            brightness_pct,
            sleep,
        }
    }

    /// Mutable handle on one key's LED
    pub fn slot(&mut self, key: Key) -> LedSlot<'_> {
        LedSlot {
            cell: &mut self.cells[key.index()],
        }
    }

    /// Stored color for one key
    pub fn color(&self, key: Key) -> Rgb {
        self.cells[key.index()].color
    }

    /// Set every key to the same color
    pub fn set_all(&mut self, color: Rgb) {
        for cell in &mut self.cells {
            cell.color = color;
        }
    }

    /// Global brightness (0-100%)
    pub fn brightness_pct(&self) -> u8 {
        self.brightness_pct
    }

    /// Set global brightness, saturating at 100%
    pub fn set_brightness_pct(&mut self, pct: u8) {
        self.brightness_pct = pct.min(100);
    }

    /// Idle-sleep timer
    pub fn sleep(&self) -> &SleepTimer {
        &self.sleep
    }

    /// Idle-sleep timer
    pub fn sleep_mut(&mut self) -> &mut SleepTimer {
        &mut self.sleep
    }

    /// Frame to transmit on this flush
    ///
    /// While asleep the frame is blank; the buffered colors are left
    /// untouched so they come back on wake.
    pub fn frame(&self) -> LedFrame {
        if self.sleep.is_asleep() {
            return LedFrame::blank(self.brightness_pct);
        }

        let mut frame = LedFrame::blank(self.brightness_pct);
        for (out, cell) in frame.colors.iter_mut().zip(self.cells.iter()) {
            *out = cell.color;
        }
        frame
    }
}
