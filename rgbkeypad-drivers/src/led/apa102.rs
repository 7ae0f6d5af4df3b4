//! APA102 LED chain driver
//!
//! # Wire format
//!
//! ```text
//! start frame   4 × 0x00
//! per LED       0b111b_bbbb  blue  green  red    (5-bit global brightness)
//! end frame     4 × 0xFF
//! ```
//!
//! The chain is clocked in key order, so LED N sits under key N. The
//! chip-select line frames the transfer; the keypad board routes it to the
//! LED level shifter.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use rgbkeypad_core::{LedFrame, KEY_COUNT};

/// Bytes of zeros before the first LED
pub const START_FRAME_LEN: usize = 4;

/// Bytes of ones after the last LED (at least one clock per two LEDs)
pub const END_FRAME_LEN: usize = 4;

/// Bytes per LED
pub const LED_FRAME_LEN: usize = 4;

/// Total bytes in one transfer
pub const FRAME_LEN: usize = START_FRAME_LEN + KEY_COUNT * LED_FRAME_LEN + END_FRAME_LEN;

/// Top three bits of every LED frame
const LED_FRAME_MARKER: u8 = 0b1110_0000;

/// Maximum 5-bit global brightness
const MAX_GLOBAL_BRIGHTNESS: u8 = 31;

/// Errors from an APA102 transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Apa102Error<S, P> {
    /// SPI write failed
    Spi(S),
    /// Chip-select pin could not be driven
    ChipSelect(P),
}

/// Map 0-100% to the 5-bit APA102 global brightness
pub fn global_brightness(pct: u8) -> u8 {
    let pct = u16::from(pct.min(100));
    (pct * u16::from(MAX_GLOBAL_BRIGHTNESS) / 100) as u8
}

/// Encode a frame into its SPI byte stream
pub fn encode_frame(frame: &LedFrame, buf: &mut [u8; FRAME_LEN]) {
    let brightness = LED_FRAME_MARKER | global_brightness(frame.brightness_pct);

    buf[..START_FRAME_LEN].fill(0x00);

    let leds = &mut buf[START_FRAME_LEN..START_FRAME_LEN + KEY_COUNT * LED_FRAME_LEN];
    for (chunk, color) in leds.chunks_exact_mut(LED_FRAME_LEN).zip(frame.colors.iter()) {
        chunk[0] = brightness;
        chunk[1] = color.b;
        chunk[2] = color.g;
        chunk[3] = color.r;
    }

    buf[FRAME_LEN - END_FRAME_LEN..].fill(0xFF);
}

/// APA102 chain on an SPI bus with a chip-select line
pub struct Apa102<SPI, CS> {
    spi: SPI,
    cs: CS,
    buf: [u8; FRAME_LEN],
}

impl<SPI: SpiBus, CS: OutputPin> Apa102<SPI, CS> {
    /// Create a driver
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            spi,
            cs,
            buf: [0; FRAME_LEN],
        }
    }

    /// Transmit a frame
    ///
    /// Chip select is released even if the SPI write fails. An SPI error
    /// takes precedence over a failure to release chip select.
    pub fn write(&mut self, frame: &LedFrame) -> Result<(), Apa102Error<SPI::Error, CS::Error>> {
        encode_frame(frame, &mut self.buf);

        self.cs.set_low().map_err(Apa102Error::ChipSelect)?;
        let written = self
            .spi
            .write(&self.buf)
            .and_then(|()| self.spi.flush())
            .map_err(Apa102Error::Spi);
        let released = self.cs.set_high().map_err(Apa102Error::ChipSelect);

        written.and(released)
    }

    /// Consume the driver and return the bus and pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{MockPin, MockSpi};
    use super::*;
    use rgbkeypad_core::{Key, Rgb};

    #[test]
    fn test_global_brightness() {
        assert_eq!(global_brightness(0), 0);
        assert_eq!(global_brightness(50), 15);
        assert_eq!(global_brightness(100), 31);
        assert_eq!(global_brightness(255), 31);
    }

    #[test]
    fn test_encode_frame_layout() {
        let mut frame = LedFrame::blank(100);
        frame.colors[Key::new(0).unwrap().index()] = Rgb::new(1, 2, 3);
        frame.colors[15] = Rgb::new(255, 0, 128);

        let mut buf = [0u8; FRAME_LEN];
        encode_frame(&frame, &mut buf);

        assert_eq!(&buf[..4], &[0, 0, 0, 0]);
        assert_eq!(&buf[4..8], &[0xFF, 3, 2, 1]);
        assert_eq!(&buf[8..12], &[0xFF, 0, 0, 0]);
        assert_eq!(&buf[64..68], &[0xFF, 128, 0, 255]);
        assert_eq!(&buf[68..], &[0xFF; 4]);
    }

    #[test]
    fn test_blank_frame_keeps_brightness_marker() {
        let mut buf = [0u8; FRAME_LEN];
        encode_frame(&LedFrame::blank(0), &mut buf);
        for chunk in buf[4..68].chunks_exact(4) {
            assert_eq!(chunk, &[LED_FRAME_MARKER, 0, 0, 0]);
        }
    }

    #[test]
    fn test_write_frames_chip_select() {
        let mut leds = Apa102::new(MockSpi::default(), MockPin::default());
        leds.write(&LedFrame::blank(50)).unwrap();

        let (spi, cs) = leds.release();
        assert_eq!(spi.writes, 1);
        assert_eq!(spi.len, FRAME_LEN);
        assert_eq!(cs.lows, 1);
        assert!(cs.high);
    }

    #[test]
    fn test_spi_error_releases_chip_select() {
        let spi = MockSpi {
            fail: true,
            ..Default::default()
        };
        let mut leds = Apa102::new(spi, MockPin::default());
        assert_eq!(
            leds.write(&LedFrame::blank(50)),
            Err(Apa102Error::Spi(embedded_hal::spi::ErrorKind::Overrun))
        );

        let (_, cs) = leds.release();
        assert!(cs.high);
    }

    #[test]
    fn test_spi_error_wins_over_chip_select_error() {
        let spi = MockSpi {
            fail: true,
            ..Default::default()
        };
        let cs = MockPin {
            fail_high: true,
            ..Default::default()
        };
        let mut leds = Apa102::new(spi, cs);
        assert_eq!(
            leds.write(&LedFrame::blank(50)),
            Err(Apa102Error::Spi(embedded_hal::spi::ErrorKind::Overrun))
        );
    }

    #[test]
    fn test_chip_select_release_error_reported() {
        let cs = MockPin {
            fail_high: true,
            ..Default::default()
        };
        let mut leds = Apa102::new(MockSpi::default(), cs);
        assert_eq!(
            leds.write(&LedFrame::blank(50)),
            Err(Apa102Error::ChipSelect(embedded_hal::digital::ErrorKind::Other))
        );

        let (spi, _) = leds.release();
        assert_eq!(spi.writes, 1);
    }
}
