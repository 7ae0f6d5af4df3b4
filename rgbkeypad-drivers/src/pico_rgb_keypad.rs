//! Pimoroni Pico RGB Keypad transport
//!
//! - 16 buttons on a TCA9555 at 0x20, button N on expander pin N, active-low
//! - 16 APA102 LEDs on SPI, LED N under button N, chip select framed
//!
//! Default RP2040 wiring: I2C0 SDA=GP4 SCL=GP5, SPI0 SCK=GP18 MOSI=GP19,
//! CS=GP17.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{self, Error as _, I2c};
use embedded_hal::spi::{self, Error as _, SpiBus};

use rgbkeypad_core::{KeypadTransport, LedFrame, KEY_COUNT};

use crate::expander::tca9555::{self, Tca9555};
use crate::led::apa102::{Apa102, Apa102Error};

/// Transport error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Button expander read/write failed
    I2c(i2c::ErrorKind),
    /// LED transfer failed
    Spi(spi::ErrorKind),
    /// LED chip-select pin could not be driven
    ChipSelect,
}

impl<S: spi::Error, P> From<Apa102Error<S, P>> for TransportError {
    fn from(e: Apa102Error<S, P>) -> Self {
        match e {
            Apa102Error::Spi(e) => TransportError::Spi(e.kind()),
            Apa102Error::ChipSelect(_) => TransportError::ChipSelect,
        }
    }
}

/// Convert the expander input word to pressed states
///
/// Buttons pull their pin low when pressed.
pub fn decode_buttons(inputs: u16) -> [bool; KEY_COUNT] {
    let mut states = [false; KEY_COUNT];
    for (bit, state) in states.iter_mut().enumerate() {
        *state = inputs & (1 << bit) == 0;
    }
    states
}

/// Combined button/LED transport for the Pico RGB Keypad
pub struct PicoRgbKeypad<I2C, SPI, CS> {
    buttons: Tca9555<I2C>,
    leds: Apa102<SPI, CS>,
}

impl<I2C, SPI, CS> PicoRgbKeypad<I2C, SPI, CS>
where
    I2C: I2c,
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a transport with the expander at its default address
    pub fn new(i2c: I2C, spi: SPI, cs: CS) -> Self {
        Self::with_address(i2c, spi, cs, tca9555::DEFAULT_ADDRESS)
    }

    /// Create a transport with the expander at a custom address
    pub fn with_address(i2c: I2C, spi: SPI, cs: CS, address: u8) -> Self {
        Self {
            buttons: Tca9555::new(i2c, address),
            leds: Apa102::new(spi, cs),
        }
    }

    /// Put the hardware in a known state
    ///
    /// Configures every expander pin as an input and blanks the LEDs.
    pub fn init(&mut self) -> Result<(), TransportError> {
        self.buttons
            .configure_inputs()
            .map_err(|e| TransportError::I2c(e.kind()))?;
        self.leds.write(&LedFrame::blank(0))?;
        Ok(())
    }

    /// Consume the transport and return the buses and pin
    pub fn release(self) -> (I2C, SPI, CS) {
        let i2c = self.buttons.release();
        let (spi, cs) = self.leds.release();
        (i2c, spi, cs)
    }
}

impl<I2C, SPI, CS> KeypadTransport for PicoRgbKeypad<I2C, SPI, CS>
where
    I2C: I2c,
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = TransportError;

    fn read_raw_states(&mut self) -> Result<[bool; KEY_COUNT], Self::Error> {
        let inputs = self
            .buttons
            .read_inputs()
            .map_err(|e| TransportError::I2c(e.kind()))?;
        Ok(decode_buttons(inputs))
    }

    fn write_frame(&mut self, frame: &LedFrame) -> Result<(), Self::Error> {
        self.leds.write(frame)?;
        Ok(())
    }
}
