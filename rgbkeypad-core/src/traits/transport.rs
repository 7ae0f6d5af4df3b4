//! Button/LED transport trait

use crate::key::KEY_COUNT;
use crate::led::LedFrame;

/// Raw access to the keypad hardware
///
/// Implementations handle the bus protocol of the specific button and LED
/// chips. Both operations are synchronous and expected to complete in
/// bounded time.
pub trait KeypadTransport {
    /// Error type for bus operations
    type Error;

    /// Read the current state of every key, indexed by key number
    ///
    /// `true` means pressed, regardless of the electrical polarity of the
    /// button inputs.
    fn read_raw_states(&mut self) -> Result<[bool; KEY_COUNT], Self::Error>;

    /// Transmit a full LED frame
    fn write_frame(&mut self, frame: &LedFrame) -> Result<(), Self::Error>;
}

impl<T: KeypadTransport + ?Sized> KeypadTransport for &mut T {
    type Error = T::Error;

    fn read_raw_states(&mut self) -> Result<[bool; KEY_COUNT], Self::Error> {
        (**self).read_raw_states()
    }

    fn write_frame(&mut self, frame: &LedFrame) -> Result<(), Self::Error> {
        (**self).write_frame(frame)
    }
}
