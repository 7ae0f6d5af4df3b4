//! TCA9555 16-bit I2C port expander
//!
//! Two 8-bit ports with paired input/output/polarity/config registers. The
//! register pointer auto-increments within a pair, so both ports are read or
//! written in one transaction.
//!
//! All pins come out of reset as inputs; [`Tca9555::configure_inputs`]
//! forces that again in case the chip was left configured otherwise.

use embedded_hal::i2c::I2c;

/// Default address with A0-A2 tied low
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// TCA9555 register addresses
pub mod reg {
    /// Input port 0 (pins 0-7)
    pub const INPUT_PORT0: u8 = 0x00;
    /// Input port 1 (pins 8-15)
    pub const INPUT_PORT1: u8 = 0x01;
    /// Output port 0
    pub const OUTPUT_PORT0: u8 = 0x02;
    /// Polarity inversion port 0
    pub const POLARITY_PORT0: u8 = 0x04;
    /// Configuration port 0 (1 = input)
    pub const CONFIG_PORT0: u8 = 0x06;
    /// Configuration port 1 (1 = input)
    pub const CONFIG_PORT1: u8 = 0x07;
}

/// TCA9555 driver
pub struct Tca9555<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Tca9555<I2C> {
    /// Create a driver for the expander at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit bus address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Configure all 16 pins as non-inverted inputs
    pub fn configure_inputs(&mut self) -> Result<(), I2C::Error> {
        self.i2c
            .write(self.address, &[reg::POLARITY_PORT0, 0x00, 0x00])?;
        self.i2c.write(self.address, &[reg::CONFIG_PORT0, 0xFF, 0xFF])
    }

    /// Read the level of all 16 pins
    ///
    /// Bit N is pin N; port 0 is the low byte.
    pub fn read_inputs(&mut self) -> Result<u16, I2C::Error> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg::INPUT_PORT0], &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Consume the driver and return the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

    /// I2C bus that answers reads with a fixed response
    #[derive(Default)]
    pub struct MockI2c {
        pub response: [u8; 2],
        pub fail: bool,
        pub last_address: Option<u8>,
        pub writes: [[u8; 3]; 4],
        pub write_count: usize,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            self.last_address = Some(address);

            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        let slot = self.write_count % self.writes.len();
                        let mut record = [0u8; 3];
                        for (dst, src) in record.iter_mut().zip(bytes.iter()) {
                            *dst = *src;
                        }
                        self.writes[slot] = record;
                        self.write_count += 1;
                    }
                    Operation::Read(buf) => {
                        for (dst, src) in buf.iter_mut().zip(self.response.iter()) {
                            *dst = *src;
                        }
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockI2c;
    use super::*;

    #[test]
    fn test_read_inputs_little_endian() {
        let i2c = MockI2c {
            response: [0x34, 0x12],
            ..Default::default()
        };
        let mut expander = Tca9555::new(i2c, DEFAULT_ADDRESS);
        assert_eq!(expander.read_inputs().unwrap(), 0x1234);

        let i2c = expander.release();
        assert_eq!(i2c.last_address, Some(DEFAULT_ADDRESS));
        assert_eq!(i2c.writes[0][0], reg::INPUT_PORT0);
    }

    #[test]
    fn test_configure_inputs() {
        let mut expander = Tca9555::new(MockI2c::default(), 0x21);
        expander.configure_inputs().unwrap();

        let i2c = expander.release();
        assert_eq!(i2c.write_count, 2);
        assert_eq!(i2c.writes[0], [reg::POLARITY_PORT0, 0x00, 0x00]);
        assert_eq!(i2c.writes[1], [reg::CONFIG_PORT0, 0xFF, 0xFF]);
    }

    #[test]
    fn test_bus_error_propagates() {
        let i2c = MockI2c {
            fail: true,
            ..Default::default()
        };
        let mut expander = Tca9555::new(i2c, DEFAULT_ADDRESS);
        assert!(expander.read_inputs().is_err());
    }
}
