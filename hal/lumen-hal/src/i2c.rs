//! I2C bus abstractions
//!
//! Provides the register-addressed write surface used by the display
//! engine, plus an adapter for any `embedded-hal` blocking I2C master.

use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};

/// Register-addressed block sink
///
/// The first byte of every transfer selects a register (or, for
/// SSD1306-class controllers, the control byte choosing command or data
/// stream). The payload follows in the same transfer.
pub trait RegisterBus {
    /// Error type for bus operations
    type Error;

    /// Write `data` starting at `register` in a single transfer
    fn write_block(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn write_block(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_block(register, data)
    }
}

/// A device at a fixed 7-bit address on an `embedded-hal` I2C bus
///
/// Each block is issued as one transaction holding two contiguous write
/// operations, so the register byte and the payload go out without a
/// repeated start and without copying the payload.
#[derive(Debug)]
pub struct I2cRegisterBus<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
}

impl<I2C: I2c> I2cRegisterBus<I2C> {
    /// Wrap an I2C master for the device at `address`
    pub fn new(i2c: I2C, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Device address
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Give back the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterBus for I2cRegisterBus<I2C> {
    type Error = I2C::Error;

    fn write_block(&mut self, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        let register = [register];
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&register), Operation::Write(data)],
        )
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), what SSD1306 panels are driven at
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}
