//! Raw register transport over an addressed I2C bus
//!
//! The lowest layer of the driver: byte-level register reads and writes
//! against one device address. No retries happen here; a failed transfer is
//! the caller's problem.

use embedded_hal_async::i2c::I2c;

/// One device address on a shared bus, with register-level read/write.
pub(crate) struct RegisterTransport<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> RegisterTransport<I> {
    pub(crate) const fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    pub(crate) const fn address(&self) -> u8 {
        self.address
    }

    /// Reads `buf.len()` bytes starting at `register`, as a single
    /// write-then-read transaction.
    pub(crate) async fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), I::Error> {
        self.i2c.write_read(self.address, &[register], buf).await
    }

    /// Writes a single byte to `register`.
    pub(crate) async fn write(&mut self, register: u8, value: u8) -> Result<(), I::Error> {
        self.i2c.write(self.address, &[register, value]).await
    }

    pub(crate) fn release(self) -> I {
        self.i2c
    }
}
