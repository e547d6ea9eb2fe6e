// src/common/hal_traits.rs

use super::{address::I2cAddress, error::EzoError};
use core::fmt::Debug;
use embedded_hal::i2c::I2c;

/// Duplex byte channel to one addressed EZO board.
///
/// Both calls may block. The driver never interleaves two commands, so an
/// implementation does not need to be reentrant.
pub trait EzoTransport {
    /// Associated error type for bus errors.
    type Error: Debug;

    /// Transmits `bytes` as one command.
    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Reads up to `buffer.len()` bytes of response and returns how many were filled.
    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: EzoTransport + ?Sized> EzoTransport for &mut T {
    type Error = T::Error;

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        T::send(self, bytes)
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        T::receive(self, buffer)
    }
}

/// `EzoTransport` over any `embedded-hal` I2C bus.
///
/// Each `send` is a single write transaction and each `receive` a single read
/// transaction of exactly the requested length; the board pads short answers with nulls.
#[derive(Debug)]
pub struct I2cTransport<I2C> {
    bus: I2C,
    address: I2cAddress,
}

impl<I2C: I2c> I2cTransport<I2C> {
    /// Wraps `bus` without touching it.
    pub fn new(bus: I2C, address: I2cAddress) -> Self {
        I2cTransport { bus, address }
    }

    /// Wraps `bus` and claims `address` with a one-byte probe read.
    ///
    /// An idle board answers the probe (with `0xFF`); a NACK or any other bus error
    /// means nothing is listening and the session cannot start.
    pub fn open(mut bus: I2C, address: I2cAddress) -> Result<Self, EzoError<I2C::Error>> {
        let mut probe = [0u8; 1];
        if bus.read(address.as_u8(), &mut probe).is_err() {
            ezo_debug!("no EZO board answered at address {}", address.as_u8());
            return Err(EzoError::TransportUnavailable);
        }
        Ok(I2cTransport { bus, address })
    }

    pub fn address(&self) -> I2cAddress {
        self.address
    }

    /// Points the adapter at a new address, e.g. after the board was moved with `I2C,<n>`.
    pub fn set_address(&mut self, address: I2cAddress) {
        self.address = address;
    }

    /// Releases the underlying bus.
    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C: I2c> EzoTransport for I2cTransport<I2C> {
    type Error = I2C::Error;

    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(self.address.as_u8(), bytes)
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        self.bus.read(self.address.as_u8(), buffer)?;
        Ok(buffer.len())
    }
}
