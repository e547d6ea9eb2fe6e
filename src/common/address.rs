// src/common/address.rs

use super::error::InvalidArgument;
use core::convert::TryFrom;
use core::fmt;

/// A 7-bit I2C address the EZO board can be moved to.
///
/// The board only accepts addresses in `1..=127`; `0` is the general call address.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// Factory address of the EC EZO (`0x64`).
    pub const DEFAULT_ADDRESS: I2cAddress = I2cAddress(0x64);

    pub const MIN: u8 = 1;
    pub const MAX: u8 = 127;

    /// Creates a new `I2cAddress` if `value` is inside the range the device accepts.
    pub fn new(value: u8) -> Result<Self, InvalidArgument> {
        if Self::is_valid(value) {
            Ok(I2cAddress(value))
        } else {
            Err(InvalidArgument::AddressOutOfRange(value))
        }
    }

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_valid(value: u8) -> bool {
        value >= Self::MIN && value <= Self::MAX
    }
}

impl Default for I2cAddress {
    fn default() -> Self {
        Self::DEFAULT_ADDRESS
    }
}

impl TryFrom<u8> for I2cAddress {
    type Error = InvalidArgument;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<I2cAddress> for u8 {
    fn from(value: I2cAddress) -> Self {
        value.0
    }
}

impl fmt::Display for I2cAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
