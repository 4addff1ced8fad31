//! 7-bit device addresses

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Address out of the 7-bit range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressError(pub u8);

impl core::fmt::Display for AddressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "address {:#04x} is outside the 7-bit range", self.0)
    }
}

/// A 7-bit I2C device address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Address(u8);

impl Address {
    /// Highest 7-bit address
    pub const MAX: u8 = 0x7F;

    /// Create an address, rejecting values above 0x7F
    pub const fn new(raw: u8) -> Result<Self, AddressError> {
        if raw > Self::MAX {
            Err(AddressError(raw))
        } else {
            Ok(Self(raw))
        }
    }

    /// The raw 7-bit value
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Address {
    type Error = AddressError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Address> for u8 {
    fn from(address: Address) -> u8 {
        address.0
    }
}
