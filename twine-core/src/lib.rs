//! Board-agnostic I2C master logic
//!
//! This crate contains everything above the bus primitives:
//!
//! - Transaction engine (START / address / data / STOP sequencing)
//! - Device handles bound to a 7-bit address
//! - Register accessor with endianness and bit-field helpers
//! - Bus scanning
//! - Shared bus wrapper for interrupt-safe access
//! - `embedded-hal` I2C implementation for third-party drivers
//!
//! Data flows in one direction:
//!
//! ```text
//! Register -> Device -> Transaction -> TwiBus -> wire
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod device;
pub mod embedded;
pub mod error;
pub mod register;
pub mod scan;
pub mod shared;
pub mod transaction;

#[cfg(test)]
mod testing;

pub use address::{Address, AddressError};
pub use device::Device;
pub use error::Error;
pub use register::{
    Endian, I16Register, I32Register, I64Register, I8Register, ReadMode, Register, RegisterValue,
    U16Register, U32Register, U64Register, U8Register,
};
pub use scan::{scan, scan_range};
pub use shared::SharedBus;
pub use transaction::{Phase, Transaction};

// Re-export the bus abstraction so drivers only need this crate
pub use twine_hal::{BusConfig, BusStatus, ClockMode, Direction, TwiBus};
