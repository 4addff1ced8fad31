//! AVR-specific HAL for the twine I2C stack
//!
//! This crate drives the TWI (two-wire interface) peripheral found on the
//! classic 8-bit AVR parts and implements [`twine_hal::TwiBus`] on top of
//! it. Supported chips share the same register block:
//!
//! - ATmega328P (Arduino Uno / Nano)
//! - ATmega32U4 (Pro Micro / Leonardo)
//! - ATmega2560 (Arduino Mega)
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting and bus logging
//!
//! # Usage
//!
//! [`HardwareTwi`] is generic over a [`TwiRegisters`] register file. On
//! target use [`mmio::MmioRegisters`]; on the host any simulated register
//! file works the same way.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod i2c;
pub mod mmio;
pub mod registers;
pub mod status;

pub use i2c::{HardwareTwi, TwiError};
pub use registers::{Reg, TwiRegisters};

// Re-export shared types from twine-hal
pub use twine_hal::{BusConfig, BusStatus, ClockMode, TwiBus};
