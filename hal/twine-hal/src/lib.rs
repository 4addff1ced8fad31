//! Twine Hardware Abstraction Layer
//!
//! This crate defines the types and the bus capability trait shared by
//! every layer of the two-wire stack. Chip-specific crates implement
//! [`TwiBus`]; the transaction engine in `twine-core` is generic over it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Drivers (sensors, displays, PWM, ...)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twine-core (engine, device, register)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twine-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twine-hal-avr (TWI bus controller)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::TwiBus`] - The four atomic bus primitives plus status

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{BusConfig, BusStatus, ClockMode, Direction, TwiBus};
