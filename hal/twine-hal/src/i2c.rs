//! I2C bus abstractions
//!
//! Provides the bus capability trait that chip-specific HALs implement,
//! together with the clock, direction and status types that flow through
//! every layer above it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// I2C bus master primitives
///
/// The four atomic operations of a two-wire master plus a view of the
/// controller's status after the last one. Implementations block until the
/// hardware reports the action complete.
///
/// Nothing here sequences a transaction; that is the job of the
/// transaction engine built on top of this trait.
pub trait TwiBus {
    /// Error type for bus primitives
    ///
    /// Platforms whose primitives cannot fail use [`core::convert::Infallible`].
    type Error;

    /// Issue a START (or repeated START) condition
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Issue a STOP condition and wait for the bus to go idle
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Transmit one byte
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Receive one byte
    ///
    /// # Arguments
    /// * `ack` - Answer the byte with ACK (more data wanted) or NACK (last byte)
    fn read_byte(&mut self, ack: bool) -> Result<u8, Self::Error>;

    /// Status of the last bus operation
    fn status(&mut self) -> BusStatus;
}

impl<B: TwiBus + ?Sized> TwiBus for &mut B {
    type Error = B::Error;

    fn start(&mut self) -> Result<(), Self::Error> {
        (**self).start()
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        (**self).stop()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_byte(byte)
    }

    fn read_byte(&mut self, ack: bool) -> Result<u8, Self::Error> {
        (**self).read_byte(ack)
    }

    fn status(&mut self) -> BusStatus {
        (**self).status()
    }
}

/// Bus clock selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockMode {
    /// Standard mode (100 kHz)
    #[default]
    Normal,
    /// Fast mode (400 kHz)
    Fast,
}

impl ClockMode {
    /// SCL frequency in Hz
    pub const fn frequency(self) -> u32 {
        match self {
            ClockMode::Normal => 100_000,
            ClockMode::Fast => 400_000,
        }
    }
}

/// Direction bit sent with the address (SLA+R/W)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master transmits
    Write = 0,
    /// Master receives
    Read = 1,
}

impl Direction {
    /// Build the address-phase byte for a 7-bit address
    pub const fn address_byte(self, address: u8) -> u8 {
        ((address & 0x7F) << 1) | self as u8
    }
}

/// Status of the last bus operation
///
/// Master-transmitter and master-receiver states are modeled. Slave-mode
/// and "no information" codes collapse to [`BusStatus::Ready`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusStatus {
    /// Bus is ready (or the controller reports nothing of interest)
    Ready,
    /// START condition sent
    Start,
    /// REPEATED START condition sent (a second start without a stop)
    RepeatedStart,
    /// Master transmitter, SLA+W acknowledged
    MtSlaveAck,
    /// Master transmitter, SLA+W not acknowledged
    MtSlaveNack,
    /// Master transmitter, data byte acknowledged
    MtDataAck,
    /// Master transmitter, data byte not acknowledged
    MtDataNack,
    /// Arbitration lost in SLA+R/W or data
    MtArbitrationLost,
    /// Master receiver, SLA+R acknowledged
    MrSlaveAck,
    /// Master receiver, SLA+R not acknowledged
    MrSlaveNack,
    /// Master receiver, data byte received and ACK returned
    MrDataAck,
    /// Master receiver, data byte received and NACK returned
    MrDataNack,
    /// Illegal START or STOP condition detected
    BusError,
}

impl BusStatus {
    /// Check if a START or REPEATED START was confirmed
    pub fn is_start(self) -> bool {
        matches!(self, BusStatus::Start | BusStatus::RepeatedStart)
    }

    /// The status a target produces when it acknowledges its address
    pub const fn address_ack(direction: Direction) -> Self {
        match direction {
            Direction::Write => BusStatus::MtSlaveAck,
            Direction::Read => BusStatus::MrSlaveAck,
        }
    }

    /// Check if the status signals a NACK from the target
    pub fn is_nack(self) -> bool {
        matches!(
            self,
            BusStatus::MtSlaveNack
                | BusStatus::MtDataNack
                | BusStatus::MrSlaveNack
        )
    }
}

/// I2C bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// Controller input clock (CPU clock) in Hz
    pub cpu_hz: u32,
    /// Requested bus clock
    pub clock: ClockMode,
    /// Maximum completion polls per primitive
    ///
    /// `None` spins until the hardware answers, which hangs forever on a
    /// stuck bus. `Some(n)` gives up after `n` polls with a timeout error.
    pub poll_limit: Option<u32>,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl BusConfig {
    /// Standard mode (100 kHz) on a 16 MHz part
    pub const STANDARD: Self = Self {
        cpu_hz: 16_000_000,
        clock: ClockMode::Normal,
        poll_limit: None,
    };

    /// Fast mode (400 kHz) on a 16 MHz part
    pub const FAST: Self = Self {
        cpu_hz: 16_000_000,
        clock: ClockMode::Fast,
        poll_limit: None,
    };

    /// Use a different controller input clock
    pub const fn with_cpu_hz(self, cpu_hz: u32) -> Self {
        Self { cpu_hz, ..self }
    }

    /// Bound every polling loop to `polls` iterations
    pub const fn with_poll_limit(self, polls: u32) -> Self {
        Self {
            poll_limit: Some(polls),
            ..self
        }
    }
}
