//! TWSR status codes
//!
//! Raw codes live in the upper five bits of TWSR. [`decode`] folds them
//! into [`BusStatus`]; [`describe`] gives a readable line for logs.

use twine_hal::BusStatus;

use crate::registers::twsr;

/// Raw TWSR status codes (prescaler bits masked off)
pub mod code {
    /// Illegal START or STOP condition
    pub const BUS_ERROR: u8 = 0x00;
    pub const START: u8 = 0x08;
    pub const REP_START: u8 = 0x10;
    pub const MT_SLA_ACK: u8 = 0x18;
    pub const MT_SLA_NACK: u8 = 0x20;
    pub const MT_DATA_ACK: u8 = 0x28;
    pub const MT_DATA_NACK: u8 = 0x30;
    /// Arbitration lost (shared by transmitter and receiver)
    pub const ARB_LOST: u8 = 0x38;
    pub const MR_SLA_ACK: u8 = 0x40;
    pub const MR_SLA_NACK: u8 = 0x48;
    pub const MR_DATA_ACK: u8 = 0x50;
    pub const MR_DATA_NACK: u8 = 0x58;
    /// No relevant state information; TWINT is clear
    pub const NO_INFO: u8 = 0xF8;
}

/// Map a raw TWSR value to a [`BusStatus`]
///
/// Slave-mode codes and [`code::NO_INFO`] are not modeled and map to
/// [`BusStatus::Ready`].
pub const fn decode(raw: u8) -> BusStatus {
    match raw & twsr::STATUS_MASK {
        code::START => BusStatus::Start,
        code::REP_START => BusStatus::RepeatedStart,
        code::MT_SLA_ACK => BusStatus::MtSlaveAck,
        code::MT_SLA_NACK => BusStatus::MtSlaveNack,
        code::MT_DATA_ACK => BusStatus::MtDataAck,
        code::MT_DATA_NACK => BusStatus::MtDataNack,
        code::ARB_LOST => BusStatus::MtArbitrationLost,
        code::MR_SLA_ACK => BusStatus::MrSlaveAck,
        code::MR_SLA_NACK => BusStatus::MrSlaveNack,
        code::MR_DATA_ACK => BusStatus::MrDataAck,
        code::MR_DATA_NACK => BusStatus::MrDataNack,
        code::BUS_ERROR => BusStatus::BusError,
        _ => BusStatus::Ready,
    }
}

/// Human readable description of a raw TWSR value
///
/// Covers slave-mode codes as well, since a misconfigured TWAR can put the
/// controller there.
pub const fn describe(raw: u8) -> &'static str {
    match raw & twsr::STATUS_MASK {
        0x08 => "start condition transmitted",
        0x10 => "repeated start condition transmitted",
        0x18 => "SLA+W transmitted, ACK received",
        0x20 => "SLA+W transmitted, NACK received",
        0x28 => "data transmitted, ACK received",
        0x30 => "data transmitted, NACK received",
        0x38 => "arbitration lost in SLA+R/W or data",
        0x40 => "SLA+R transmitted, ACK received",
        0x48 => "SLA+R transmitted, NACK received",
        0x50 => "data received, ACK returned",
        0x58 => "data received, NACK returned",
        0x60 => "own SLA+W received, ACK returned",
        0x68 => "arbitration lost, own SLA+W received, ACK returned",
        0x70 => "general call received, ACK returned",
        0x78 => "arbitration lost, general call received, ACK returned",
        0x80 => "addressed data received, ACK returned",
        0x88 => "addressed data received, NACK returned",
        0x90 => "general call data received, ACK returned",
        0x98 => "general call data received, NACK returned",
        0xA0 => "stop or repeated start received while addressed",
        0xA8 => "own SLA+R received, ACK returned",
        0xB0 => "arbitration lost, own SLA+R received, ACK returned",
        0xB8 => "slave data transmitted, ACK received",
        0xC0 => "slave data transmitted, NACK received",
        0xC8 => "last slave data byte transmitted, ACK received",
        0xF8 => "no state information available",
        0x00 => "illegal start or stop condition",
        _ => "invalid status",
    }
}
