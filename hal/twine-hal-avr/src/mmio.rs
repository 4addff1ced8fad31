//! Memory-mapped TWI registers
//!
//! Data-space addresses of the TWI block. The ATmega328P, ATmega32U4 and
//! ATmega2560 all place it at the same location.

#![allow(unsafe_code)]

use crate::registers::{Reg, TwiRegisters};

/// TWI register addresses (data space)
pub mod addr {
    pub const TWBR: usize = 0xB8;
    pub const TWSR: usize = 0xB9;
    pub const TWAR: usize = 0xBA;
    pub const TWDR: usize = 0xBB;
    pub const TWCR: usize = 0xBC;
}

/// Data-space address of a register
pub const fn address(reg: Reg) -> usize {
    match reg {
        Reg::Twbr => addr::TWBR,
        Reg::Twsr => addr::TWSR,
        Reg::Twdr => addr::TWDR,
        Reg::Twcr => addr::TWCR,
    }
}

/// The on-chip TWI register block
pub struct MmioRegisters {
    _private: (),
}

impl MmioRegisters {
    /// Take the on-chip register block
    ///
    /// # Safety
    ///
    /// Must only be called on an AVR part with the TWI block at the
    /// addresses in [`addr`], and at most once: the returned value assumes
    /// exclusive access to those registers.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl TwiRegisters for MmioRegisters {
    fn read(&mut self, reg: Reg) -> u8 {
        // SAFETY: `steal` guarantees the address is a valid TWI register
        // and that this instance owns the block.
        unsafe { core::ptr::read_volatile(address(reg) as *const u8) }
    }

    fn write(&mut self, reg: Reg, value: u8) {
        // SAFETY: see `read`.
        unsafe { core::ptr::write_volatile(address(reg) as *mut u8, value) }
    }
}
