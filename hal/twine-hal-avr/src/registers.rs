//! TWI register file
//!
//! The bus controller only ever touches four registers. Abstracting them
//! behind [`TwiRegisters`] keeps [`crate::HardwareTwi`] free of volatile
//! pointer access and lets it run against a simulated register file.

/// TWI register selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    /// Bit rate register (clock divider)
    Twbr,
    /// Status register (status code + prescaler bits)
    Twsr,
    /// Data register
    Twdr,
    /// Control register
    Twcr,
}

/// Access to the TWI register block
pub trait TwiRegisters {
    /// Read a register
    fn read(&mut self, reg: Reg) -> u8;

    /// Write a register
    fn write(&mut self, reg: Reg, value: u8);
}

impl<R: TwiRegisters + ?Sized> TwiRegisters for &mut R {
    fn read(&mut self, reg: Reg) -> u8 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Reg, value: u8) {
        (**self).write(reg, value)
    }
}

/// TWCR bits
pub mod twcr {
    /// Interrupt flag; set by hardware when an action completes, written 1 to clear
    pub const TWINT: u8 = 1 << 7;
    /// Enable acknowledge
    pub const TWEA: u8 = 1 << 6;
    /// START condition
    pub const TWSTA: u8 = 1 << 5;
    /// STOP condition
    pub const TWSTO: u8 = 1 << 4;
    /// Write collision flag
    pub const TWWC: u8 = 1 << 3;
    /// TWI enable
    pub const TWEN: u8 = 1 << 2;
    /// Interrupt enable
    pub const TWIE: u8 = 1 << 0;

    /// Clear the interrupt flag and keep the peripheral enabled
    pub const TRIGGER: u8 = TWINT | TWEN;
}

/// TWSR fields
pub mod twsr {
    /// Status code bits
    pub const STATUS_MASK: u8 = 0xF8;
    /// Prescaler bits (TWPS1:0)
    pub const PRESCALER_MASK: u8 = 0x03;
}
