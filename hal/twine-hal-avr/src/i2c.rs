//! I2C bus controller for the AVR TWI peripheral
//!
//! Implements the four bus primitives by writing TWCR and polling for
//! completion. Polling spins forever by default; set
//! [`BusConfig::poll_limit`] to turn a stuck bus into [`TwiError::Timeout`].

use twine_hal::{BusConfig, BusStatus, ClockMode, TwiBus};

use crate::clock;
use crate::registers::{twcr, twsr, Reg, TwiRegisters};
use crate::status;

/// Error from bus controller primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwiError {
    /// Hardware did not complete the action within the poll limit
    Timeout,
}

/// TWI bus controller
///
/// Owns the register block for the lifetime of the program. Call
/// [`HardwareTwi::initialize`] before the first transaction.
pub struct HardwareTwi<R> {
    regs: R,
    config: BusConfig,
}

impl<R: TwiRegisters> HardwareTwi<R> {
    /// Create a bus controller over a register block
    ///
    /// The hardware is not touched until [`HardwareTwi::initialize`].
    pub fn new(regs: R, config: BusConfig) -> Self {
        Self { regs, config }
    }

    /// Program the clock divider and enable the peripheral
    ///
    /// Safe to call again at any time; every call fully reprograms the
    /// divider for the new clock mode.
    pub fn initialize(&mut self, clock: ClockMode) {
        self.config.clock = clock;

        let divider = clock::divider(self.config.cpu_hz, clock.frequency());
        self.regs.write(Reg::Twbr, divider);
        self.regs.write(Reg::Twcr, twcr::TWEN);

        // Prescaler of 1
        let sr = self.regs.read(Reg::Twsr);
        self.regs.write(Reg::Twsr, sr & !twsr::PRESCALER_MASK);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "TWI init: {} Hz bus, TWBR={}",
            clock::scl_frequency(self.config.cpu_hz, divider),
            divider
        );
    }

    /// Current configuration
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Raw TWSR status code with the prescaler bits masked off
    pub fn raw_status(&mut self) -> u8 {
        self.regs.read(Reg::Twsr) & twsr::STATUS_MASK
    }

    /// Release the register block
    pub fn release(self) -> R {
        self.regs
    }

    /// Poll TWCR until `done` holds or the poll limit runs out
    fn wait_until(&mut self, done: impl Fn(u8) -> bool) -> Result<(), TwiError> {
        match self.config.poll_limit {
            None => {
                while !done(self.regs.read(Reg::Twcr)) {}
                Ok(())
            }
            Some(limit) => {
                for _ in 0..limit {
                    if done(self.regs.read(Reg::Twcr)) {
                        return Ok(());
                    }
                }

                #[cfg(feature = "defmt")]
                defmt::warn!("TWI timeout after {} polls: {}", limit, {
                    let raw = self.raw_status();
                    status::describe(raw)
                });

                Err(TwiError::Timeout)
            }
        }
    }

    /// Wait for TWINT, which hardware sets when the current action completes
    fn wait_for_action(&mut self) -> Result<(), TwiError> {
        self.wait_until(|cr| cr & twcr::TWINT != 0)
    }
}

impl<R: TwiRegisters> TwiBus for HardwareTwi<R> {
    type Error = TwiError;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.regs.write(Reg::Twcr, twcr::TRIGGER | twcr::TWSTA);
        self.wait_for_action()
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.regs.write(Reg::Twcr, twcr::TRIGGER | twcr::TWSTO);
        // TWINT is not set after a STOP; TWSTO clears once the bus is idle
        self.wait_until(|cr| cr & twcr::TWSTO == 0)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.regs.write(Reg::Twdr, byte);
        self.regs.write(Reg::Twcr, twcr::TRIGGER);
        self.wait_for_action()
    }

    fn read_byte(&mut self, ack: bool) -> Result<u8, Self::Error> {
        let trigger = if ack {
            twcr::TRIGGER | twcr::TWEA
        } else {
            twcr::TRIGGER
        };

        self.regs.write(Reg::Twcr, trigger);
        self.wait_for_action()?;

        Ok(self.regs.read(Reg::Twdr))
    }

    fn status(&mut self) -> BusStatus {
        status::decode(self.regs.read(Reg::Twsr))
    }
}
