//! Device handles
//!
//! A [`Device`] binds a 7-bit address to the transaction engine and turns
//! each call into one complete begin -> transfer -> end exchange. It holds
//! no bus state of its own and is meant to be created where it is used.

use twine_hal::{Direction, TwiBus};

use crate::address::Address;
use crate::error::Error;
use crate::register::{Register, RegisterValue};
use crate::transaction::Transaction;

/// An I2C target at a fixed address
pub struct Device<'a, B> {
    bus: &'a mut Transaction<B>,
    address: Address,
}

impl<'a, B: TwiBus> Device<'a, B> {
    /// Bind an address to the engine
    pub fn new(bus: &'a mut Transaction<B>, address: Address) -> Self {
        Self { bus, address }
    }

    /// Target address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Probe for the device
    ///
    /// Sends SLA+W and a STOP with no data. Returns `true` if the address
    /// was acknowledged; any failure reads as "not present".
    pub fn detect(&mut self) -> bool {
        self.exchange(Direction::Write, |_| Ok(())).is_ok()
    }

    /// Write a buffer in one transaction
    pub fn write_buffer(&mut self, data: &[u8]) -> Result<(), Error<B::Error>> {
        self.exchange(Direction::Write, |t| t.write(data))
    }

    /// Write a header byte followed by a buffer in one transaction
    ///
    /// The header is typically a register pointer.
    pub fn write_buffer_with_header(
        &mut self,
        header: u8,
        data: &[u8],
    ) -> Result<(), Error<B::Error>> {
        self.exchange(Direction::Write, |t| {
            t.write(&[header])?;
            t.write(data)
        })
    }

    /// Read a buffer in one transaction
    ///
    /// An empty `buf` fails with [`Error::EmptyRead`] without addressing
    /// the target.
    pub fn read_buffer(&mut self, buf: &mut [u8]) -> Result<(), Error<B::Error>> {
        if buf.is_empty() {
            return Err(Error::EmptyRead);
        }
        self.exchange(Direction::Read, |t| t.read(buf))
    }

    /// Write a single byte in one transaction
    pub fn write_byte(&mut self, byte: u8) -> Result<(), Error<B::Error>> {
        self.write_buffer(&[byte])
    }

    /// Read a single byte in one transaction
    pub fn read_byte(&mut self) -> Result<u8, Error<B::Error>> {
        let mut buf = [0u8; 1];
        self.read_buffer(&mut buf)?;
        Ok(buf[0])
    }

    /// Write a header byte, then read without releasing the bus
    ///
    /// Uses a repeated START between the two halves.
    pub fn write_read(&mut self, header: u8, buf: &mut [u8]) -> Result<(), Error<B::Error>> {
        if buf.is_empty() {
            return Err(Error::EmptyRead);
        }
        let address = self.address;
        self.exchange(Direction::Write, |t| {
            t.write(&[header])?;
            t.restart(address, Direction::Read)?;
            t.read(buf)
        })
    }

    /// View a register of this device
    pub fn register<T: RegisterValue>(&mut self, reg: u8) -> Register<'_, B, T> {
        Register::new(self.reborrow(), reg)
    }

    /// Shorter-lived handle to the same device
    pub fn reborrow(&mut self) -> Device<'_, B> {
        Device {
            bus: &mut *self.bus,
            address: self.address,
        }
    }

    /// Run `transfer` inside begin/end
    ///
    /// `transfer` is skipped when `begin` fails. STOP is sent whenever this
    /// call opened the transaction, on success and failure alike.
    fn exchange<T>(
        &mut self,
        direction: Direction,
        transfer: impl FnOnce(&mut Transaction<B>) -> Result<T, Error<B::Error>>,
    ) -> Result<T, Error<B::Error>> {
        let result = match self.bus.begin(self.address, direction) {
            // Someone else's transaction is open; leave it alone
            Err(Error::InvalidPhase(phase)) => return Err(Error::InvalidPhase(phase)),
            Err(e) => Err(e),
            Ok(()) => transfer(self.bus),
        };

        let stopped = self.bus.end();
        let value = result?;
        stopped?;
        Ok(value)
    }
}
