//! I2C master transaction engine
//!
//! Sequences START -> SLA+R/W -> ACK check -> data -> STOP on top of a
//! [`TwiBus`] and tracks where on the wire the current transaction is.
//!
//! # Phases
//!
//! ```text
//!            begin ok            write/read
//!  Idle ──────────────▶ AddressSent ──────────▶ DataPhase ─┐
//!   ▲          │                                   ▲       │ write/read
//!   │          │ START or ACK check fails          └───────┘
//!   │          ▼
//!   │        Failed
//!   │          │
//!   └── end ───┘   (end is legal from every phase)
//! ```
//!
//! `Started` is held only between the START and the address ACK check.
//! Once a transaction fails only [`Transaction::end`] is accepted.

use twine_hal::{BusStatus, Direction, TwiBus};

use crate::address::Address;
use crate::error::Error;

/// Where the engine is within a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No transaction open
    Idle,
    /// START sent, address not yet acknowledged
    Started,
    /// Target acknowledged its address
    AddressSent(Direction),
    /// At least one data byte transferred
    DataPhase(Direction),
    /// A check failed; only `end` is legal
    Failed,
}

impl Phase {
    /// Direction of the open transaction, if the address was acknowledged
    pub fn direction(self) -> Option<Direction> {
        match self {
            Phase::AddressSent(dir) | Phase::DataPhase(dir) => Some(dir),
            _ => None,
        }
    }

    /// Check if a transaction is open on the wire
    pub fn is_open(self) -> bool {
        !matches!(self, Phase::Idle)
    }
}

/// I2C master transaction engine
///
/// Owns the bus controller. At most one transaction is in flight; the
/// engine refuses to begin another until the current one is ended.
///
/// Blocking and not reentrant. Wrap it in a [`crate::SharedBus`] if
/// interrupt handlers also use the bus.
pub struct Transaction<B> {
    bus: B,
    phase: Phase,
}

impl<B> Transaction<B> {
    /// Create an engine over an initialized bus controller
    pub const fn new(bus: B) -> Self {
        Self {
            bus,
            phase: Phase::Idle,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Access the bus controller
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the bus controller
    ///
    /// Driving primitives directly bypasses phase tracking.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the bus controller
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: TwiBus> Transaction<B> {
    /// Begin a transaction: START, then SLA+R/W
    ///
    /// Succeeds only if the target acknowledged its address. On failure the
    /// engine enters [`Phase::Failed`]; call [`Transaction::end`] to release
    /// the bus. A START that was never confirmed sends nothing further.
    pub fn begin(&mut self, address: Address, direction: Direction) -> Result<(), Error<B::Error>> {
        if self.phase.is_open() {
            return Err(Error::InvalidPhase(self.phase));
        }
        self.select(address, direction)
    }

    /// Re-address within an open transaction using a repeated START
    ///
    /// Used to switch from writing a register pointer to reading without
    /// releasing the bus.
    pub fn restart(
        &mut self,
        address: Address,
        direction: Direction,
    ) -> Result<(), Error<B::Error>> {
        if self.phase.direction().is_none() {
            return Err(Error::InvalidPhase(self.phase));
        }
        self.select(address, direction)
    }

    /// Send STOP and return to [`Phase::Idle`]
    ///
    /// Always issues STOP, whatever the phase.
    pub fn end(&mut self) -> Result<(), Error<B::Error>> {
        self.phase = Phase::Idle;
        self.bus.stop().map_err(Error::Bus)
    }

    /// Write bytes within an open write transaction
    ///
    /// Per-byte ACKs are not checked.
    pub fn write(&mut self, data: &[u8]) -> Result<(), Error<B::Error>> {
        self.expect(Direction::Write)?;

        for &byte in data {
            if let Err(e) = self.bus.write_byte(byte) {
                self.phase = Phase::Failed;
                return Err(Error::Bus(e));
            }
            self.phase = Phase::DataPhase(Direction::Write);
        }
        Ok(())
    }

    /// Read bytes within an open read transaction
    ///
    /// Every byte is acknowledged except the last, which gets a NACK to
    /// tell the target the read is complete. An empty `buf` is rejected
    /// with [`Error::EmptyRead`], since a read must end on a NACKed byte.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(), Error<B::Error>> {
        self.read_continued(buf, true)
    }

    /// Read bytes, leaving the last one acknowledged unless `nack_last`
    ///
    /// With `nack_last == false` the target keeps sending and a following
    /// read continues the same stream.
    pub(crate) fn read_continued(
        &mut self,
        buf: &mut [u8],
        nack_last: bool,
    ) -> Result<(), Error<B::Error>> {
        self.expect(Direction::Read)?;
        if buf.is_empty() && nack_last {
            return Err(Error::EmptyRead);
        }

        let last = buf.len().saturating_sub(1);
        for (i, byte) in buf.iter_mut().enumerate() {
            match self.bus.read_byte(i < last || !nack_last) {
                Ok(value) => *byte = value,
                Err(e) => {
                    self.phase = Phase::Failed;
                    return Err(Error::Bus(e));
                }
            }
            self.phase = Phase::DataPhase(Direction::Read);
        }
        Ok(())
    }

    /// START + SLA+R/W + ACK check
    fn select(&mut self, address: Address, direction: Direction) -> Result<(), Error<B::Error>> {
        let result = self.try_select(address, direction);
        match result {
            Ok(()) => self.phase = Phase::AddressSent(direction),
            Err(_) => {
                self.phase = Phase::Failed;

                #[cfg(feature = "defmt")]
                defmt::debug!("I2C {=u8:#x} {}: no ACK", address.get(), direction);
            }
        }
        result
    }

    fn try_select(
        &mut self,
        address: Address,
        direction: Direction,
    ) -> Result<(), Error<B::Error>> {
        self.bus.start().map_err(Error::Bus)?;
        self.phase = Phase::Started;

        let status = self.bus.status();
        if !status.is_start() {
            return Err(Error::NotStarted(status));
        }

        self.bus
            .write_byte(direction.address_byte(address.get()))
            .map_err(Error::Bus)?;

        let status = self.bus.status();
        if status != BusStatus::address_ack(direction) {
            return Err(Error::AddressNack(status));
        }
        Ok(())
    }

    fn expect(&self, direction: Direction) -> Result<(), Error<B::Error>> {
        if self.phase.direction() == Some(direction) {
            Ok(())
        } else {
            Err(Error::InvalidPhase(self.phase))
        }
    }
}
