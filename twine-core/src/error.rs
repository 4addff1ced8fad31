//! Transaction errors
//!
//! Every layer above the bus reports failures through [`Error`]. Address
//! NACKs and data-phase problems are not told apart beyond what the
//! status snapshot carries.

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use twine_hal::BusStatus;

use crate::transaction::Phase;

/// Error from an I2C transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// START was not confirmed; carries the status seen instead
    ///
    /// No STOP has been sent. The bus may be owned by another master or in
    /// a fault state.
    NotStarted(BusStatus),
    /// Target did not acknowledge its address
    AddressNack(BusStatus),
    /// Engine used out of sequence (e.g. `write` with no open transaction)
    InvalidPhase(Phase),
    /// Address above the 7-bit range
    InvalidAddress(u8),
    /// Zero-length read; a read has to end on a NACKed byte
    EmptyRead,
    /// Bit-field shift at or past the register width
    FieldOutOfRange(u8),
    /// A bus primitive failed
    Bus(E),
}

impl<E: core::fmt::Debug> embedded_hal::i2c::Error for Error<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::NotStarted(status) | Error::AddressNack(status) => match status {
                BusStatus::MtArbitrationLost => ErrorKind::ArbitrationLoss,
                BusStatus::BusError => ErrorKind::Bus,
                s if s.is_nack() => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
                _ => ErrorKind::Other,
            },
            _ => ErrorKind::Other,
        }
    }
}
