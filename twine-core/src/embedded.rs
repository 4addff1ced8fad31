//! `embedded-hal` I2C implementation
//!
//! Lets drivers written against `embedded_hal::i2c::I2c` run on the
//! transaction engine. An operation list maps onto one transaction:
//! consecutive operations in the same direction share an address phase,
//! a change of direction issues a repeated START, and the list ends with
//! a single STOP.

use core::fmt::Debug;

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use twine_hal::{Direction, TwiBus};

use crate::address::Address;
use crate::error::Error;
use crate::transaction::Transaction;

impl<B> ErrorType for Transaction<B>
where
    B: TwiBus,
    B::Error: Debug,
{
    type Error = Error<B::Error>;
}

impl<B> I2c<SevenBitAddress> for Transaction<B>
where
    B: TwiBus,
    B::Error: Debug,
{
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let address = Address::new(address).map_err(|e| Error::InvalidAddress(e.0))?;

        if self.phase().is_open() {
            return Err(Error::InvalidPhase(self.phase()));
        }
        if operations.is_empty() {
            return Ok(());
        }

        let result = self.run(address, operations);
        let stopped = self.end();
        result?;
        stopped
    }
}

impl<B: TwiBus> Transaction<B> {
    /// Execute an operation list without the closing STOP
    fn run(
        &mut self,
        address: Address,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Error<B::Error>> {
        let mut current: Option<Direction> = None;

        for i in 0..operations.len() {
            // Adjacent reads form one stream; only its final byte is NACKed
            let nack_last = !matches!(operations.get(i + 1), Some(Operation::Read(_)));
            let op = &mut operations[i];

            let direction = match op {
                Operation::Read(_) => Direction::Read,
                Operation::Write(_) => Direction::Write,
            };

            match current {
                None => self.begin(address, direction)?,
                Some(dir) if dir != direction => self.restart(address, direction)?,
                Some(_) => {}
            }
            current = Some(direction);

            match op {
                Operation::Read(buf) => self.read_continued(buf, nack_last)?,
                Operation::Write(data) => self.write(data)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Event, SimBus};
    use embedded_hal::i2c::{Error as _, ErrorKind, NoAcknowledgeSource};
    use twine_hal::BusStatus;

    #[test]
    fn test_write_read_with_repeated_start() {
        let mut bus = SimBus::with_devices(&[0x18]);
        bus.device_mut(0x18).registers[0x05] = 0xAB;
        let mut t = Transaction::new(bus);

        let mut buf = [0u8; 1];
        t.write_read(0x18, &[0x05], &mut buf).unwrap();

        assert_eq!(buf, [0xAB]);
        assert_eq!(
            t.bus().events,
            vec![
                Event::Start,
                Event::Write(0x30),
                Event::Write(0x05),
                Event::Start,
                Event::Write(0x31),
                Event::Read { ack: false },
                Event::Stop,
            ]
        );
    }

    #[test]
    fn test_adjacent_writes_share_address_phase() {
        let mut t = Transaction::new(SimBus::with_devices(&[0x40]));

        t.transaction(
            0x40,
            &mut [Operation::Write(&[0x06]), Operation::Write(&[0x11, 0x22])],
        )
        .unwrap();

        let bus = t.release();
        assert_eq!(bus.count(Event::Start), 1);
        assert_eq!(bus.count(Event::Stop), 1);
        assert_eq!(&bus.device(0x40).registers[0x06..0x08], &[0x11, 0x22]);
    }

    #[test]
    fn test_adjacent_reads_form_one_stream() {
        let mut bus = SimBus::with_devices(&[0x18]);
        bus.device_mut(0x18).registers[..4].copy_from_slice(&[1, 2, 3, 4]);
        let mut t = Transaction::new(bus);

        let mut head = [0u8; 2];
        let mut tail = [0u8; 2];
        t.transaction(
            0x18,
            &mut [Operation::Read(&mut head), Operation::Read(&mut tail)],
        )
        .unwrap();

        assert_eq!(head, [1, 2]);
        assert_eq!(tail, [3, 4]);
        assert_eq!(
            t.bus().events,
            vec![
                Event::Start,
                Event::Write(0x31),
                Event::Read { ack: true },
                Event::Read { ack: true },
                Event::Read { ack: true },
                Event::Read { ack: false },
                Event::Stop,
            ]
        );
    }

    #[test]
    fn test_read_before_write_is_nacked() {
        let mut t = Transaction::new(SimBus::with_devices(&[0x18]));

        let mut buf = [0u8; 2];
        t.transaction(
            0x18,
            &mut [Operation::Read(&mut buf), Operation::Write(&[0x00])],
        )
        .unwrap();

        // The read ends on a NACK before the repeated START
        assert_eq!(t.bus().count(Event::Read { ack: false }), 1);
        assert_eq!(t.bus().count(Event::Start), 2);
    }

    #[test]
    fn test_plain_write_and_read() {
        let mut t = Transaction::new(SimBus::with_devices(&[0x40]));
        I2c::write(&mut t, 0x40, &[0x00, 0x5A]).unwrap();
        I2c::write(&mut t, 0x40, &[0x00]).unwrap();

        let mut buf = [0u8; 1];
        I2c::read(&mut t, 0x40, &mut buf).unwrap();
        assert_eq!(buf, [0x5A]);
    }

    #[test]
    fn test_nack_maps_to_error_kind() {
        let mut t = Transaction::new(SimBus::with_devices(&[]));
        let err = I2c::write(&mut t, 0x40, &[0x00]).unwrap_err();

        assert_eq!(err, Error::AddressNack(BusStatus::MtSlaveNack));
        assert_eq!(
            err.kind(),
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        );
        assert!(t.bus().is_idle());
    }

    #[test]
    fn test_rejects_eight_bit_address() {
        let mut t = Transaction::new(SimBus::with_devices(&[]));
        let err = I2c::write(&mut t, 0x90, &[0x00]).unwrap_err();
        assert_eq!(err, Error::InvalidAddress(0x90));
        assert!(t.bus().events.is_empty());
    }

    #[test]
    fn test_empty_operation_list_is_noop() {
        let mut t = Transaction::new(SimBus::with_devices(&[0x40]));
        t.transaction(0x40, &mut []).unwrap();
        assert!(t.bus().events.is_empty());
    }
}
