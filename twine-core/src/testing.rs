//! Simulated bus for unit tests
//!
//! Models register-pointer peripherals on an ideal bus: the first byte
//! written after SLA+W sets the register pointer, further bytes store at
//! the pointer, and reads return bytes from the pointer. Pointers
//! auto-increment and persist between transactions like real parts.

use core::convert::Infallible;

use twine_hal::{BusStatus, TwiBus};

/// One bus primitive as seen on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Start,
    Stop,
    Write(u8),
    Read { ack: bool },
}

/// Simulated register-pointer peripheral
pub(crate) struct SimDevice {
    pub address: u8,
    pub registers: [u8; 256],
    pointer: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    Addressing,
    Writing { device: usize, pointer_set: bool },
    Reading { device: usize },
    /// Address NACKed; data is ignored until STOP
    Released,
}

/// Simulated two-wire bus with attached devices
pub(crate) struct SimBus {
    devices: Vec<SimDevice>,
    mode: Mode,
    status: BusStatus,
    pub events: Vec<Event>,
    /// Status forced after every START (arbitration loss, bus fault)
    pub start_override: Option<BusStatus>,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            mode: Mode::Idle,
            status: BusStatus::Ready,
            events: Vec::new(),
            start_override: None,
        }
    }

    /// Bus with one empty device at each address
    pub fn with_devices(addresses: &[u8]) -> Self {
        let mut bus = Self::new();
        for &address in addresses {
            bus.devices.push(SimDevice {
                address,
                registers: [0; 256],
                pointer: 0,
            });
        }
        bus
    }

    pub fn device(&self, address: u8) -> &SimDevice {
        self.devices
            .iter()
            .find(|d| d.address == address)
            .expect("no such device")
    }

    pub fn device_mut(&mut self, address: u8) -> &mut SimDevice {
        self.devices
            .iter_mut()
            .find(|d| d.address == address)
            .expect("no such device")
    }

    /// No transaction open on the wire
    pub fn is_idle(&self) -> bool {
        self.mode == Mode::Idle
    }

    pub fn count(&self, event: Event) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl TwiBus for SimBus {
    type Error = Infallible;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Start);
        self.status = match self.start_override {
            Some(status) => status,
            None if self.mode == Mode::Idle => BusStatus::Start,
            None => BusStatus::RepeatedStart,
        };
        if self.status.is_start() {
            self.mode = Mode::Addressing;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Stop);
        self.mode = Mode::Idle;
        self.status = BusStatus::Ready;
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.events.push(Event::Write(byte));

        match self.mode {
            Mode::Addressing => {
                let address = byte >> 1;
                let read = byte & 1 != 0;
                let found = self.devices.iter().position(|d| d.address == address);
                (self.mode, self.status) = match (found, read) {
                    (Some(device), false) => (
                        Mode::Writing {
                            device,
                            pointer_set: false,
                        },
                        BusStatus::MtSlaveAck,
                    ),
                    (Some(device), true) => (Mode::Reading { device }, BusStatus::MrSlaveAck),
                    (None, false) => (Mode::Released, BusStatus::MtSlaveNack),
                    (None, true) => (Mode::Released, BusStatus::MrSlaveNack),
                };
            }
            Mode::Writing {
                device,
                pointer_set,
            } => {
                let dev = &mut self.devices[device];
                if pointer_set {
                    dev.registers[dev.pointer as usize] = byte;
                    dev.pointer = dev.pointer.wrapping_add(1);
                } else {
                    dev.pointer = byte;
                    self.mode = Mode::Writing {
                        device,
                        pointer_set: true,
                    };
                }
                self.status = BusStatus::MtDataAck;
            }
            _ => self.status = BusStatus::MtDataNack,
        }
        Ok(())
    }

    fn read_byte(&mut self, ack: bool) -> Result<u8, Self::Error> {
        self.events.push(Event::Read { ack });

        let Mode::Reading { device } = self.mode else {
            return Ok(0xFF);
        };

        let dev = &mut self.devices[device];
        let value = dev.registers[dev.pointer as usize];
        dev.pointer = dev.pointer.wrapping_add(1);
        self.status = if ack {
            BusStatus::MrDataAck
        } else {
            BusStatus::MrDataNack
        };
        Ok(value)
    }

    fn status(&mut self) -> BusStatus {
        self.status
    }
}

/// Bus whose primitives always fail
pub(crate) struct DeadBus;

/// Error returned by [`DeadBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Timeout;

impl TwiBus for DeadBus {
    type Error = Timeout;

    fn start(&mut self) -> Result<(), Self::Error> {
        Err(Timeout)
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        Err(Timeout)
    }

    fn write_byte(&mut self, _byte: u8) -> Result<(), Self::Error> {
        Err(Timeout)
    }

    fn read_byte(&mut self, _ack: bool) -> Result<u8, Self::Error> {
        Err(Timeout)
    }

    fn status(&mut self) -> BusStatus {
        BusStatus::Ready
    }
}
