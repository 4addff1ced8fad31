//! I2C register pattern
//!
//! Most I2C peripherals expose numbered registers: the master writes a
//! register pointer, then reads or writes the value stored there.
//! [`Register`] implements that pattern for 1, 2, 4 and 8 byte values in
//! either byte order, plus read-modify-write of bit fields.
//!
//! A register holds no connection. Each access opens and closes its own
//! transactions, so a read-modify-write spans two of them and is not
//! atomic with respect to other masters or interrupt handlers.

use core::marker::PhantomData;
use core::ops::{BitAnd, BitOr, Not, Shl, Shr};

use twine_hal::TwiBus;

use crate::device::Device;
use crate::error::Error;

/// Byte order of a multi-byte register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endian {
    /// First byte on the wire is the most significant
    #[default]
    Big,
    /// Last byte on the wire is the most significant
    Little,
}

/// How the pointer write and the data read are framed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadMode {
    /// Pointer write and data read as two transactions, each with its own STOP
    #[default]
    Separate,
    /// One transaction with a repeated START between pointer and data
    RepeatedStart,
}

/// Integer types that fit in a register
pub trait RegisterValue:
    Copy
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Shl<u8, Output = Self>
    + Shr<u8, Output = Self>
{
    /// Width in bits
    const BITS: u8;

    /// Wire representation
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    /// Fold bytes into a value
    fn from_bytes(bytes: Self::Bytes, endian: Endian) -> Self;

    /// Split a value into bytes
    fn to_bytes(self, endian: Endian) -> Self::Bytes;
}

macro_rules! register_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RegisterValue for $ty {
                const BITS: u8 = <$ty>::BITS as u8;

                type Bytes = [u8; core::mem::size_of::<$ty>()];

                fn from_bytes(bytes: Self::Bytes, endian: Endian) -> Self {
                    match endian {
                        Endian::Big => <$ty>::from_be_bytes(bytes),
                        Endian::Little => <$ty>::from_le_bytes(bytes),
                    }
                }

                fn to_bytes(self, endian: Endian) -> Self::Bytes {
                    match endian {
                        Endian::Big => self.to_be_bytes(),
                        Endian::Little => self.to_le_bytes(),
                    }
                }
            }
        )*
    };
}

register_value!(u8, i8, u16, i16, u32, i32, u64, i64);

/// A device register holding a `T`
pub struct Register<'a, B, T> {
    device: Device<'a, B>,
    reg: u8,
    endian: Endian,
    mode: ReadMode,
    _value: PhantomData<T>,
}

pub type U8Register<'a, B> = Register<'a, B, u8>;
pub type I8Register<'a, B> = Register<'a, B, i8>;
pub type U16Register<'a, B> = Register<'a, B, u16>;
pub type I16Register<'a, B> = Register<'a, B, i16>;
pub type U32Register<'a, B> = Register<'a, B, u32>;
pub type I32Register<'a, B> = Register<'a, B, i32>;
pub type U64Register<'a, B> = Register<'a, B, u64>;
pub type I64Register<'a, B> = Register<'a, B, i64>;

impl<'a, B: TwiBus, T: RegisterValue> Register<'a, B, T> {
    /// Big-endian register read with two transactions
    pub fn new(device: Device<'a, B>, reg: u8) -> Self {
        Self {
            device,
            reg,
            endian: Endian::Big,
            mode: ReadMode::Separate,
            _value: PhantomData,
        }
    }

    /// Use a different byte order
    pub fn with_endian(self, endian: Endian) -> Self {
        Self { endian, ..self }
    }

    /// Use a different read framing
    pub fn with_read_mode(self, mode: ReadMode) -> Self {
        Self { mode, ..self }
    }

    /// Register pointer value
    pub fn address(&self) -> u8 {
        self.reg
    }

    /// Read the register's bytes as they appear on the wire
    pub fn read_raw(&mut self) -> Result<T::Bytes, Error<B::Error>> {
        let mut bytes = T::Bytes::default();
        match self.mode {
            ReadMode::Separate => {
                self.device.write_byte(self.reg)?;
                self.device.read_buffer(bytes.as_mut())?;
            }
            ReadMode::RepeatedStart => {
                self.device.write_read(self.reg, bytes.as_mut())?;
            }
        }
        Ok(bytes)
    }

    /// Read the register value
    pub fn read(&mut self) -> Result<T, Error<B::Error>> {
        let bytes = self.read_raw()?;
        Ok(T::from_bytes(bytes, self.endian))
    }

    /// Write the register value
    pub fn write(&mut self, value: T) -> Result<(), Error<B::Error>> {
        let bytes = value.to_bytes(self.endian);
        self.device
            .write_buffer_with_header(self.reg, bytes.as_ref())
    }

    /// Replace the bits under `mask << shift` with `value`
    ///
    /// Read-modify-write across two bus exchanges; not reentrant. A `shift`
    /// of the register width or more fails with [`Error::FieldOutOfRange`]
    /// before the bus is touched.
    pub fn write_bits(&mut self, value: T, mask: T, shift: u8) -> Result<(), Error<B::Error>> {
        check_shift::<T, B::Error>(shift)?;
        let current = self.read()?;
        let modified = (current & !(mask << shift)) | ((value & mask) << shift);
        self.write(modified)
    }

    /// Extract the field under `mask << shift`
    pub fn read_bits(&mut self, mask: T, shift: u8) -> Result<T, Error<B::Error>> {
        check_shift::<T, B::Error>(shift)?;
        Ok((self.read()? >> shift) & mask)
    }
}

fn check_shift<T: RegisterValue, E>(shift: u8) -> Result<(), Error<E>> {
    if shift < T::BITS {
        Ok(())
    } else {
        Err(Error::FieldOutOfRange(shift))
    }
}
