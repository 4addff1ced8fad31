//! Bus scanning
//!
//! Probes each address with [`Device::detect`]. Reserved addresses
//! (0x00 general call and 0x7F) are skipped by [`scan`].

use core::ops::RangeInclusive;

use heapless::Vec;
use twine_hal::TwiBus;

use crate::address::Address;
use crate::device::Device;
use crate::transaction::Transaction;

/// Most devices a scan can report
pub const MAX_DEVICES: usize = 128;

/// Addresses probed by [`scan`]
pub const SCAN_RANGE: RangeInclusive<u8> = 0x01..=0x7E;

/// Probe every non-reserved address and list those that answer
pub fn scan<B: TwiBus>(bus: &mut Transaction<B>) -> Vec<Address, MAX_DEVICES> {
    scan_range(bus, SCAN_RANGE)
}

/// Probe a range of addresses and list those that answer
///
/// Values above 0x7F in `range` are ignored.
pub fn scan_range<B: TwiBus>(
    bus: &mut Transaction<B>,
    range: RangeInclusive<u8>,
) -> Vec<Address, MAX_DEVICES> {
    let mut found = Vec::new();

    for raw in range {
        let Ok(address) = Address::new(raw) else {
            break;
        };

        if Device::new(bus, address).detect() {
            #[cfg(feature = "defmt")]
            defmt::info!("I2C device at {=u8:#x}", raw);

            // Capacity covers the whole 7-bit space
            let _ = found.push(address);
        }
    }

    found
}
