//! Bus clock divider
//!
//! The TWI bit rate generator produces
//!
//! ```text
//! SCL = F_CPU / (16 + 2 * TWBR * 4^TWPS)
//! ```
//!
//! The prescaler is always left at 1 (TWPS = 0), so
//! `TWBR = (F_CPU / SCL - 16) / 2`.

/// Largest value the 8-bit TWBR register holds
pub const MAX_DIVIDER: u8 = u8::MAX;

/// Compute the TWBR value for a requested SCL frequency
///
/// Truncates toward zero, saturates at 0 when the core clock is too slow
/// for the requested rate and clamps to [`MAX_DIVIDER`] when it is too fast.
pub const fn divider(cpu_hz: u32, scl_hz: u32) -> u8 {
    if scl_hz == 0 {
        return MAX_DIVIDER;
    }

    let twbr = (cpu_hz / scl_hz).saturating_sub(16) / 2;
    if twbr > MAX_DIVIDER as u32 {
        MAX_DIVIDER
    } else {
        twbr as u8
    }
}

/// SCL frequency produced by a divider value
pub const fn scl_frequency(cpu_hz: u32, divider: u8) -> u32 {
    cpu_hz / (16 + 2 * divider as u32)
}
