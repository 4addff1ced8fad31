//! Shared bus access
//!
//! The engine itself is not reentrant. When both foreground code and
//! interrupt handlers talk to the bus, every full begin..end exchange has
//! to run under a lock. [`SharedBus`] provides that lock with an
//! embassy-sync blocking mutex, so it can live in a `static`.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use twine_hal::TwiBus;

use crate::address::Address;
use crate::device::Device;
use crate::transaction::Transaction;

/// Transaction engine behind a mutex
///
/// Use `CriticalSectionRawMutex` when interrupt handlers touch the bus,
/// `NoopRawMutex` when only one context does.
pub struct SharedBus<M: RawMutex, B> {
    inner: Mutex<M, RefCell<Transaction<B>>>,
}

impl<M: RawMutex, B> SharedBus<M, B> {
    /// Wrap an initialized bus controller
    pub const fn new(bus: B) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Transaction::new(bus))),
        }
    }

    /// Unwrap the bus controller
    pub fn into_inner(self) -> B {
        self.inner.into_inner().into_inner().release()
    }
}

impl<M: RawMutex, B: TwiBus> SharedBus<M, B> {
    /// Run `f` with exclusive access to the engine
    ///
    /// Everything `f` does, typically one or more complete transactions,
    /// happens under the lock. Calling back into the same `SharedBus`
    /// from inside `f` panics.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Transaction<B>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Run `f` with exclusive access to one device
    pub fn with_device<R>(&self, address: Address, f: impl FnOnce(&mut Device<'_, B>) -> R) -> R {
        self.lock(|bus| f(&mut Device::new(bus, address)))
    }
}
