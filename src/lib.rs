#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, target_arch = "x86_64")), no_std)]

mod defaults;
pub mod error;
pub mod layout;
pub mod platform;
mod scalar;
mod string;

pub use layout::{Chars, Key, Layout, Slot};
pub use scalar::Scalar;
pub use string::as_str;

use crate::error::{Error, StartCode};
use crate::platform::Platform;
use crate::scalar::MAX_SCALAR_WIDTH;
#[cfg(feature = "defmt")]
use defmt::{trace, warn};

/// Readiness of the store. Only [`Nvm::init`] changes it.
#[derive(strum::Display, Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Uninitialized,
    Started,
    Failed,
}

/// The Nvm struct owns the medium and gates every access on the store being started. It is
/// the single context object of a device, there is no global instance.
pub struct Nvm<T: Platform> {
    pub(crate) hal: T,
    pub(crate) layout: &'static Layout,
    pub(crate) state: State,
    pub(crate) capacity: usize,
}

impl<T: Platform> Nvm<T> {
    /// Creates an uninitialized store. The medium is not touched until [`Nvm::init`].
    pub fn new(hal: T, layout: &'static Layout) -> Nvm<T> {
        Self {
            hal,
            layout,
            state: State::Uninitialized,
            capacity: 0,
        }
    }

    /// Brings up the medium with `capacity` usable bytes.
    ///
    /// Calling it again on a started store is not an error, it reports
    /// [`StartCode::AlreadyStarted`] and leaves state and capacity as they are. A store in
    /// [`State::Failed`] may be initialized again.
    pub fn init(&mut self, capacity: usize) -> StartCode {
        #[cfg(feature = "defmt")]
        trace!("init: capacity {} state {}", capacity, self.state);

        #[cfg(feature = "debug-logs")]
        println!("Nvm: init {capacity} in state {}", self.state);

        if capacity == 0 {
            return StartCode::InvalidSize;
        }

        if self.state == State::Started {
            return StartCode::AlreadyStarted;
        }

        if self.layout.size() > capacity || u32::try_from(capacity).is_err() {
            #[cfg(feature = "defmt")]
            warn!(
                "init: layout needs {} bytes, capacity is {}",
                self.layout.size(),
                capacity
            );
            return StartCode::InvalidSize;
        }

        if self.hal.begin(capacity).is_err() {
            #[cfg(feature = "defmt")]
            warn!("init: medium failed to start");
            self.state = State::Failed;
            return StartCode::Failed;
        }

        // the medium accepted the size but reports less afterwards
        if self.hal.capacity() < capacity {
            #[cfg(feature = "defmt")]
            warn!(
                "init: medium reports {} bytes after start",
                self.hal.capacity()
            );
            return StartCode::Unknown;
        }

        self.state = State::Started;
        self.capacity = capacity;
        StartCode::Ok
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == State::Started
    }

    /// Capacity given to the last successful [`Nvm::init`], 0 before.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn layout(&self) -> &'static Layout {
        self.layout
    }

    pub fn medium(&self) -> &T {
        &self.hal
    }

    /// Direct access to the medium, bypassing the state checks.
    pub fn medium_mut(&mut self) -> &mut T {
        &mut self.hal
    }

    /// Gives back the medium, e.g. to start a new store on it after a simulated reboot.
    pub fn release(self) -> T {
        self.hal
    }

    /// Read a value from the medium.
    ///
    /// Supported types are bool, signed and unsigned integers up to 64-bit width, f32 and f64.
    /// A slot that was never written yields whatever the erased medium holds.
    pub fn get<V: Scalar>(&mut self, key: Key<V>) -> Result<V, Error> {
        self.ensure_started()?;

        let mut buf = [0u8; MAX_SCALAR_WIDTH];
        let raw = &mut buf[..V::WIDTH];
        self.read_raw(key.address(), raw)?;
        Ok(V::decode(raw))
    }

    /// Write a value to the medium.
    pub fn set<V: Scalar>(&mut self, key: Key<V>, value: V) -> Result<(), Error> {
        self.ensure_started()?;

        let mut buf = [0u8; MAX_SCALAR_WIDTH];
        let raw = &mut buf[..V::WIDTH];
        value.encode(raw);
        self.write_raw(key.address(), raw)
    }

    pub(crate) fn ensure_started(&self) -> Result<(), Error> {
        match self.state {
            State::Started => Ok(()),
            _ => Err(Error::NotStarted),
        }
    }

    pub(crate) fn read_raw(&mut self, address: u32, buf: &mut [u8]) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        trace!("read_raw @{:#06x}[{}]", address, buf.len());

        self.hal.read(address, buf).map_err(|_| Error::MediumError)
    }

    pub(crate) fn write_raw(&mut self, address: u32, bytes: &[u8]) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        trace!("write_raw @{:#06x}[{}]", address, bytes.len());

        #[cfg(feature = "debug-logs")]
        println!("Nvm: write {:#06x} {:02x?}", address, bytes);

        self.hal.write(address, bytes).map_err(|_| Error::MediumError)
    }
}
