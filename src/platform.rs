use embedded_storage::{ReadStorage, Storage};

/// See README.md for an example implementation.
pub trait Platform: Medium + Storage {}

impl<T: Medium + Storage> Platform for T {}

/// Lifecycle of the raw medium on top of byte-wise reads and writes.
pub trait Medium: ReadStorage {
    /// Value every byte holds after [`Medium::clear`].
    const ERASED: u8 = 0xFF;

    /// Brings up the medium with `size` usable bytes, e.g. allocating the RAM mirror of an
    /// emulated EEPROM or opening a preference partition.
    fn begin(&mut self, size: usize) -> Result<(), Self::Error>;

    /// Resets the range `from..to` to the erased pattern.
    fn clear(&mut self, from: u32, to: u32) -> Result<(), Self::Error>;

    /// Number of bytes the medium can currently hold.
    fn max_size(&mut self) -> Result<usize, Self::Error> {
        Ok(self.capacity())
    }
}

/// Absolute address of `offset..offset + len` inside the region of `size` bytes starting at
/// `base`. `None` if the range leaves the region or the address space.
#[cfg(any(
    test,
    feature = "esp32",
    feature = "esp32s2",
    feature = "esp32s3",
    feature = "esp32c2",
    feature = "esp32c3",
    feature = "esp32c6",
    feature = "esp32h2",
))]
pub(crate) fn region_address(base: u32, size: usize, offset: u32, len: usize) -> Option<u32> {
    let end = (offset as usize).checked_add(len)?;
    if end > size {
        return None;
    }
    let last = u32::try_from(end).ok()?;
    base.checked_add(last)?;
    base.checked_add(offset)
}

#[cfg(any(
    feature = "esp32",
    feature = "esp32s2",
    feature = "esp32s3",
    feature = "esp32c2",
    feature = "esp32c3",
    feature = "esp32c6",
    feature = "esp32h2",
))]
mod chip {
    use crate::error::Error;
    use crate::platform::{Medium, region_address};
    use embedded_storage::nor_flash::NorFlash;
    use embedded_storage::{ReadStorage, Storage};
    use esp_storage::{FlashStorage, FlashStorageError};

    /// A sector aligned region of the SPI flash used as the backing medium.
    pub struct EspFlash<'d> {
        inner: FlashStorage<'d>,
        offset: u32,
        size: usize,
    }

    impl<'d> EspFlash<'d> {
        pub fn new(inner: FlashStorage<'d>, offset: u32, size: usize) -> Result<Self, Error> {
            if !(offset as usize).is_multiple_of(FlashStorage::ERASE_SIZE) {
                return Err(Error::InvalidPartitionOffset);
            }
            if size == 0 || !size.is_multiple_of(FlashStorage::ERASE_SIZE) {
                return Err(Error::InvalidPartitionSize);
            }
            if region_address(0, ReadStorage::capacity(&inner), offset, size).is_none() {
                return Err(Error::InvalidPartitionSize);
            }

            Ok(Self {
                inner,
                offset,
                size,
            })
        }

        fn check(&self, offset: u32, len: usize) -> Result<u32, FlashStorageError> {
            region_address(self.offset, self.size, offset, len)
                .ok_or(FlashStorageError::OutOfBounds)
        }
    }

    impl ReadStorage for EspFlash<'_> {
        type Error = FlashStorageError;

        fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
            let address = self.check(offset, bytes.len())?;
            ReadStorage::read(&mut self.inner, address, bytes)
        }

        fn capacity(&self) -> usize {
            self.size
        }
    }

    impl Storage for EspFlash<'_> {
        fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
            let address = self.check(offset, bytes.len())?;
            Storage::write(&mut self.inner, address, bytes)
        }
    }

    impl Medium for EspFlash<'_> {
        fn begin(&mut self, size: usize) -> Result<(), Self::Error> {
            if size > self.size {
                return Err(FlashStorageError::OutOfBounds);
            }
            Ok(())
        }

        // erases whole sectors, so everything from the sector containing `from` up to the end of
        // the sector containing `to` is reset
        fn clear(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
            let sector = FlashStorage::ERASE_SIZE as u32;
            let start = self.check(from / sector * sector, 0)?;
            let end = to
                .div_ceil(sector)
                .checked_mul(sector)
                .ok_or(FlashStorageError::OutOfBounds)?;
            let end = self.check(end, 0)?;
            NorFlash::erase(&mut self.inner, start, end)
        }
    }
}

#[cfg(any(
    feature = "esp32",
    feature = "esp32s2",
    feature = "esp32s3",
    feature = "esp32c2",
    feature = "esp32c3",
    feature = "esp32c6",
    feature = "esp32h2",
))]
pub use chip::*;
