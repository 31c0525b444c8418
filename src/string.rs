//! Bounded strings. A string slot of capacity `N` holds the content followed by a NUL
//! terminator, so at most `N - 1` content bytes fit. Nothing is ever truncated: a value that
//! doesn't fit is rejected before the medium is touched.

use crate::error::Error;
use crate::layout::{Chars, Key};
use crate::platform::Platform;
use crate::Nvm;

impl<T: Platform> Nvm<T> {
    /// Write a string to a slot.
    ///
    /// `source` of `None` is treated like a null pointer. The content ends at the first NUL
    /// byte or the end of `source`. The content plus terminator must fit both `max_len` and
    /// the slot capacity `N`, an empty string needs 1 byte.
    pub fn set_str<const N: usize>(
        &mut self,
        key: Key<Chars<N>>,
        source: Option<&str>,
        max_len: usize,
    ) -> Result<(), Error> {
        self.ensure_started()?;

        let source = source.ok_or(Error::NullBuffer)?;
        if max_len == 0 {
            return Err(Error::ZeroLength);
        }

        let content = content_of(source.as_bytes());
        let needed = content.len() + 1;
        if needed > max_len || needed > Chars::<N>::CAPACITY {
            return Err(Error::ValueTooLong);
        }

        // single write so a rejected or failed call never leaves half a string behind
        let mut buf = [0u8; N];
        buf[..content.len()].copy_from_slice(content);
        self.write_raw(key.address(), &buf[..needed])
    }

    /// Read a string from a slot into `destination` and return its length without terminator.
    ///
    /// `destination` of `None` is treated like a null pointer. The stored string plus
    /// terminator must fit both `max_len` and `destination`, otherwise nothing is copied.
    pub fn get_str<const N: usize>(
        &mut self,
        key: Key<Chars<N>>,
        destination: Option<&mut [u8]>,
        max_len: usize,
    ) -> Result<usize, Error> {
        self.ensure_started()?;

        let destination = destination.ok_or(Error::NullBuffer)?;
        if max_len == 0 {
            return Err(Error::ZeroLength);
        }

        let mut buf = [0u8; N];
        self.read_raw(key.address(), &mut buf)?;

        let len = buf
            .iter()
            .position(|&e| e == 0)
            .ok_or(Error::Unterminated)?;
        let needed = len + 1;
        if needed > max_len || needed > destination.len() {
            return Err(Error::ValueTooLong);
        }

        destination[..needed].copy_from_slice(&buf[..needed]);
        Ok(len)
    }
}

fn content_of(raw: &[u8]) -> &[u8] {
    match raw.iter().position(|&e| e == 0x00) {
        None => raw,
        Some(idx) => &raw[..idx],
    }
}

/// Views a NUL terminated buffer filled by [`Nvm::get_str`] as `str`. Returns `None` for
/// invalid UTF-8.
pub fn as_str(buf: &[u8]) -> Option<&str> {
    core::str::from_utf8(content_of(buf)).ok()
}
