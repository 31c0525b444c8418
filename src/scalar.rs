//! Fixed-width values. They are stored little-endian with exactly [`Value::WIDTH`] bytes, so
//! an `f32` occupies 4 bytes and a `bool` a single byte.

use crate::layout::{Kind, Value};
use core::mem::size_of;

/// Value that can be read and written with `Nvm::get` and `Nvm::set`.
pub trait Scalar: Value + Copy {
    /// Writes the raw representation into `buf`, which is exactly `WIDTH` bytes long.
    fn encode(self, buf: &mut [u8]);

    /// Reinterprets `WIDTH` raw bytes.
    fn decode(buf: &[u8]) -> Self;
}

/// Largest scalar width, used to size stack buffers.
pub(crate) const MAX_SCALAR_WIDTH: usize = 8;

impl Value for bool {
    const KIND: Kind = Kind::Bool;
    const WIDTH: usize = 1;
    const DEFAULT: &'static [u8] = &[0];
}

impl Scalar for bool {
    fn encode(self, buf: &mut [u8]) {
        buf[0] = self as u8;
    }

    // the erased pattern of most media is 0xFF, which also reads as true
    fn decode(buf: &[u8]) -> Self {
        buf[0] != 0
    }
}

macro_rules! number {
    ($type:ty, $kind:ident) => {
        impl Value for $type {
            const KIND: Kind = Kind::$kind;
            const WIDTH: usize = size_of::<$type>();
            const DEFAULT: &'static [u8] = &[0; size_of::<$type>()];
        }

        impl Scalar for $type {
            fn encode(self, buf: &mut [u8]) {
                buf.copy_from_slice(&self.to_le_bytes());
            }

            fn decode(buf: &[u8]) -> Self {
                let mut raw = [0u8; size_of::<$type>()];
                raw.copy_from_slice(buf);
                <$type>::from_le_bytes(raw)
            }
        }
    };
}

number!(u8, U8);
number!(i8, I8);
number!(u16, U16);
number!(i16, I16);
number!(u32, U32);
number!(i32, I32);
number!(u64, U64);
number!(i64, I64);
number!(f32, F32);
number!(f64, F64);

const _: () = assert!(size_of::<u64>() == MAX_SCALAR_WIDTH && size_of::<f64>() == MAX_SCALAR_WIDTH);
