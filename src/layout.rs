//! Compile-time address map. Every field of the store is declared as a typed [`Key`] whose
//! address is the running sum of the widths of all fields declared before it:
//!
//! ```
//! use nvm_store::layout::{Chars, Key, Layout, Slot};
//!
//! pub const BOOT_COUNT: Key<u32> = Key::first();
//! pub const BRIGHTNESS: Key<u8> = BOOT_COUNT.next();
//! pub const DEVICE_NAME: Key<Chars<16>> = BRIGHTNESS.next();
//!
//! const SLOTS: &[Slot] = &[
//!     BOOT_COUNT.slot(),
//!     BRIGHTNESS.slot_with_default(&[0x80]),
//!     DEVICE_NAME.slot(),
//! ];
//! pub const LAYOUT: Layout = Layout::new(SLOTS);
//!
//! assert_eq!(DEVICE_NAME.address(), 5);
//! assert_eq!(LAYOUT.size(), 21);
//! ```
//!
//! Reordering the declarations changes the addresses. Data persisted with a previous order
//! is not migrated.

use core::fmt;
use core::marker::PhantomData;

/// Kind of value a slot holds.
#[derive(strum::FromRepr, strum::Display, Debug, Eq, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Kind {
    Bool = 0x21,
    U8 = 0x01,
    I8 = 0x11,
    U16 = 0x02,
    I16 = 0x12,
    U32 = 0x04,
    I32 = 0x14,
    U64 = 0x08,
    I64 = 0x18,
    F32 = 0x34,
    F64 = 0x38,
    Chars = 0x40,
}

impl Kind {
    /// Fixed width in bytes, `None` for string slots whose width is their declared capacity.
    pub const fn scalar_width(&self) -> Option<usize> {
        match self {
            Kind::Bool | Kind::U8 | Kind::I8 => Some(1),
            Kind::U16 | Kind::I16 => Some(2),
            Kind::U32 | Kind::I32 | Kind::F32 => Some(4),
            Kind::U64 | Kind::I64 | Kind::F64 => Some(8),
            Kind::Chars => None,
        }
    }
}

/// Anything that can be bound to a [`Key`].
pub trait Value {
    const KIND: Kind;

    /// Number of bytes the slot occupies on the medium.
    const WIDTH: usize;

    /// Raw pattern written by `Nvm::set_defaults`.
    const DEFAULT: &'static [u8];
}

/// Marker for a string slot holding up to `N` bytes including the NUL terminator.
pub struct Chars<const N: usize>;

impl<const N: usize> Chars<N> {
    pub const CAPACITY: usize = {
        assert!(N > 0, "a string slot needs room for at least the terminator");
        N
    };
}

impl<const N: usize> Value for Chars<N> {
    const KIND: Kind = Kind::Chars;
    const WIDTH: usize = Self::CAPACITY;
    const DEFAULT: &'static [u8] = &[0];
}

/// Typed byte offset of a declared field.
pub struct Key<V> {
    address: u32,
    _value: PhantomData<fn() -> V>,
}

impl<V> Clone for Key<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Key<V> {}

impl<V> PartialEq for Key<V> {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl<V> Eq for Key<V> {}

impl<V> fmt::Debug for Key<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:#06x})", self.address)
    }
}

impl<V: Value> Key<V> {
    /// Key of the first field, located at address 0.
    pub const fn first() -> Self {
        Self::at(0)
    }

    /// Key at an explicit address. Prefer [`Key::first`] and [`Key::next`] which can't overlap.
    pub const fn at(address: u32) -> Self {
        Self {
            address,
            _value: PhantomData,
        }
    }

    /// Key of the field declared directly after this one.
    pub const fn next<U: Value>(self) -> Key<U> {
        Key::at(self.end())
    }

    pub const fn address(self) -> u32 {
        self.address
    }

    /// First address after this field. Used on the last key, it is the size the layout needs.
    pub const fn end(self) -> u32 {
        self.address + V::WIDTH as u32
    }

    /// Slot declaration with the canonical default of the value kind.
    pub const fn slot(self) -> Slot {
        Slot {
            address: self.address,
            width: V::WIDTH,
            kind: V::KIND,
            default: V::DEFAULT,
        }
    }

    /// Slot declaration with a custom raw default. Scalars need exactly `WIDTH` little-endian
    /// bytes, strings need a terminator within their capacity.
    pub const fn slot_with_default(self, default: &'static [u8]) -> Slot {
        if matches!(V::KIND, Kind::Chars) {
            assert!(default.len() <= V::WIDTH, "default exceeds string capacity");
            let mut i = 0;
            while i < default.len() && default[i] != 0 {
                i += 1;
            }
            assert!(i < default.len(), "string default needs a terminator");
        } else {
            assert!(default.len() == V::WIDTH, "default must match scalar width");
        }

        Slot {
            address: self.address,
            width: V::WIDTH,
            kind: V::KIND,
            default,
        }
    }
}

/// A declared field: where it lives, how wide it is and what it is reset to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    address: u32,
    width: usize,
    kind: Kind,
    default: &'static [u8],
}

impl Slot {
    pub const fn address(&self) -> u32 {
        self.address
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }

    pub const fn default(&self) -> &'static [u8] {
        self.default
    }
}

/// Ordered set of all slots of a store.
#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    slots: &'static [Slot],
    size: usize,
}

impl Layout {
    /// Panics at compile time (when used in a const) if the slots don't follow each other
    /// without gaps, starting at address 0.
    pub const fn new(slots: &'static [Slot]) -> Self {
        let mut size = 0usize;
        let mut i = 0;
        while i < slots.len() {
            assert!(
                slots[i].address as usize == size,
                "slots must be contiguous and in declaration order"
            );
            size += slots[i].width;
            i += 1;
        }
        Self { slots, size }
    }

    /// Total number of bytes of all declared slots.
    pub const fn size(&self) -> usize {
        self.size
    }

    pub const fn slots(&self) -> &'static [Slot] {
        self.slots
    }
}
