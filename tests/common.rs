#![allow(dead_code)]

// filename according to https://doc.rust-lang.org/book/ch11-03-test-organization.html
use core::fmt::Debug;
use embedded_storage::{ReadStorage, Storage};
use nvm_store::layout::{Chars, Key, Layout, Slot};
use nvm_store::platform::Medium;
use nvm_store::{Nvm, Scalar};
use pretty_assertions::assert_eq;

pub const ERASED: u8 = 0xFF;

pub const BOOL_KEY: Key<bool> = Key::first();
pub const I8_KEY: Key<i8> = BOOL_KEY.next();
pub const U8_KEY: Key<u8> = I8_KEY.next();
pub const I16_KEY: Key<i16> = U8_KEY.next();
pub const U16_KEY: Key<u16> = I16_KEY.next();
pub const I32_KEY: Key<i32> = U16_KEY.next();
pub const U32_KEY: Key<u32> = I32_KEY.next();
pub const I64_KEY: Key<i64> = U32_KEY.next();
pub const U64_KEY: Key<u64> = I64_KEY.next();
pub const FLOAT_KEY: Key<f32> = U64_KEY.next();
pub const DOUBLE_KEY: Key<f64> = FLOAT_KEY.next();
pub const CHAR_ARRAY_KEY: Key<Chars<5>> = DOUBLE_KEY.next();

pub const END_KEY: usize = CHAR_ARRAY_KEY.end() as usize;

const SLOTS: &[Slot] = &[
    BOOL_KEY.slot(),
    I8_KEY.slot(),
    U8_KEY.slot(),
    I16_KEY.slot(),
    U16_KEY.slot(),
    I32_KEY.slot(),
    U32_KEY.slot(),
    I64_KEY.slot(),
    U64_KEY.slot(),
    FLOAT_KEY.slot(),
    DOUBLE_KEY.slot(),
    CHAR_ARRAY_KEY.slot(),
];
pub const LAYOUT: Layout = Layout::new(SLOTS);

pub const NVM_SIZE: usize = 64;

#[derive(Default)]
pub struct Eeprom {
    pub buf: Vec<u8>,
    /// Size handed to `begin`, 0 before.
    pub size: usize,
    pub fail_after_operation: usize,
    pub fail_begin: bool,
    pub fail_clear: bool,
    pub fail_max_size: bool,
    /// Overrides the capacity reported after `begin`.
    pub reported_capacity: Option<usize>,
    pub operations: Vec<Operation>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operation {
    Begin { size: usize },
    Read { offset: u32, len: usize },
    Write { offset: u32, len: usize },
    Clear { from: u32, to: u32 },
}

impl Eeprom {
    pub fn new(len: usize) -> Self {
        Self {
            buf: vec![ERASED; len],
            fail_after_operation: usize::MAX,
            ..Default::default()
        }
    }

    pub fn new_with_fault(len: usize, fail_after_operation: usize) -> Self {
        Self {
            fail_after_operation,
            ..Self::new(len)
        }
    }

    pub fn disable_faults(&mut self) {
        self.fail_after_operation = usize::MAX;
        self.fail_begin = false;
        self.fail_clear = false;
        self.fail_max_size = false;
    }

    pub fn writes(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Write { .. }))
            .count()
    }

    fn record(&mut self, operation: Operation) -> Result<(), EepromError> {
        println!("    eeprom: {:?} #{:>2}", operation, self.operations.len());
        if self.operations.len() >= self.fail_after_operation {
            println!("    eeprom: FAULT");
            return Err(EepromError);
        }
        self.operations.push(operation);
        Ok(())
    }
}

#[derive(Debug)]
pub struct EepromError;

impl ReadStorage for Eeprom {
    type Error = EepromError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.record(Operation::Read {
            offset,
            len: bytes.len(),
        })?;

        let offset = offset as usize;
        assert!(offset + bytes.len() <= self.size, "read beyond started size");
        bytes.copy_from_slice(&self.buf[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.reported_capacity.unwrap_or(self.size)
    }
}

impl Storage for Eeprom {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        self.record(Operation::Write {
            offset,
            len: bytes.len(),
        })?;

        let offset = offset as usize;
        assert!(offset + bytes.len() <= self.size, "write beyond started size");
        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

impl Medium for Eeprom {
    const ERASED: u8 = ERASED;

    fn begin(&mut self, size: usize) -> Result<(), Self::Error> {
        self.record(Operation::Begin { size })?;
        if self.fail_begin || size > self.buf.len() {
            return Err(EepromError);
        }
        self.size = size;
        Ok(())
    }

    fn clear(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        self.record(Operation::Clear { from, to })?;
        if self.fail_clear {
            return Err(EepromError);
        }
        self.buf[from as usize..to as usize].fill(ERASED);
        Ok(())
    }

    fn max_size(&mut self) -> Result<usize, Self::Error> {
        if self.fail_max_size {
            return Err(EepromError);
        }
        Ok(self.capacity())
    }
}

/// Whether a test value may coincide with the default a slot is provisioned with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultPolicy {
    CanDefault,
    CanNotDefault,
}

/// Writes `value`, reads it back and checks the result against `default` as `policy` demands.
pub fn check_round_trip<V>(
    nvm: &mut Nvm<Eeprom>,
    key: Key<V>,
    value: V,
    default: V,
    policy: DefaultPolicy,
) where
    V: Scalar + PartialEq + Debug,
{
    nvm.set(key, value).expect("write failed");
    let result = nvm.get(key).expect("get failed");
    assert_eq!(result, value, "mismatched values");
    if policy == DefaultPolicy::CanNotDefault {
        assert!(value != default, "value {value:?} can't be the default");
    }
}

/// Started store on a fresh medium with the test layout.
pub fn started() -> Nvm<Eeprom> {
    let mut nvm = Nvm::new(Eeprom::new(NVM_SIZE), &LAYOUT);
    assert_eq!(nvm.init(NVM_SIZE), nvm_store::error::StartCode::Ok);
    nvm.medium_mut().operations.clear();
    nvm
}
