//! Versioned records shared between transforms.
//!
//! A [`Shared`] handle is cheap to clone; every clone points at the same
//! record. Each effective write bumps the record's version, which lets a
//! [`Transform`](crate::Transform) notice that the angles it built its
//! matrix from have moved, whichever handle the write came through.
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

struct Record<T> {
    value: Cell<T>,
    version: Cell<u64>,
}

/// Single-threaded shared record with a change counter.
pub struct Shared<T: Copy> {
    record: Rc<Record<T>>,
}

impl<T: Copy + PartialEq> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            record: Rc::new(Record {
                value: Cell::new(value),
                version: Cell::new(0),
            }),
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        self.record.value.get()
    }

    /// Store `value`. Returns `true` (and bumps the version) only when it
    /// differs from the current value.
    pub fn set(&self, value: T) -> bool {
        if self.record.value.get() == value {
            return false;
        }
        self.record.value.set(value);
        self.record.version.set(self.record.version.get() + 1);
        true
    }

    /// Read-modify-write through `f`.
    pub fn update(&self, f: impl FnOnce(T) -> T) -> bool {
        self.set(f(self.get()))
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.record.version.get()
    }

    /// Whether both handles point at the same record.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.record, &other.record)
    }
}

impl<T: Copy> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            record: Rc::clone(&self.record),
        }
    }
}

impl<T: Copy + PartialEq + Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("value", &self.record.value.get())
            .field("version", &self.record.version.get())
            .finish()
    }
}
