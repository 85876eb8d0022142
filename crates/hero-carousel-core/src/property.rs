//! Values with change detection.
//!
//! A [`Property`] tells its owner whether a write actually changed anything,
//! so the owner can emit a notification only for real changes.
//!
//! # Example
//!
//! ```
//! use hero_carousel_core::{Property, Signal};
//!
//! struct ActiveIndex {
//!     value: Property<usize>,
//!     changed: Signal<usize>,
//! }
//!
//! impl ActiveIndex {
//!     fn commit(&self, index: usize) {
//!         if self.value.set(index) {
//!             self.changed.emit(index);
//!         }
//!     }
//! }
//!
//! let active = ActiveIndex { value: Property::new(0), changed: Signal::new() };
//! active.commit(1);
//! assert_eq!(active.value.get(), 1);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value whose writes report whether they changed it.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone + PartialEq> Property<T> {
    /// Wrap an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A copy of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Store `value`. Returns `true` only if it differs from the old value.
    pub fn set(&self, value: T) -> bool {
        let mut slot = self.value.write();
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}
