//! Change-tracking properties.
//!
//! [`Property<T>`] holds the mutable state of objects that are shared between
//! a control and the application, such as whether a visual node is shown.
//! Setters report whether anything changed so the owner can decide whether to
//! notify.
//!
//! # Example
//!
//! ```
//! use horizon_tactile_core::Property;
//!
//! let visible = Property::new(false);
//! assert!(visible.set(true));
//! assert!(!visible.set(true));
//! assert!(visible.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::logging::targets;

/// A value behind a lock that reports whether writes changed it.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a copy of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrite the value without comparing.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq + fmt::Debug> Property<T> {
    /// Set the value, returning `true` if it differed from the current one.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Set the value, returning the previous value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current == value {
            return None;
        }
        tracing::trace!(target: targets::PROPERTY, old = ?*current, new = ?value, "property changed");
        Some(std::mem::replace(&mut *current, value))
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
