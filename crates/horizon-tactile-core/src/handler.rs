//! Non-owning callback references.
//!
//! A control must not keep its owner alive through a click handler, so the
//! control only stores a [`WeakHandler`]. The owner keeps the strong
//! [`Handler`] and the callback stops firing as soon as the owner drops it.
//!
//! ```
//! use std::sync::Arc;
//! use horizon_tactile_core::{Handler, WeakHandler};
//!
//! let handler: Handler<u32> = Arc::new(|n| println!("tapped {n}"));
//! let weak = WeakHandler::new(&handler);
//!
//! assert!(weak.call(&1));
//! drop(handler);
//! assert!(!weak.call(&2));
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

/// A strong, shareable callback.
pub type Handler<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A weak reference to a [`Handler`].
pub struct WeakHandler<Args> {
    inner: Weak<dyn Fn(&Args) + Send + Sync>,
}

impl<Args> WeakHandler<Args> {
    /// Downgrade `handler`.
    pub fn new(handler: &Handler<Args>) -> Self {
        Self {
            inner: Arc::downgrade(handler),
        }
    }

    /// Invoke the handler if it is still alive.
    ///
    /// Returns `false` when the owner has already dropped it.
    pub fn call(&self, args: &Args) -> bool {
        match self.inner.upgrade() {
            Some(handler) => {
                handler(args);
                true
            }
            None => false,
        }
    }

    /// Check whether the handler can still be called.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl<Args> Clone for WeakHandler<Args> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<Args> fmt::Debug for WeakHandler<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakHandler")
            .field("alive", &self.is_alive())
            .finish()
    }
}

static_assertions::assert_impl_all!(WeakHandler<()>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn test_call_while_alive() {
        let total = Arc::new(AtomicI32::new(0));
        let total_clone = total.clone();
        let handler: Handler<i32> = Arc::new(move |&n| {
            total_clone.fetch_add(n, Ordering::SeqCst);
        });
        let weak = WeakHandler::new(&handler);

        assert!(weak.is_alive());
        assert!(weak.call(&3));
        assert!(weak.call(&4));
        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_dropped_handler_is_skipped() {
        let total = Arc::new(AtomicI32::new(0));
        let total_clone = total.clone();
        let handler: Handler<i32> = Arc::new(move |&n| {
            total_clone.fetch_add(n, Ordering::SeqCst);
        });
        let weak = WeakHandler::new(&handler);
        let copy = weak.clone();

        drop(handler);

        assert!(!weak.is_alive());
        assert!(!copy.call(&5));
        assert_eq!(total.load(Ordering::SeqCst), 0);
    }
}
