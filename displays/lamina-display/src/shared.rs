//! Cross-context sharing
//!
//! A display stack is plain data with `&mut self` methods. When a main loop
//! and an interrupt or timer handler both drive it, put it in a [`Shared`]
//! and touch it only inside [`Shared::lock`].

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Critical-section protected cell
///
/// Usable as a `static`:
///
/// ```ignore
/// static DISPLAY: Shared<Option<DisplayStack<RamDisplay>>> = Shared::new(None);
/// ```
pub struct Shared<T> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<T>>,
}

impl<T> Shared<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with exclusive access inside a critical section
    ///
    /// Returns `None` without running `f` when called from inside another
    /// `lock` on the same cell.
    pub fn lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.inner.lock(|cell| match cell.try_borrow_mut() {
            Ok(mut value) => Some(f(&mut value)),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("re-entrant lock of shared display state");
                None
            }
        })
    }

    /// Take the value back out
    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
