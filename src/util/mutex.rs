//! The mutex and condition variables guarding channel state.
//!
//! Under `--cfg loom` these are backed by `loom`'s mock primitives so the
//! channel's blocking paths can be model checked; otherwise they are the
//! `std::sync` primitives. Lock poisoning is swallowed: every critical
//! section leaves the channel state consistent, so a panicking peer does not
//! invalidate it.

#[cfg(all(test, loom))]
use crate::loom::sync::{Condvar as CondvarInner, Mutex as MutexInner};
#[cfg(all(test, loom))]
pub(crate) use crate::loom::sync::MutexGuard;

#[cfg(not(all(test, loom)))]
use std::sync::{Condvar as CondvarInner, Mutex as MutexInner};
#[cfg(not(all(test, loom)))]
pub(crate) use std::sync::MutexGuard;

use std::sync::PoisonError;

pub(crate) struct Mutex<T>(MutexInner<T>);

pub(crate) struct Condvar(CondvarInner);

// === impl Mutex ===

impl<T> Mutex<T> {
    pub(crate) fn new(data: T) -> Self {
        Self(MutexInner::new(data))
    }

    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
        test_println!("locking {}...", core::any::type_name::<T>());
        let lock = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        test_println!("-> locked {}!", core::any::type_name::<T>());
        lock
    }
}

// === impl Condvar ===

impl Condvar {
    pub(crate) fn new() -> Self {
        Self(CondvarInner::new())
    }

    /// Releases `guard` and parks the calling thread until notified, then
    /// reacquires the lock. Spurious wakeups are possible; callers re-check
    /// their predicate in a loop.
    #[inline]
    pub(crate) fn wait<'lock, T>(&self, guard: MutexGuard<'lock, T>) -> MutexGuard<'lock, T> {
        test_println!("waiting on {}...", core::any::type_name::<T>());
        let lock = self.0.wait(guard).unwrap_or_else(PoisonError::into_inner);
        test_println!("-> woke on {}!", core::any::type_name::<T>());
        lock
    }

    #[inline]
    pub(crate) fn notify_one(&self) {
        self.0.notify_one();
    }

    #[inline]
    pub(crate) fn notify_all(&self) {
        self.0.notify_all();
    }
}
