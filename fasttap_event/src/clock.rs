// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Millisecond clocks.
//!
//! Expiry in fasttap is computed from timestamps rather than from scheduled callbacks, so
//! every consumer that needs "now" takes a [`Clock`]. Tests and deterministic hosts use
//! [`ManualClock`]; `std` builds can use [`StdClock`].
//!
//! ```
//! use fasttap_event::{Clock, ManualClock};
//!
//! let clock = ManualClock::new(100);
//! clock.advance(250);
//! assert_eq!(clock.now(), 350);
//! ```

use alloc::rc::Rc;
use core::cell::Cell;

/// A monotonic, non-decreasing clock in milliseconds.
pub trait Clock {
    /// Current time in milliseconds.
    fn now(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// A clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock reading `start`.
    pub fn new(start: u64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to `now`. Callers are responsible for keeping time non-decreasing.
    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    /// Move forward by `ms`, saturating at `u64::MAX`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}

/// Milliseconds elapsed since the clock was created.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Start counting from now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
