// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fasttap Ghost: suppress the synthetic click that trails a handled tap.
//!
//! ## Overview
//!
//! Touch platforms emit a synthetic click a few hundred milliseconds after a tap. When
//! the tap has already been handled, that click is a *ghost*: it lands on whatever sits
//! under the original touch point by then. [`GhostClickSuppressor`] remembers recent tap
//! coordinates and, from a single capture-phase listener on the root, cancels any click
//! that lands near one of them.
//!
//! - [`GhostClickSuppressor::report`] records a tap. The entry suppresses clicks for
//!   [`TapConfig::suppress_window_ms`] and is inert afterwards.
//! - [`GhostClickSuppressor::intercept`] checks a click against every live entry. A click
//!   within [`TapConfig::space_threshold`] on both axes of any entry has its propagation
//!   stopped and its default prevented. Matching does not consume the entry.
//!
//! Expiry is lazy: entries carry an absolute `expires_at` read from the injected
//! [`Clock`], so nothing depends on timer callbacks firing in order.
//!
//! Matching is by coordinates only. A genuine click on a different element that happens
//! to sit within the space threshold of a recent tap is suppressed too.
//!
//! ## Lifetime
//!
//! Build one suppressor at startup, [`install`](GhostClickSuppressor::install) it once on
//! the root, and share it by [`Rc`](alloc::rc::Rc) with every gesture detector. It stays
//! installed for the lifetime of the page; there is no teardown.
//!
//! ## Example
//!
//! ```
//! use fasttap_event::{Event, ManualClock};
//! use fasttap_ghost::GhostClickSuppressor;
//! use kurbo::Point;
//!
//! let clock = ManualClock::new(0);
//! let ghost = GhostClickSuppressor::new(&clock);
//! ghost.report(100.0, 100.0);
//!
//! clock.advance(300);
//! let mut click = Event::activation(Point::new(105.0, 95.0), 300);
//! assert!(ghost.intercept(&mut click));
//! assert!(click.is_default_prevented());
//!
//! clock.advance(800);
//! let mut late = Event::activation(Point::new(105.0, 95.0), 1100);
//! assert!(!ghost.intercept(&mut late));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod suppressor;

pub use suppressor::{GhostClickSuppressor, PendingTap, TapSink};

#[doc(no_inline)]
pub use fasttap_event::{Clock, TapConfig};
