// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fasttap Event: the host capability model shared by the fasttap crates.
//!
//! ## Overview
//!
//! The fasttap crates never talk to a real UI toolkit directly. Instead they consume a
//! small capability, modeled here:
//!
//! - [`Event`]: a delivered event carrying its [`EventKind`], an optional primary pointer
//!   position, a per-contact coordinate list, a timestamp, and propagation control
//!   ([`Event::stop_propagation`], [`Event::prevent_default`]).
//! - [`ListenerHost`]: register and deregister a listener for an event kind on a node,
//!   optionally in the capture phase. A listener is named by a [`ListenerId`] handed out by
//!   the host, and a registration is the tuple [`Registration`].
//! - [`Clock`]: a monotonic millisecond clock, injected so expiry can be tested
//!   deterministically.
//! - [`TapConfig`]: the drag, space, and time thresholds.
//!
//! ## Minimal example
//!
//! ```
//! use fasttap_event::{Event, EventKind};
//! use kurbo::Point;
//!
//! let mut ev = Event::contact_start(Point::new(10.0, 20.0), 0);
//! assert_eq!(ev.kind, EventKind::ContactStart);
//! assert_eq!(ev.primary_point(), Some(Point::new(10.0, 20.0)));
//!
//! ev.stop_propagation();
//! assert!(ev.is_propagation_stopped());
//! assert!(!ev.is_default_prevented());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and the [`StdClock`].
//! - `libm`: `no_std` + `alloc` builds relying on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod clock;
pub mod config;
pub mod event;
pub mod host;

#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{Clock, ManualClock};
pub use config::{ConfigError, DRAG_THRESHOLD, SPACE_THRESHOLD, SUPPRESS_WINDOW_MS, TapConfig};
pub use event::{Event, EventKind};
pub use host::{ListenerHost, ListenerId, Phase, Registration};
