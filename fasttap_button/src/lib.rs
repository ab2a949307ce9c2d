// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fasttap Button: fire a tap handler the moment the finger lifts.
//!
//! ## Overview
//!
//! [`GestureButton`] binds a handler to one element and runs a small state machine over
//! that element's touch events:
//!
//! - `Idle` → `Tracking` on contact start. The start point is recorded and two
//!   short-lived listeners are added: contact end on the element, contact move on the
//!   root (a dragging finger usually leaves the element before lifting).
//! - `Tracking` → `Idle` on a move further than [`TapConfig::drag_threshold`] on either
//!   axis. That is a drag; the handler does not run.
//! - `Tracking` → `Idle` on contact end. The handler runs immediately, then the start
//!   point is reported to the shared [`TapSink`] (normally a
//!   [`GhostClickSuppressor`](fasttap_ghost::GhostClickSuppressor)) so the platform's
//!   trailing synthetic click is swallowed.
//!
//! A plain click (mouse, keyboard activation, or a synthetic click that was not
//! suppressed) runs the handler too, without reporting anything.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use fasttap_button::{GestureButton, GestureState};
//! use fasttap_document::Document;
//! use fasttap_event::{Event, ListenerId, ManualClock};
//! use fasttap_ghost::GhostClickSuppressor;
//! use kurbo::Point;
//!
//! let mut doc: Document<u32> = Document::new();
//! doc.insert(None, 1).unwrap();
//! doc.insert(Some(1), 2).unwrap();
//!
//! let clock = Rc::new(ManualClock::new(0));
//! let ghost = Rc::new(GhostClickSuppressor::new(Rc::clone(&clock)));
//! ghost.install(&mut doc, ListenerId(0), 1);
//!
//! let taps = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&taps);
//! let mut button = GestureButton::new(&mut doc, ListenerId(1), 2, 1, ghost.clone(), move |_: &mut Event| {
//!     counter.set(counter.get() + 1);
//! });
//!
//! // The host delivers events to the button's listener id; here we call it directly.
//! button.handle(&mut doc, &mut Event::contact_start(Point::new(100.0, 100.0), 0));
//! assert_eq!(button.state(), GestureState::Tracking);
//! button.handle(&mut doc, &mut Event::contact_end(80));
//!
//! assert_eq!(taps.get(), 1);
//! assert!(ghost.would_suppress(Point::new(105.0, 95.0)));
//!
//! button.dispose(&mut doc);
//! assert_eq!(doc.listener_count_for(ListenerId(1)), 0);
//! ```
//!
//! ## Failure handling
//!
//! Events missing the coordinates a transition needs are ignored. Calling [`dispose`]
//! more than once, or from any state, is fine. A panicking handler unwinds to the
//! caller; nothing here catches it.
//!
//! [`dispose`]: GestureButton::dispose
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod button;

pub use button::{GestureButton, GestureState, Listening};

#[doc(no_inline)]
pub use fasttap_event::TapConfig;
#[doc(no_inline)]
pub use fasttap_ghost::TapSink;
