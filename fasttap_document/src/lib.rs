// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fasttap Document: a deterministic in-memory event host.
//!
//! ## Overview
//!
//! The gesture and suppression crates only need the [`ListenerHost`] capability plus
//! somebody who delivers events. This crate is that somebody for tests, demos, and
//! headless integrations:
//!
//! - [`Document`] holds a node tree (parent links) and the listener registry.
//! - [`Document::route`] emits the capture → target → bubble [`Delivery`] sequence for an
//!   event kind aimed at a target node.
//! - [`dispatch::run`] walks that sequence, handing each delivery to your callback, and
//!   honors [`Event::stop_propagation`](fasttap_event::Event::stop_propagation).
//!
//! Routing and execution are split so the caller can own the listeners mutably while the
//! document is borrowed only for the duration of each callback.
//!
//! ## Example
//!
//! ```
//! use fasttap_document::{Document, dispatch};
//! use fasttap_event::{Event, EventKind, ListenerHost, ListenerId, Phase, Registration};
//! use kurbo::Point;
//!
//! let mut doc: Document<u32> = Document::new();
//! doc.insert(None, 1).unwrap();
//! doc.insert(Some(1), 2).unwrap();
//!
//! // A capture listener on the root and a plain listener on the child.
//! doc.add_listener(Registration::new(ListenerId(7), 1, EventKind::Activation).capturing());
//! doc.add_listener(Registration::new(ListenerId(8), 2, EventKind::Activation));
//!
//! let route = doc.route(2, EventKind::Activation);
//! let mut ev = Event::activation(Point::new(5.0, 5.0), 0);
//! let mut seen = Vec::new();
//! let stopped = dispatch::run(&route, &mut ev, |d, _| seen.push((d.phase, d.listener)));
//!
//! assert!(stopped.is_none());
//! assert_eq!(seen, vec![(Phase::Capture, ListenerId(7)), (Phase::Target, ListenerId(8))]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatch;
mod document;

pub use dispatch::Delivery;
pub use document::{Document, DocumentError};

#[doc(no_inline)]
pub use fasttap_event::ListenerHost;
