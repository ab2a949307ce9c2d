// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: walk a delivery sequence and honor stop-propagation.
//!
//! [`run`] is deliberately minimal:
//!
//! - Entries are processed in order; [`Document::route`](crate::Document::route) already
//!   groups them into capture → target → bubble.
//! - After each callback, if the event reports
//!   [`is_propagation_stopped`](Event::is_propagation_stopped), the walk ends immediately,
//!   including any other listeners on the same node.
//! - Default prevention is recorded on the event; the caller checks it afterwards.
//!
//! ```
//! use fasttap_document::dispatch::{Delivery, run};
//! use fasttap_event::{Event, ListenerId, Phase};
//! use kurbo::Point;
//!
//! let seq = vec![
//!     Delivery { phase: Phase::Capture, node: 1_u32, listener: ListenerId(1) },
//!     Delivery { phase: Phase::Target, node: 2, listener: ListenerId(2) },
//! ];
//! let mut ev = Event::activation(Point::ZERO, 0);
//! let stopped = run(&seq, &mut ev, |d, e| {
//!     if d.phase == Phase::Capture {
//!         e.stop_propagation();
//!         e.prevent_default();
//!     }
//! });
//! assert_eq!(stopped.map(|d| d.listener), Some(ListenerId(1)));
//! assert!(ev.is_default_prevented());
//! ```

use fasttap_event::{Event, ListenerId, Phase};

/// One step of a route: call `listener`, registered on `node`, in `phase`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Delivery<K> {
    /// Propagation phase.
    pub phase: Phase,
    /// Node whose registration is being served.
    pub node: K,
    /// Listener to invoke.
    pub listener: ListenerId,
}

/// Run `handler` over `seq`, stopping once the event's propagation is stopped.
///
/// Returns the delivery during which propagation stopped, or `None` if the full sequence
/// was visited.
pub fn run<'a, K: core::fmt::Debug>(
    seq: &'a [Delivery<K>],
    event: &mut Event,
    mut handler: impl FnMut(&Delivery<K>, &mut Event),
) -> Option<&'a Delivery<K>> {
    for d in seq {
        handler(d, event);
        if event.is_propagation_stopped() {
            tracing::trace!(kind = event.kind.name(), phase = ?d.phase, node = ?d.node, "propagation stopped");
            return Some(d);
        }
    }
    None
}
