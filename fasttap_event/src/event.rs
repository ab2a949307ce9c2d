// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads delivered by the host.

use kurbo::Point;
use smallvec::SmallVec;

/// Kind of a delivered event.
///
/// Contact kinds come from a touch surface. [`EventKind::Activation`] is the click a
/// pointing device produces, or the synthetic click a touch platform emits after a tap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A finger touched the surface.
    ContactStart,
    /// A tracked finger moved.
    ContactMove,
    /// A tracked finger lifted.
    ContactEnd,
    /// A click, real or synthetic.
    Activation,
}

impl EventKind {
    /// DOM-style event type name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ContactStart => "touchstart",
            Self::ContactMove => "touchmove",
            Self::ContactEnd => "touchend",
            Self::Activation => "click",
        }
    }

    /// Whether this kind originates from the touch path.
    pub const fn is_contact(self) -> bool {
        !matches!(self, Self::Activation)
    }
}

/// A delivered event.
///
/// Coordinates are in client space. Touch events carry the active contacts in
/// [`Event::touches`]; activations carry the pointer in [`Event::position`]. Either may be
/// missing, in which case consumers treat the event as malformed and ignore it.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Primary pointer position, if the host supplied one.
    pub position: Option<Point>,
    /// Active contacts, first contact first.
    pub touches: SmallVec<[Point; 2]>,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl Event {
    /// Create an event with no coordinate data.
    pub fn new(kind: EventKind, timestamp: u64) -> Self {
        Self {
            kind,
            position: None,
            touches: SmallVec::new(),
            timestamp,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// A single-finger contact start at `at`.
    pub fn contact_start(at: Point, timestamp: u64) -> Self {
        Self::new(EventKind::ContactStart, timestamp).with_touch(at)
    }

    /// A single-finger contact move to `at`.
    pub fn contact_move(at: Point, timestamp: u64) -> Self {
        Self::new(EventKind::ContactMove, timestamp).with_touch(at)
    }

    /// A contact end. Lifted fingers are no longer active, so no coordinates are attached.
    pub fn contact_end(timestamp: u64) -> Self {
        Self::new(EventKind::ContactEnd, timestamp)
    }

    /// A click at `at`.
    pub fn activation(at: Point, timestamp: u64) -> Self {
        Self::new(EventKind::Activation, timestamp).with_position(at)
    }

    /// Set the primary pointer position.
    #[must_use]
    pub fn with_position(mut self, at: Point) -> Self {
        self.position = Some(at);
        self
    }

    /// Append an active contact.
    #[must_use]
    pub fn with_touch(mut self, at: Point) -> Self {
        self.touches.push(at);
        self
    }

    /// The point gesture logic should use: the first contact, else the pointer position.
    pub fn primary_point(&self) -> Option<Point> {
        self.touches.first().copied().or(self.position)
    }

    /// Stop delivery to any further listener along the route.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Ask the host to skip its default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether [`Event::stop_propagation`] was called.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Whether [`Event::prevent_default`] was called.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
