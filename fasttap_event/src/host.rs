// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registration capability.
//!
//! A host owns the node tree and delivers events. Consumers only need to tell it which
//! listener wants which event kind on which node. Delivery itself is the host's business:
//! when an event reaches a registration, the host calls back into the listener identified
//! by [`Registration::listener`].

use crate::event::EventKind;

/// Opaque handle naming one listener object to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Propagation phase of a delivery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root toward the target's parent, capture listeners only.
    Capture,
    /// The target itself, all listeners.
    Target,
    /// Target's parent toward the root, non-capture listeners only.
    Bubble,
}

/// One listener registration.
///
/// Two registrations are the same iff all fields are equal. Adding an existing one is a
/// no-op and removing an absent one is a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Registration<K> {
    /// Who to call.
    pub listener: ListenerId,
    /// Node the listener is attached to.
    pub node: K,
    /// Event kind listened for.
    pub kind: EventKind,
    /// Whether the listener runs during capture rather than bubble.
    pub capture: bool,
}

impl<K> Registration<K> {
    /// A non-capturing registration.
    pub fn new(listener: ListenerId, node: K, kind: EventKind) -> Self {
        Self {
            listener,
            node,
            kind,
            capture: false,
        }
    }

    /// The same registration in the capture phase.
    #[must_use]
    pub fn capturing(mut self) -> Self {
        self.capture = true;
        self
    }
}

/// Ability to register and deregister listeners on nodes.
pub trait ListenerHost<K> {
    /// Register a listener. Registering an existing tuple must be a no-op.
    fn add_listener(&mut self, registration: Registration<K>);

    /// Deregister a listener. Removing an absent tuple must be a no-op.
    fn remove_listener(&mut self, registration: &Registration<K>);
}

impl<K, H: ListenerHost<K> + ?Sized> ListenerHost<K> for &mut H {
    fn add_listener(&mut self, registration: Registration<K>) {
        (**self).add_listener(registration);
    }

    fn remove_listener(&mut self, registration: &Registration<K>) {
        (**self).remove_listener(registration);
    }
}
