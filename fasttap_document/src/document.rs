// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node tree plus listener registry.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use fasttap_event::{EventKind, ListenerHost, ListenerId, Phase, Registration};

use crate::dispatch::Delivery;

/// Errors from structural edits to a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// The node is already part of the document.
    #[error("node is already in the document")]
    DuplicateNode,
    /// The requested parent is not part of the document.
    #[error("parent node is not in the document")]
    UnknownParent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Listening {
    listener: ListenerId,
    kind: EventKind,
    capture: bool,
}

/// In-memory event host.
///
/// Nodes are small copyable keys. Each node has at most one parent; nodes inserted with no
/// parent are roots. Listeners are kept per node in registration order.
#[derive(Clone, Debug)]
pub struct Document<K> {
    parents: HashMap<K, Option<K>>,
    listeners: HashMap<K, SmallVec<[Listening; 4]>>,
}

impl<K: Copy + Eq + Hash> Default for Document<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> Document<K> {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
            listeners: HashMap::new(),
        }
    }

    /// Insert `node` under `parent`, or as a root when `parent` is `None`.
    pub fn insert(&mut self, parent: Option<K>, node: K) -> Result<(), DocumentError> {
        if self.parents.contains_key(&node) {
            return Err(DocumentError::DuplicateNode);
        }
        if let Some(p) = parent
            && !self.parents.contains_key(&p)
        {
            return Err(DocumentError::UnknownParent);
        }
        self.parents.insert(node, parent);
        Ok(())
    }

    /// Remove `node`, its descendants, and every listener attached to them.
    ///
    /// Returns `false` if the node was not present.
    pub fn remove(&mut self, node: K) -> bool {
        if !self.parents.contains_key(&node) {
            return false;
        }
        let doomed: Vec<K> = self
            .parents
            .keys()
            .copied()
            .filter(|&n| self.is_ancestor_or_self(node, n))
            .collect();
        for n in doomed {
            self.parents.remove(&n);
            self.listeners.remove(&n);
        }
        true
    }

    /// Whether `node` is in the document.
    pub fn contains(&self, node: K) -> bool {
        self.parents.contains_key(&node)
    }

    /// Parent of `node`, if it has one.
    pub fn parent_of(&self, node: K) -> Option<K> {
        self.parents.get(&node).copied().flatten()
    }

    /// Root → `node` path. Empty if `node` is not in the document.
    pub fn path_to(&self, node: K) -> Vec<K> {
        let mut out = Vec::new();
        if !self.contains(node) {
            return out;
        }
        let mut cur = node;
        // Insertion only links to existing nodes, so ancestry is acyclic.
        loop {
            out.push(cur);
            match self.parent_of(cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    /// Whether a registration identical to `registration` exists.
    pub fn has_listener(&self, registration: &Registration<K>) -> bool {
        self.listeners
            .get(&registration.node)
            .is_some_and(|ls| ls.contains(&Listening::from(registration)))
    }

    /// Registrations on `node`, in registration order.
    pub fn listeners_on(&self, node: K) -> impl Iterator<Item = Registration<K>> + '_ {
        self.listeners
            .get(&node)
            .into_iter()
            .flatten()
            .map(move |l| Registration {
                listener: l.listener,
                node,
                kind: l.kind,
                capture: l.capture,
            })
    }

    /// Total number of registrations across all nodes.
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(|ls| ls.len()).sum()
    }

    /// Number of registrations held by `listener`.
    pub fn listener_count_for(&self, listener: ListenerId) -> usize {
        self.listeners
            .values()
            .flatten()
            .filter(|l| l.listener == listener)
            .count()
    }

    /// Capture → target → bubble deliveries of a `kind` event aimed at `target`.
    ///
    /// - Capture: capture listeners on ancestors, root first.
    /// - Target: every listener on the target, capture listeners before the others,
    ///   each group in registration order.
    /// - Bubble: non-capture listeners on ancestors, parent first.
    ///
    /// Returns an empty sequence if `target` is not in the document.
    pub fn route(&self, target: K, kind: EventKind) -> Vec<Delivery<K>> {
        let path = self.path_to(target);
        let mut out = Vec::new();
        let Some((&target, ancestors)) = path.split_last() else {
            return out;
        };

        for &n in ancestors {
            self.push_matching(&mut out, n, Phase::Capture, kind, true);
        }
        self.push_matching(&mut out, target, Phase::Target, kind, true);
        self.push_matching(&mut out, target, Phase::Target, kind, false);
        for &n in ancestors.iter().rev() {
            self.push_matching(&mut out, n, Phase::Bubble, kind, false);
        }
        out
    }

    fn push_matching(
        &self,
        out: &mut Vec<Delivery<K>>,
        node: K,
        phase: Phase,
        kind: EventKind,
        capture: bool,
    ) {
        let Some(ls) = self.listeners.get(&node) else {
            return;
        };
        out.extend(
            ls.iter()
                .filter(|l| l.kind == kind && l.capture == capture)
                .map(|l| Delivery {
                    phase,
                    node,
                    listener: l.listener,
                }),
        );
    }

    fn is_ancestor_or_self(&self, ancestor: K, mut node: K) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.parent_of(node) {
                Some(p) => node = p,
                None => return false,
            }
        }
    }
}

impl<K: Copy + Eq + Hash> ListenerHost<K> for Document<K> {
    fn add_listener(&mut self, registration: Registration<K>) {
        let entry = Listening::from(&registration);
        let ls = self.listeners.entry(registration.node).or_default();
        if !ls.contains(&entry) {
            ls.push(entry);
        }
    }

    fn remove_listener(&mut self, registration: &Registration<K>) {
        let entry = Listening::from(registration);
        if let Some(ls) = self.listeners.get_mut(&registration.node) {
            ls.retain(|l| *l != entry);
            if ls.is_empty() {
                self.listeners.remove(&registration.node);
            }
        }
    }
}

impl<K> From<&Registration<K>> for Listening {
    fn from(r: &Registration<K>) -> Self {
        Self {
            listener: r.listener,
            kind: r.kind,
            capture: r.capture,
        }
    }
}
