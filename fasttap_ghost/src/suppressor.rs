// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use fasttap_event::{Clock, Event, EventKind, ListenerHost, ListenerId, Registration, TapConfig};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// Receiver of completed touch taps.
///
/// Gesture detectors hold this as a shared collaborator and call it once per tap that
/// completed on the touch path.
pub trait TapSink {
    /// Record a tap whose contact started at `at`.
    fn report_point(&self, at: Point);
}

/// A reported tap that may still suppress clicks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingTap {
    /// Where the tap's contact started.
    pub point: Point,
    /// Clock time at which the entry stops suppressing.
    pub expires_at: u64,
}

impl PendingTap {
    /// Whether the entry still suppresses at `now`.
    pub fn is_live(&self, now: u64) -> bool {
        self.expires_at > now
    }

    /// Whether `at` lies strictly within `threshold` of this entry on both axes.
    pub fn covers(&self, at: Point, threshold: f64) -> bool {
        (at.x - self.point.x).abs() < threshold && (at.y - self.point.y).abs() < threshold
    }
}

/// Registry of recent taps plus the capture-phase click interceptor.
///
/// All methods take `&self`; the registry lives in a [`RefCell`] so one instance can be
/// shared by `Rc` between every detector and the host's listener table.
#[derive(Debug)]
pub struct GhostClickSuppressor<C> {
    config: TapConfig,
    clock: C,
    // Insertion order; `expires_at` is non-decreasing for a monotonic clock.
    pending: RefCell<VecDeque<PendingTap>>,
    // Entries pruned before their scheduled `expire_oldest` ran.
    retired: Cell<usize>,
}

impl<C: Clock> GhostClickSuppressor<C> {
    /// Create a suppressor with the default thresholds.
    pub fn new(clock: C) -> Self {
        Self::with_config(TapConfig::default(), clock)
    }

    /// Create a suppressor with explicit thresholds.
    ///
    /// Only [`TapConfig::space_threshold`] and [`TapConfig::suppress_window_ms`] are used.
    pub fn with_config(config: TapConfig, clock: C) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "ghost click suppressor built from an invalid config: {config:?}"
        );
        Self {
            config,
            clock,
            pending: RefCell::new(VecDeque::new()),
            retired: Cell::new(0),
        }
    }

    /// Active thresholds.
    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// The clock used for expiry.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The registration [`install`](Self::install) adds: a capture-phase click listener
    /// on `root`.
    pub fn registration<K>(listener: ListenerId, root: K) -> Registration<K> {
        Registration::new(listener, root, EventKind::Activation).capturing()
    }

    /// Attach the interceptor to `root`. The host must route deliveries for `listener`
    /// to [`handle`](Self::handle).
    ///
    /// Installing again with the same arguments is harmless.
    pub fn install<K>(&self, host: &mut impl ListenerHost<K>, listener: ListenerId, root: K) {
        host.add_listener(Self::registration(listener, root));
        tracing::debug!(listener = listener.0, "ghost click suppressor installed");
    }

    /// Record a tap at `(x, y)`, suppressing nearby clicks for the configured window.
    pub fn report(&self, x: f64, y: f64) {
        let now = self.clock.now();
        let expires_at = now.saturating_add(self.config.suppress_window_ms);
        let mut pending = self.pending.borrow_mut();
        let mut pruned = 0;
        while pending.front().is_some_and(|p| !p.is_live(now)) {
            pending.pop_front();
            pruned += 1;
        }
        self.retire(pruned);
        pending.push_back(PendingTap {
            point: Point::new(x, y),
            expires_at,
        });
        tracing::debug!(x, y, expires_at, pending = pending.len(), "tap reported");
    }

    /// Drop the oldest entry, live or not.
    ///
    /// For hosts that prefer to schedule one expiry per report instead of relying on
    /// lazy expiry. Entries leave in the order they were reported.
    ///
    /// Entries already pruned by [`report`](Self::report) or
    /// [`prune_expired`](Self::prune_expired) still count: the call that was scheduled
    /// for such an entry removes nothing and returns `None`, so a late timer never takes
    /// a younger, live entry with it.
    pub fn expire_oldest(&self) -> Option<PendingTap> {
        let retired = self.retired.get();
        if retired > 0 {
            self.retired.set(retired - 1);
            return None;
        }
        self.pending.borrow_mut().pop_front()
    }

    fn retire(&self, pruned: usize) {
        self.retired.set(self.retired.get().saturating_add(pruned));
    }

    /// Drop every entry that no longer suppresses. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        let now = self.clock.now();
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|p| p.is_live(now));
        let pruned = before - pending.len();
        self.retire(pruned);
        pruned
    }

    /// Whether a click at `at` would be suppressed right now.
    pub fn would_suppress(&self, at: Point) -> bool {
        let now = self.clock.now();
        let threshold = self.config.space_threshold;
        self.pending
            .borrow()
            .iter()
            .any(|p| p.is_live(now) && p.covers(at, threshold))
    }

    /// Cancel `event` if it is a click landing near a live entry.
    ///
    /// Non-click events and clicks without a position are left alone. Returns whether
    /// the event was suppressed.
    pub fn intercept(&self, event: &mut Event) -> bool {
        if event.kind != EventKind::Activation {
            return false;
        }
        let Some(at) = event.position else {
            tracing::trace!("click without coordinates, not intercepted");
            return false;
        };
        if !self.would_suppress(at) {
            return false;
        }
        event.stop_propagation();
        event.prevent_default();
        tracing::debug!(x = at.x, y = at.y, "ghost click suppressed");
        true
    }

    /// Listener entry point for deliveries to the installed registration.
    pub fn handle(&self, event: &mut Event) -> bool {
        self.intercept(event)
    }

    /// Snapshot of the live entries, oldest first.
    pub fn pending(&self) -> Vec<PendingTap> {
        let now = self.clock.now();
        self.pending
            .borrow()
            .iter()
            .filter(|p| p.is_live(now))
            .copied()
            .collect()
    }

    /// Number of live entries.
    pub fn pending_len(&self) -> usize {
        let now = self.clock.now();
        self.pending
            .borrow()
            .iter()
            .filter(|p| p.is_live(now))
            .count()
    }

    /// Whether no entry is live.
    pub fn is_empty(&self) -> bool {
        self.pending_len() == 0
    }
}

impl<C: Clock> TapSink for GhostClickSuppressor<C> {
    fn report_point(&self, at: Point) {
        self.report(at.x, at.y);
    }
}
