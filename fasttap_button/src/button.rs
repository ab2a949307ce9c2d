// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;

use fasttap_event::{Event, EventKind, ListenerHost, ListenerId, Registration, TapConfig};
use fasttap_ghost::TapSink;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// Lifecycle of a [`GestureButton`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// Waiting for a contact.
    Idle,
    /// A contact is down and has not moved past the drag threshold.
    Tracking,
    /// All listeners removed; every event is ignored.
    Disposed,
}

bitflags::bitflags! {
    /// Listener registrations a [`GestureButton`] currently holds.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Listening: u8 {
        /// Contact start on the element.
        const CONTACT_START = 1 << 0;
        /// Click on the element.
        const ACTIVATION = 1 << 1;
        /// Contact end on the element, while tracking.
        const CONTACT_END = 1 << 2;
        /// Contact move on the root, while tracking.
        const ROOT_MOVE = 1 << 3;

        /// Held for the whole life of the button.
        const PERMANENT = Self::CONTACT_START.bits() | Self::ACTIVATION.bits();
        /// Held only while a gesture is tracked.
        const TRANSIENT = Self::CONTACT_END.bits() | Self::ROOT_MOVE.bits();
    }
}

impl Listening {
    // Single registrations, in the order they are added.
    const EACH: [Self; 4] = [
        Self::CONTACT_START,
        Self::ACTIVATION,
        Self::CONTACT_END,
        Self::ROOT_MOVE,
    ];
}

/// Tap-vs-drag detector bound to one element.
///
/// ## Usage
///
/// - Construct with [`GestureButton::new`] or [`GestureButton::with_config`]. This
///   registers the permanent contact-start and click listeners on the element.
/// - Route every delivery for the button's [`ListenerId`] to [`GestureButton::handle`].
/// - Call [`GestureButton::dispose`] when the element goes away.
///
/// `S` is the shared tap sink, usually a
/// [`GhostClickSuppressor`](fasttap_ghost::GhostClickSuppressor).
pub struct GestureButton<K, H, S: ?Sized = dyn TapSink> {
    listener: ListenerId,
    element: K,
    root: K,
    handler: H,
    sink: Rc<S>,
    drag_threshold: f64,
    state: GestureState,
    start: Option<Point>,
    listening: Listening,
}

impl<K: core::fmt::Debug, H, S: ?Sized> core::fmt::Debug for GestureButton<K, H, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureButton")
            .field("listener", &self.listener)
            .field("element", &self.element)
            .field("state", &self.state)
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}

impl<K, H, S> GestureButton<K, H, S>
where
    K: Copy,
    H: FnMut(&mut Event),
    S: TapSink + ?Sized,
{
    /// Bind `handler` to `element` with the default drag threshold.
    ///
    /// `root` is the shared ancestor that receives the move listener while tracking.
    pub fn new(
        host: &mut impl ListenerHost<K>,
        listener: ListenerId,
        element: K,
        root: K,
        sink: Rc<S>,
        handler: H,
    ) -> Self {
        Self::with_config(
            host,
            listener,
            element,
            root,
            sink,
            &TapConfig::default(),
            handler,
        )
    }

    /// Bind `handler` to `element`, taking the drag threshold from `config`.
    pub fn with_config(
        host: &mut impl ListenerHost<K>,
        listener: ListenerId,
        element: K,
        root: K,
        sink: Rc<S>,
        config: &TapConfig,
        handler: H,
    ) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "gesture button built from an invalid config: {config:?}"
        );
        let mut button = Self {
            listener,
            element,
            root,
            handler,
            sink,
            drag_threshold: config.drag_threshold,
            state: GestureState::Idle,
            start: None,
            listening: Listening::empty(),
        };
        button.listen(host, Listening::PERMANENT);
        button
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// The element this button is bound to.
    pub fn element(&self) -> K {
        self.element
    }

    /// The id the host uses to deliver events to this button.
    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Start point of the tracked contact, if any.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Registrations currently held.
    pub fn listening(&self) -> Listening {
        self.listening
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.state == GestureState::Disposed
    }

    /// Route a delivered event to the transition for its kind.
    pub fn handle(&mut self, host: &mut impl ListenerHost<K>, event: &mut Event) {
        match event.kind {
            EventKind::ContactStart => self.on_contact_start(host, event),
            EventKind::ContactMove => self.on_contact_move(host, event),
            EventKind::ContactEnd | EventKind::Activation => self.on_completion(host, event),
        }
    }

    /// `Idle` → `Tracking`.
    pub fn on_contact_start(&mut self, host: &mut impl ListenerHost<K>, event: &mut Event) {
        if self.state != GestureState::Idle {
            tracing::trace!(state = ?self.state, "contact start ignored");
            return;
        }
        let Some(at) = event.primary_point() else {
            tracing::trace!("contact start without coordinates ignored");
            return;
        };
        event.stop_propagation();
        self.start = Some(at);
        self.listen(host, Listening::TRANSIENT);
        self.state = GestureState::Tracking;
        tracing::trace!(x = at.x, y = at.y, "tracking contact");
    }

    /// Cancels the gesture once the contact drifts past the drag threshold on either axis.
    pub fn on_contact_move(&mut self, host: &mut impl ListenerHost<K>, event: &mut Event) {
        if self.state != GestureState::Tracking {
            return;
        }
        let (Some(start), Some(at)) = (self.start, event.primary_point()) else {
            return;
        };
        let dx = (at.x - start.x).abs();
        let dy = (at.y - start.y).abs();
        if dx > self.drag_threshold || dy > self.drag_threshold {
            tracing::debug!(dx, dy, "drag detected, tap cancelled");
            self.reset(host);
        }
    }

    /// Finish a gesture: contact end while tracking, or a click in any live state.
    ///
    /// Stops propagation, resets, and runs the handler. A contact end also reports the
    /// contact's start point to the sink, after the handler returns. Other contact kinds
    /// are ignored.
    pub fn on_completion(&mut self, host: &mut impl ListenerHost<K>, event: &mut Event) {
        let origin = match (event.kind, self.state) {
            (_, GestureState::Disposed) => return,
            (kind, _) if !kind.is_contact() => None,
            (EventKind::ContactEnd, GestureState::Tracking) => self.start,
            (kind, _) => {
                tracing::trace!(kind = kind.name(), "contact without tracked gesture ignored");
                return;
            }
        };
        event.stop_propagation();
        self.reset(host);
        tracing::debug!(kind = event.kind.name(), "tap completed");
        (self.handler)(event);
        if let Some(at) = origin {
            self.sink.report_point(at);
        }
    }

    /// Drop the tracked gesture, if any, and return to `Idle`.
    ///
    /// Safe to call in any state.
    pub fn reset(&mut self, host: &mut impl ListenerHost<K>) {
        self.unlisten(host, Listening::TRANSIENT);
        self.start = None;
        if self.state == GestureState::Tracking {
            self.state = GestureState::Idle;
        }
    }

    /// Remove every listener and stop responding to events. Idempotent.
    pub fn dispose(&mut self, host: &mut impl ListenerHost<K>) {
        self.reset(host);
        self.unlisten(host, Listening::PERMANENT);
        if self.state != GestureState::Disposed {
            tracing::debug!(listener = self.listener.0, "gesture button disposed");
        }
        self.state = GestureState::Disposed;
    }

    fn registration(&self, which: Listening) -> Registration<K> {
        let (node, kind) = if which == Listening::CONTACT_START {
            (self.element, EventKind::ContactStart)
        } else if which == Listening::ACTIVATION {
            (self.element, EventKind::Activation)
        } else if which == Listening::CONTACT_END {
            (self.element, EventKind::ContactEnd)
        } else {
            (self.root, EventKind::ContactMove)
        };
        Registration::new(self.listener, node, kind)
    }

    fn listen(&mut self, host: &mut impl ListenerHost<K>, which: Listening) {
        let missing = which - self.listening;
        for flag in Listening::EACH.into_iter().filter(|f| missing.contains(*f)) {
            host.add_listener(self.registration(flag));
        }
        self.listening |= which;
    }

    fn unlisten(&mut self, host: &mut impl ListenerHost<K>, which: Listening) {
        let held = which & self.listening;
        for flag in Listening::EACH.into_iter().filter(|f| held.contains(*f)) {
            host.remove_listener(&self.registration(flag));
        }
        self.listening -= which;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use fasttap_document::{Document, dispatch};
    use fasttap_event::{Clock, ManualClock};
    use fasttap_ghost::GhostClickSuppressor;

    const ROOT: u32 = 1;
    const BUTTON_A: u32 = 2;
    const BUTTON_B: u32 = 3;
    const PANEL: u32 = 4;
    const GHOST: ListenerId = ListenerId(0);

    type Handler = Box<dyn FnMut(&mut Event)>;
    type Ghost = GhostClickSuppressor<Rc<ManualClock>>;

    /// A root with two buttons and an unrelated panel, a shared suppressor, and a
    /// listener table mapping ids to buttons.
    struct Page {
        doc: Document<u32>,
        clock: Rc<ManualClock>,
        ghost: Rc<Ghost>,
        buttons: Vec<GestureButton<u32, Handler, Ghost>>,
        taps: Vec<Rc<Cell<u32>>>,
        root_hits: Rc<Cell<u32>>,
    }

    impl Page {
        fn new() -> Self {
            let mut doc = Document::new();
            doc.insert(None, ROOT).unwrap();
            doc.insert(Some(ROOT), BUTTON_A).unwrap();
            doc.insert(Some(ROOT), BUTTON_B).unwrap();
            doc.insert(Some(ROOT), PANEL).unwrap();

            let clock = Rc::new(ManualClock::new(0));
            let ghost = Rc::new(GhostClickSuppressor::new(Rc::clone(&clock)));
            ghost.install(&mut doc, GHOST, ROOT);

            let mut page = Self {
                doc,
                clock,
                ghost,
                buttons: Vec::new(),
                taps: Vec::new(),
                root_hits: Rc::new(Cell::new(0)),
            };
            page.bind(BUTTON_A);
            page.bind(BUTTON_B);
            page
        }

        fn bind(&mut self, element: u32) {
            let count = Rc::new(Cell::new(0));
            let seen = Rc::clone(&count);
            let id = ListenerId(u32::try_from(self.buttons.len()).unwrap() + 1);
            let handler: Handler = Box::new(move |_: &mut Event| seen.set(seen.get() + 1));
            let button = GestureButton::new(
                &mut self.doc,
                id,
                element,
                ROOT,
                Rc::clone(&self.ghost),
                handler,
            );
            self.buttons.push(button);
            self.taps.push(count);
        }

        fn button(&self, n: usize) -> &GestureButton<u32, Handler, Ghost> {
            &self.buttons[n]
        }

        fn taps(&self, n: usize) -> u32 {
            self.taps[n].get()
        }

        fn dispatch(&mut self, target: u32, mut event: Event) -> Event {
            let route = self.doc.route(target, event.kind);
            let Self {
                doc,
                ghost,
                buttons,
                root_hits,
                ..
            } = self;
            dispatch::run(&route, &mut event, |d, e| {
                if d.listener == GHOST {
                    ghost.handle(e);
                } else if d.listener == ListenerId(99) {
                    root_hits.set(root_hits.get() + 1);
                } else {
                    buttons[d.listener.0 as usize - 1].handle(&mut *doc, e);
                }
            });
            event
        }

        fn at(&self, ms: u64) {
            self.clock.set(ms);
        }

        fn touch_start(&mut self, target: u32, x: f64, y: f64) -> Event {
            let now = self.clock.now();
            self.dispatch(target, Event::contact_start(Point::new(x, y), now))
        }

        fn touch_move(&mut self, target: u32, x: f64, y: f64) -> Event {
            let now = self.clock.now();
            self.dispatch(target, Event::contact_move(Point::new(x, y), now))
        }

        fn touch_end(&mut self, target: u32) -> Event {
            let now = self.clock.now();
            self.dispatch(target, Event::contact_end(now))
        }

        fn click(&mut self, target: u32, x: f64, y: f64) -> Event {
            let now = self.clock.now();
            self.dispatch(target, Event::activation(Point::new(x, y), now))
        }
    }

    #[derive(Default)]
    struct Recorder {
        reports: RefCell<Vec<Point>>,
    }

    impl TapSink for Recorder {
        fn report_point(&self, at: Point) {
            self.reports.borrow_mut().push(at);
        }
    }

    #[test]
    fn tap_fires_handler_and_suppresses_trailing_click() {
        let mut page = Page::new();

        page.touch_start(BUTTON_A, 100.0, 100.0);
        assert_eq!(page.button(0).state(), GestureState::Tracking);
        page.at(60);
        page.touch_end(BUTTON_A);

        assert_eq!(page.taps(0), 1);
        assert_eq!(page.button(0).state(), GestureState::Idle);
        assert_eq!(page.ghost.pending_len(), 1);
        assert_eq!(page.ghost.pending()[0].point, Point::new(100.0, 100.0));

        // Synthetic click 300ms after the tap: swallowed before reaching the button.
        page.at(360);
        let ev = page.click(BUTTON_A, 105.0, 95.0);
        assert!(ev.is_propagation_stopped());
        assert!(ev.is_default_prevented());
        assert_eq!(page.taps(0), 1);

        // The same click long after the window goes through as an ordinary click.
        page.at(1160);
        let ev = page.click(BUTTON_A, 105.0, 95.0);
        assert!(!ev.is_default_prevented());
        assert_eq!(page.taps(0), 2);
        assert!(page.ghost.is_empty());
    }

    #[test]
    fn drag_past_threshold_cancels_tap() {
        let mut page = Page::new();

        page.touch_start(BUTTON_A, 50.0, 50.0);
        page.touch_move(BUTTON_A, 65.0, 50.0);

        assert_eq!(page.button(0).state(), GestureState::Idle);
        assert!(!page.button(0).listening().intersects(Listening::TRANSIENT));
        // The end listener is gone, so lifting the finger does nothing.
        page.touch_end(BUTTON_A);
        assert_eq!(page.taps(0), 0);
        assert!(page.ghost.is_empty());
    }

    #[test]
    fn vertical_drag_cancels_tap() {
        let mut page = Page::new();
        page.touch_start(BUTTON_A, 50.0, 50.0);
        page.touch_move(BUTTON_A, 52.0, 39.0);
        assert_eq!(page.button(0).state(), GestureState::Idle);
    }

    #[test]
    fn jitter_within_threshold_still_taps() {
        let mut page = Page::new();

        page.touch_start(BUTTON_A, 50.0, 50.0);
        page.touch_move(BUTTON_A, 58.0, 45.0);
        // Exactly at the threshold is still a tap.
        page.touch_move(BUTTON_A, 60.0, 40.0);
        assert_eq!(page.button(0).state(), GestureState::Tracking);
        page.touch_end(BUTTON_A);

        assert_eq!(page.taps(0), 1);
        // The report is the start point, not where the finger lifted.
        assert_eq!(page.ghost.pending()[0].point, Point::new(50.0, 50.0));
    }

    // The move listener sits on the root, so movement over other elements still counts.
    #[test]
    fn drag_off_the_element_cancels_tap() {
        let mut page = Page::new();
        page.touch_start(BUTTON_A, 50.0, 50.0);
        page.touch_move(PANEL, 200.0, 300.0);
        assert_eq!(page.button(0).state(), GestureState::Idle);
        page.touch_end(BUTTON_A);
        assert_eq!(page.taps(0), 0);
    }

    #[test]
    fn click_without_contact_fires_without_report() {
        let mut page = Page::new();
        let ev = page.click(BUTTON_A, 10.0, 10.0);
        assert_eq!(page.taps(0), 1);
        assert!(ev.is_propagation_stopped());
        assert!(page.ghost.is_empty());
    }

    #[test]
    fn contact_start_does_not_reach_ancestors() {
        let mut page = Page::new();
        page.doc.add_listener(Registration::new(
            ListenerId(99),
            ROOT,
            EventKind::ContactStart,
        ));
        let ev = page.touch_start(BUTTON_A, 1.0, 1.0);
        assert!(ev.is_propagation_stopped());
        assert!(!ev.is_default_prevented());
        assert_eq!(page.root_hits.get(), 0);
    }

    #[test]
    fn button_click_does_not_bubble_to_root() {
        let mut page = Page::new();
        page.doc.add_listener(Registration::new(
            ListenerId(99),
            ROOT,
            EventKind::Activation,
        ));
        page.click(BUTTON_A, 10.0, 10.0);
        assert_eq!(page.root_hits.get(), 0);
        page.click(PANEL, 300.0, 300.0);
        assert_eq!(page.root_hits.get(), 1);
    }

    #[test]
    fn machine_is_reusable() {
        let mut page = Page::new();

        page.touch_start(BUTTON_A, 0.0, 0.0);
        page.touch_end(BUTTON_A);
        page.touch_start(BUTTON_A, 0.0, 0.0);
        page.touch_move(BUTTON_A, 0.0, 40.0);
        page.touch_end(BUTTON_A);
        page.touch_start(BUTTON_A, 0.0, 0.0);
        page.touch_end(BUTTON_A);

        assert_eq!(page.taps(0), 2);
        assert_eq!(page.ghost.pending_len(), 2);
    }

    #[test]
    fn buttons_report_independently() {
        let mut page = Page::new();

        page.touch_start(BUTTON_A, 100.0, 100.0);
        page.touch_end(BUTTON_A);
        page.at(700);
        page.touch_start(BUTTON_B, 400.0, 100.0);
        page.touch_end(BUTTON_B);
        assert_eq!(page.taps(0), 1);
        assert_eq!(page.taps(1), 1);

        // A's entry has expired; B's is still live.
        page.at(1200);
        page.click(BUTTON_A, 100.0, 100.0);
        assert_eq!(page.taps(0), 2);
        let ev = page.click(BUTTON_B, 400.0, 100.0);
        assert!(ev.is_default_prevented());
        assert_eq!(page.taps(1), 1);
    }

    #[test]
    fn dispose_twice_leaves_no_listeners() {
        let mut page = Page::new();
        let id = page.button(0).listener();
        assert_eq!(page.doc.listener_count_for(id), 2);

        page.touch_start(BUTTON_A, 5.0, 5.0);
        assert_eq!(page.doc.listener_count_for(id), 4);

        let Page { doc, buttons, .. } = &mut page;
        buttons[0].dispose(doc);
        buttons[0].dispose(doc);

        assert!(page.button(0).is_disposed());
        assert_eq!(page.button(0).listening(), Listening::empty());
        assert_eq!(page.doc.listener_count_for(id), 0);
        // Other button and the suppressor are untouched.
        assert_eq!(page.doc.listener_count(), 3);
    }

    #[test]
    fn disposed_button_ignores_direct_calls() {
        let sink = Rc::new(Recorder::default());
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        doc.insert(Some(ROOT), BUTTON_A).unwrap();
        let fired = Rc::new(Cell::new(0));
        let seen = Rc::clone(&fired);
        let mut button = GestureButton::new(
            &mut doc,
            ListenerId(1),
            BUTTON_A,
            ROOT,
            Rc::clone(&sink),
            move |_: &mut Event| seen.set(seen.get() + 1),
        );
        button.dispose(&mut doc);

        button.handle(&mut doc, &mut Event::contact_start(Point::ZERO, 0));
        button.handle(&mut doc, &mut Event::contact_end(0));
        button.handle(&mut doc, &mut Event::activation(Point::ZERO, 0));

        assert_eq!(fired.get(), 0);
        assert_eq!(button.state(), GestureState::Disposed);
        assert_eq!(doc.listener_count(), 0);
        assert!(sink.reports.borrow().is_empty());
    }

    #[test]
    fn missing_coordinates_are_ignored() {
        let mut page = Page::new();

        let ev = page.dispatch(BUTTON_A, Event::new(EventKind::ContactStart, 0));
        assert!(!ev.is_propagation_stopped());
        assert_eq!(page.button(0).state(), GestureState::Idle);

        page.touch_start(BUTTON_A, 20.0, 20.0);
        page.dispatch(BUTTON_A, Event::new(EventKind::ContactMove, 0));
        assert_eq!(page.button(0).state(), GestureState::Tracking);
        page.touch_end(BUTTON_A);
        assert_eq!(page.taps(0), 1);
    }

    #[test]
    fn second_contact_start_while_tracking_is_ignored() {
        let sink = Rc::new(Recorder::default());
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        doc.insert(Some(ROOT), BUTTON_A).unwrap();
        let mut button = GestureButton::new(
            &mut doc,
            ListenerId(1),
            BUTTON_A,
            ROOT,
            Rc::clone(&sink),
            |_: &mut Event| {},
        );

        button.handle(&mut doc, &mut Event::contact_start(Point::new(1.0, 1.0), 0));
        let mut second = Event::contact_start(Point::new(90.0, 90.0), 5);
        button.handle(&mut doc, &mut second);
        assert!(!second.is_propagation_stopped());
        assert_eq!(button.start(), Some(Point::new(1.0, 1.0)));

        button.handle(&mut doc, &mut Event::contact_end(10));
        assert_eq!(*sink.reports.borrow(), vec![Point::new(1.0, 1.0)]);
    }

    #[test]
    fn stray_contact_end_is_ignored() {
        let sink = Rc::new(Recorder::default());
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        doc.insert(Some(ROOT), BUTTON_A).unwrap();
        let fired = Rc::new(Cell::new(false));
        let seen = Rc::clone(&fired);
        let mut button = GestureButton::new(
            &mut doc,
            ListenerId(1),
            BUTTON_A,
            ROOT,
            Rc::clone(&sink),
            move |_: &mut Event| seen.set(true),
        );

        let mut end = Event::contact_end(0);
        button.handle(&mut doc, &mut end);
        assert!(!fired.get());
        assert!(!end.is_propagation_stopped());
        assert!(sink.reports.borrow().is_empty());
    }

    #[test]
    fn click_while_tracking_completes_without_report() {
        let sink = Rc::new(Recorder::default());
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        doc.insert(Some(ROOT), BUTTON_A).unwrap();
        let fired = Rc::new(Cell::new(0));
        let seen = Rc::clone(&fired);
        let mut button = GestureButton::new(
            &mut doc,
            ListenerId(1),
            BUTTON_A,
            ROOT,
            Rc::clone(&sink),
            move |_: &mut Event| seen.set(seen.get() + 1),
        );

        button.handle(&mut doc, &mut Event::contact_start(Point::new(3.0, 3.0), 0));
        button.handle(&mut doc, &mut Event::activation(Point::new(3.0, 3.0), 1));

        assert_eq!(fired.get(), 1);
        assert_eq!(button.state(), GestureState::Idle);
        assert_eq!(button.listening(), Listening::PERMANENT);
        assert!(sink.reports.borrow().is_empty());
    }

    #[test]
    fn handler_sees_terminating_event() {
        let sink = Rc::new(Recorder::default());
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        doc.insert(Some(ROOT), BUTTON_A).unwrap();
        let kinds = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&kinds);
        let mut button = GestureButton::new(
            &mut doc,
            ListenerId(1),
            BUTTON_A,
            ROOT,
            Rc::clone(&sink),
            move |e: &mut Event| {
                seen.borrow_mut().push(e.kind);
                e.prevent_default();
            },
        );

        button.handle(&mut doc, &mut Event::contact_start(Point::ZERO, 0));
        let mut end = Event::contact_end(1);
        button.handle(&mut doc, &mut end);
        assert!(end.is_default_prevented());
        assert_eq!(*kinds.borrow(), vec![EventKind::ContactEnd]);
    }

    #[test]
    fn custom_drag_threshold() {
        let sink = Rc::new(Recorder::default());
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        doc.insert(Some(ROOT), BUTTON_A).unwrap();
        let config = TapConfig::default().with_drag_threshold(2.0);
        let mut button = GestureButton::with_config(
            &mut doc,
            ListenerId(1),
            BUTTON_A,
            ROOT,
            Rc::clone(&sink),
            &config,
            |_: &mut Event| {},
        );

        button.handle(&mut doc, &mut Event::contact_start(Point::ZERO, 0));
        button.handle(&mut doc, &mut Event::contact_move(Point::new(3.0, 0.0), 1));
        assert_eq!(button.state(), GestureState::Idle);
    }

    #[test]
    #[should_panic(expected = "handler failure")]
    fn handler_panic_propagates() {
        let sink = Rc::new(Recorder::default());
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        doc.insert(Some(ROOT), BUTTON_A).unwrap();
        let mut button = GestureButton::new(
            &mut doc,
            ListenerId(1),
            BUTTON_A,
            ROOT,
            sink,
            |_: &mut Event| panic!("handler failure"),
        );
        button.handle(&mut doc, &mut Event::activation(Point::ZERO, 0));
    }

    #[test]
    fn only_contact_end_completes_a_touch_gesture() {
        let sink = Rc::new(Recorder::default());
        let taps = Rc::new(Cell::new(0));
        let seen = Rc::clone(&taps);
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        doc.insert(Some(ROOT), BUTTON_A).unwrap();
        let mut button = GestureButton::new(
            &mut doc,
            ListenerId(1),
            BUTTON_A,
            ROOT,
            Rc::clone(&sink),
            move |_: &mut Event| seen.set(seen.get() + 1),
        );
        button.on_contact_start(&mut doc, &mut Event::contact_start(Point::new(5.0, 5.0), 0));

        let mut stray = Event::contact_move(Point::new(6.0, 5.0), 10);
        button.on_completion(&mut doc, &mut stray);
        assert_eq!(taps.get(), 0);
        assert!(!stray.is_propagation_stopped());
        assert_eq!(button.state(), GestureState::Tracking);

        button.on_completion(&mut doc, &mut Event::contact_end(20));
        assert_eq!(taps.get(), 1);
        assert_eq!(*sink.reports.borrow(), [Point::new(5.0, 5.0)]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid config")]
    fn invalid_config_is_rejected_in_debug_builds() {
        let sink = Rc::new(Recorder::default());
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        doc.insert(Some(ROOT), BUTTON_A).unwrap();
        let config = TapConfig::default().with_drag_threshold(f64::NAN);
        let _ = GestureButton::with_config(
            &mut doc,
            ListenerId(1),
            BUTTON_A,
            ROOT,
            sink,
            &config,
            |_: &mut Event| {},
        );
    }

    #[test]
    fn dyn_sink_is_the_default() {
        let sink: Rc<dyn TapSink> = Rc::new(Recorder::default());
        let mut doc: Document<u32> = Document::new();
        doc.insert(None, ROOT).unwrap();
        let handler: fn(&mut Event) = |_| {};
        let button: GestureButton<u32, fn(&mut Event)> =
            GestureButton::new(&mut doc, ListenerId(1), ROOT, ROOT, sink, handler);
        assert_eq!(button.listening(), Listening::PERMANENT);
        assert_eq!(button.element(), ROOT);
    }
}
