// Copyright 2025 the Fasttap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A page with a menu button and the overlay it opens.
//!
//! Tapping "Menu" opens an overlay whose "Delete" item sits right where the finger was.
//! Without suppression, the platform's synthetic click ~300ms later would land on
//! "Delete". This example scripts that timeline against the in-memory document:
//! - `fasttap_document` routes events capture → target → bubble,
//! - `fasttap_ghost` swallows the trailing click from its capture listener on the root,
//! - `fasttap_button` fires the menu handler as soon as the finger lifts.
//!
//! Run:
//! - `cargo run -p fasttap_demos --example ghost_click_page`
//! - `RUST_LOG=trace cargo run -p fasttap_demos --example ghost_click_page` for transitions

use std::cell::RefCell;
use std::rc::Rc;

use fasttap_button::GestureButton;
use fasttap_document::{Document, dispatch};
use fasttap_event::{Clock, Event, ListenerId, ManualClock, TapConfig};
use fasttap_ghost::GhostClickSuppressor;
use kurbo::{Point, Vec2};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const ROOT: u32 = 0;
const MENU: u32 = 1;
const DELETE: u32 = 2;

const GHOST: ListenerId = ListenerId(0);
const MENU_BUTTON: ListenerId = ListenerId(1);
const DELETE_BUTTON: ListenerId = ListenerId(2);

type Handler = Box<dyn FnMut(&mut Event)>;
type Ghost = GhostClickSuppressor<Rc<ManualClock>>;

/// The host side: owns the document and maps listener ids to their objects.
struct Page {
    doc: Document<u32>,
    clock: Rc<ManualClock>,
    ghost: Rc<Ghost>,
    menu: GestureButton<u32, Handler, Ghost>,
    delete: GestureButton<u32, Handler, Ghost>,
}

impl Page {
    fn deliver(&mut self, target: u32, mut event: Event) -> Event {
        let route = self.doc.route(target, event.kind);
        let Self {
            doc,
            ghost,
            menu,
            delete,
            ..
        } = self;
        dispatch::run(&route, &mut event, |d, e| match d.listener {
            GHOST => {
                ghost.handle(e);
            }
            MENU_BUTTON => menu.handle(&mut *doc, e),
            DELETE_BUTTON => delete.handle(&mut *doc, e),
            other => tracing::warn!(listener = other.0, "delivery to unknown listener"),
        });
        event
    }

    fn at(&self, ms: u64) -> u64 {
        self.clock.set(ms);
        self.clock.now()
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TapConfig::default()
        .validate()
        .expect("default thresholds are valid");

    let mut doc = Document::new();
    doc.insert(None, ROOT).expect("fresh root");
    doc.insert(Some(ROOT), MENU).expect("root exists");
    doc.insert(Some(ROOT), DELETE).expect("root exists");

    let clock = Rc::new(ManualClock::new(0));
    let ghost = Rc::new(GhostClickSuppressor::with_config(config, Rc::clone(&clock)));
    ghost.install(&mut doc, GHOST, ROOT);

    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let menu_log = Rc::clone(&log);
    let menu: GestureButton<u32, Handler, Ghost> = GestureButton::with_config(
        &mut doc,
        MENU_BUTTON,
        MENU,
        ROOT,
        Rc::clone(&ghost),
        &config,
        Box::new(move |e: &mut Event| {
            menu_log
                .borrow_mut()
                .push(format!("menu opened by {}", e.kind.name()));
        }),
    );
    let delete_log = Rc::clone(&log);
    let delete: GestureButton<u32, Handler, Ghost> = GestureButton::with_config(
        &mut doc,
        DELETE_BUTTON,
        DELETE,
        ROOT,
        Rc::clone(&ghost),
        &config,
        Box::new(move |e: &mut Event| {
            delete_log
                .borrow_mut()
                .push(format!("DELETE activated by {}", e.kind.name()));
        }),
    );

    let mut page = Page {
        doc,
        clock,
        ghost,
        menu,
        delete,
    };

    let finger = Point::new(120.0, 48.0);

    // Tap on the menu button.
    let t = page.at(0);
    page.deliver(MENU, Event::contact_start(finger, t));
    let t = page.at(40);
    page.deliver(MENU, Event::contact_move(finger + Vec2::new(3.0, -2.0), t));
    let t = page.at(90);
    page.deliver(MENU, Event::contact_end(t));

    // The overlay is now on top; the platform's synthetic click lands on "Delete".
    let t = page.at(390);
    let ghost_click = page.deliver(DELETE, Event::activation(finger + Vec2::new(2.0, 1.0), t));
    println!(
        "synthetic click at {t}ms: suppressed = {}",
        ghost_click.is_default_prevented()
    );

    // A deliberate mouse click on "Delete" well after the window still works.
    let t = page.at(2000);
    let real_click = page.deliver(DELETE, Event::activation(finger, t));
    println!(
        "real click at {t}ms: suppressed = {}",
        real_click.is_default_prevented()
    );

    // A drag starting on the menu never opens it.
    let t = page.at(3000);
    page.deliver(MENU, Event::contact_start(finger, t));
    let t = page.at(3030);
    page.deliver(ROOT, Event::contact_move(finger + Vec2::new(0.0, 60.0), t));
    let t = page.at(3100);
    page.deliver(MENU, Event::contact_end(t));

    for line in log.borrow().iter() {
        println!("{line}");
    }
    println!("pending ghost entries: {}", page.ghost.pending_len());

    let Page {
        doc, menu, delete, ..
    } = &mut page;
    menu.dispose(&mut *doc);
    delete.dispose(&mut *doc);
    println!("listeners left after dispose: {}", page.doc.listener_count());
}
