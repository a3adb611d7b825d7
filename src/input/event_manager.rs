//! Page input handling.
//!
//! While active, the manager holds three document listeners (pointer-move,
//! click, key-down) and turns raw input into [`PageEvent`]s. Listener
//! identities are allocated once in [`EventManager::new`] and the same
//! values are used to add and to remove, so activate/deactivate cycles
//! never stack handlers.

use std::time::Instant;

use super::throttle::Throttle;
use super::types::{InputEvent, InputOutcome, Key, ListenerIds, Modifiers};
use crate::events::{EventPublisher, PageEvent};
use crate::model::constants::POINTER_THROTTLE;
use crate::model::Point;
use crate::platform::{is_overlay_element, Document, ElementId, EventKind, Listener, ListenerId};

/// Page state the handlers read but do not own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputContext {
    pub interactive_mode: bool,
    /// Last pointer position seen anywhere on the page.
    pub last_cursor: Point,
}

pub struct EventManager {
    pointer_move: Listener,
    click: Listener,
    key_down: Listener,
    active: bool,
    throttle: Throttle<Point>,
    publisher: EventPublisher,
}

impl EventManager {
    pub fn new(publisher: EventPublisher, ids: &mut ListenerIds) -> Self {
        Self {
            pointer_move: Listener::new(EventKind::PointerMove, ids.allocate()),
            click: Listener::new(EventKind::Click, ids.allocate()),
            key_down: Listener::new(EventKind::KeyDown, ids.allocate()),
            active: false,
            throttle: Throttle::new(POINTER_THROTTLE),
            publisher,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Register the listeners. A no-op when already active.
    pub fn activate<D: Document + ?Sized>(&mut self, doc: &mut D) {
        if self.active {
            return;
        }
        for listener in self.listeners() {
            doc.add_event_listener(listener);
        }
        self.active = true;
        tracing::debug!("event manager activated");
    }

    /// Remove exactly the listeners `activate` added and drop any pending
    /// pointer move.
    pub fn deactivate<D: Document + ?Sized>(&mut self, doc: &mut D) {
        if !self.active {
            return;
        }
        for listener in self.listeners() {
            if !doc.remove_event_listener(listener) {
                tracing::warn!(?listener, "listener was already gone");
            }
        }
        self.throttle.cancel();
        self.active = false;
        tracing::debug!("event manager deactivated");
    }

    /// Whether `id` is one of this manager's handlers.
    pub fn owns(&self, id: ListenerId) -> bool {
        self.listeners().iter().any(|l| l.id == id)
    }

    /// Run the handler registered as `id` for `event`.
    pub fn handle<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        id: ListenerId,
        event: &InputEvent,
        ctx: InputContext,
        now: Instant,
    ) -> InputOutcome {
        if !self.active {
            return InputOutcome::default();
        }
        match event {
            InputEvent::PointerMove { position } if id == self.pointer_move.id => {
                if let Some(position) = self.throttle.call(now, *position) {
                    self.on_pointer_move(doc, position);
                }
                InputOutcome::default()
            }
            InputEvent::Click { target, .. } if id == self.click.id => {
                self.on_click(doc, *target, ctx)
            }
            InputEvent::KeyDown { key, modifiers } if id == self.key_down.id => {
                self.on_key_down(doc, key, *modifiers, ctx)
            }
            _ => InputOutcome::default(),
        }
    }

    /// Fire the trailing pointer move once its throttle window has closed.
    pub fn poll<D: Document + ?Sized>(&mut self, doc: &D, now: Instant) {
        if !self.active {
            return;
        }
        if let Some(position) = self.throttle.poll(now) {
            self.on_pointer_move(doc, position);
        }
    }

    /// When the pending pointer move becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttle.deadline()
    }

    fn listeners(&self) -> [Listener; 3] {
        [self.pointer_move, self.click, self.key_down]
    }

    fn on_pointer_move<D: Document + ?Sized>(&self, doc: &D, position: Point) {
        if let Some(el) = page_element_at(doc, position) {
            self.publisher.publish(PageEvent::Hover(el));
        }
    }

    fn on_click<D: Document + ?Sized>(
        &self,
        doc: &D,
        target: Option<ElementId>,
        ctx: InputContext,
    ) -> InputOutcome {
        let Some(target) = target.filter(|t| !is_overlay_element(doc, *t)) else {
            return InputOutcome::default();
        };
        if ctx.interactive_mode {
            return InputOutcome::default();
        }
        self.publisher.publish(PageEvent::Fix(target));
        InputOutcome::intercepted()
    }

    fn on_key_down<D: Document + ?Sized>(
        &self,
        doc: &D,
        key: &Key,
        modifiers: Modifiers,
        ctx: InputContext,
    ) -> InputOutcome {
        let mut outcome = InputOutcome::default();
        // Alt carries no coordinates: fix whatever is under the last cursor.
        if modifiers.alt && !modifiers.ctrl && !modifiers.shift {
            outcome.default_prevented = true;
            if let Some(el) = page_element_at(doc, ctx.last_cursor) {
                self.publisher.publish(PageEvent::Fix(el));
            }
        }
        if *key == Key::Escape {
            self.publisher.publish(PageEvent::Unfix);
        }
        outcome
    }
}

/// Topmost element at `position` that is page content, not overlay.
fn page_element_at<D: Document + ?Sized>(doc: &D, position: Point) -> Option<ElementId> {
    doc.element_from_point(position)
        .filter(|el| !is_overlay_element(doc, *el))
}
