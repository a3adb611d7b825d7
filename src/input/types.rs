//! Raw input delivered by the host page.

use crate::model::Point;
use crate::platform::{ElementId, EventKind, ListenerId};

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        shift: false,
    };

    pub const ALT: Self = Self {
        alt: true,
        ctrl: false,
        shift: false,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Alt,
    Escape,
    Other(String),
}

/// A document-level input event. Positions are viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMove {
        position: Point,
    },
    PointerDown {
        position: Point,
        target: Option<ElementId>,
    },
    PointerUp {
        position: Point,
    },
    Click {
        position: Point,
        target: Option<ElementId>,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::PointerDown { .. } => EventKind::PointerDown,
            InputEvent::PointerUp { .. } => EventKind::PointerUp,
            InputEvent::Click { .. } => EventKind::Click,
            InputEvent::KeyDown { .. } => EventKind::KeyDown,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    pub fn click(x: f64, y: f64, target: Option<ElementId>) -> Self {
        InputEvent::Click {
            position: Point::new(x, y),
            target,
        }
    }

    pub fn key(key: Key, modifiers: Modifiers) -> Self {
        InputEvent::KeyDown { key, modifiers }
    }
}

/// What the handlers did to the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl InputOutcome {
    pub fn merge(&mut self, other: InputOutcome) {
        self.default_prevented |= other.default_prevented;
        self.propagation_stopped |= other.propagation_stopped;
    }

    pub const fn intercepted() -> Self {
        Self {
            default_prevented: true,
            propagation_stopped: true,
        }
    }
}

/// Hands out listener identities. Each handler takes its id once, at
/// construction, and keeps it for its whole life.
#[derive(Debug, Default)]
pub struct ListenerIds {
    next: u32,
}

impl ListenerIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> ListenerId {
        self.next += 1;
        ListenerId(self.next)
    }
}
