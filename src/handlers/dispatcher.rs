//! Event dispatcher for page events.
//!
//! The dispatcher receives events from the page's event bus and executes
//! the corresponding orchestrator actions. It runs after every delivered
//! input event and every timer tick, and processes all pending events in
//! batch.
//!
//! # Architecture
//!
//! ```text
//! EventBus::drain() → dispatch_events() → ScreenRuler actions
//! ```

use crate::app::ScreenRuler;
use crate::events::PageEvent;
use crate::platform::{BackgroundLink, Document};

/// Dispatch all pending events from the page's bus.
pub fn dispatch_events<D: Document, L: BackgroundLink>(ruler: &mut ScreenRuler<D, L>) {
    let events = ruler.drain_events();

    for event in &events {
        dispatch_single_event(ruler, event);
    }
}

/// Dispatch a single event.
fn dispatch_single_event<D: Document, L: BackgroundLink>(
    ruler: &mut ScreenRuler<D, L>,
    event: &PageEvent,
) {
    if event.is_measurement() {
        tracing::trace!(event = event.description(), "dispatch");
    } else {
        tracing::debug!(event = event.description(), "dispatch");
    }
    match event {
        PageEvent::Hover(el) => ruler.handle_element_hover(*el),

        PageEvent::Fix(el) => ruler.fix_element(*el),

        PageEvent::Unfix => ruler.unfix(),

        PageEvent::TogglePause => ruler.toggle_pause(),

        PageEvent::OpenSettings => ruler.open_settings(),
    }
}
