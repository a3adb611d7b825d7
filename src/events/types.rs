//! Semantic page events.
//!
//! The event manager turns raw pointer and keyboard input into these events
//! and publishes them on the page's `EventBus`; the dispatcher drains them
//! into the page orchestrator. Pure Rust, fully testable.

use crate::platform::ElementId;

/// Page-level events, produced by input handling and the control panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    // === Input Events ===
    /// The pointer rests on a page element.
    Hover(ElementId),

    /// Fix this element as the distance reference (click or Alt).
    Fix(ElementId),

    /// Release the fixed element (Escape).
    Unfix,

    // === Control Panel Events ===
    /// Pause button pressed.
    TogglePause,

    /// Settings button pressed.
    OpenSettings,
}

impl PageEvent {
    /// Returns true if this event draws or moves measurement visuals.
    pub fn is_measurement(&self) -> bool {
        matches!(self, PageEvent::Hover(_) | PageEvent::Fix(_) | PageEvent::Unfix)
    }

    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            PageEvent::Hover(_) => "Hover element",
            PageEvent::Fix(_) => "Fix element",
            PageEvent::Unfix => "Unfix element",
            PageEvent::TogglePause => "Toggle pause",
            PageEvent::OpenSettings => "Open settings",
        }
    }
}
