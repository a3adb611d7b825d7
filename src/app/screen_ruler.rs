//! Page orchestrator.
//!
//! One `ScreenRuler` lives in every page. It owns the overlay components,
//! the event manager and the page's copy of the settings, and it keeps the
//! three of them consistent with the page state:
//!
//! ```text
//!            enable                  pause
//! Disabled ─────────▶ Active ◀────────────▶ Paused
//!     ▲                  │                     │
//!     └──── disable ─────┴──────── disable ────┘
//! ```
//!
//! Host input goes through [`ScreenRuler::dispatch_input`]; background
//! messages through [`ScreenRuler::handle_message`] or [`ScreenRuler::pump`].

use std::sync::mpsc::Receiver;
use std::time::Instant;

use crate::events::{EventBus, PageEvent, PageMessage, Request, Response, StatusResponse};
use crate::handlers::dispatch_events;
use crate::input::{EventManager, InputContext, InputEvent, InputOutcome, ListenerIds};
use crate::model::{Point, Settings, SettingsPatch};
use crate::platform::{BackgroundLink, Document, ElementId, EventKind, Listener};
use crate::ui::{ControlPanel, DistanceOverlay, ElementSelector, HighlightRole, HoverWindow, PanelStatus};

/// Page-level measuring state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Disabled,
    Active,
    Paused,
}

pub struct ScreenRuler<D: Document, L: BackgroundLink> {
    doc: D,
    link: L,
    bus: EventBus,
    is_enabled: bool,
    is_paused: bool,
    settings: Settings,
    fixed: Option<ElementId>,
    last_cursor: Point,
    cursor_tracker: Listener,
    events: EventManager,
    selector: ElementSelector,
    hover_window: HoverWindow,
    distances: DistanceOverlay,
    panel: ControlPanel,
    initialized: bool,
}

impl<D: Document, L: BackgroundLink> ScreenRuler<D, L> {
    pub fn new(doc: D, link: L) -> Self {
        let bus = EventBus::new();
        let mut ids = ListenerIds::new();
        let cursor_tracker = Listener::new(EventKind::PointerMove, ids.allocate());
        let events = EventManager::new(bus.publisher(), &mut ids);
        let panel = ControlPanel::new(bus.publisher(), &mut ids);
        Self {
            doc,
            link,
            bus,
            is_enabled: false,
            is_paused: false,
            settings: Settings::default(),
            fixed: None,
            last_cursor: Point::default(),
            cursor_tracker,
            events,
            selector: ElementSelector::new(),
            hover_window: HoverWindow::new(),
            distances: DistanceOverlay::new(),
            panel,
            initialized: false,
        }
    }

    /// Build the overlay, start tracking the cursor and fetch the status
    /// from the background. Without an answer the page stays disabled.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        self.selector.init(&mut self.doc, &self.settings);
        self.hover_window.create(&mut self.doc, self.settings.theme);
        self.panel.create(&mut self.doc, self.settings.theme);
        self.doc.add_event_listener(self.cursor_tracker);

        match self.link.request(Request::GetStatus) {
            Ok(Response::Status(status)) => self.apply_status(status),
            Ok(other) => {
                tracing::warn!(?other, "unexpected GET_STATUS response");
                self.update_status();
            }
            Err(e) => {
                tracing::warn!(error = %e, "background unavailable, page stays disabled");
                self.update_status();
            }
        }
    }

    // === Accessors ===

    pub fn state(&self) -> PageState {
        if !self.is_enabled {
            PageState::Disabled
        } else if self.is_paused {
            PageState::Paused
        } else {
            PageState::Active
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The fixed element, if it is still in the document.
    pub fn fixed(&self) -> Option<ElementId> {
        self.fixed.filter(|el| self.doc.is_connected(*el))
    }

    pub fn last_cursor(&self) -> Point {
        self.last_cursor
    }

    pub fn doc(&self) -> &D {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn control_panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn hover_window(&self) -> &HoverWindow {
        &self.hover_window
    }

    pub fn highlight(&self, role: HighlightRole) -> Option<ElementId> {
        self.selector.highlight_element(role)
    }

    pub fn distance_artifacts(&self) -> usize {
        self.distances.artifact_count()
    }

    // === Background messages ===

    pub fn handle_message(&mut self, message: PageMessage) {
        tracing::debug!(?message, "page message");
        match message {
            PageMessage::UpdateStatus(status) => self.apply_status(status),
            PageMessage::SettingsUpdated(patch) => self.apply_patch(&patch),
            PageMessage::UnfixElement => self.unfix(),
        }
    }

    /// Handle every message waiting in `inbox`.
    pub fn pump(&mut self, inbox: &Receiver<PageMessage>) {
        while let Ok(message) = inbox.try_recv() {
            self.handle_message(message);
        }
    }

    fn apply_status(&mut self, status: StatusResponse) {
        self.is_enabled = status.is_enabled;
        self.is_paused = status.settings.is_paused;
        self.settings = status.settings;
        self.refresh_visual_settings();
        self.update_status();
    }

    fn apply_patch(&mut self, patch: &SettingsPatch) {
        self.settings.apply(patch);
        if let Some(enabled) = patch.is_enabled {
            self.is_enabled = enabled;
        }
        if let Some(paused) = patch.is_paused {
            self.is_paused = paused;
        }
        self.refresh_visual_settings();
        self.update_status();
    }

    fn refresh_visual_settings(&mut self) {
        self.selector.apply_colors(&mut self.doc, &self.settings);
        self.hover_window.set_theme(&mut self.doc, self.settings.theme);
        self.panel.set_theme(&mut self.doc, self.settings.theme);
    }

    /// Bring listeners and visuals in line with the current state.
    fn update_status(&mut self) {
        match self.state() {
            PageState::Active => {
                self.events.activate(&mut self.doc);
                self.panel.update_status(&mut self.doc, PanelStatus::Active);
            }
            state => {
                self.events.deactivate(&mut self.doc);
                self.hover_window.hide(&mut self.doc);
                self.selector.hide_highlight(&mut self.doc, HighlightRole::Hover);
                self.distances.clear(&mut self.doc);
                let status = if state == PageState::Paused {
                    PanelStatus::Paused
                } else {
                    PanelStatus::Disabled
                };
                self.panel.update_status(&mut self.doc, status);
            }
        }
    }

    // === Host input ===

    /// Deliver one input event the way the document would: panel widgets
    /// first, then every document listener registered for its kind.
    pub fn dispatch_input(&mut self, event: &InputEvent, now: Instant) -> InputOutcome {
        let mut outcome = InputOutcome::default();

        match event {
            InputEvent::Click {
                target: Some(target),
                ..
            } if self.panel.contains(&self.doc, *target) => {
                if self.panel.handle_click(&self.doc, *target) {
                    outcome.propagation_stopped = true;
                }
            }
            InputEvent::PointerDown {
                position,
                target: Some(target),
            } => {
                self.panel.pointer_down(&mut self.doc, *position, *target);
            }
            _ => {}
        }

        if !outcome.propagation_stopped {
            for id in self.doc.listeners(event.kind()) {
                if id == self.cursor_tracker.id {
                    if let InputEvent::PointerMove { position } = event {
                        self.last_cursor = *position;
                    }
                } else if self.panel.owns(id) {
                    self.panel.handle(&mut self.doc, id, event);
                } else if self.events.owns(id) {
                    let ctx = self.input_context();
                    outcome.merge(self.events.handle(&self.doc, id, event, ctx, now));
                }
            }
        }

        dispatch_events(self);
        outcome
    }

    /// Fire due timers (the trailing throttled pointer move).
    pub fn tick(&mut self, now: Instant) {
        self.events.poll(&self.doc, now);
        dispatch_events(self);
    }

    /// When `tick` next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.events.next_deadline()
    }

    fn input_context(&self) -> InputContext {
        InputContext {
            interactive_mode: self.settings.interactive_mode,
            last_cursor: self.last_cursor,
        }
    }

    pub(crate) fn drain_events(&self) -> Vec<PageEvent> {
        self.bus.drain()
    }

    // === Actions ===

    /// Highlight `el`, describe it and measure it against the fixed element.
    pub fn handle_element_hover(&mut self, el: ElementId) {
        if self.state() != PageState::Active {
            return;
        }
        self.release_detached_fixed();
        if !self
            .selector
            .update_highlight(&mut self.doc, el, HighlightRole::Hover)
        {
            return;
        }
        let cursor = self
            .settings
            .show_cursor_position
            .then_some(self.last_cursor);
        self.hover_window.show(&mut self.doc, el, cursor);

        match self.fixed() {
            Some(fixed) if fixed != el => {
                let color = self.settings.distance_color.clone();
                self.distances.show(&mut self.doc, fixed, el, &color);
            }
            _ => self.distances.clear(&mut self.doc),
        }
    }

    /// Make `el` the fixed element.
    pub fn fix_element(&mut self, el: ElementId) {
        if self.state() != PageState::Active {
            return;
        }
        self.release_detached_fixed();
        if self.selector.fix_element(&mut self.doc, el) {
            self.fixed = Some(el);
            // Lines measured against the previous fixed element are stale.
            self.distances.clear(&mut self.doc);
            tracing::debug!(?el, "element fixed");
        }
    }

    /// A fixed element that left the document takes its box and label
    /// with it.
    fn release_detached_fixed(&mut self) {
        if let Some(el) = self.fixed {
            if !self.doc.is_connected(el) {
                tracing::debug!(?el, "fixed element detached");
                self.unfix();
            }
        }
    }

    /// Drop the fixed element and everything drawn for it. Idempotent.
    pub fn unfix(&mut self) {
        if self.fixed.take().is_some() {
            tracing::debug!("element unfixed");
        }
        self.selector.unfix_element(&mut self.doc);
        self.distances.clear(&mut self.doc);
    }

    /// Flip pause locally and tell the background.
    pub fn toggle_pause(&mut self) {
        if !self.is_enabled {
            return;
        }
        self.is_paused = !self.is_paused;
        self.settings.is_paused = self.is_paused;
        if let Err(e) = self.link.request(Request::pause(self.is_paused)) {
            tracing::debug!(error = %e, "PAUSE_EXTENSION not delivered");
        }
        self.update_status();
    }

    /// Ask the background to show the popup.
    pub fn open_settings(&mut self) {
        match self.link.request(Request::OpenPopup) {
            Ok(response) if response.is_success() => {}
            Ok(response) => tracing::debug!(?response, "popup not opened"),
            Err(e) => tracing::debug!(error = %e, "OPEN_POPUP not delivered"),
        }
    }

    /// Page unload: remove every artifact and listener.
    pub fn destroy(&mut self) {
        self.events.deactivate(&mut self.doc);
        self.doc.remove_event_listener(self.cursor_tracker);
        self.selector.destroy(&mut self.doc);
        self.hover_window.destroy(&mut self.doc);
        self.distances.clear(&mut self.doc);
        self.panel.destroy(&mut self.doc);
        self.fixed = None;
        self.initialized = false;
    }
}
