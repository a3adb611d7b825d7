//! Draggable on-page control panel.
//!
//! A fixed-position widget with:
//! - a status indicator (Active / Paused / Disabled)
//! - a pause/resume button (publishes `PageEvent::TogglePause`)
//! - a settings button (publishes `PageEvent::OpenSettings`)
//!
//! Dragging starts on pointer-down anywhere on the panel and follows the
//! pointer through two document-level listeners (move and up). Those
//! listeners are registered once in `create` and removed in `destroy`.

use crate::clamp;
use crate::events::{EventPublisher, PageEvent};
use crate::input::{InputEvent, ListenerIds};
use crate::model::constants::*;
use crate::model::{Point, Theme};
use crate::platform::{Document, ElementId, EventKind, Listener, ListenerId};
use crate::px;

/// What the status indicator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    Active,
    Paused,
    Disabled,
}

impl PanelStatus {
    pub fn text(&self) -> &'static str {
        match self {
            PanelStatus::Active => STATUS_TEXT_ACTIVE,
            PanelStatus::Paused => STATUS_TEXT_PAUSED,
            PanelStatus::Disabled => STATUS_TEXT_DISABLED,
        }
    }

    /// Indicator modifier class, if any.
    fn modifier(&self) -> Option<&'static str> {
        match self {
            PanelStatus::Active => None,
            PanelStatus::Paused => Some("paused"),
            PanelStatus::Disabled => Some("disabled"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Widgets {
    panel: ElementId,
    indicator: ElementId,
    pause_button: ElementId,
    settings_button: ElementId,
}

pub struct ControlPanel {
    widgets: Option<Widgets>,
    status: PanelStatus,
    theme: Option<Theme>,
    /// Panel origin (viewport coordinates).
    position: Point,
    /// Grab offset while a drag is in progress.
    drag: Option<Point>,
    pointer_move: Listener,
    pointer_up: Listener,
    publisher: EventPublisher,
}

impl ControlPanel {
    pub fn new(publisher: EventPublisher, ids: &mut ListenerIds) -> Self {
        Self {
            widgets: None,
            status: PanelStatus::Disabled,
            theme: None,
            position: Point::default(),
            drag: None,
            pointer_move: Listener::new(EventKind::PointerMove, ids.allocate()),
            pointer_up: Listener::new(EventKind::PointerUp, ids.allocate()),
            publisher,
        }
    }

    /// Build the widget in the top-right corner and register the drag
    /// listeners. A no-op when already created.
    pub fn create<D: Document + ?Sized>(&mut self, doc: &mut D, theme: Theme) {
        if self.widgets.is_some() {
            return;
        }
        let panel = doc.create_element("div", None);
        doc.add_class(panel, CLASS_CONTROL_PANEL);
        doc.add_class(panel, CLASS_EXTENSION);
        doc.set_style(panel, "position", "fixed");
        doc.set_style(panel, "width", &px(CONTROL_PANEL_WIDTH));
        doc.set_style(panel, "height", &px(CONTROL_PANEL_HEIGHT));
        doc.set_style(panel, "cursor", "move");

        let indicator = doc.create_element("div", Some(panel));
        doc.add_class(indicator, CLASS_STATUS_INDICATOR);
        let pause_button = doc.create_element("button", Some(panel));
        doc.add_class(pause_button, CLASS_PAUSE_BUTTON);
        let settings_button = doc.create_element("button", Some(panel));
        doc.add_class(settings_button, CLASS_SETTINGS_BUTTON);
        doc.set_text(settings_button, "⚙");

        self.widgets = Some(Widgets {
            panel,
            indicator,
            pause_button,
            settings_button,
        });

        let viewport = doc.viewport_size();
        let start = Point::new(
            (viewport.width - CONTROL_PANEL_WIDTH - CONTROL_PANEL_MARGIN).max(0.0),
            CONTROL_PANEL_MARGIN,
        );
        self.move_to(doc, start);
        self.set_theme(doc, theme);
        self.render_status(doc);

        doc.add_event_listener(self.pointer_move);
        doc.add_event_listener(self.pointer_up);
    }

    pub fn status(&self) -> PanelStatus {
        self.status
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn element(&self) -> Option<ElementId> {
        self.widgets.map(|w| w.panel)
    }

    pub fn indicator(&self) -> Option<ElementId> {
        self.widgets.map(|w| w.indicator)
    }

    pub fn pause_button(&self) -> Option<ElementId> {
        self.widgets.map(|w| w.pause_button)
    }

    pub fn settings_button(&self) -> Option<ElementId> {
        self.widgets.map(|w| w.settings_button)
    }

    pub fn update_status<D: Document + ?Sized>(&mut self, doc: &mut D, status: PanelStatus) {
        self.status = status;
        self.render_status(doc);
    }

    pub fn set_theme<D: Document + ?Sized>(&mut self, doc: &mut D, theme: Theme) {
        let Some(w) = self.widgets else {
            return;
        };
        if let Some(old) = self.theme.replace(theme) {
            doc.remove_class(w.panel, &old.class_name());
        }
        doc.add_class(w.panel, &theme.class_name());
    }

    /// Whether `target` is the panel or inside it.
    pub fn contains<D: Document + ?Sized>(&self, doc: &D, target: ElementId) -> bool {
        self.widgets
            .is_some_and(|w| is_within(doc, target, w.panel))
    }

    /// Handle a click aimed at the panel. Returns true when the click was
    /// consumed (it must not reach the page handlers).
    pub fn handle_click<D: Document + ?Sized>(&self, doc: &D, target: ElementId) -> bool {
        let Some(w) = self.widgets else {
            return false;
        };
        if is_within(doc, target, w.pause_button) {
            self.publisher.publish(PageEvent::TogglePause);
            true
        } else if is_within(doc, target, w.settings_button) {
            self.publisher.publish(PageEvent::OpenSettings);
            true
        } else {
            is_within(doc, target, w.panel)
        }
    }

    /// Start dragging when the pointer goes down on the panel.
    pub fn pointer_down<D: Document + ?Sized>(&mut self, doc: &mut D, position: Point, target: ElementId) -> bool {
        let Some(w) = self.widgets else {
            return false;
        };
        if !is_within(doc, target, w.panel) {
            return false;
        }
        self.drag = Some(Point::new(
            position.x - self.position.x,
            position.y - self.position.y,
        ));
        doc.set_style(w.panel, "cursor", "grabbing");
        true
    }

    /// Whether `id` is one of the panel's document listeners.
    pub fn owns(&self, id: ListenerId) -> bool {
        id == self.pointer_move.id || id == self.pointer_up.id
    }

    /// Run the document listener registered as `id`.
    pub fn handle<D: Document + ?Sized>(&mut self, doc: &mut D, id: ListenerId, event: &InputEvent) {
        match event {
            InputEvent::PointerMove { position } if id == self.pointer_move.id => {
                if let Some(offset) = self.drag {
                    let viewport = doc.viewport_size();
                    let x = clamp(
                        position.x - offset.x,
                        0.0,
                        (viewport.width - CONTROL_PANEL_WIDTH).max(0.0),
                    );
                    let y = clamp(
                        position.y - offset.y,
                        0.0,
                        (viewport.height - CONTROL_PANEL_HEIGHT).max(0.0),
                    );
                    self.move_to(doc, Point::new(x, y));
                }
            }
            InputEvent::PointerUp { .. } if id == self.pointer_up.id => {
                if self.drag.take().is_some() {
                    if let Some(w) = self.widgets {
                        doc.set_style(w.panel, "cursor", "move");
                    }
                }
            }
            _ => {}
        }
    }

    /// Remove the widget and its listeners.
    pub fn destroy<D: Document + ?Sized>(&mut self, doc: &mut D) {
        let Some(w) = self.widgets.take() else {
            return;
        };
        doc.remove_event_listener(self.pointer_move);
        doc.remove_event_listener(self.pointer_up);
        doc.remove(w.panel);
        self.drag = None;
        self.theme = None;
    }

    fn move_to<D: Document + ?Sized>(&mut self, doc: &mut D, at: Point) {
        self.position = at;
        if let Some(w) = self.widgets {
            doc.set_style(w.panel, "left", &px(at.x));
            doc.set_style(w.panel, "top", &px(at.y));
            doc.set_style(w.panel, "right", "auto");
        }
    }

    fn render_status<D: Document + ?Sized>(&self, doc: &mut D) {
        let Some(w) = self.widgets else {
            return;
        };
        for modifier in ["paused", "disabled"] {
            doc.remove_class(w.indicator, modifier);
        }
        if let Some(modifier) = self.status.modifier() {
            doc.add_class(w.indicator, modifier);
        }
        doc.set_text(w.indicator, self.status.text());
        let label = if self.status == PanelStatus::Paused {
            BUTTON_TEXT_RESUME
        } else {
            BUTTON_TEXT_PAUSE
        };
        doc.set_text(w.pause_button, label);
    }
}

fn is_within<D: Document + ?Sized>(doc: &D, el: ElementId, ancestor: ElementId) -> bool {
    let mut current = Some(el);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = doc.parent(id);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use crate::model::Size;
    use crate::platform::headless::HeadlessDocument;

    fn setup() -> (HeadlessDocument, EventBus, ControlPanel) {
        let mut doc = HeadlessDocument::new(Size::new(1000.0, 800.0));
        let bus = EventBus::new();
        let mut panel = ControlPanel::new(bus.publisher(), &mut ListenerIds::new());
        panel.create(&mut doc, Theme::Auto);
        (doc, bus, panel)
    }

    #[test]
    fn starts_in_top_right_corner() {
        let (doc, _, panel) = setup();
        assert_eq!(panel.position(), Point::new(800.0, 20.0));
        let el = panel.element().unwrap();
        assert_eq!(doc.inline_style(el, "left"), Some("800px"));
        assert!(doc.has_class(el, "theme-auto"));
        assert_eq!(doc.listener_count(), 2);
    }

    #[test]
    fn status_drives_indicator_and_button() {
        let (mut doc, _, mut panel) = setup();
        panel.update_status(&mut doc, PanelStatus::Paused);
        let indicator = panel.indicator().unwrap();
        assert_eq!(doc.text(indicator), Some("Paused"));
        assert!(doc.has_class(indicator, "paused"));
        assert_eq!(doc.text(panel.pause_button().unwrap()), Some("Resume"));

        panel.update_status(&mut doc, PanelStatus::Active);
        assert_eq!(doc.text(indicator), Some("Active"));
        assert!(!doc.has_class(indicator, "paused"));
        assert_eq!(doc.text(panel.pause_button().unwrap()), Some("Pause"));
    }

    #[test]
    fn buttons_publish_events() {
        let (doc, bus, panel) = setup();
        assert!(panel.handle_click(&doc, panel.pause_button().unwrap()));
        assert!(panel.handle_click(&doc, panel.settings_button().unwrap()));
        assert_eq!(
            bus.drain(),
            vec![PageEvent::TogglePause, PageEvent::OpenSettings]
        );
        assert!(!panel.handle_click(&doc, ElementId(9999)));
    }

    #[test]
    fn drag_follows_pointer_and_stays_on_screen() {
        let (mut doc, _, mut panel) = setup();
        let el = panel.element().unwrap();
        let move_id = doc.listeners(EventKind::PointerMove)[0];
        let up_id = doc.listeners(EventKind::PointerUp)[0];

        assert!(panel.pointer_down(&mut doc, Point::new(810.0, 30.0), el));
        assert!(panel.is_dragging());
        panel.handle(&mut doc, move_id, &InputEvent::pointer_move(510.0, 130.0));
        assert_eq!(panel.position(), Point::new(500.0, 120.0));

        panel.handle(&mut doc, move_id, &InputEvent::pointer_move(-300.0, 5000.0));
        assert_eq!(panel.position(), Point::new(0.0, 760.0));

        panel.handle(&mut doc, up_id, &InputEvent::PointerUp { position: Point::default() });
        assert!(!panel.is_dragging());
        panel.handle(&mut doc, move_id, &InputEvent::pointer_move(400.0, 400.0));
        assert_eq!(panel.position(), Point::new(0.0, 760.0));
    }

    #[test]
    fn destroy_removes_listeners_and_widget() {
        let (mut doc, _, mut panel) = setup();
        let el = panel.element().unwrap();
        panel.destroy(&mut doc);
        assert_eq!(doc.listener_count(), 0);
        assert!(!doc.is_connected(el));
        panel.destroy(&mut doc);
    }
}
