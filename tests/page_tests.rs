//! Page orchestrator scenarios against a live coordinator.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use serde_json::json;

use screen_ruler::background::Coordinator;
use screen_ruler::events::PageMessage;
use screen_ruler::input::{InputEvent, Key, Modifiers};
use screen_ruler::model::constants::{CLASS_DISTANCE_LABEL, CLASS_LABEL};
use screen_ruler::model::{Point, Rect, Size};
use screen_ruler::platform::headless::{DirectLink, HeadlessDocument, HeadlessTabs, MemoryStore};
use screen_ruler::platform::{Document, ElementId, EventKind, MessageSender, TabId};
use screen_ruler::ui::{HighlightRole, PanelStatus};
use screen_ruler::{PageState, ScreenRuler};

type Background = Rc<RefCell<Coordinator<MemoryStore, HeadlessTabs>>>;
type Page = ScreenRuler<HeadlessDocument, DirectLink<MemoryStore, HeadlessTabs>>;

struct World {
    tabs: HeadlessTabs,
    background: Background,
}

impl World {
    fn new(record: serde_json::Value) -> Self {
        let tabs = HeadlessTabs::new();
        let store = MemoryStore::with_record(record.as_object().cloned().unwrap_or_default());
        let background = Rc::new(RefCell::new(Coordinator::new(store, tabs.clone())));
        Self { tabs, background }
    }

    fn enabled() -> Self {
        Self::new(json!({ "isEnabled": true, "interactiveMode": false }))
    }

    fn open_page(&self, doc: HeadlessDocument) -> (Page, Receiver<PageMessage>, TabId) {
        let (tab, inbox) = self.tabs.open_tab();
        let link = DirectLink::new(self.background.clone(), MessageSender::tab(tab));
        let mut page = ScreenRuler::new(doc, link);
        page.init();
        (page, inbox, tab)
    }
}

/// Two 100×50 boxes side by side with a 100px gap.
fn two_boxes() -> (HeadlessDocument, ElementId, ElementId) {
    let mut doc = HeadlessDocument::new(Size::new(1280.0, 800.0));
    let a = doc.add_element("div", Rect::from_edges(0.0, 100.0, 100.0, 150.0));
    doc.set_attribute(a, "id", "a");
    let b = doc.add_element("div", Rect::from_edges(200.0, 100.0, 300.0, 150.0));
    doc.set_attribute(b, "id", "b");
    (doc, a, b)
}

fn hover(page: &mut Page, x: f64, y: f64, now: Instant) {
    page.dispatch_input(&InputEvent::pointer_move(x, y), now);
}

#[test]
fn page_follows_background_status_on_init() {
    let world = World::enabled();
    let (page, _, _) = world.open_page(two_boxes().0);
    assert_eq!(page.state(), PageState::Active);
    assert_eq!(page.control_panel().status(), PanelStatus::Active);
    assert!(!page.settings().interactive_mode);

    let disabled = World::new(json!({}));
    let (page, _, _) = disabled.open_page(two_boxes().0);
    assert_eq!(page.state(), PageState::Disabled);
}

#[test]
fn fixing_then_hovering_draws_distance() {
    let world = World::enabled();
    let (doc, a, _) = two_boxes();
    let (mut page, _, _) = world.open_page(doc);
    let now = Instant::now();

    let outcome = page.dispatch_input(&InputEvent::click(50.0, 120.0, Some(a)), now);
    assert!(outcome.default_prevented);
    assert_eq!(page.fixed(), Some(a));
    let labels = page.doc().query_by_class(CLASS_LABEL, Some(("data-fixed", "true")));
    assert_eq!(labels.len(), 1);
    assert_eq!(page.doc().text(labels[0]), Some("div#a 100×50"));

    hover(&mut page, 250.0, 120.0, now + Duration::from_millis(50));
    assert_eq!(page.distance_artifacts(), 2);
    let distance_labels = page.doc().query_by_class(CLASS_DISTANCE_LABEL, None);
    assert_eq!(page.doc().text(distance_labels[0]), Some("100px"));

    let hovered = page.highlight(HighlightRole::Hover).unwrap();
    assert_eq!(page.doc().inline_style(hovered, "left"), Some("200px"));
    assert!(page.hover_window().is_visible());
    assert_eq!(page.hover_window().lines()[0], "div#b");
}

#[test]
fn alt_fixes_element_under_cursor() {
    let world = World::new(json!({ "isEnabled": true }));
    let (doc, a, _) = two_boxes();
    let (mut page, _, _) = world.open_page(doc);
    let now = Instant::now();

    hover(&mut page, 10.0, 110.0, now);
    // Interactive mode is on: clicks pass through untouched.
    let outcome = page.dispatch_input(&InputEvent::click(10.0, 110.0, Some(a)), now);
    assert!(!outcome.default_prevented);
    assert_eq!(page.fixed(), None);

    let outcome = page.dispatch_input(&InputEvent::key(Key::Alt, Modifiers::ALT), now);
    assert!(outcome.default_prevented);
    assert_eq!(page.fixed(), Some(a));
}

#[test]
fn unfix_is_idempotent() {
    let world = World::enabled();
    let (doc, a, _) = two_boxes();
    let (mut page, inbox, _) = world.open_page(doc);
    let now = Instant::now();

    page.dispatch_input(&InputEvent::click(50.0, 120.0, Some(a)), now);
    hover(&mut page, 250.0, 120.0, now + Duration::from_millis(50));

    page.dispatch_input(&InputEvent::key(Key::Escape, Modifiers::NONE), now);
    let after_first = page.doc().connected_count();
    assert_eq!(page.fixed(), None);
    assert_eq!(page.distance_artifacts(), 0);
    assert!(page.doc().query_by_class(CLASS_LABEL, None).is_empty());

    page.dispatch_input(&InputEvent::key(Key::Escape, Modifiers::NONE), now);
    page.handle_message(PageMessage::UnfixElement);
    page.pump(&inbox);
    assert_eq!(page.doc().connected_count(), after_first);
    assert_eq!(page.fixed(), None);
}

#[test]
fn pause_stops_hover_rendering() {
    let world = World::enabled();
    let (doc, _, _) = two_boxes();
    let (mut page, inbox, _) = world.open_page(doc);
    let now = Instant::now();

    hover(&mut page, 50.0, 120.0, now);
    assert!(page.hover_window().is_visible());

    page.toggle_pause();
    page.pump(&inbox);
    assert_eq!(page.state(), PageState::Paused);
    assert!(world.background.borrow().settings().is_paused);
    assert!(!page.hover_window().is_visible());
    let indicator = page.control_panel().indicator().unwrap();
    assert_eq!(page.doc().text(indicator), Some("Paused"));
    let pause_button = page.control_panel().pause_button().unwrap();
    assert_eq!(page.doc().text(pause_button), Some("Resume"));

    hover(&mut page, 250.0, 120.0, now + Duration::from_millis(100));
    let highlight = page.highlight(HighlightRole::Hover).unwrap();
    assert!(!page.doc().is_displayed(highlight));
    assert!(!page.hover_window().is_visible());
}

#[test]
fn pause_button_click_toggles_pause() {
    let world = World::enabled();
    let (mut page, _, _) = world.open_page(two_boxes().0);
    let button = page.control_panel().pause_button().unwrap();

    let outcome = page.dispatch_input(&InputEvent::click(0.0, 0.0, Some(button)), Instant::now());
    assert!(outcome.propagation_stopped);
    assert_eq!(page.state(), PageState::Paused);

    page.dispatch_input(&InputEvent::click(0.0, 0.0, Some(button)), Instant::now());
    assert_eq!(page.state(), PageState::Active);
}

#[test]
fn settings_button_opens_popup() {
    let world = World::enabled();
    let (mut page, _, _) = world.open_page(two_boxes().0);
    let button = page.control_panel().settings_button().unwrap();
    page.dispatch_input(&InputEvent::click(0.0, 0.0, Some(button)), Instant::now());
    assert_eq!(world.tabs.popup_open_count(), 1);
}

#[test]
fn pause_cycles_never_duplicate_listeners() {
    let world = World::enabled();
    let (mut page, inbox, _) = world.open_page(two_boxes().0);
    // Cursor tracker, panel drag (move, up), event manager (move, click, key).
    assert_eq!(page.doc().listener_count(), 6);

    for _ in 0..5 {
        page.toggle_pause();
        page.pump(&inbox);
        assert_eq!(page.doc().listener_count(), 3);
        page.toggle_pause();
        page.pump(&inbox);
        assert_eq!(page.doc().listener_count(), 6);
    }
    assert_eq!(page.doc().listeners(EventKind::Click).len(), 1);
    assert_eq!(page.doc().listeners(EventKind::PointerMove).len(), 3);
}

#[test]
fn trailing_pointer_move_lands_on_tick() {
    let world = World::enabled();
    let (mut page, _, _) = world.open_page(two_boxes().0);
    let start = Instant::now();

    hover(&mut page, 50.0, 120.0, start);
    hover(&mut page, 250.0, 120.0, start + Duration::from_millis(4));
    let hovered = page.highlight(HighlightRole::Hover).unwrap();
    assert_eq!(page.doc().inline_style(hovered, "left"), Some("0px"));
    assert!(page.next_deadline().is_some());

    page.tick(start + Duration::from_millis(16));
    assert_eq!(page.doc().inline_style(hovered, "left"), Some("200px"));
    assert!(page.next_deadline().is_none());
    assert_eq!(page.last_cursor(), Point::new(250.0, 120.0));
}

#[test]
fn drag_moves_control_panel() {
    let world = World::enabled();
    let (mut page, _, _) = world.open_page(two_boxes().0);
    let panel = page.control_panel().element().unwrap();
    let start = page.control_panel().position();
    let now = Instant::now();

    page.dispatch_input(
        &InputEvent::PointerDown {
            position: Point::new(start.x + 5.0, start.y + 5.0),
            target: Some(panel),
        },
        now,
    );
    page.dispatch_input(&InputEvent::pointer_move(405.0, 305.0), now);
    page.dispatch_input(&InputEvent::PointerUp { position: Point::new(405.0, 305.0) }, now);
    assert_eq!(page.control_panel().position(), Point::new(400.0, 300.0));
    assert_eq!(page.doc().inline_style(panel, "left"), Some("400px"));
}

#[test]
fn remote_settings_restyle_overlay() {
    let world = World::enabled();
    let (mut page, inbox, _) = world.open_page(two_boxes().0);
    let patch = serde_json::from_value(json!({
        "highlightColor": "#000000",
        "theme": "dark",
        "showCursorPosition": true
    }))
    .unwrap();
    world.background.borrow_mut().update_settings(&patch);
    page.pump(&inbox);

    let hovered = page.highlight(HighlightRole::Hover).unwrap();
    assert_eq!(page.doc().inline_style(hovered, "border-color"), Some("#000000"));
    let panel = page.control_panel().element().unwrap();
    assert!(page.doc().has_class(panel, "theme-dark"));

    hover(&mut page, 50.0, 120.0, Instant::now());
    assert_eq!(
        page.hover_window().lines().last().map(String::as_str),
        Some("Cursor: 50, 120")
    );
}

#[test]
fn destroy_removes_every_artifact() {
    let world = World::enabled();
    let (doc, a, _) = two_boxes();
    let page_elements = doc.connected_count();
    let (mut page, _, _) = world.open_page(doc);
    let now = Instant::now();
    page.dispatch_input(&InputEvent::click(50.0, 120.0, Some(a)), now);
    hover(&mut page, 250.0, 120.0, now + Duration::from_millis(50));

    page.destroy();
    assert_eq!(page.doc().connected_count(), page_elements);
    assert_eq!(page.doc().listener_count(), 0);
    assert_eq!(page.fixed(), None);
}

#[test]
fn removed_fixed_element_takes_its_box_and_label() {
    let world = World::enabled();
    let (doc, a, _) = two_boxes();
    let (mut page, _, _) = world.open_page(doc);
    let now = Instant::now();

    page.dispatch_input(&InputEvent::click(50.0, 120.0, Some(a)), now);
    let fixed_box = page.highlight(HighlightRole::Fixed).unwrap();
    assert!(page.doc().is_displayed(fixed_box));

    page.doc_mut().detach(a);
    hover(&mut page, 250.0, 120.0, now + Duration::from_millis(50));

    assert_eq!(page.fixed(), None);
    assert!(!page.doc().is_displayed(fixed_box));
    assert!(page
        .doc()
        .query_by_class(CLASS_LABEL, Some(("data-fixed", "true")))
        .is_empty());
    assert_eq!(page.distance_artifacts(), 0);
    assert!(page.hover_window().is_visible());
}

#[test]
fn refixing_drops_previous_distance_lines() {
    let world = World::enabled();
    let (doc, a, b) = two_boxes();
    let (mut page, _, _) = world.open_page(doc);
    let now = Instant::now();

    page.dispatch_input(&InputEvent::click(50.0, 120.0, Some(a)), now);
    hover(&mut page, 250.0, 120.0, now + Duration::from_millis(50));
    assert_eq!(page.distance_artifacts(), 2);

    page.dispatch_input(&InputEvent::click(250.0, 120.0, Some(b)), now + Duration::from_millis(60));
    assert_eq!(page.fixed(), Some(b));
    assert_eq!(page.distance_artifacts(), 0);
    assert!(page.doc().query_by_class(CLASS_DISTANCE_LABEL, None).is_empty());
    let labels = page.doc().query_by_class(CLASS_LABEL, Some(("data-fixed", "true")));
    assert_eq!(labels.len(), 1);
    assert_eq!(page.doc().text(labels[0]), Some("div#b 100×50"));
}
