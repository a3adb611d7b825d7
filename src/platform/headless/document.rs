//! In-memory document.
//!
//! Page content is added with explicit page-coordinate rectangles; overlay
//! elements created through [`Document::create_element`] get their geometry
//! from inline `left`/`top`/`width`/`height` styles, like absolutely or
//! fixed positioned boxes would. Hit testing walks elements top-down in
//! creation order and honours `display: none` and `pointer-events: none`.

use std::collections::BTreeMap;

use crate::model::{Point, Rect, Size};
use crate::parse_css_px;
use crate::platform::{Document, ElementId, EventKind, Listener, ListenerId};

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    inline_style: BTreeMap<String, String>,
    computed_style: BTreeMap<String, String>,
    text: String,
    /// Layout box in page coordinates, for page content.
    page_rect: Option<Rect>,
    connected: bool,
}

impl Node {
    fn new(tag: &str, parent: Option<ElementId>, page_rect: Option<Rect>) -> Self {
        Self {
            tag: tag.to_string(),
            parent,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            inline_style: BTreeMap::new(),
            computed_style: BTreeMap::new(),
            text: String::new(),
            page_rect,
            connected: true,
        }
    }

    fn style_px(&self, property: &str) -> Option<f64> {
        self.inline_style
            .get(property)
            .and_then(|v| parse_css_px(v))
    }
}

/// A document that lives entirely in memory.
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    nodes: BTreeMap<ElementId, Node>,
    next_id: u64,
    scroll: Point,
    viewport: Size,
    listeners: Vec<Listener>,
}

impl HeadlessDocument {
    pub fn new(viewport: Size) -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 1,
            scroll: Point::default(),
            viewport,
            listeners: Vec::new(),
        }
    }

    // === Page content ===

    /// Add a page element with a layout box in page coordinates.
    pub fn add_element(&mut self, tag: &str, page_rect: Rect) -> ElementId {
        self.insert(Node::new(tag, None, Some(page_rect)))
    }

    /// Add a nested page element.
    pub fn add_child(&mut self, parent: ElementId, tag: &str, page_rect: Rect) -> ElementId {
        self.insert(Node::new(tag, Some(parent), Some(page_rect)))
    }

    pub fn set_computed_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.computed_style
                .insert(property.to_string(), value.to_string());
        }
    }

    /// Move a page element, e.g. to simulate a reflow.
    pub fn set_page_rect(&mut self, el: ElementId, rect: Rect) {
        if let Some(node) = self.node_mut(el) {
            node.page_rect = Some(rect);
        }
    }

    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Remove an element from the page (alias of `Document::remove`).
    pub fn detach(&mut self, el: ElementId) {
        self.remove(el);
    }

    /// First connected element whose `id` attribute equals `id`.
    pub fn find_by_element_id(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.connected && n.attributes.get("id").map(String::as_str) == Some(id))
            .map(|(el, _)| *el)
    }

    // === Inspection ===

    pub fn text(&self, el: ElementId) -> Option<&str> {
        self.node(el).map(|n| n.text.as_str())
    }

    pub fn inline_style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.node(el)
            .and_then(|n| n.inline_style.get(property))
            .map(String::as_str)
    }

    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.node(el)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Connected element and all ancestors are displayed.
    pub fn is_displayed(&self, el: ElementId) -> bool {
        let mut current = Some(el);
        while let Some(id) = current {
            match self.node(id) {
                Some(n) if n.inline_style.get("display").map(String::as_str) != Some("none") => {
                    current = n.parent;
                }
                _ => return false,
            }
        }
        true
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn connected_count(&self) -> usize {
        self.nodes.values().filter(|n| n.connected).count()
    }

    // === Internals ===

    fn insert(&mut self, node: Node) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(&el).filter(|n| n.connected)
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(&el).filter(|n| n.connected)
    }

    fn hit_testable(&self, el: ElementId) -> bool {
        if !self.is_displayed(el) {
            return false;
        }
        let mut current = Some(el);
        while let Some(id) = current {
            let Some(n) = self.node(id) else {
                return false;
            };
            if n.inline_style.get("pointer-events").map(String::as_str) == Some("none") {
                return false;
            }
            current = n.parent;
        }
        true
    }

    fn styled_rect(&self, node: &Node) -> Rect {
        let parent_origin = node
            .parent
            .and_then(|p| self.bounding_client_rect(p))
            .map(|r| Point::new(r.left, r.top));
        let fixed = node.inline_style.get("position").map(String::as_str) == Some("fixed");
        let width = node.style_px("width").unwrap_or(0.0);
        let height = node.style_px("height").unwrap_or(0.0);
        match (node.style_px("left"), node.style_px("top")) {
            (Some(left), Some(top)) if fixed => Rect::new(left, top, width, height),
            (Some(left), Some(top)) => {
                Rect::new(left - self.scroll.x, top - self.scroll.y, width, height)
            }
            _ => {
                let origin = parent_origin.unwrap_or_default();
                Rect::new(origin.x, origin.y, width, height)
            }
        }
    }
}

impl Document for HeadlessDocument {
    fn element_from_point(&self, point: Point) -> Option<ElementId> {
        self.nodes
            .iter()
            .rev()
            .filter(|(_, n)| n.connected)
            .map(|(el, _)| *el)
            .find(|el| {
                self.hit_testable(*el)
                    && self
                        .bounding_client_rect(*el)
                        .is_some_and(|r| r.contains(point))
            })
    }

    fn is_connected(&self, el: ElementId) -> bool {
        self.node(el).is_some()
    }

    fn bounding_client_rect(&self, el: ElementId) -> Option<Rect> {
        let node = self.node(el)?;
        if !self.is_displayed(el) {
            return Some(Rect::default());
        }
        Some(match node.page_rect {
            Some(r) => r.translate(Point::new(-self.scroll.x, -self.scroll.y)),
            None => self.styled_rect(node),
        })
    }

    fn computed_style(&self, el: ElementId, property: &str) -> Option<String> {
        let node = self.node(el)?;
        node.computed_style
            .get(property)
            .or_else(|| node.inline_style.get(property))
            .cloned()
    }

    fn tag_name(&self, el: ElementId) -> Option<String> {
        self.node(el).map(|n| n.tag.to_uppercase())
    }

    fn element_id(&self, el: ElementId) -> Option<String> {
        self.node(el)
            .and_then(|n| n.attributes.get("id"))
            .filter(|id| !id.is_empty())
            .cloned()
    }

    fn class_list(&self, el: ElementId) -> Vec<String> {
        self.node(el).map(|n| n.classes.clone()).unwrap_or_default()
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).and_then(|n| n.parent)
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el).and_then(|n| n.attributes.get(name)).cloned()
    }

    fn query_by_class(&self, class: &str, attribute: Option<(&str, &str)>) -> Vec<ElementId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.connected && n.classes.iter().any(|c| c == class))
            .filter(|(_, n)| match attribute {
                Some((name, value)) => n.attributes.get(name).map(String::as_str) == Some(value),
                None => true,
            })
            .map(|(el, _)| *el)
            .collect()
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn create_element(&mut self, tag: &str, parent: Option<ElementId>) -> ElementId {
        let parent = parent.filter(|p| self.is_connected(*p));
        self.insert(Node::new(tag, parent, None))
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(node) = self.node_mut(el) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        if let Some(node) = self.node_mut(el) {
            node.classes.retain(|c| c != class);
        }
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.inline_style
                .insert(property.to_string(), value.to_string());
        }
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(el) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(node) = self.node_mut(el) {
            node.text = text.to_string();
        }
    }

    fn remove(&mut self, el: ElementId) {
        if !self.is_connected(el) {
            return;
        }
        let mut doomed = vec![el];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            doomed.extend(
                self.nodes
                    .iter()
                    .filter(|(_, n)| n.connected && n.parent == Some(parent))
                    .map(|(id, _)| *id),
            );
            i += 1;
        }
        for id in doomed {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.connected = false;
            }
        }
    }

    fn add_event_listener(&mut self, listener: Listener) {
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    fn remove_event_listener(&mut self, listener: Listener) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| *l != listener);
        self.listeners.len() != before
    }

    fn listeners(&self, kind: EventKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.id)
            .collect()
    }
}
