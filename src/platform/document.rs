//! The page document seam.
//!
//! `Document` is the slice of the DOM the overlay needs: hit testing,
//! geometry, computed style, element creation for overlay artifacts, and
//! document-level listener registration. A browser binding implements it
//! over the real DOM; `platform::headless` implements it in memory.

use std::fmt;

use crate::model::{Point, Rect, Size};

/// Lookup handle for an element in a live document.
///
/// Holding an id never keeps the element alive; every accessor returns
/// `None` once the element has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Document-level event types the overlay listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerDown,
    PointerUp,
    Click,
    KeyDown,
}

/// Identity of a registered handler.
///
/// Registration and removal must use the same value: a handler is only
/// removed when its id matches the one it was added with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// A handler registration: which event, which handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Listener {
    pub kind: EventKind,
    pub id: ListenerId,
}

impl Listener {
    pub const fn new(kind: EventKind, id: ListenerId) -> Self {
        Self { kind, id }
    }
}

/// The DOM surface used by the measurement engine and the overlays.
pub trait Document {
    // === Queries ===

    /// Topmost hit-testable element at a viewport point.
    fn element_from_point(&self, point: Point) -> Option<ElementId>;

    /// False once the element has been removed from the page.
    fn is_connected(&self, el: ElementId) -> bool;

    /// Viewport-relative bounding box.
    fn bounding_client_rect(&self, el: ElementId) -> Option<Rect>;

    /// Computed value of a CSS property, e.g. `padding-top`.
    fn computed_style(&self, el: ElementId, property: &str) -> Option<String>;

    fn tag_name(&self, el: ElementId) -> Option<String>;

    /// The `id` attribute, if non-empty.
    fn element_id(&self, el: ElementId) -> Option<String>;

    fn class_list(&self, el: ElementId) -> Vec<String>;

    fn parent(&self, el: ElementId) -> Option<ElementId>;

    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    /// Connected elements carrying `class`, optionally filtered by an
    /// attribute value, in document order.
    fn query_by_class(&self, class: &str, attribute: Option<(&str, &str)>) -> Vec<ElementId>;

    fn scroll_offset(&self) -> Point;

    fn viewport_size(&self) -> Size;

    // === Mutation ===

    /// Create an element appended to `parent`, or to the body when `None`.
    fn create_element(&mut self, tag: &str, parent: Option<ElementId>) -> ElementId;

    fn add_class(&mut self, el: ElementId, class: &str);

    fn remove_class(&mut self, el: ElementId, class: &str);

    fn set_style(&mut self, el: ElementId, property: &str, value: &str);

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);

    fn set_text(&mut self, el: ElementId, text: &str);

    /// Detach the element and its subtree. Unknown ids are ignored.
    fn remove(&mut self, el: ElementId);

    // === Listeners ===

    /// Register a document-level listener. Adding an identical listener
    /// twice has no effect.
    fn add_event_listener(&mut self, listener: Listener);

    /// Remove a listener previously added with the same value. Returns
    /// whether anything was removed.
    fn remove_event_listener(&mut self, listener: Listener) -> bool;

    /// Registered handlers for an event kind, in registration order.
    fn listeners(&self, kind: EventKind) -> Vec<ListenerId>;
}

/// Whether `el` or any ancestor is one of our overlay artifacts.
pub fn is_overlay_element<D: Document + ?Sized>(doc: &D, el: ElementId) -> bool {
    use crate::model::constants::{CLASS_EXTENSION, CLASS_PREFIX};

    let mut current = Some(el);
    while let Some(node) = current {
        if doc
            .class_list(node)
            .iter()
            .any(|c| c == CLASS_EXTENSION || c.starts_with(CLASS_PREFIX))
        {
            return true;
        }
        current = doc.parent(node);
    }
    false
}
