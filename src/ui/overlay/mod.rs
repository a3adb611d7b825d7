//! Overlay artifacts drawn over the page.
//!
//! Every artifact is a document element carrying a `screen-ruler-*` class,
//! positioned in page coordinates, and (except the control panel) ignoring
//! pointer events so hit testing sees the page underneath.

pub mod distance;
pub mod highlight;
pub mod hover_window;
pub mod label;

pub use distance::DistanceOverlay;
pub use highlight::{ElementSelector, HighlightRole};
pub use hover_window::HoverWindow;
pub use label::{label_position, LabelPosition};

use crate::model::{Point, Rect};
use crate::platform::{Document, ElementId};
use crate::px;

/// Create an absolutely positioned, click-through artifact.
pub(crate) fn create_artifact<D: Document + ?Sized>(doc: &mut D, class: &str) -> ElementId {
    let el = doc.create_element("div", None);
    doc.add_class(el, class);
    doc.set_style(el, "position", "absolute");
    doc.set_style(el, "pointer-events", "none");
    el
}

/// Move an artifact's top-left corner (page coordinates).
pub(crate) fn set_origin<D: Document + ?Sized>(doc: &mut D, el: ElementId, at: Point) {
    doc.set_style(el, "left", &px(at.x));
    doc.set_style(el, "top", &px(at.y));
}

/// Size and place an artifact over a page-coordinate rect.
pub(crate) fn set_box<D: Document + ?Sized>(doc: &mut D, el: ElementId, rect: &Rect) {
    set_origin(doc, el, Point::new(rect.left, rect.top));
    doc.set_style(el, "width", &px(rect.width));
    doc.set_style(el, "height", &px(rect.height));
}

pub(crate) fn set_visible<D: Document + ?Sized>(doc: &mut D, el: ElementId, visible: bool) {
    doc.set_style(el, "display", if visible { "block" } else { "none" });
}
