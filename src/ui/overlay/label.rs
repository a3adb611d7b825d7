//! Info labels attached to an element.

use super::{create_artifact, set_origin};
use crate::model::constants::{CLASS_LABEL, LABEL_HEIGHT, LABEL_WIDTH};
use crate::model::{Point, Rect, Size};
use crate::platform::{Document, ElementId};

/// Side of the element a label sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    Top,
    Right,
    Bottom,
    Left,
}

impl LabelPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelPosition::Top => "top",
            LabelPosition::Right => "right",
            LabelPosition::Bottom => "bottom",
            LabelPosition::Left => "left",
        }
    }
}

/// First side, in the order top → right → bottom → left, with room for a
/// label footprint inside the viewport. Left when nothing fits.
///
/// `rect` is viewport-relative.
pub fn label_position(rect: &Rect, viewport: Size) -> LabelPosition {
    if rect.top - LABEL_HEIGHT > 0.0 {
        LabelPosition::Top
    } else if rect.right() + LABEL_WIDTH < viewport.width {
        LabelPosition::Right
    } else if rect.bottom() + LABEL_HEIGHT < viewport.height {
        LabelPosition::Bottom
    } else {
        LabelPosition::Left
    }
}

/// Top-left corner of a label placed on `side` of a page-coordinate rect.
pub fn label_origin(page_rect: &Rect, side: LabelPosition) -> Point {
    match side {
        LabelPosition::Top => Point::new(page_rect.left, page_rect.top - LABEL_HEIGHT),
        LabelPosition::Right => Point::new(page_rect.right(), page_rect.top),
        LabelPosition::Bottom => Point::new(page_rect.left, page_rect.bottom()),
        LabelPosition::Left => Point::new(page_rect.left - LABEL_WIDTH, page_rect.top),
    }
}

/// Create a label next to `el`. `None` if the element is gone.
pub fn create_label<D: Document + ?Sized>(
    doc: &mut D,
    el: ElementId,
    text: &str,
) -> Option<ElementId> {
    if !doc.is_connected(el) {
        return None;
    }
    let client = doc.bounding_client_rect(el)?;
    let page = client.translate(doc.scroll_offset());
    let side = label_position(&client, doc.viewport_size());

    let label = create_artifact(doc, CLASS_LABEL);
    doc.add_class(label, side.as_str());
    doc.set_text(label, text);
    set_origin(doc, label, label_origin(&page, side));
    Some(label)
}
