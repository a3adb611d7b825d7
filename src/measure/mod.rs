//! Measurement engine.
//!
//! Pure reads over a [`Document`]: rounded page geometry, the box-model
//! breakdown, a CSS-like descriptor, and the gap between two elements.
//! Every function returns `None` (or an empty string) for a missing or
//! detached element, and callers treat that as "skip this update".

use crate::model::constants::MAX_SELECTOR_CLASSES;
use crate::model::{BoxModel, ContentSize, Dimensions, Distance, Rect, Sides};
use crate::parse_css_px;
use crate::platform::{Document, ElementId};
use crate::round_px;

/// Viewport rect of a live element.
pub fn client_rect<D: Document + ?Sized>(doc: &D, el: ElementId) -> Option<Rect> {
    if !doc.is_connected(el) {
        return None;
    }
    doc.bounding_client_rect(el)
}

/// Rect in page coordinates (viewport rect + scroll offset).
pub fn page_rect<D: Document + ?Sized>(doc: &D, el: ElementId) -> Option<Rect> {
    client_rect(doc, el).map(|r| r.translate(doc.scroll_offset()))
}

/// Rounded page-relative rectangle.
pub fn dimensions<D: Document + ?Sized>(doc: &D, el: ElementId) -> Option<Dimensions> {
    let rect = client_rect(doc, el)?;
    Some(Dimensions::from_client_rect(&rect, doc.scroll_offset()))
}

/// Padding, border and margin from computed style; content from the
/// bounding box. Absent or unparsable values count as 0.
pub fn box_model<D: Document + ?Sized>(doc: &D, el: ElementId) -> Option<BoxModel> {
    let rect = client_rect(doc, el)?;
    let sides = |prefix: &str, suffix: &str| {
        let side = |name: &str| style_px(doc, el, &format!("{prefix}-{name}{suffix}"));
        Sides::new(side("top"), side("right"), side("bottom"), side("left"))
    };
    Some(BoxModel {
        content: ContentSize {
            width: non_negative(round_px(rect.width)),
            height: non_negative(round_px(rect.height)),
        },
        padding: sides("padding", ""),
        border: sides("border", "-width"),
        margin: sides("margin", ""),
    })
}

/// Tag-based descriptor.
///
/// Short form: `tag#id`, else `tag.firstClass`, else `tag`.
/// Long form: `tag`, then `#id` if any, then up to three classes joined by
/// `.`, with `...` appended when there are more.
pub fn selector<D: Document + ?Sized>(doc: &D, el: ElementId, short: bool) -> String {
    if !doc.is_connected(el) {
        return String::new();
    }
    let Some(tag) = doc.tag_name(el) else {
        return String::new();
    };
    let mut out = tag.to_lowercase();
    let id = doc.element_id(el).filter(|id| !id.is_empty());
    let classes = doc.class_list(el);

    if short {
        if let Some(id) = id {
            out.push('#');
            out.push_str(&id);
        } else if let Some(first) = classes.first() {
            out.push('.');
            out.push_str(first);
        }
        return out;
    }

    if let Some(id) = id {
        out.push('#');
        out.push_str(&id);
    }
    if !classes.is_empty() {
        let shown: Vec<&str> = classes
            .iter()
            .take(MAX_SELECTOR_CLASSES)
            .map(String::as_str)
            .collect();
        out.push('.');
        out.push_str(&shown.join("."));
        if classes.len() > MAX_SELECTOR_CLASSES {
            out.push_str("...");
        }
    }
    out
}

/// Gap between two elements on each axis.
pub fn distance<D: Document + ?Sized>(doc: &D, a: ElementId, b: ElementId) -> Option<Distance> {
    let ra = client_rect(doc, a)?;
    let rb = client_rect(doc, b)?;
    Some(Distance::between(&ra, &rb))
}

fn style_px<D: Document + ?Sized>(doc: &D, el: ElementId, property: &str) -> u32 {
    doc.computed_style(el, property)
        .and_then(|v| parse_css_px(&v))
        .map(|v| non_negative(round_px(v)))
        .unwrap_or(0)
}

fn non_negative(v: i64) -> u32 {
    v.clamp(0, u32::MAX as i64) as u32
}
