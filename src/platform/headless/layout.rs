//! JSON layout fixtures for the headless document.
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "scroll": { "x": 0, "y": 0 },
//!   "elements": [
//!     { "tag": "div", "id": "a", "classes": ["card"],
//!       "rect": { "left": 0, "top": 0, "width": 100, "height": 50 },
//!       "style": { "padding-top": "8px" },
//!       "children": [] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use super::HeadlessDocument;
use crate::model::{Point, Rect, Size};
use crate::platform::{Document, ElementId};

#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    pub viewport: Size,
    #[serde(default)]
    pub scroll: Point,
    #[serde(default)]
    pub elements: Vec<LayoutElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutElement {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    pub rect: Rect,
    /// Computed style values, keyed by CSS property name.
    #[serde(default)]
    pub style: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<LayoutElement>,
}

impl Layout {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a document containing every element of the layout.
    pub fn build(&self) -> HeadlessDocument {
        let mut doc = HeadlessDocument::new(self.viewport);
        doc.set_scroll(self.scroll);
        for element in &self.elements {
            add(&mut doc, None, element);
        }
        doc
    }
}

fn add(doc: &mut HeadlessDocument, parent: Option<ElementId>, element: &LayoutElement) {
    let el = match parent {
        Some(p) => doc.add_child(p, &element.tag, element.rect),
        None => doc.add_element(&element.tag, element.rect),
    };
    if let Some(id) = &element.id {
        doc.set_attribute(el, "id", id);
    }
    for class in &element.classes {
        doc.add_class(el, class);
    }
    for (property, value) in &element.style {
        doc.set_computed_style(el, property, value);
    }
    for child in &element.children {
        add(doc, Some(el), child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure;

    #[test]
    fn builds_nested_layout() {
        let layout = Layout::from_json(
            r#"{
                "viewport": { "width": 800, "height": 600 },
                "elements": [
                    { "tag": "main", "id": "root",
                      "rect": { "left": 0, "top": 0, "width": 800, "height": 600 },
                      "children": [
                        { "tag": "button", "classes": ["primary"],
                          "rect": { "left": 10, "top": 10, "width": 80, "height": 24 },
                          "style": { "padding-left": "6px" } }
                      ] }
                ]
            }"#,
        )
        .unwrap();
        let doc = layout.build();
        let root = doc.find_by_element_id("root").unwrap();
        let button = doc.element_from_point(Point::new(20.0, 20.0)).unwrap();
        assert_eq!(doc.parent(button), Some(root));
        assert_eq!(measure::selector(&doc, button, true), "button.primary");
        assert_eq!(measure::box_model(&doc, button).unwrap().padding.left, 6);
    }
}
