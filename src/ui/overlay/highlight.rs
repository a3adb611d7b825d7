//! Highlight boxes and the fixed-element label.

use super::label::create_label;
use super::{create_artifact, set_box, set_visible};
use crate::measure;
use crate::model::constants::{ATTR_FIXED, CLASS_HIGHLIGHT, CLASS_LABEL};
use crate::model::Settings;
use crate::platform::{Document, ElementId};

/// Which of the two highlight boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightRole {
    Hover,
    Fixed,
}

/// Owns the hover and fixed highlight boxes.
#[derive(Debug, Default)]
pub struct ElementSelector {
    hover_box: Option<ElementId>,
    fixed_box: Option<ElementId>,
}

impl ElementSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create both boxes, hidden.
    pub fn init<D: Document + ?Sized>(&mut self, doc: &mut D, settings: &Settings) {
        let hover = create_artifact(doc, CLASS_HIGHLIGHT);
        let fixed = create_artifact(doc, CLASS_HIGHLIGHT);
        doc.add_class(fixed, "fixed");
        for el in [hover, fixed] {
            set_visible(doc, el, false);
        }
        self.hover_box = Some(hover);
        self.fixed_box = Some(fixed);
        self.apply_colors(doc, settings);
    }

    /// Border colours from settings.
    pub fn apply_colors<D: Document + ?Sized>(&self, doc: &mut D, settings: &Settings) {
        if let Some(el) = self.hover_box {
            doc.set_style(el, "border-color", &settings.highlight_color);
        }
        if let Some(el) = self.fixed_box {
            doc.set_style(el, "border-color", &settings.fixed_color);
        }
    }

    pub fn highlight_element(&self, role: HighlightRole) -> Option<ElementId> {
        match role {
            HighlightRole::Hover => self.hover_box,
            HighlightRole::Fixed => self.fixed_box,
        }
    }

    /// Show the box over `el`. Returns false when `el` is gone.
    pub fn update_highlight<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        el: ElementId,
        role: HighlightRole,
    ) -> bool {
        let Some(highlight) = self.highlight_element(role) else {
            return false;
        };
        let Some(rect) = measure::page_rect(doc, el) else {
            return false;
        };
        set_visible(doc, highlight, true);
        set_box(doc, highlight, &rect);
        true
    }

    pub fn hide_highlight<D: Document + ?Sized>(&self, doc: &mut D, role: HighlightRole) {
        if let Some(highlight) = self.highlight_element(role) {
            set_visible(doc, highlight, false);
        }
    }

    /// Draw the fixed box and the `"<selector> <W>×<H>"` label for `el`,
    /// replacing any earlier fixed label. Returns false when `el` is gone.
    pub fn fix_element<D: Document + ?Sized>(&self, doc: &mut D, el: ElementId) -> bool {
        let Some(dims) = measure::dimensions(doc, el) else {
            return false;
        };
        if !self.update_highlight(doc, el, HighlightRole::Fixed) {
            return false;
        }
        remove_fixed_labels(doc);

        let text = format!(
            "{} {}×{}",
            measure::selector(doc, el, true),
            dims.width,
            dims.height
        );
        if let Some(label) = create_label(doc, el, &text) {
            doc.set_attribute(label, ATTR_FIXED, "true");
        }
        true
    }

    pub fn unfix_element<D: Document + ?Sized>(&self, doc: &mut D) {
        self.hide_highlight(doc, HighlightRole::Fixed);
        remove_fixed_labels(doc);
    }

    /// Remove both boxes and every label.
    pub fn destroy<D: Document + ?Sized>(&mut self, doc: &mut D) {
        for el in [self.hover_box.take(), self.fixed_box.take()]
            .into_iter()
            .flatten()
        {
            doc.remove(el);
        }
        for label in doc.query_by_class(CLASS_LABEL, None) {
            doc.remove(label);
        }
    }
}

fn remove_fixed_labels<D: Document + ?Sized>(doc: &mut D) {
    for label in doc.query_by_class(CLASS_LABEL, Some((ATTR_FIXED, "true"))) {
        doc.remove(label);
    }
}
