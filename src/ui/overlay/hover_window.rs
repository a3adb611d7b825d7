//! Floating info window next to the hovered element.

use super::{create_artifact, set_origin, set_visible};
use crate::measure;
use crate::model::constants::{
    CLASS_HOVER_WINDOW, HOVER_WINDOW_FALLBACK_HEIGHT, HOVER_WINDOW_FALLBACK_WIDTH,
    HOVER_WINDOW_GAP,
};
use crate::model::{Point, Rect, Size, Theme};
use crate::platform::{Document, ElementId};

/// Info window: selector, size and box model of the hovered element.
#[derive(Debug, Default)]
pub struct HoverWindow {
    window: Option<ElementId>,
    rows: Vec<ElementId>,
    lines: Vec<String>,
    visible: bool,
    theme: Option<Theme>,
}

impl HoverWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create<D: Document + ?Sized>(&mut self, doc: &mut D, theme: Theme) {
        let window = create_artifact(doc, CLASS_HOVER_WINDOW);
        set_visible(doc, window, false);
        self.window = Some(window);
        self.set_theme(doc, theme);
    }

    /// Swap the `theme-*` class.
    pub fn set_theme<D: Document + ?Sized>(&mut self, doc: &mut D, theme: Theme) {
        let Some(window) = self.window else {
            return;
        };
        if let Some(old) = self.theme.replace(theme) {
            doc.remove_class(window, &old.class_name());
        }
        doc.add_class(window, &theme.class_name());
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn element(&self) -> Option<ElementId> {
        self.window
    }

    /// Text rows currently shown, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Fill the window for `el` and place it. `cursor` adds a cursor row.
    pub fn show<D: Document + ?Sized>(&mut self, doc: &mut D, el: ElementId, cursor: Option<Point>) {
        let Some(window) = self.window else {
            return;
        };
        let (Some(dims), Some(bm), Some(client)) = (
            measure::dimensions(doc, el),
            measure::box_model(doc, el),
            measure::client_rect(doc, el),
        ) else {
            return;
        };

        let mut lines = vec![
            measure::selector(doc, el, false),
            format!("{} × {} px", dims.width, dims.height),
            format!("Content: {}×{}", bm.content.width, bm.content.height),
            format!("Padding: {}", bm.padding.shorthand()),
            format!("Border: {}", bm.border.shorthand()),
            format!("Margin: {}", bm.margin.shorthand()),
        ];
        if let Some(c) = cursor {
            lines.push(format!("Cursor: {}, {}", c.x.round(), c.y.round()));
        }
        self.render_rows(doc, window, &lines);
        self.lines = lines;

        let own = doc
            .bounding_client_rect(window)
            .filter(|r| !r.is_empty())
            .map(|r| Size::new(r.width, r.height))
            .unwrap_or(Size::new(
                HOVER_WINDOW_FALLBACK_WIDTH,
                HOVER_WINDOW_FALLBACK_HEIGHT,
            ));
        let at = window_origin(&client, own, doc.viewport_size(), doc.scroll_offset());
        set_origin(doc, window, at);
        set_visible(doc, window, true);
        self.visible = true;
    }

    pub fn hide<D: Document + ?Sized>(&mut self, doc: &mut D) {
        if let Some(window) = self.window {
            set_visible(doc, window, false);
        }
        self.visible = false;
    }

    pub fn destroy<D: Document + ?Sized>(&mut self, doc: &mut D) {
        if let Some(window) = self.window.take() {
            doc.remove(window);
        }
        self.rows.clear();
        self.lines.clear();
        self.visible = false;
        self.theme = None;
    }

    fn render_rows<D: Document + ?Sized>(&mut self, doc: &mut D, window: ElementId, lines: &[String]) {
        for row in self.rows.drain(..) {
            doc.remove(row);
        }
        for (i, line) in lines.iter().enumerate() {
            let row = doc.create_element("div", Some(window));
            doc.add_class(row, row_class(i));
            doc.set_text(row, line);
            self.rows.push(row);
        }
    }
}

fn row_class(index: usize) -> &'static str {
    match index {
        0 => "selector",
        1 => "dimensions",
        _ => "box-model-row",
    }
}

/// Page-coordinate origin for a window of `size` next to `rect` (a
/// viewport rect).
///
/// Right of the element first. Overflowing the right edge moves it to the
/// left side; falling off the left edge drops it below the element.
/// Overflowing the bottom lifts it above, and falling off the top clamps it
/// just under the top edge.
pub fn window_origin(rect: &Rect, size: Size, viewport: Size, scroll: Point) -> Point {
    let gap = HOVER_WINDOW_GAP;
    let mut left = rect.right() + scroll.x + gap;
    let mut top = rect.top + scroll.y;

    if left + size.width > viewport.width + scroll.x {
        left = rect.left + scroll.x - size.width - gap;
    }
    if left < scroll.x {
        left = rect.left + scroll.x + gap;
        top = rect.bottom() + scroll.y + gap;
    }
    if top + size.height > viewport.height + scroll.y {
        top = rect.top + scroll.y - size.height - gap;
    }
    if top < scroll.y {
        top = scroll.y + gap;
    }
    Point::new(left, top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessDocument;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);
    const WINDOW: Size = Size::new(200.0, 100.0);

    #[test]
    fn placed_right_of_element() {
        let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        let at = window_origin(&rect, WINDOW, VIEWPORT, Point::default());
        assert_eq!(at, Point::new(160.0, 100.0));
    }

    #[test]
    fn flips_left_near_right_edge() {
        let rect = Rect::new(800.0, 100.0, 100.0, 50.0);
        let at = window_origin(&rect, WINDOW, VIEWPORT, Point::default());
        assert_eq!(at, Point::new(590.0, 100.0));
    }

    #[test]
    fn drops_below_when_neither_side_fits() {
        let rect = Rect::new(50.0, 100.0, 900.0, 50.0);
        let at = window_origin(&rect, WINDOW, VIEWPORT, Point::default());
        assert_eq!(at, Point::new(60.0, 160.0));
    }

    #[test]
    fn lifts_above_then_clamps_to_top() {
        let rect = Rect::new(100.0, 750.0, 50.0, 40.0);
        let at = window_origin(&rect, WINDOW, VIEWPORT, Point::default());
        assert_eq!(at, Point::new(160.0, 640.0));

        let tall_window = Size::new(200.0, 790.0);
        let at = window_origin(&Rect::new(100.0, 20.0, 50.0, 40.0), tall_window, VIEWPORT, Point::new(0.0, 300.0));
        assert_eq!(at.y, 310.0);
    }

    #[test]
    fn show_renders_box_model_rows() {
        let mut doc = HeadlessDocument::new(VIEWPORT);
        let el = doc.add_element("button", Rect::new(10.0, 10.0, 80.0, 24.0));
        doc.set_attribute(el, "id", "go");
        doc.set_computed_style(el, "padding-left", "6px");
        doc.set_computed_style(el, "padding-right", "6px");

        let mut window = HoverWindow::new();
        window.create(&mut doc, Theme::Dark);
        window.show(&mut doc, el, None);
        assert!(window.is_visible());
        assert_eq!(
            window.lines(),
            [
                "button#go",
                "80 × 24 px",
                "Content: 80×24",
                "Padding: 0 6 0 6",
                "Border: 0 0 0 0",
                "Margin: 0 0 0 0",
            ]
        );
        let el_window = window.element().unwrap();
        assert!(doc.has_class(el_window, "theme-dark"));
        assert_eq!(doc.inline_style(el_window, "left"), Some("100px"));

        window.show(&mut doc, el, Some(Point::new(12.4, 30.0)));
        assert_eq!(window.lines().last().map(String::as_str), Some("Cursor: 12, 30"));

        window.hide(&mut doc);
        assert!(!doc.is_displayed(el_window));
    }

    #[test]
    fn theme_class_is_swapped() {
        let mut doc = HeadlessDocument::new(VIEWPORT);
        let mut window = HoverWindow::new();
        window.create(&mut doc, Theme::Auto);
        window.set_theme(&mut doc, Theme::Light);
        let el = window.element().unwrap();
        assert!(doc.has_class(el, "theme-light"));
        assert!(!doc.has_class(el, "theme-auto"));
    }
}
