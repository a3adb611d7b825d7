//! Distance lines between the fixed and the hovered element.

use super::{create_artifact, set_origin};
use crate::measure;
use crate::model::constants::{CLASS_DISTANCE_LABEL, CLASS_DISTANCE_LINE};
use crate::model::geometry::overlap;
use crate::model::{Distance, Point, Rect};
use crate::platform::{Document, ElementId};
use crate::px;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn class(self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

/// Line segment in viewport coordinates plus the gap it represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapLine {
    pub start: Point,
    pub length: f64,
    pub gap: i64,
    horizontal: bool,
}

impl GapLine {
    pub fn midpoint(&self) -> Point {
        if self.horizontal {
            Point::new(self.start.x + self.length / 2.0, self.start.y)
        } else {
            Point::new(self.start.x, self.start.y + self.length / 2.0)
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }
}

/// Lines for every axis with a gap. Each spans exactly the gap and sits on
/// the midline of the perpendicular overlap, or on the smaller of the two
/// centre lines when there is none.
pub fn gap_lines(a: &Rect, b: &Rect) -> Vec<GapLine> {
    let distance = Distance::between(a, b);
    let mut lines = Vec::with_capacity(2);

    if distance.has_horizontal {
        let (start, end) = if a.right() <= b.left {
            (a.right(), b.left)
        } else {
            (b.right(), a.left)
        };
        let y = overlap(a.top, a.bottom(), b.top, b.bottom())
            .map(|(s, e)| (s + e) / 2.0)
            .unwrap_or_else(|| a.center().y.min(b.center().y));
        lines.push(GapLine {
            start: Point::new(start, y),
            length: end - start,
            gap: distance.horizontal,
            horizontal: true,
        });
    }
    if distance.has_vertical {
        let (start, end) = if a.bottom() <= b.top {
            (a.bottom(), b.top)
        } else {
            (b.bottom(), a.top)
        };
        let x = overlap(a.left, a.right(), b.left, b.right())
            .map(|(s, e)| (s + e) / 2.0)
            .unwrap_or_else(|| a.center().x.min(b.center().x));
        lines.push(GapLine {
            start: Point::new(x, start),
            length: end - start,
            gap: distance.vertical,
            horizontal: false,
        });
    }
    lines
}

/// Owns the current batch of distance lines and labels.
#[derive(Debug, Default)]
pub struct DistanceOverlay {
    artifacts: Vec<ElementId>,
}

impl DistanceOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraw the gaps between `fixed` and `hovered`. Draws nothing when
    /// either is gone or they overlap on both axes.
    pub fn show<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        fixed: ElementId,
        hovered: ElementId,
        color: &str,
    ) {
        self.clear(doc);
        let (Some(a), Some(b)) = (
            measure::client_rect(doc, fixed),
            measure::client_rect(doc, hovered),
        ) else {
            return;
        };
        let scroll = doc.scroll_offset();
        for line in gap_lines(&a, &b) {
            self.draw(doc, &line, scroll, color);
        }
    }

    pub fn clear<D: Document + ?Sized>(&mut self, doc: &mut D) {
        for el in self.artifacts.drain(..) {
            doc.remove(el);
        }
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    fn draw<D: Document + ?Sized>(&mut self, doc: &mut D, line: &GapLine, scroll: Point, color: &str) {
        let axis = if line.horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };

        let el = create_artifact(doc, CLASS_DISTANCE_LINE);
        doc.add_class(el, axis.class());
        set_origin(doc, el, Point::new(line.start.x + scroll.x, line.start.y + scroll.y));
        match axis {
            Axis::Horizontal => doc.set_style(el, "width", &px(line.length)),
            Axis::Vertical => doc.set_style(el, "height", &px(line.length)),
        }
        doc.set_style(el, "background-color", color);
        self.artifacts.push(el);

        let mid = line.midpoint();
        let label = create_artifact(doc, CLASS_DISTANCE_LABEL);
        doc.set_text(label, &format!("{}px", line.gap));
        set_origin(doc, label, Point::new(mid.x + scroll.x, mid.y + scroll.y));
        doc.set_style(label, "transform", "translate(-50%, -50%)");
        doc.set_style(label, "background-color", color);
        self.artifacts.push(label);
    }
}
