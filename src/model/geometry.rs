//! Geometry value types shared by the measurement engine and the overlays.
//!
//! Everything here is plain data. Rectangles coming from a [`Document`]
//! are viewport-relative; page coordinates add the scroll offset.
//!
//! [`Document`]: crate::platform::Document

use serde::{Deserialize, Serialize};

use crate::round_px;

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, shaped like a DOMRect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build from edges: `(left, top, right, bottom)`.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Shift by an offset, e.g. viewport → page coordinates.
    pub fn translate(&self, by: Point) -> Self {
        Self::new(self.left + by.x, self.top + by.y, self.width, self.height)
    }

    /// Inclusive of the top-left edge, exclusive of the bottom-right.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Rounded page-relative rectangle of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: i64,
    pub height: i64,
    pub top: i64,
    pub left: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Dimensions {
    /// Round a viewport rect after applying the scroll offset.
    pub fn from_client_rect(rect: &Rect, scroll: Point) -> Self {
        Self {
            width: round_px(rect.width),
            height: round_px(rect.height),
            top: round_px(rect.top + scroll.y),
            left: round_px(rect.left + scroll.x),
            right: round_px(rect.right() + scroll.x),
            bottom: round_px(rect.bottom() + scroll.y),
        }
    }
}

/// Four rounded, non-negative side values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sides {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Sides {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// CSS shorthand order: `top right bottom left`.
    pub fn shorthand(&self) -> String {
        format!("{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Rounded content box size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentSize {
    pub width: u32,
    pub height: u32,
}

/// Content/padding/border/margin decomposition of a rendered box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxModel {
    pub content: ContentSize,
    pub padding: Sides,
    pub border: Sides,
    pub margin: Sides,
}

/// Gap between two elements on each axis.
///
/// A gap is reported only when the projections on that axis do not overlap
/// and the rounded gap is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distance {
    pub horizontal: i64,
    pub vertical: i64,
    pub has_horizontal: bool,
    pub has_vertical: bool,
}

impl Distance {
    /// Measure the gaps between two rectangles in the same coordinate space.
    pub fn between(a: &Rect, b: &Rect) -> Self {
        let horizontal = axis_gap(a.left, a.right(), b.left, b.right());
        let vertical = axis_gap(a.top, a.bottom(), b.top, b.bottom());
        Self {
            horizontal: horizontal.unwrap_or(0),
            vertical: vertical.unwrap_or(0),
            has_horizontal: horizontal.is_some(),
            has_vertical: vertical.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.has_horizontal && !self.has_vertical
    }
}

/// Rounded gap between `[a_start, a_end]` and `[b_start, b_end]`, if any.
fn axis_gap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> Option<i64> {
    let raw = if a_end < b_start {
        b_start - a_end
    } else if b_end < a_start {
        a_start - b_end
    } else {
        return None;
    };
    let gap = round_px(raw);
    (gap > 0).then_some(gap)
}

/// Overlap of two ranges, if they intersect.
pub fn overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> Option<(f64, f64)> {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    (start <= end).then_some((start, end))
}
