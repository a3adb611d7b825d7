//! Screen ruler: hover page elements to see their size and box model, fix
//! one element and measure its distance to another.
//!
//! Three contexts cooperate: the [`background::Coordinator`] owns settings,
//! one [`app::ScreenRuler`] runs per page, and the [`popup::PopupController`]
//! mirrors state for the toolbar popup. The DOM, storage and messaging are
//! traits in [`platform`]; [`platform::headless`] implements them in memory.
//!
//! The helpers below are pure and used across modules.

pub mod app;
pub mod background;
pub mod error;
pub mod events;
pub mod handlers;
pub mod input;
pub mod logging;
pub mod measure;
pub mod model;
pub mod platform;
pub mod popup;
pub mod ui;

pub use app::{PageState, ScreenRuler};
pub use background::Coordinator;
pub use error::{DeliveryError, StorageError};
pub use events::{EventBus, EventPublisher, PageEvent, PageMessage, Request, Response};
pub use model::{Settings, SettingsPatch};
pub use popup::PopupController;

/// Clamp a value to [lo, hi]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Round to whole pixels the way browsers report them: halves go up
/// (`-2.5` → `-2`, `2.5` → `3`).
pub fn round_px(v: f64) -> i64 {
    if v.is_finite() {
        (v + 0.5).floor() as i64
    } else {
        0
    }
}

/// Parse a CSS length like `parseFloat`: the longest numeric prefix,
/// ignoring the unit. `"12.5px"` → 12.5, `"auto"` → `None`.
pub fn parse_css_px(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut seen_dot = false;
    let mut seen_digit = false;
    while let Some(&c) = bytes.get(end) {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == b'.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    // Exponent only counts when followed by digits.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(|c| c.is_ascii_digit()) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    t[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse `#RRGGBB` or `#RRGGBBAA` into normalised floats [0..1].
pub fn parse_hex_color(s: &str) -> Option<(f64, f64, f64, f64)> {
    let t = s.trim();
    let t = t.strip_prefix('#').unwrap_or(t);
    if !t.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&t[i..i + 2], 16).ok();
    let (r, g, b, a) = match t.len() {
        6 => (channel(0)?, channel(2)?, channel(4)?, 255u8),
        8 => (channel(0)?, channel(2)?, channel(4)?, channel(6)?),
        _ => return None,
    };
    Some((
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
        a as f64 / 255.0,
    ))
}

/// Format a pixel value for a CSS property.
pub fn px(v: f64) -> String {
    format!("{v}px")
}
