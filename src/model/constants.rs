//! Configuration constants and default values.
//!
//! This module contains all application constants including settings
//! defaults, storage keys, overlay class names and layout limits.

use std::time::Duration;

// === Settings Defaults ===

/// Default highlight colour for the hovered element.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#FF6B6B";

/// Default highlight colour for the fixed element.
pub const DEFAULT_FIXED_COLOR: &str = "#4ECDC4";

/// Default colour of distance lines and labels.
pub const DEFAULT_DISTANCE_COLOR: &str = "#FFE66D";

/// Clicks pass through to the page unless the user opts out.
pub const DEFAULT_INTERACTIVE_MODE: bool = true;

// === Storage Keys ===

/// Key for the enabled flag.
pub const PREF_IS_ENABLED: &str = "isEnabled";

/// Key for the paused flag.
pub const PREF_IS_PAUSED: &str = "isPaused";

/// Key for the theme name.
pub const PREF_THEME: &str = "theme";

/// Key for the cursor position toggle.
pub const PREF_SHOW_CURSOR_POSITION: &str = "showCursorPosition";

/// Key for interactive (click pass-through) mode.
pub const PREF_INTERACTIVE_MODE: &str = "interactiveMode";

/// Key for the hover highlight colour.
pub const PREF_HIGHLIGHT_COLOR: &str = "highlightColor";

/// Key for the fixed highlight colour.
pub const PREF_FIXED_COLOR: &str = "fixedColor";

/// Key for the distance colour.
pub const PREF_DISTANCE_COLOR: &str = "distanceColor";

// === Overlay Class Names ===

/// Prefix reserved for every overlay artifact.
pub const CLASS_PREFIX: &str = "screen-ruler-";

/// Container class; anything inside it belongs to the overlay.
pub const CLASS_EXTENSION: &str = "screen-ruler-extension";

pub const CLASS_HIGHLIGHT: &str = "screen-ruler-highlight";
pub const CLASS_LABEL: &str = "screen-ruler-label";
pub const CLASS_HOVER_WINDOW: &str = "screen-ruler-hover-window";
pub const CLASS_DISTANCE_LINE: &str = "screen-ruler-distance-line";
pub const CLASS_DISTANCE_LABEL: &str = "screen-ruler-distance-label";
pub const CLASS_CONTROL_PANEL: &str = "screen-ruler-control-panel";
pub const CLASS_STATUS_INDICATOR: &str = "screen-ruler-status-indicator";
pub const CLASS_PAUSE_BUTTON: &str = "screen-ruler-pause-btn";
pub const CLASS_SETTINGS_BUTTON: &str = "screen-ruler-settings-btn";

/// Marker attribute of the single fixed-element label.
pub const ATTR_FIXED: &str = "data-fixed";

// === Layout Limits ===

/// Approximate label footprint used for placement decisions.
pub const LABEL_WIDTH: f64 = 150.0;
pub const LABEL_HEIGHT: f64 = 30.0;

/// Gap between an element and its hover window.
pub const HOVER_WINDOW_GAP: f64 = 10.0;

/// Hover window size used when the document cannot measure it yet.
pub const HOVER_WINDOW_FALLBACK_WIDTH: f64 = 220.0;
pub const HOVER_WINDOW_FALLBACK_HEIGHT: f64 = 96.0;

/// Initial control panel offset from the top-right viewport corner.
pub const CONTROL_PANEL_MARGIN: f64 = 20.0;

/// Control panel footprint, used to keep it inside the viewport while dragged.
pub const CONTROL_PANEL_WIDTH: f64 = 180.0;
pub const CONTROL_PANEL_HEIGHT: f64 = 40.0;

/// Maximum number of classes shown in a long selector.
pub const MAX_SELECTOR_CLASSES: usize = 3;

// === Input ===

/// Pointer-move throttle window (one frame at 60fps).
pub const POINTER_THROTTLE: Duration = Duration::from_millis(16);

// === Status Text ===

pub const STATUS_TEXT_ACTIVE: &str = "Active";
pub const STATUS_TEXT_PAUSED: &str = "Paused";
pub const STATUS_TEXT_DISABLED: &str = "Disabled";
pub const BUTTON_TEXT_PAUSE: &str = "Pause";
pub const BUTTON_TEXT_RESUME: &str = "Resume";
