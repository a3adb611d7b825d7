//! User interface module.
//!
//! This module contains the on-page UI components:
//!
//! ## overlay/
//! - highlight.rs: hover and fixed highlight boxes, fixed label
//! - label.rs: label placement around an element
//! - hover_window.rs: selector, size and box model readout
//! - distance.rs: gap lines between fixed and hovered elements
//!
//! ## control_panel.rs
//! - status indicator, pause/resume and settings buttons, dragging

pub mod control_panel;
pub mod overlay;

pub use control_panel::{ControlPanel, PanelStatus};
pub use overlay::{DistanceOverlay, ElementSelector, HighlightRole, HoverWindow};
