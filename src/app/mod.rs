//! Page orchestration.
//!
//! This module contains the per-page `ScreenRuler`, which ties the
//! measurement engine, the overlay and input handling together and talks to
//! the background coordinator.

pub mod screen_ruler;

pub use screen_ruler::{PageState, ScreenRuler};
