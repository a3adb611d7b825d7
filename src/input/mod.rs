//! Input handling module.
//!
//! This module contains input handling for the page:
//! - types.rs: raw input events, modifiers, listener id allocation
//! - throttle.rs: leading-then-trailing throttle for pointer moves
//! - event_manager.rs: document listeners → semantic page events

pub mod event_manager;
pub mod throttle;
pub mod types;

pub use event_manager::{EventManager, InputContext};
pub use throttle::Throttle;
pub use types::{InputEvent, InputOutcome, Key, ListenerIds, Modifiers};
