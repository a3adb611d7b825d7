//! Background context.
//!
//! - state.rs: coordinator state, tab status, broadcast report
//! - coordinator.rs: request routing, persistence and page notification

pub mod coordinator;
pub mod state;

pub use coordinator::Coordinator;
pub use state::{BroadcastReport, CoordinatorState, TabStatus};
