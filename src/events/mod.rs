//! Events and messages.
//!
//! Two layers live here:
//!
//! - **Page events** (`types`, `bus`): semantic events inside one page,
//!   published by input handling and drained by the page orchestrator.
//! - **Wire messages** (`messages`): requests, responses and page
//!   notifications exchanged between the background, pages and the popup.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ EventManager │   │ ControlPanel │
//! └──────┬───────┘   └──────┬───────┘
//!        │ publish()        │ publish()
//!        ▼                  ▼
//! ┌─────────────────────────────────┐
//! │        EventBus (per page)      │
//! └────────────────┬────────────────┘
//!                  │ drain()
//!                  ▼
//! ┌─────────────────────────────────┐      Request       ┌────────────┐
//! │     Dispatcher → ScreenRuler    │ ─────────────────▶ │ Background │
//! │                                 │ ◀───────────────── │            │
//! └─────────────────────────────────┘    PageMessage     └────────────┘
//! ```

pub mod bus;
pub mod messages;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use messages::{PageMessage, PausePayload, Request, Response, StatusResponse};
pub use types::PageEvent;
