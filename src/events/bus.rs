//! Page-local event bus using mpsc channels.
//!
//! The bus provides a simple publish/drain mechanism where:
//! - Input handling and the control panel publish via `EventPublisher::publish()`
//! - The page orchestrator drains via `EventBus::drain()` after each input
//!
//! Every page owns its own bus; nothing here is process-global.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::types::PageEvent;

/// Event bus for one page.
///
/// Uses a multi-producer, single-consumer (mpsc) channel internally.
///
/// # Example
///
/// ```
/// use screen_ruler::events::{EventBus, PageEvent};
///
/// let bus = EventBus::new();
/// let publisher = bus.publisher();
///
/// publisher.publish(PageEvent::Unfix);
///
/// let events = bus.drain();
/// assert_eq!(events.len(), 1);
/// ```
pub struct EventBus {
    sender: Sender<PageEvent>,
    receiver: Receiver<PageEvent>,
}

impl EventBus {
    /// Create a new event bus.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Get a publisher handle. Publishers are cheap to clone.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Try to receive the next event without blocking.
    pub fn try_recv(&self) -> Option<PageEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            // The bus holds a sender itself, so Disconnected cannot happen
            // while it is alive.
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending events, in publish order.
    pub fn drain(&self) -> Vec<PageEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable event publisher.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<PageEvent>,
}

impl EventPublisher {
    /// Publish an event to the bus.
    ///
    /// If the bus has been dropped (page torn down) the send silently fails.
    pub fn publish(&self, event: PageEvent) {
        let _ = self.sender.send(event);
    }
}
