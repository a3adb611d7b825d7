//! The cross-context message bus seam.
//!
//! Pages and the popup talk to the background through a [`BackgroundLink`];
//! the background and the popup reach pages through a [`TabMessenger`].
//! Delivery is best effort: a tab without a listener fails, and callers
//! decide whether that matters (it almost never does).

use std::fmt;

use crate::error::DeliveryError;
use crate::events::{PageMessage, Request, Response};

/// Identifier of a browser tab hosting a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who sent a request to the background. The popup has no tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageSender {
    pub tab: Option<TabId>,
}

impl MessageSender {
    pub const POPUP: Self = Self { tab: None };

    pub const fn tab(tab: TabId) -> Self {
        Self { tab: Some(tab) }
    }
}

/// Sends fire-and-forget messages to pages.
pub trait TabMessenger {
    fn send_to_tab(&self, tab: TabId, message: &PageMessage) -> Result<(), DeliveryError>;

    /// Every open tab, listening or not.
    fn tabs(&self) -> Vec<TabId>;

    /// The focused tab of the current window.
    fn active_tab(&self) -> Option<TabId>;

    /// Ask the browser to show the popup.
    fn open_popup(&self) -> Result<(), DeliveryError>;
}

/// Request/response channel to the background coordinator.
pub trait BackgroundLink {
    fn request(&mut self, request: Request) -> Result<Response, DeliveryError>;
}
