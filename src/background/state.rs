//! Coordinator state and broadcast results.

use crate::error::DeliveryError;
use crate::model::Settings;
use crate::platform::TabId;

/// Everything the background knows. Handed out only as a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorState {
    pub settings: Settings,
    /// Last tab reported as focused.
    pub active_tab: Option<TabId>,
}

/// Load status reported by the platform for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStatus {
    Loading,
    Complete,
}

/// Per-tab outcome of a broadcast.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BroadcastReport {
    pub delivered: Vec<TabId>,
    pub failed: Vec<(TabId, DeliveryError)>,
}

impl BroadcastReport {
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty()
    }
}
