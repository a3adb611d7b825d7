//! Background coordinator.
//!
//! The single authority over settings. Pages and the popup only ever see
//! copies; every change goes through the narrow mutation API below, is
//! persisted (best effort) and pushed to the pages that need to know.

use serde_json::Value;

use super::state::{BroadcastReport, CoordinatorState, TabStatus};
use crate::error::DeliveryError;
use crate::events::{PageMessage, Request, Response, StatusResponse};
use crate::model::{Settings, SettingsPatch};
use crate::platform::{MessageSender, SettingsStore, TabId, TabMessenger};

pub struct Coordinator<S: SettingsStore, M: TabMessenger> {
    state: CoordinatorState,
    store: S,
    messenger: M,
}

impl<S: SettingsStore, M: TabMessenger> Coordinator<S, M> {
    /// Load settings from `store`, falling back to defaults when it cannot
    /// be read.
    pub fn new(store: S, messenger: M) -> Self {
        let settings = match store.load() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "could not load settings, using defaults");
                Settings::default()
            }
        };
        tracing::debug!(enabled = settings.is_enabled, paused = settings.is_paused, "coordinator ready");
        Self {
            state: CoordinatorState {
                settings,
                active_tab: None,
            },
            store,
            messenger,
        }
    }

    // === Reads ===

    pub fn get_status(&self) -> StatusResponse {
        StatusResponse {
            is_enabled: self.state.settings.is_enabled,
            settings: self.state.settings.clone(),
        }
    }

    pub fn settings(&self) -> Settings {
        self.state.settings.clone()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state.clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    // === Mutations ===

    /// Flip the enabled flag and tell the requesting page. Returns the new
    /// value.
    pub fn toggle_extension(&mut self, sender: MessageSender) -> bool {
        let enabled = !self.state.settings.is_enabled;
        self.state.settings.is_enabled = enabled;
        self.persist(&SettingsPatch::enabled(enabled));
        tracing::info!(enabled, "extension toggled");
        self.notify_requester(sender);
        enabled
    }

    /// Merge a partial update and broadcast it to every open page.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> BroadcastReport {
        let patch = patch.clone().sanitized();
        self.state.settings.apply(&patch);
        self.persist(&patch);

        let report = self.broadcast(&PageMessage::SettingsUpdated(patch));
        tracing::debug!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "settings broadcast"
        );
        report
    }

    /// Set the paused flag and tell the requesting page.
    pub fn pause_extension(&mut self, is_paused: bool, sender: MessageSender) {
        self.state.settings.is_paused = is_paused;
        self.persist(&SettingsPatch::paused(is_paused));
        tracing::info!(paused = is_paused, "pause changed");
        self.notify_requester(sender);
    }

    /// Ask the platform to show the popup. Failures are logged and
    /// returned.
    pub fn open_popup(&self) -> Result<(), DeliveryError> {
        self.messenger.open_popup().map_err(|e| {
            tracing::warn!(error = %e, "could not open popup");
            e
        })
    }

    // === Tab lifecycle ===

    pub fn on_tab_activated(&mut self, tab: TabId) {
        self.state.active_tab = Some(tab);
    }

    /// A page finished loading: push the current status when enabled.
    pub fn on_tab_updated(&mut self, tab: TabId, status: TabStatus) {
        if status == TabStatus::Complete && self.state.settings.is_enabled {
            self.notify(tab);
        }
    }

    // === Wire ===

    /// Route one request.
    pub fn handle(&mut self, request: Request, sender: MessageSender) -> Response {
        tracing::debug!(action = request.action(), tab = ?sender.tab, "request");
        match request {
            Request::GetStatus => Response::Status(self.get_status()),
            Request::ToggleExtension => Response::Toggled {
                is_enabled: self.toggle_extension(sender),
            },
            Request::UpdateSettings(patch) => {
                self.update_settings(&patch);
                Response::ok()
            }
            Request::PauseExtension(payload) => {
                self.pause_extension(payload.is_paused, sender);
                Response::ok()
            }
            Request::OpenPopup => Response::Ack {
                success: self.open_popup().is_ok(),
            },
        }
    }

    /// Route a raw JSON message. Anything that does not decode as a
    /// request gets `{"error": "Unknown action"}`.
    pub fn handle_json(&mut self, raw: Value, sender: MessageSender) -> Value {
        let response = match serde_json::from_value::<Request>(raw) {
            Ok(request) => self.handle(request, sender),
            Err(e) => {
                tracing::debug!(error = %e, "undecodable request");
                Response::Error {
                    error: "Unknown action".to_string(),
                }
            }
        };
        serde_json::to_value(response).unwrap_or(Value::Null)
    }

    // === Internals ===

    fn persist(&mut self, patch: &SettingsPatch) {
        if let Err(e) = self.store.save(patch) {
            tracing::warn!(error = %e, "could not persist settings");
        }
    }

    /// Push `UPDATE_STATUS` to `tab`, ignoring pages that do not listen.
    fn notify(&self, tab: TabId) {
        let message = PageMessage::UpdateStatus(self.get_status());
        if let Err(e) = self.messenger.send_to_tab(tab, &message) {
            tracing::debug!(%tab, error = %e, "status not delivered");
        }
    }

    /// Notify the page that sent a request. Popup requests have no tab, so
    /// the focused tab gets the update instead.
    fn notify_requester(&self, sender: MessageSender) {
        let tab = sender
            .tab
            .or(self.state.active_tab)
            .or_else(|| self.messenger.active_tab());
        match tab {
            Some(tab) => self.notify(tab),
            None => tracing::debug!("no tab to notify"),
        }
    }

    fn broadcast(&self, message: &PageMessage) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        for tab in self.messenger.tabs() {
            match self.messenger.send_to_tab(tab, message) {
                Ok(()) => report.delivered.push(tab),
                Err(e) => report.failed.push((tab, e)),
            }
        }
        report
    }
}
