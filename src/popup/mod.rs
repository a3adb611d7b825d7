//! Toolbar popup.
//!
//! The popup is short-lived: it mirrors the background's state when opened,
//! forwards the user's clicks as requests and renders a [`PopupView`] from
//! its mirror. It never owns state the background does not also have.

use crate::app::PageState;
use crate::error::DeliveryError;
use crate::events::{PageMessage, Request, Response};
use crate::model::constants::{
    BUTTON_TEXT_PAUSE, BUTTON_TEXT_RESUME, STATUS_TEXT_ACTIVE, STATUS_TEXT_DISABLED,
    STATUS_TEXT_PAUSED,
};
use crate::model::{BoolSetting, Settings, SettingsPatch};
use crate::platform::{BackgroundLink, TabMessenger};

/// Everything the popup shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub toggle_on: bool,
    pub status: PageState,
    pub status_text: &'static str,
    pub pause_label: &'static str,
    pub pause_enabled: bool,
    pub unfix_enabled: bool,
    pub show_cursor_position: bool,
    pub interactive_mode: bool,
}

pub struct PopupController<L: BackgroundLink, M: TabMessenger> {
    link: L,
    tabs: M,
    is_enabled: bool,
    is_paused: bool,
    settings: Settings,
}

impl<L: BackgroundLink, M: TabMessenger> PopupController<L, M> {
    pub fn new(link: L, tabs: M) -> Self {
        Self {
            link,
            tabs,
            is_enabled: false,
            is_paused: false,
            settings: Settings::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mirror the background's status.
    pub fn load_status(&mut self) -> Result<(), DeliveryError> {
        match self.link.request(Request::GetStatus)? {
            Response::Status(status) => {
                self.is_enabled = status.is_enabled;
                self.is_paused = status.settings.is_paused;
                self.settings = status.settings;
                Ok(())
            }
            other => Err(unexpected("GET_STATUS", other)),
        }
    }

    pub fn toggle_extension(&mut self) -> Result<bool, DeliveryError> {
        match self.link.request(Request::ToggleExtension)? {
            Response::Toggled { is_enabled } => {
                self.is_enabled = is_enabled;
                self.settings.is_enabled = is_enabled;
                Ok(is_enabled)
            }
            other => Err(unexpected("TOGGLE_EXTENSION", other)),
        }
    }

    pub fn toggle_pause(&mut self) -> Result<(), DeliveryError> {
        let paused = !self.is_paused;
        self.expect_ack(Request::pause(paused), "PAUSE_EXTENSION")?;
        self.is_paused = paused;
        self.settings.is_paused = paused;
        Ok(())
    }

    /// Tell the focused page to drop its fixed element.
    pub fn unfix_element(&self) -> Result<(), DeliveryError> {
        let tab = self.tabs.active_tab().ok_or(DeliveryError::NoActiveTab)?;
        self.tabs.send_to_tab(tab, &PageMessage::UnfixElement)
    }

    pub fn disable_extension(&mut self) -> Result<(), DeliveryError> {
        self.expect_ack(
            Request::UpdateSettings(SettingsPatch::enabled(false)),
            "UPDATE_SETTINGS",
        )?;
        self.is_enabled = false;
        self.settings.is_enabled = false;
        Ok(())
    }

    /// Flip one checkbox setting.
    pub fn toggle_setting(&mut self, which: BoolSetting) -> Result<bool, DeliveryError> {
        let value = !self.settings.get_bool(which);
        let patch = SettingsPatch::bool_setting(which, value);
        self.expect_ack(Request::UpdateSettings(patch.clone()), "UPDATE_SETTINGS")?;
        self.settings.apply(&patch);
        Ok(value)
    }

    pub fn view(&self) -> PopupView {
        let status = if !self.is_enabled {
            PageState::Disabled
        } else if self.is_paused {
            PageState::Paused
        } else {
            PageState::Active
        };
        PopupView {
            toggle_on: self.is_enabled,
            status,
            status_text: match status {
                PageState::Active => STATUS_TEXT_ACTIVE,
                PageState::Paused => STATUS_TEXT_PAUSED,
                PageState::Disabled => STATUS_TEXT_DISABLED,
            },
            pause_label: if self.is_paused {
                BUTTON_TEXT_RESUME
            } else {
                BUTTON_TEXT_PAUSE
            },
            pause_enabled: self.is_enabled,
            unfix_enabled: self.is_enabled,
            show_cursor_position: self.settings.show_cursor_position,
            interactive_mode: self.settings.interactive_mode,
        }
    }

    fn expect_ack(&mut self, request: Request, action: &'static str) -> Result<(), DeliveryError> {
        match self.link.request(request)? {
            response if response.is_success() => Ok(()),
            other => Err(unexpected(action, other)),
        }
    }
}

fn unexpected(action: &'static str, response: Response) -> DeliveryError {
    tracing::warn!(action, ?response, "unexpected response");
    DeliveryError::UnexpectedResponse(action)
}
