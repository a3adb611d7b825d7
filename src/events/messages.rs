//! Wire messages between the background, pages and the popup.
//!
//! Every message is framed as `{"action": "...", "data": ...}`; responses
//! are bare objects whose shape depends on the request.

use serde::{Deserialize, Serialize};

use crate::model::{Settings, SettingsPatch};

/// Requests handled by the background coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    GetStatus,
    ToggleExtension,
    UpdateSettings(SettingsPatch),
    PauseExtension(PausePayload),
    OpenPopup,
}

impl Request {
    pub fn pause(is_paused: bool) -> Self {
        Request::PauseExtension(PausePayload { is_paused })
    }

    /// Wire name, for logging.
    pub fn action(&self) -> &'static str {
        match self {
            Request::GetStatus => "GET_STATUS",
            Request::ToggleExtension => "TOGGLE_EXTENSION",
            Request::UpdateSettings(_) => "UPDATE_SETTINGS",
            Request::PauseExtension(_) => "PAUSE_EXTENSION",
            Request::OpenPopup => "OPEN_POPUP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PausePayload {
    pub is_paused: bool,
}

/// `GET_STATUS` response and `UPDATE_STATUS` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_enabled: bool,
    pub settings: Settings,
}

/// Background responses. The shapes are disjoint so they decode untagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Status(StatusResponse),
    Toggled {
        #[serde(rename = "isEnabled")]
        is_enabled: bool,
    },
    Ack {
        success: bool,
    },
    Error {
        error: String,
    },
}

impl Response {
    pub const fn ok() -> Self {
        Response::Ack { success: true }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Ack { success: true })
    }
}

/// Messages delivered to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageMessage {
    UpdateStatus(StatusResponse),
    SettingsUpdated(SettingsPatch),
    UnfixElement,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_framing() {
        assert_eq!(
            serde_json::to_value(Request::GetStatus).unwrap(),
            json!({ "action": "GET_STATUS" })
        );
        assert_eq!(
            serde_json::to_value(Request::pause(true)).unwrap(),
            json!({ "action": "PAUSE_EXTENSION", "data": { "isPaused": true } })
        );
    }

    #[test]
    fn update_settings_decodes_partial_map() {
        let req: Request = serde_json::from_value(json!({
            "action": "UPDATE_SETTINGS",
            "data": { "showCursorPosition": true, "unknownKey": 3 }
        }))
        .unwrap();
        match req {
            Request::UpdateSettings(patch) => {
                assert_eq!(patch.show_cursor_position, Some(true));
                assert_eq!(patch.theme, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn responses_decode_untagged() {
        let toggled: Response = serde_json::from_value(json!({ "isEnabled": true })).unwrap();
        assert_eq!(toggled, Response::Toggled { is_enabled: true });

        let ack: Response = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(ack.is_success());

        let status: Response = serde_json::from_value(json!({
            "isEnabled": false,
            "settings": {}
        }))
        .unwrap();
        assert!(matches!(status, Response::Status(s) if s.settings == Settings::default()));
    }

    #[test]
    fn unfix_has_no_payload() {
        assert_eq!(
            serde_json::to_value(PageMessage::UnfixElement).unwrap(),
            json!({ "action": "UNFIX_ELEMENT" })
        );
    }
}
