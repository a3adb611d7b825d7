//! Settings record (pure Rust, no platform access).
//!
//! `Settings` is the full record persisted by the background coordinator.
//! `SettingsPatch` is the partial map carried by `UPDATE_SETTINGS` and
//! `SETTINGS_UPDATED`; only the fields it names are touched on merge.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::constants::*;
use crate::parse_hex_color;

/// Overlay colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Auto => "auto",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Class applied to themed overlay widgets.
    pub fn class_name(&self) -> String {
        format!("theme-{}", self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete settings record, shared by every context as a copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub is_enabled: bool,
    pub is_paused: bool,
    pub theme: Theme,
    pub show_cursor_position: bool,
    pub interactive_mode: bool,
    pub highlight_color: String,
    pub fixed_color: String,
    pub distance_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_enabled: false,
            is_paused: false,
            theme: Theme::Auto,
            show_cursor_position: false,
            interactive_mode: DEFAULT_INTERACTIVE_MODE,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            fixed_color: DEFAULT_FIXED_COLOR.to_string(),
            distance_color: DEFAULT_DISTANCE_COLOR.to_string(),
        }
    }
}

impl Settings {
    /// Build from a stored record. Missing or malformed keys keep defaults.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let mut settings = Self::default();
        settings.apply(&SettingsPatch::from_record(record));
        settings
    }

    /// Merge a partial update in place. Colours that do not parse are
    /// skipped and the previous value is kept.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        let patch = patch.clone().sanitized();
        if let Some(v) = patch.is_enabled {
            self.is_enabled = v;
        }
        if let Some(v) = patch.is_paused {
            self.is_paused = v;
        }
        if let Some(v) = patch.theme {
            self.theme = v;
        }
        if let Some(v) = patch.show_cursor_position {
            self.show_cursor_position = v;
        }
        if let Some(v) = patch.interactive_mode {
            self.interactive_mode = v;
        }
        if let Some(v) = patch.highlight_color {
            self.highlight_color = v;
        }
        if let Some(v) = patch.fixed_color {
            self.fixed_color = v;
        }
        if let Some(v) = patch.distance_color {
            self.distance_color = v;
        }
    }

    /// Copy with a patch applied.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }

    /// The full record as a patch naming every field.
    pub fn to_patch(&self) -> SettingsPatch {
        SettingsPatch {
            is_enabled: Some(self.is_enabled),
            is_paused: Some(self.is_paused),
            theme: Some(self.theme),
            show_cursor_position: Some(self.show_cursor_position),
            interactive_mode: Some(self.interactive_mode),
            highlight_color: Some(self.highlight_color.clone()),
            fixed_color: Some(self.fixed_color.clone()),
            distance_color: Some(self.distance_color.clone()),
        }
    }

    pub fn get_bool(&self, which: BoolSetting) -> bool {
        match which {
            BoolSetting::ShowCursorPosition => self.show_cursor_position,
            BoolSetting::InteractiveMode => self.interactive_mode,
        }
    }
}

/// Partial settings map. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paused: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_cursor_position: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_color: Option<String>,
}

impl SettingsPatch {
    pub fn enabled(value: bool) -> Self {
        Self {
            is_enabled: Some(value),
            ..Self::default()
        }
    }

    pub fn paused(value: bool) -> Self {
        Self {
            is_paused: Some(value),
            ..Self::default()
        }
    }

    pub fn bool_setting(which: BoolSetting, value: bool) -> Self {
        let mut patch = Self::default();
        match which {
            BoolSetting::ShowCursorPosition => patch.show_cursor_position = Some(value),
            BoolSetting::InteractiveMode => patch.interactive_mode = Some(value),
        }
        patch
    }

    /// Read a stored key-value record one key at a time, so a single bad
    /// value does not discard the rest. Unknown keys are ignored.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        fn field<T: serde::de::DeserializeOwned>(
            record: &Map<String, Value>,
            key: &str,
        ) -> Option<T> {
            let value = record.get(key)?;
            match serde_json::from_value(value.clone()) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!(key, error = %e, "ignoring malformed stored setting");
                    None
                }
            }
        }

        Self {
            is_enabled: field(record, PREF_IS_ENABLED),
            is_paused: field(record, PREF_IS_PAUSED),
            theme: field(record, PREF_THEME),
            show_cursor_position: field(record, PREF_SHOW_CURSOR_POSITION),
            interactive_mode: field(record, PREF_INTERACTIVE_MODE),
            highlight_color: field(record, PREF_HIGHLIGHT_COLOR),
            fixed_color: field(record, PREF_FIXED_COLOR),
            distance_color: field(record, PREF_DISTANCE_COLOR),
        }
    }

    /// Key-value form used by the settings stores.
    pub fn to_record(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Parse one `key=value` pair as typed on the command line.
    pub fn parse_assignment(&mut self, assignment: &str) -> Result<(), String> {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got `{assignment}`"))?;
        let key = key.trim();
        let raw = raw.trim();
        let parse_bool = |s: &str| {
            s.parse::<bool>()
                .map_err(|_| format!("`{key}` expects true or false, got `{s}`"))
        };
        match key {
            PREF_IS_ENABLED => self.is_enabled = Some(parse_bool(raw)?),
            PREF_IS_PAUSED => self.is_paused = Some(parse_bool(raw)?),
            PREF_SHOW_CURSOR_POSITION => self.show_cursor_position = Some(parse_bool(raw)?),
            PREF_INTERACTIVE_MODE => self.interactive_mode = Some(parse_bool(raw)?),
            PREF_THEME => {
                self.theme = Some(
                    serde_json::from_value(Value::String(raw.to_string()))
                        .map_err(|_| format!("unknown theme `{raw}`"))?,
                )
            }
            PREF_HIGHLIGHT_COLOR | PREF_FIXED_COLOR | PREF_DISTANCE_COLOR => {
                if parse_hex_color(raw).is_none() {
                    return Err(format!("`{key}` expects #RRGGBB or #RRGGBBAA, got `{raw}`"));
                }
                let value = Some(raw.to_string());
                match key {
                    PREF_HIGHLIGHT_COLOR => self.highlight_color = value,
                    PREF_FIXED_COLOR => self.fixed_color = value,
                    _ => self.distance_color = value,
                }
            }
            _ => return Err(format!("unknown setting `{key}`")),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Drop colours that are not valid hex.
    pub fn sanitized(mut self) -> Self {
        for (key, slot) in [
            (PREF_HIGHLIGHT_COLOR, &mut self.highlight_color),
            (PREF_FIXED_COLOR, &mut self.fixed_color),
            (PREF_DISTANCE_COLOR, &mut self.distance_color),
        ] {
            if let Some(value) = slot.as_deref() {
                if parse_hex_color(value).is_none() {
                    tracing::warn!(key, value, "rejecting invalid colour");
                    *slot = None;
                }
            }
        }
        self
    }
}

/// Boolean settings the popup exposes as checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolSetting {
    ShowCursorPosition,
    InteractiveMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_documented_record() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "isEnabled": false,
                "isPaused": false,
                "theme": "auto",
                "showCursorPosition": false,
                "interactiveMode": true,
                "highlightColor": "#FF6B6B",
                "fixedColor": "#4ECDC4",
                "distanceColor": "#FFE66D"
            })
        );
    }

    #[test]
    fn patch_serializes_only_named_fields() {
        let patch = SettingsPatch::bool_setting(BoolSetting::ShowCursorPosition, true);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "showCursorPosition": true })
        );
    }

    #[test]
    fn record_with_bad_value_keeps_other_keys() {
        let record = json!({ "isEnabled": "yes", "theme": "dark", "bogus": 1 });
        let settings = Settings::from_record(record.as_object().unwrap());
        assert!(!settings.is_enabled);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn invalid_colour_is_not_applied() {
        let mut settings = Settings::default();
        settings.apply(&SettingsPatch {
            highlight_color: Some("red".into()),
            fixed_color: Some("#000000".into()),
            ..SettingsPatch::default()
        });
        assert_eq!(settings.highlight_color, DEFAULT_HIGHLIGHT_COLOR);
        assert_eq!(settings.fixed_color, "#000000");
    }

    #[test]
    fn parse_assignment_handles_each_kind() {
        let mut patch = SettingsPatch::default();
        patch.parse_assignment("theme=light").unwrap();
        patch.parse_assignment("interactiveMode = false").unwrap();
        patch.parse_assignment("distanceColor=#112233").unwrap();
        assert_eq!(patch.theme, Some(Theme::Light));
        assert_eq!(patch.interactive_mode, Some(false));
        assert_eq!(patch.distance_color.as_deref(), Some("#112233"));

        assert!(patch.parse_assignment("theme=neon").is_err());
        assert!(patch.parse_assignment("isPaused=maybe").is_err());
        assert!(patch.parse_assignment("nope=1").is_err());
        assert!(patch.parse_assignment("missing-equals").is_err());
    }
}
