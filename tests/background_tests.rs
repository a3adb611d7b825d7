//! Background coordinator: wire handling, broadcast and persistence.

use serde_json::json;

use screen_ruler::background::{Coordinator, TabStatus};
use screen_ruler::events::{PageMessage, Request, Response};
use screen_ruler::model::{SettingsPatch, Theme};
use screen_ruler::platform::headless::{HeadlessTabs, MemoryStore};
use screen_ruler::platform::{JsonFileStore, MessageSender, SettingsStore};
use screen_ruler::DeliveryError;

fn patch(value: serde_json::Value) -> SettingsPatch {
    serde_json::from_value(value).expect("valid patch")
}

#[test]
fn update_then_get_status_round_trip() {
    let mut c = Coordinator::new(MemoryStore::new(), HeadlessTabs::new());
    let response = c.handle_json(
        json!({ "action": "UPDATE_SETTINGS", "data": { "showCursorPosition": true } }),
        MessageSender::POPUP,
    );
    assert_eq!(response, json!({ "success": true }));

    let status = c.handle_json(json!({ "action": "GET_STATUS" }), MessageSender::POPUP);
    assert_eq!(status["isEnabled"], json!(false));
    assert_eq!(status["settings"]["showCursorPosition"], json!(true));
    assert_eq!(status["settings"]["interactiveMode"], json!(true));
    assert_eq!(status["settings"]["theme"], json!("auto"));
}

#[test]
fn unknown_or_malformed_actions_get_an_error() {
    let mut c = Coordinator::new(MemoryStore::new(), HeadlessTabs::new());
    for raw in [
        json!({ "action": "REBOOT" }),
        json!({ "data": {} }),
        json!({ "action": "PAUSE_EXTENSION", "data": { "isPaused": "soon" } }),
    ] {
        assert_eq!(
            c.handle_json(raw, MessageSender::POPUP),
            json!({ "error": "Unknown action" })
        );
    }
    assert_eq!(c.settings(), Coordinator::new(MemoryStore::new(), HeadlessTabs::new()).settings());
}

#[test]
fn broadcast_skips_tabs_without_listener() {
    let tabs = HeadlessTabs::new();
    let (_, first) = tabs.open_tab();
    let dead = tabs.open_tab_without_listener();
    let (_, third) = tabs.open_tab();
    let mut c = Coordinator::new(MemoryStore::new(), tabs);

    let report = c.update_settings(&patch(json!({ "theme": "dark" })));
    assert_eq!(report.delivered.len(), 2);
    assert_eq!(report.failed, vec![(dead, DeliveryError::NoListener(dead))]);
    assert!(!report.all_delivered());

    for inbox in [first, third] {
        match inbox.try_recv() {
            Ok(PageMessage::SettingsUpdated(p)) => assert_eq!(p.theme, Some(Theme::Dark)),
            other => panic!("expected SETTINGS_UPDATED, got {other:?}"),
        }
    }
    assert_eq!(c.settings().theme, Theme::Dark);
}

#[test]
fn write_failures_keep_memory_authoritative() {
    let mut c = Coordinator::new(MemoryStore::new().fail_writes(true), HeadlessTabs::new());
    assert!(c.toggle_extension(MessageSender::POPUP));
    let response = c.handle(Request::pause(true), MessageSender::POPUP);
    assert_eq!(response, Response::ok());

    let status = c.get_status();
    assert!(status.is_enabled);
    assert!(status.settings.is_paused);
    assert!(c.store().record().is_empty());
}

#[test]
fn completed_tab_gets_status_only_when_enabled() {
    let tabs = HeadlessTabs::new();
    let (tab, inbox) = tabs.open_tab();
    let mut c = Coordinator::new(MemoryStore::new(), tabs);

    c.on_tab_updated(tab, TabStatus::Complete);
    assert!(inbox.try_recv().is_err());

    c.update_settings(&SettingsPatch::enabled(true));
    let _ = inbox.try_recv();
    c.on_tab_updated(tab, TabStatus::Loading);
    assert!(inbox.try_recv().is_err());
    c.on_tab_updated(tab, TabStatus::Complete);
    assert!(matches!(
        inbox.try_recv(),
        Ok(PageMessage::UpdateStatus(status)) if status.is_enabled
    ));
}

#[test]
fn open_popup_is_acknowledged() {
    let tabs = HeadlessTabs::new();
    let (tab, _inbox) = tabs.open_tab();
    let mut c = Coordinator::new(MemoryStore::new(), tabs.clone());
    let response = c.handle(Request::OpenPopup, MessageSender::tab(tab));
    assert!(response.is_success());
    assert_eq!(tabs.popup_open_count(), 1);
}

#[test]
fn invalid_colours_are_not_stored_or_broadcast() {
    let tabs = HeadlessTabs::new();
    let (_, inbox) = tabs.open_tab();
    let mut c = Coordinator::new(MemoryStore::new(), tabs);
    let before = c.settings().fixed_color;

    c.update_settings(&patch(json!({ "fixedColor": "tomato", "showCursorPosition": true })));
    assert_eq!(c.settings().fixed_color, before);
    assert!(c.store().record().get("fixedColor").is_none());
    match inbox.try_recv() {
        Ok(PageMessage::SettingsUpdated(p)) => {
            assert_eq!(p.fixed_color, None);
            assert_eq!(p.show_cursor_position, Some(true));
        }
        other => panic!("expected SETTINGS_UPDATED, got {other:?}"),
    }
}

#[test]
fn settings_file_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    {
        let mut c = Coordinator::new(JsonFileStore::new(&path), HeadlessTabs::new());
        c.toggle_extension(MessageSender::POPUP);
        c.update_settings(&patch(json!({ "highlightColor": "#112233", "theme": "light" })));
    }

    let c = Coordinator::new(JsonFileStore::new(&path), HeadlessTabs::new());
    let settings = c.settings();
    assert!(settings.is_enabled);
    assert_eq!(settings.highlight_color, "#112233");
    assert_eq!(settings.theme, Theme::Light);
    assert!(!settings.is_paused);

    let raw = JsonFileStore::new(&path).read().unwrap();
    assert_eq!(raw.len(), 3);
}

#[test]
fn corrupt_settings_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "not json at all").unwrap();

    let mut c = Coordinator::new(JsonFileStore::new(&path), HeadlessTabs::new());
    assert!(!c.settings().is_enabled);
    assert!(c.toggle_extension(MessageSender::POPUP));
    assert!(Coordinator::new(JsonFileStore::new(&path), HeadlessTabs::new())
        .settings()
        .is_enabled);
}
