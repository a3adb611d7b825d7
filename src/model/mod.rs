//! Application domain model.
//!
//! This module contains pure data (no platform dependencies): the settings
//! record, geometry value types and configuration constants.
//!
//! Persistence lives behind `platform::SettingsStore`.

pub mod constants;
pub mod geometry;
pub mod settings;

pub use constants::*;
pub use geometry::{BoxModel, ContentSize, Dimensions, Distance, Point, Rect, Sides, Size};
pub use settings::{BoolSetting, Settings, SettingsPatch, Theme};
