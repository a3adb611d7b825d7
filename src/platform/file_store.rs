//! JSON settings file.
//!
//! Stores the settings record in `ScreenRuler/settings.json` under the user
//! config directory, or wherever `SCREEN_RULER_CONFIG` points.
//!
//! Keeps an in-memory copy of the record so reads never touch the disk;
//! writes merge into the copy and are written through immediately.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::platform::SettingsStore;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "SCREEN_RULER_CONFIG";

/// Settings file path: `$SCREEN_RULER_CONFIG`, else
/// `<config dir>/ScreenRuler/settings.json`.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    let base = std::env::var_os("APPDATA")
        .or_else(|| std::env::var_os("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("ScreenRuler").join("settings.json")
}

/// Settings record persisted as a JSON object.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cache: RefCell<Option<Map<String, Value>>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RefCell::new(None),
        }
    }

    /// Store at [`config_path`].
    pub fn open_default() -> Self {
        Self::new(config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached record, loading from disk if needed.
    fn cached(&self) -> Result<Map<String, Value>, StorageError> {
        if let Some(record) = self.cache.borrow().as_ref() {
            return Ok(record.clone());
        }
        let record = load_from_disk(&self.path)?;
        *self.cache.borrow_mut() = Some(record.clone());
        Ok(record)
    }
}

impl SettingsStore for JsonFileStore {
    fn read(&self) -> Result<Map<String, Value>, StorageError> {
        self.cached()
    }

    fn write(&mut self, entries: Map<String, Value>) -> Result<(), StorageError> {
        // An unreadable file is replaced rather than blocking every write.
        let mut record = self.cached().unwrap_or_default();
        record.extend(entries);
        *self.cache.borrow_mut() = Some(record.clone());
        save_to_disk(&self.path, &record)
    }
}

/// Missing file → empty record; anything else unreadable is an error.
fn load_from_disk(path: &Path) -> Result<Map<String, Value>, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    match serde_json::from_str::<Value>(&contents)? {
        Value::Object(map) => Ok(map),
        _ => Err(StorageError::NotAnObject),
    }
}

fn save_to_disk(path: &Path, record: &Map<String, Value>) -> Result<(), StorageError> {
    let io_err = |source: std::io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json).map_err(io_err)?;
    tracing::debug!(path = %path.display(), "settings written");
    Ok(())
}
