//! The persisted key-value settings seam.

use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::model::{Settings, SettingsPatch};

/// A synchronized key-value record holding the settings fields.
pub trait SettingsStore {
    /// Read the whole stored record. Keys never written are simply absent.
    fn read(&self) -> Result<Map<String, Value>, StorageError>;

    /// Merge `entries` into the stored record.
    fn write(&mut self, entries: Map<String, Value>) -> Result<(), StorageError>;

    /// Stored settings with defaults filled in.
    fn load(&self) -> Result<Settings, StorageError> {
        Ok(Settings::from_record(&self.read()?))
    }

    /// Persist only the fields named by `patch`.
    fn save(&mut self, patch: &SettingsPatch) -> Result<(), StorageError> {
        self.write(patch.to_record())
    }
}
