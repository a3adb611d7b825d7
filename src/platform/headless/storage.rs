//! In-memory settings store with failure injection.

use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::platform::SettingsStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Map<String, Value>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record.
    pub fn with_record(record: Map<String, Value>) -> Self {
        Self {
            record,
            ..Self::default()
        }
    }

    /// Make every read fail, as an unavailable sync backend would.
    pub fn fail_reads(mut self, fail: bool) -> Self {
        self.fail_reads = fail;
        self
    }

    /// Make every write fail.
    pub fn fail_writes(mut self, fail: bool) -> Self {
        self.fail_writes = fail;
        self
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }
}

impl SettingsStore for MemoryStore {
    fn read(&self) -> Result<Map<String, Value>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("reads disabled".into()));
        }
        Ok(self.record.clone())
    }

    fn write(&mut self, entries: Map<String, Value>) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }
        self.record.extend(entries);
        Ok(())
    }
}
