//! Error types for the platform seams.
//!
//! Neither kind is ever surfaced to the user: storage failures fall back to
//! in-memory values and delivery failures are dropped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::platform::TabId;

/// Reading or writing the persisted settings record failed.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings record must be a JSON object")]
    NotAnObject,

    #[error("settings storage unavailable: {0}")]
    Unavailable(String),
}

/// A message could not be delivered to another context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The tab exists but nothing is listening (no content script, or it
    /// navigated away).
    #[error("tab {0} has no message listener")]
    NoListener(TabId),

    #[error("tab {0} does not exist")]
    NoSuchTab(TabId),

    /// There is no focused tab to address.
    #[error("no active tab")]
    NoActiveTab,

    /// The background side of the link is gone.
    #[error("background context disconnected")]
    Disconnected,

    #[error("unexpected response to {0}")]
    UnexpectedResponse(&'static str),

    #[error("platform refused the request: {0}")]
    Refused(String),
}
