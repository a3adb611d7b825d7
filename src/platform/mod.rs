//! Platform seams.
//!
//! The page DOM, the persisted settings record and the cross-context
//! message bus are supplied by the host. Each is a trait here:
//! - `document`: [`Document`], element handles and listener identities
//! - `storage`: [`SettingsStore`]
//! - `messaging`: [`TabMessenger`] and [`BackgroundLink`]
//!
//! Implementations:
//! - `file_store`: JSON settings file for the CLI
//! - `headless`: in-memory document, store, tabs and links

pub mod document;
pub mod file_store;
pub mod headless;
pub mod messaging;
pub mod storage;

pub use document::{is_overlay_element, Document, ElementId, EventKind, Listener, ListenerId};
pub use file_store::JsonFileStore;
pub use messaging::{BackgroundLink, MessageSender, TabId, TabMessenger};
pub use storage::SettingsStore;
