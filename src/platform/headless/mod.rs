//! Headless platform: the DOM, storage and messaging seams implemented in
//! memory. Used by the CLI and by every test in the crate.

pub mod document;
pub mod layout;
pub mod storage;
pub mod tabs;

pub use document::HeadlessDocument;
pub use layout::{Layout, LayoutElement};
pub use storage::MemoryStore;
pub use tabs::{DeadLink, DirectLink, HeadlessTabs};
