//! In-memory tab registry and background link.
//!
//! Each listening tab owns the receiving end of an mpsc channel; the
//! registry keeps the sender. A tab opened without a listener, or whose
//! receiver was dropped, fails delivery just like a browser tab without a
//! content script.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::background::Coordinator;
use crate::error::DeliveryError;
use crate::events::{PageMessage, Request, Response};
use crate::platform::{BackgroundLink, MessageSender, SettingsStore, TabId, TabMessenger};

#[derive(Default)]
struct Registry {
    tabs: BTreeMap<TabId, Option<Sender<PageMessage>>>,
    active: Option<TabId>,
    next_id: u32,
    popup_opens: u32,
}

/// Shared handle to the set of open tabs. Clones see the same tabs.
#[derive(Clone, Default)]
pub struct HeadlessTabs {
    inner: Rc<RefCell<Registry>>,
}

impl HeadlessTabs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a tab with a content script listening on the returned inbox.
    pub fn open_tab(&self) -> (TabId, Receiver<PageMessage>) {
        let (sender, receiver) = mpsc::channel();
        let tab = self.insert(Some(sender));
        (tab, receiver)
    }

    /// Open a tab where nothing listens (e.g. a browser-internal page).
    pub fn open_tab_without_listener(&self) -> TabId {
        self.insert(None)
    }

    pub fn close_tab(&self, tab: TabId) {
        let mut inner = self.inner.borrow_mut();
        inner.tabs.remove(&tab);
        if inner.active == Some(tab) {
            inner.active = None;
        }
    }

    pub fn set_active(&self, tab: TabId) {
        self.inner.borrow_mut().active = Some(tab);
    }

    /// How many times the popup was requested.
    pub fn popup_open_count(&self) -> u32 {
        self.inner.borrow().popup_opens
    }

    fn insert(&self, sender: Option<Sender<PageMessage>>) -> TabId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let tab = TabId(inner.next_id);
        inner.tabs.insert(tab, sender);
        tab
    }
}

impl TabMessenger for HeadlessTabs {
    fn send_to_tab(&self, tab: TabId, message: &PageMessage) -> Result<(), DeliveryError> {
        let inner = self.inner.borrow();
        match inner.tabs.get(&tab) {
            None => Err(DeliveryError::NoSuchTab(tab)),
            Some(None) => Err(DeliveryError::NoListener(tab)),
            Some(Some(sender)) => sender
                .send(message.clone())
                .map_err(|_| DeliveryError::NoListener(tab)),
        }
    }

    fn tabs(&self) -> Vec<TabId> {
        self.inner.borrow().tabs.keys().copied().collect()
    }

    fn active_tab(&self) -> Option<TabId> {
        self.inner.borrow().active
    }

    fn open_popup(&self) -> Result<(), DeliveryError> {
        self.inner.borrow_mut().popup_opens += 1;
        Ok(())
    }
}

/// Link that calls a coordinator in the same process.
pub struct DirectLink<S: SettingsStore, M: TabMessenger> {
    coordinator: Rc<RefCell<Coordinator<S, M>>>,
    sender: MessageSender,
}

impl<S: SettingsStore, M: TabMessenger> DirectLink<S, M> {
    pub fn new(coordinator: Rc<RefCell<Coordinator<S, M>>>, sender: MessageSender) -> Self {
        Self {
            coordinator,
            sender,
        }
    }
}

impl<S: SettingsStore, M: TabMessenger> BackgroundLink for DirectLink<S, M> {
    fn request(&mut self, request: Request) -> Result<Response, DeliveryError> {
        let mut coordinator = self
            .coordinator
            .try_borrow_mut()
            .map_err(|_| DeliveryError::Disconnected)?;
        Ok(coordinator.handle(request, self.sender))
    }
}

/// A link whose background never answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadLink;

impl BackgroundLink for DeadLink {
    fn request(&mut self, _request: Request) -> Result<Response, DeliveryError> {
        Err(DeliveryError::Disconnected)
    }
}
