//! Session
//!
//! The session token is the only local signal of authentication. It is
//! written by `Session::begin` (login) and removed by `Session::end`
//! (logout); every outgoing request reads it through `Session::token`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Where the token lives between page loads
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser `localStorage` under a fixed key
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    /// `None` when the browser denies storage access
    pub fn open(key: &str) -> Option<Self> {
        web_sys::window()?.local_storage().ok()??;
        Some(Self { key: key.to_string() })
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl TokenStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        self.storage()?.get_item(&self.key).ok()?
    }

    fn save(&self, token: &str) {
        let written = self.storage().map(|storage| storage.set_item(&self.key, token));
        report_write("persist", written);
    }

    fn clear(&self) {
        let written = self.storage().map(|storage| storage.remove_item(&self.key));
        report_write("remove", written);
    }
}

/// `None` means storage was unreachable. Returns whether the write landed.
fn report_write<E: fmt::Debug>(action: &str, written: Option<Result<(), E>>) -> bool {
    match written {
        Some(Ok(())) => true,
        Some(Err(err)) => {
            log::warn!("[session] could not {} token: {:?}", action, err);
            false
        }
        None => {
            log::warn!("[session] could not {} token: storage unavailable", action);
            false
        }
    }
}

/// Token kept for the lifetime of the page only
#[derive(Default)]
pub struct MemoryStore {
    token: RefCell<Option<String>>,
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self { store: Rc::new(store) }
    }

    /// Session backed by `localStorage`, or memory if storage is unavailable
    pub fn browser(key: &str) -> Self {
        match LocalStorageStore::open(key) {
            Some(store) => Self::new(store),
            None => {
                log::warn!("[session] localStorage unavailable, token will not survive reload");
                Self::new(MemoryStore::default())
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.store.load().filter(|token| !token.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store the token returned by a successful login
    pub fn begin(&self, token: &str) {
        log::info!("[session] signed in");
        self.store.save(token);
    }

    /// Forget the token (logout)
    pub fn end(&self) {
        log::info!("[session] signed out");
        self.store.clear();
    }
}
