//! Key-value persistence for the session snapshot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store writes through to a [`PersistenceAdapter`] so a page
//! reload can restore the signed-in user. In the browser that is
//! `localStorage`; SSR and tests use the in-memory adapter.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// No storage backend exists in this environment (SSR, private mode).
    #[error("storage unavailable")]
    Unavailable,

    /// The backend refused the operation (quota exceeded, security error).
    #[error("storage error: {0}")]
    Backend(String),
}

/// Synchronous string store keyed by slot name.
pub trait PersistenceAdapter {
    /// Read the value stored under `key`, or `None` when the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the backend rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the backend rejects the removal.
    fn delete(&self, key: &str) -> Result<(), PersistenceError>;
}

/// In-memory adapter. Clones share the same slots, which lets a test hand one
/// clone to a store and inspect (or reuse) the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    /// Seed a raw value under `key`.
    pub fn insert(&self, key: &str, value: &str) {
        self.slots.borrow_mut().insert(key.to_owned(), value.to_owned());
    }
}

impl PersistenceAdapter for MemoryAdapter {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

/// Browser `window.localStorage` adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageAdapter;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, PersistenceError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(PersistenceError::Unavailable)
}

#[cfg(feature = "hydrate")]
fn js_error(err: &wasm_bindgen::JsValue) -> PersistenceError {
    PersistenceError::Backend(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl PersistenceAdapter for LocalStorageAdapter {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(PersistenceError::Unavailable)
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.set_item(key, value).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(PersistenceError::Unavailable)
        }
    }

    fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.remove_item(key).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(PersistenceError::Unavailable)
        }
    }
}
