//! `window.localStorage` as a [`KeyValueStore`].

use sb_editor::{KeyValueStore, MemoryStore, PersistError};

/// Browser local storage. Every failure (private mode, quota, disabled
/// storage) surfaces as `PersistError::Storage`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl LocalStore {
    /// `None` when there is no window or storage is disabled.
    pub fn open() -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(e) => {
                log::warn!("localStorage unavailable: {e:?}");
                None
            }
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        self.storage
            .get_item(key)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }
}

/// Local storage in the browser, otherwise an in-memory slot so the editor
/// keeps working without durable storage.
pub fn open_store() -> Box<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(store) = LocalStore::open() {
            return Box::new(store);
        }
        crate::console_warn("localStorage unavailable, changes will not be saved");
    }
    Box::new(MemoryStore::new())
}
