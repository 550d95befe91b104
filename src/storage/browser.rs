use crate::{storage::KeyValueStore, MapError, Result};
use wasm_bindgen::JsValue;

/// `window.localStorage`
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// Grabs the page's local storage; fails outside a window context or
    /// when the browser blocks storage access
    pub fn local() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| MapError::Storage("no window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| MapError::Storage("localStorage is unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> MapError {
    MapError::Storage(format!("{:?}", value))
}
