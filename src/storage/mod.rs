//! Key-value persistence backends.
//!
//! Backends store raw strings; encoding the marker list is the store's job,
//! not the backend's. Every call is fallible because real backends (disk,
//! browser quota) can refuse a read or a write.

use crate::Result;

#[cfg(feature = "wasm")]
pub mod browser;
pub mod file;
pub mod memory;

pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`; deleting an absent key succeeds
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
