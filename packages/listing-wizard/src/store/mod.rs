//! Client-side key/value storage and the draft store built on it.
//!
//! - [`KeyValueStore`] - the single-slot-per-key storage contract
//! - [`MemoryStore`] - in-memory store, optionally with a byte quota
//! - [`FileStore`] - one JSON file per key under a directory
//! - [`DraftStore`] - the wizard's draft, persisted best-effort

pub mod draft;
pub mod file;
pub mod memory;

use std::sync::Arc;

use crate::error::StorageResult;

pub use draft::{DraftStore, PersistOutcome};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable string storage keyed by name (the browser `localStorage` shape).
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
