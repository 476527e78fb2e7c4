//! String-keyed storage slots.
//!
//! A slot holds one string value under a name, like browser local storage.
//! The history is serialized as a whole into a single slot.
//!
//! - `FileStorage`: one JSON file per slot inside a directory
//! - `MemoryStorage`: process-local map, for ephemeral sessions and tests

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error_handling::StorageError;

/// A string-keyed slot store.
pub trait Storage {
    /// Reads a slot. Returns `Ok(None)` if the slot has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the content of a slot.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}
