//! In-memory storage slots.

use std::collections::HashMap;
use std::sync::RwLock;

use super::Storage;
use crate::error_handling::StorageError;

/// Slots held in a process-local map; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.read().map_err(|_| StorageError::Poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|_| StorageError::Poisoned)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
