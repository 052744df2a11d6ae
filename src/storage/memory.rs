use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::storage::{Storage, StorageError};

/// Storage kept in memory. Clones share the same slots so tests can inspect
/// what a store wrote after handing it ownership.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_slot(slot: &str, contents: &str) -> Self {
        let storage = MemoryStorage::new();
        storage
            .slots
            .write()
            .insert(slot.to_owned(), contents.to_owned());
        storage
    }

    pub fn get(&self, slot: &str) -> Option<String> {
        self.slots.read().get(slot).cloned()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(slot))
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<(), StorageError> {
        self.slots
            .write()
            .insert(slot.to_owned(), contents.to_owned());
        Ok(())
    }

    fn remove(&mut self, slot: &str) -> Result<(), StorageError> {
        self.slots.write().remove(slot);
        Ok(())
    }
}
