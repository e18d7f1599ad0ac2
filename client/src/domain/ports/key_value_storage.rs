//! Driven port for the origin-scoped persistent key/value slot.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::define_port_error;

define_port_error! {
    /// Errors raised by key/value storage adapters.
    pub enum KeyValueStorageError {
        /// The stored value exists but could not be read.
        Read { key: String, message: String } =>
            "failed to read '{key}': {message}",
        /// The value could not be written.
        Write { key: String, message: String } =>
            "failed to write '{key}': {message}",
        /// The key cannot be used as a storage slot name.
        InvalidKey { key: String } =>
            "invalid storage key '{key}'",
    }
}

/// Persistent string slots surviving across process runs.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage: Send + Sync {
    /// Return the value stored under `key`, or `None` when the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStorageError>;
}

/// Volatile storage for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots currently holding a value.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no slot holds a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for InMemoryKeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStorageError> {
        Ok(self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStorageError> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
