//! Persistence of the single login session.
//!
//! The store owns exactly one slot, [`SESSION_KEY`]. `save` overwrites it;
//! `load` reads it afresh on every call so changes made by another process
//! are picked up on next use.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Session;
use crate::domain::ports::{KeyValueStorage, KeyValueStorageError};

/// Storage key holding the serialized session.
pub const SESSION_KEY: &str = "session";

/// Errors raised while saving a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    /// The storage adapter refused the write.
    #[error(transparent)]
    Storage(#[from] KeyValueStorageError),
}

/// Save/load access to the persisted session.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    /// Create a store over `storage`.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persist `session`, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Storage`] when the adapter cannot write.
    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let encoded = serde_json::Value::Object(session.fields().clone()).to_string();
        self.storage.set(SESSION_KEY, &encoded)?;
        debug!(fields = session.fields().len(), "session saved");
        Ok(())
    }

    /// Return the stored session, or `None` when absent or unusable.
    pub fn load(&self) -> Option<Session> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                warn!(error = %error, "session storage unreadable; treating as signed out");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some(session),
            Err(error) => {
                warn!(error = %error, "stored session is corrupt; treating as signed out");
                None
            }
        }
    }
}
