use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use vanguard_core::model::UserProgress;

use crate::record::{self, DecodedUser};

/// Key the user record is stored under.
pub const USER_RECORD_KEY: &str = "zenVanguardUser";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the single per-installation user record.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load and decode the stored record.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet. A record that
    /// cannot be parsed is reported through `DecodedUser::status`, not as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_user(&self) -> Result<Option<DecodedUser>, StorageError>;

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be encoded or written.
    async fn save_user(&self, user: &UserProgress) -> Result<(), StorageError>;
}

/// Simple in-memory key/value repository for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed raw stored text, e.g. an older or corrupted record.
    #[must_use]
    pub fn with_raw(self, key: &str, text: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key.to_owned(), text.into());
        }
        self
    }

    /// Raw stored text for `key`, if any.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|guard| guard.get(key).cloned())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_user(&self) -> Result<Option<DecodedUser>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(USER_RECORD_KEY).map(|text| record::decode_user(text)))
    }

    async fn save_user(&self, user: &UserProgress) -> Result<(), StorageError> {
        let text = record::encode_user(user)?;
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(USER_RECORD_KEY.to_owned(), text);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    pub fn from_repository(repo: impl ProgressRepository + 'static) -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self { progress }
    }
}
