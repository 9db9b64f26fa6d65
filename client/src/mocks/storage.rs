//! Mock storage backends for testing.

use crate::storage::{CredentialStorage, StorageError};

/// Storage whose every operation fails, as when persistent storage is
/// disabled.
#[derive(Debug, Clone, Default)]
pub struct FailingStorage {
    reason: String,
}

impl FailingStorage {
    /// Storage failing with a generic reason.
    #[must_use]
    pub fn new() -> Self {
        Self::with_reason("storage disabled")
    }

    /// Storage failing with the given reason.
    #[must_use]
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, StorageError> {
        Err(StorageError::Unavailable(self.reason.clone()))
    }
}

impl CredentialStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        self.fail()
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.fail()
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        self.fail()
    }
}
