//! Bearer credential store.
//!
//! The credential is created on login, read for every outgoing request and
//! cleared on logout or when the server rejects it. Storage failures never
//! surface to callers: they are logged and treated as "no token".

use crate::storage::{CredentialStorage, MemoryStorage};
use std::fmt;
use std::sync::Arc;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "AY_AUTH_TOKEN";

/// Bearer token persistence over an injected [`CredentialStorage`].
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
}

impl TokenStore {
    /// Wrap a storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn CredentialStorage>) -> Self {
        Self { storage }
    }

    /// Token store backed by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Persist the token. Failures are logged and swallowed.
    pub fn save(&self, token: &str) {
        if let Err(error) = self.storage.set(TOKEN_KEY, token) {
            tracing::warn!(%error, "Failed to save auth token");
        }
    }

    /// Stored token, or `None` when absent or unreadable.
    #[must_use]
    pub fn read(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(error) => {
                tracing::warn!(%error, "Failed to read auth token");
                None
            }
        }
    }

    /// Delete the token. Failures are logged and swallowed.
    pub fn remove(&self) {
        if let Err(error) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(%error, "Failed to remove auth token");
        }
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_token", &self.read().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::FailingStorage;

    #[test]
    fn test_save_read_remove() {
        let store = TokenStore::in_memory();
        assert_eq!(store.read(), None);

        store.save("T");
        assert_eq!(store.read().as_deref(), Some("T"));

        store.remove();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_token_is_not_validated() {
        let store = TokenStore::in_memory();
        store.save("");
        assert_eq!(store.read().as_deref(), Some(""));
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let store = TokenStore::new(Arc::new(FailingStorage::new()));

        store.save("T");
        assert_eq!(store.read(), None);
        store.remove();
    }

    #[test]
    fn test_clones_share_storage() {
        let store = TokenStore::in_memory();
        let other = store.clone();

        store.save("shared");
        assert_eq!(other.read().as_deref(), Some("shared"));
    }
}
