// ============================================================================
// TOKEN STORAGE - Persisted session token
// ============================================================================

use std::cell::RefCell;

use crate::error::StorageError;

/// Holder of the single persisted session token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), StorageError>;
    /// Removes the token. Removing a missing token is not an error.
    fn clear(&self);

    /// A stored, non-empty token counts as a session.
    fn has_token(&self) -> bool {
        self.load().map_or(false, |token| !token.is_empty())
    }
}

/// In-process token store, used off the browser and in tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// Token kept as a raw string in `window.localStorage`
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageTokenStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
pub fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageTokenStore {
    pub fn new() -> Self {
        Self {
            key: crate::utils::STORAGE_KEY_TOKEN,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        get_local_storage()?.get_item(self.key).ok()?
    }

    // Stored raw (not JSON-encoded) so the value stays a bare string
    fn save(&self, token: &str) -> Result<(), StorageError> {
        let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(self.key, token)
            .map_err(|e| StorageError::Write {
                key: self.key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            if storage.remove_item(self.key).is_err() {
                log::warn!("⚠️ Could not remove {} from localStorage", self.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(!store.has_token());

        store.save("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));
        assert!(store.has_token());

        store.clear();
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn empty_token_is_not_a_session() {
        let store = MemoryTokenStore::with_token("");
        assert!(!store.has_token());
    }
}
