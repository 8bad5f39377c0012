use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Persistent key-value storage that outlives the process, such as the browser's local storage
pub trait TokenStore: Send + Sync {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&self, key: &str, value: &str);
  fn remove(&self, key: &str);
}

/// [`TokenStore`] kept in memory
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl TokenStore for MemoryTokenStore {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner).insert(key.to_owned(), value.to_owned());
  }

  fn remove(&self, key: &str) {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
  }
}

#[cfg(test)]
mod tests {
  use super::{MemoryTokenStore, TokenStore};

  #[test]
  fn set_get_remove() {
    let store = MemoryTokenStore::new();
    assert!(store.is_empty());
    store.set("accessToken", "a");
    store.set("accessToken", "b");
    assert_eq!(store.get("accessToken").as_deref(), Some("b"));
    assert_eq!(store.len(), 1);
    store.remove("accessToken");
    store.remove("accessToken");
    assert_eq!(store.get("accessToken"), None);
  }
}
