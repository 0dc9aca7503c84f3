/// Persistent key-value store boundary
///
/// The recency cache only needs string get/set under a namespaced key.
/// `Database` implements this over SQLite; `MemoryStore` keeps it in process.

use crate::error::{PaletteError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// In-process store. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| PaletteError::Store(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| PaletteError::Store(e.to_string()))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

impl<S: KeyValueStore> KeyValueStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.as_ref().get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.as_ref().set(key, value).await
    }
}
